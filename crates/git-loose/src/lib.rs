//! Loose object storage: read, write, and enumerate zlib-compressed objects.
//!
//! Each loose object lives at `.git/objects/XX/YYYY...` where `XX` is the first
//! byte of the OID in hex and `YYYY...` is the rest. The file content is
//! zlib-compressed `"<type> <size>\0<content>"`.

mod enumerate;
mod read;
mod stream;
mod write;

pub use enumerate::LooseObjectIter;
pub use stream::LooseObjectStream;

use git_hash::{HashAlgorithm, ObjectId};
use git_utils::backend::{FilesystemBackend, StorageBackend};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Interface to the loose object directory (`.git/objects/`).
pub struct LooseObjectStore {
    /// Path to the objects directory.
    objects_dir: PathBuf,
    /// Hash algorithm in use.
    hash_algo: HashAlgorithm,
    /// Zlib compression level.
    compression_level: flate2::Compression,
    /// Storage backend that actually reads and writes loose objects.
    backend: Arc<dyn StorageBackend>,
}

impl LooseObjectStore {
    /// Open the loose object store at the given path, backed by the filesystem.
    pub fn open(objects_dir: impl AsRef<Path>, hash_algo: HashAlgorithm) -> Self {
        let objects_dir = objects_dir.as_ref().to_path_buf();
        let backend = Arc::new(FilesystemBackend::new(&objects_dir, &objects_dir));
        Self::with_backend(objects_dir, hash_algo, backend)
    }

    /// Open the loose object store against an injected storage backend
    /// (e.g. an in-memory backend for tests).
    pub fn with_backend(
        objects_dir: impl AsRef<Path>,
        hash_algo: HashAlgorithm,
        backend: Arc<dyn StorageBackend>,
    ) -> Self {
        Self {
            objects_dir: objects_dir.as_ref().to_path_buf(),
            hash_algo,
            compression_level: flate2::Compression::default(),
            backend,
        }
    }

    /// Set the zlib compression level (0–9).
    pub fn set_compression_level(&mut self, level: u32) {
        self.compression_level = flate2::Compression::new(level);
    }

    /// Get the hash algorithm in use.
    pub fn hash_algo(&self) -> HashAlgorithm {
        self.hash_algo
    }

    /// Get the file path for a given OID.
    pub fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.objects_dir.join(oid.loose_path())
    }
}

/// Errors from loose object operations.
#[derive(Debug, thiserror::Error)]
pub enum LooseError {
    #[error("corrupt loose object {oid}: {reason}")]
    Corrupt { oid: String, reason: String },

    #[error("decompression error for {oid}: {source}")]
    Decompress {
        oid: String,
        #[source]
        source: std::io::Error,
    },

    #[error("hash mismatch for {path}: expected {expected}, got {actual}")]
    HashMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("object parse error: {0}")]
    Object(#[from] git_object::ObjectError),

    #[error("hash error: {0}")]
    Hash(#[from] git_hash::HashError),

    #[error("storage backend error: {0}")]
    Backend(#[from] git_utils::backend::BackendError),
}
