//! Storage backend facade.
//!
//! Every disk operation the loose-object store, ref store, index store,
//! and packfile machinery perform ultimately reduces to a small set of
//! named reads/writes against paths rooted at the git directory. This
//! module names that set as a trait so the same surface can be backed by
//! the filesystem or, for tests and in-process scenarios, by plain maps.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, RwLock};

use git_hash::ObjectId;

use crate::lockfile::LockFile;

/// Errors from a storage backend operation.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Lock(#[from] crate::UtilError),
}

/// One of the well-known per-repository state files that live at the
/// git directory root for the duration of an in-progress operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateFile {
    MergeHead,
    MergeMode,
    MergeMsg,
    OrigHead,
    FetchHead,
    CherryPickHead,
    RevertHead,
    SequencerTodo,
    BisectLog,
}

impl StateFile {
    pub fn filename(&self) -> &'static str {
        match self {
            Self::MergeHead => "MERGE_HEAD",
            Self::MergeMode => "MERGE_MODE",
            Self::MergeMsg => "MERGE_MSG",
            Self::OrigHead => "ORIG_HEAD",
            Self::FetchHead => "FETCH_HEAD",
            Self::CherryPickHead => "CHERRY_PICK_HEAD",
            Self::RevertHead => "REVERT_HEAD",
            Self::SequencerTodo => "sequencer/todo",
            Self::BisectLog => "BISECT_LOG",
        }
    }
}

/// The named storage operations every filesystem-touching component
/// (loose objects, packfiles, refs, the index, state files, config)
/// ultimately performs.
///
/// All methods operate on raw bytes; parsing and validation (object
/// headers, ref targets, index entries) stay in the component that owns
/// that format. Writes that the filesystem backend performs atomically
/// are documented as such per method.
pub trait StorageBackend: Send + Sync {
    /// Read a loose object's raw (compressed) bytes by OID. `None` if absent.
    fn read_loose_object(&self, oid: &ObjectId) -> Result<Option<Vec<u8>>, BackendError>;
    /// Write a loose object's raw (compressed) bytes atomically.
    fn write_loose_object(&self, oid: &ObjectId, data: &[u8]) -> Result<(), BackendError>;
    /// Whether a loose object exists for this OID.
    fn has_loose_object(&self, oid: &ObjectId) -> Result<bool, BackendError>;
    /// List every loose object OID, sorted.
    fn list_loose_objects(&self) -> Result<Vec<ObjectId>, BackendError>;

    /// List packfile base names (without extension) under `objects/pack`.
    fn list_packfiles(&self) -> Result<Vec<String>, BackendError>;
    /// Read a packfile's raw bytes by base name.
    fn read_packfile(&self, name: &str) -> Result<Vec<u8>, BackendError>;
    /// Write a packfile's raw bytes atomically.
    fn write_packfile(&self, name: &str, data: &[u8]) -> Result<(), BackendError>;
    /// Read a pack index's raw bytes by base name.
    fn read_pack_index(&self, name: &str) -> Result<Vec<u8>, BackendError>;
    /// Write a pack index's raw bytes atomically.
    fn write_pack_index(&self, name: &str, data: &[u8]) -> Result<(), BackendError>;

    /// Read the raw contents of `HEAD`.
    fn read_head(&self) -> Result<String, BackendError>;
    /// Write the raw contents of `HEAD` atomically.
    fn write_head(&self, content: &str) -> Result<(), BackendError>;

    /// Read a loose direct ref's raw target line (hex OID), if the ref
    /// exists as a loose file.
    fn read_ref(&self, name: &str) -> Result<Option<String>, BackendError>;
    /// Write a loose direct ref's target atomically.
    fn write_ref(&self, name: &str, oid: &ObjectId) -> Result<(), BackendError>;
    /// Delete a loose ref file.
    fn delete_ref(&self, name: &str) -> Result<(), BackendError>;
    /// List loose ref names under `refs/`, sorted.
    fn list_refs(&self, prefix: Option<&str>) -> Result<Vec<String>, BackendError>;

    /// Read a loose symbolic ref's target name, if the ref is symbolic.
    fn read_symbolic_ref(&self, name: &str) -> Result<Option<String>, BackendError>;
    /// Write a loose symbolic ref atomically.
    fn write_symbolic_ref(&self, name: &str, target: &str) -> Result<(), BackendError>;

    /// Read the raw `packed-refs` file contents, if present.
    fn read_packed_refs(&self) -> Result<Option<Vec<u8>>, BackendError>;
    /// Write the `packed-refs` file atomically.
    fn write_packed_refs(&self, data: &[u8]) -> Result<(), BackendError>;

    /// Read the raw index file contents, if present.
    fn read_index(&self) -> Result<Option<Vec<u8>>, BackendError>;
    /// Write the index file atomically.
    fn write_index(&self, data: &[u8]) -> Result<(), BackendError>;

    /// Read a ref's reflog, if present.
    fn read_reflog(&self, name: &str) -> Result<Option<Vec<u8>>, BackendError>;
    /// Append one already-formatted reflog line to a ref's reflog.
    fn append_reflog(&self, name: &str, line: &[u8]) -> Result<(), BackendError>;
    /// Overwrite a ref's entire reflog.
    fn write_reflog(&self, name: &str, data: &[u8]) -> Result<(), BackendError>;
    /// List ref names that have a reflog.
    fn list_reflogs(&self) -> Result<Vec<String>, BackendError>;

    /// Read a state file's contents, if present.
    fn read_state_file(&self, kind: StateFile) -> Result<Option<Vec<u8>>, BackendError>;
    /// Write a state file's contents atomically.
    fn write_state_file(&self, kind: StateFile, data: &[u8]) -> Result<(), BackendError>;
    /// Delete a state file if present (no error if absent).
    fn delete_state_file(&self, kind: StateFile) -> Result<(), BackendError>;

    /// Read the raw local `config` file contents, if present.
    fn read_config(&self) -> Result<Option<Vec<u8>>, BackendError>;
    /// Write the local `config` file atomically.
    fn write_config(&self, data: &[u8]) -> Result<(), BackendError>;
}

fn atomic_write(path: &Path, data: &[u8]) -> Result<(), BackendError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut lock = LockFile::acquire(path)?;
    std::io::Write::write_all(&mut lock, data)?;
    lock.commit()?;
    Ok(())
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, BackendError> {
    match fs::read(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn list_files_recursive(root: &Path, prefix: &Path) -> Result<Vec<String>, BackendError> {
    let mut names = Vec::new();
    if !root.is_dir() {
        return Ok(names);
    }
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        let rel = prefix.join(entry.file_name());
        if path.is_dir() {
            names.extend(list_files_recursive(&path, &rel)?);
        } else {
            names.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }
    Ok(names)
}

/// Filesystem-backed storage, rooted at a git directory.
///
/// Honors the `objects/xx/rest` loose-object layout and commits every
/// write via the lock-file temp+rename protocol.
pub struct FilesystemBackend {
    git_dir: PathBuf,
    objects_dir: PathBuf,
}

impl FilesystemBackend {
    pub fn new(git_dir: impl Into<PathBuf>, objects_dir: impl Into<PathBuf>) -> Self {
        Self {
            git_dir: git_dir.into(),
            objects_dir: objects_dir.into(),
        }
    }

    fn ref_path(&self, name: &str) -> PathBuf {
        self.git_dir.join(name)
    }
}

impl StorageBackend for FilesystemBackend {
    fn read_loose_object(&self, oid: &ObjectId) -> Result<Option<Vec<u8>>, BackendError> {
        read_optional(&self.objects_dir.join(oid.loose_path()))
    }

    fn write_loose_object(&self, oid: &ObjectId, data: &[u8]) -> Result<(), BackendError> {
        atomic_write(&self.objects_dir.join(oid.loose_path()), data)
    }

    fn has_loose_object(&self, oid: &ObjectId) -> Result<bool, BackendError> {
        Ok(self.objects_dir.join(oid.loose_path()).is_file())
    }

    fn list_loose_objects(&self) -> Result<Vec<ObjectId>, BackendError> {
        let mut oids = Vec::new();
        if !self.objects_dir.is_dir() {
            return Ok(oids);
        }
        for entry in fs::read_dir(&self.objects_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.len() != 2 || !name.chars().all(|c| c.is_ascii_hexdigit()) {
                continue;
            }
            if !entry.file_type()?.is_dir() {
                continue;
            }
            for sub in fs::read_dir(entry.path())? {
                let sub = sub?;
                if !sub.file_type()?.is_file() {
                    continue;
                }
                let rest = sub.file_name();
                let rest = rest.to_string_lossy();
                if !rest.chars().all(|c| c.is_ascii_hexdigit()) {
                    continue;
                }
                if let Ok(oid) = ObjectId::from_hex(&format!("{name}{rest}")) {
                    oids.push(oid);
                }
            }
        }
        oids.sort();
        Ok(oids)
    }

    fn list_packfiles(&self) -> Result<Vec<String>, BackendError> {
        let pack_dir = self.objects_dir.join("pack");
        if !pack_dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut names: Vec<String> = fs::read_dir(&pack_dir)?
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter_map(|n| n.strip_suffix(".pack").map(str::to_string))
            .collect();
        names.sort();
        Ok(names)
    }

    fn read_packfile(&self, name: &str) -> Result<Vec<u8>, BackendError> {
        let path = self.objects_dir.join("pack").join(format!("{name}.pack"));
        fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BackendError::NotFound(path.display().to_string())
            } else {
                e.into()
            }
        })
    }

    fn write_packfile(&self, name: &str, data: &[u8]) -> Result<(), BackendError> {
        atomic_write(&self.objects_dir.join("pack").join(format!("{name}.pack")), data)
    }

    fn read_pack_index(&self, name: &str) -> Result<Vec<u8>, BackendError> {
        let path = self.objects_dir.join("pack").join(format!("{name}.idx"));
        fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BackendError::NotFound(path.display().to_string())
            } else {
                e.into()
            }
        })
    }

    fn write_pack_index(&self, name: &str, data: &[u8]) -> Result<(), BackendError> {
        atomic_write(&self.objects_dir.join("pack").join(format!("{name}.idx")), data)
    }

    fn read_head(&self) -> Result<String, BackendError> {
        fs::read_to_string(self.git_dir.join("HEAD")).map_err(Into::into)
    }

    fn write_head(&self, content: &str) -> Result<(), BackendError> {
        atomic_write(&self.git_dir.join("HEAD"), content.as_bytes())
    }

    fn read_ref(&self, name: &str) -> Result<Option<String>, BackendError> {
        match fs::read_to_string(self.ref_path(name)) {
            Ok(s) => Ok(Some(s.trim().to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_ref(&self, name: &str, oid: &ObjectId) -> Result<(), BackendError> {
        atomic_write(&self.ref_path(name), format!("{}\n", oid.to_hex()).as_bytes())
    }

    fn delete_ref(&self, name: &str) -> Result<(), BackendError> {
        let path = self.ref_path(name);
        if path.is_file() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn list_refs(&self, prefix: Option<&str>) -> Result<Vec<String>, BackendError> {
        let root = self.git_dir.join("refs");
        let mut names: Vec<String> = list_files_recursive(&root, Path::new("refs"))?;
        if let Some(prefix) = prefix {
            names.retain(|n| n.starts_with(prefix));
        }
        names.sort();
        Ok(names)
    }

    fn read_symbolic_ref(&self, name: &str) -> Result<Option<String>, BackendError> {
        match fs::read_to_string(self.ref_path(name)) {
            Ok(s) => {
                let trimmed = s.trim();
                Ok(trimmed.strip_prefix("ref: ").map(str::to_string))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_symbolic_ref(&self, name: &str, target: &str) -> Result<(), BackendError> {
        atomic_write(&self.ref_path(name), format!("ref: {target}\n").as_bytes())
    }

    fn read_packed_refs(&self) -> Result<Option<Vec<u8>>, BackendError> {
        read_optional(&self.git_dir.join("packed-refs"))
    }

    fn write_packed_refs(&self, data: &[u8]) -> Result<(), BackendError> {
        atomic_write(&self.git_dir.join("packed-refs"), data)
    }

    fn read_index(&self) -> Result<Option<Vec<u8>>, BackendError> {
        read_optional(&self.git_dir.join("index"))
    }

    fn write_index(&self, data: &[u8]) -> Result<(), BackendError> {
        atomic_write(&self.git_dir.join("index"), data)
    }

    fn read_reflog(&self, name: &str) -> Result<Option<Vec<u8>>, BackendError> {
        read_optional(&self.git_dir.join("logs").join(name))
    }

    fn append_reflog(&self, name: &str, line: &[u8]) -> Result<(), BackendError> {
        let path = self.git_dir.join("logs").join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        use std::io::Write;
        let mut file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(line)?;
        Ok(())
    }

    fn write_reflog(&self, name: &str, data: &[u8]) -> Result<(), BackendError> {
        atomic_write(&self.git_dir.join("logs").join(name), data)
    }

    fn list_reflogs(&self) -> Result<Vec<String>, BackendError> {
        let root = self.git_dir.join("logs");
        let mut names = list_files_recursive(&root, Path::new(""))?;
        names.sort();
        Ok(names)
    }

    fn read_state_file(&self, kind: StateFile) -> Result<Option<Vec<u8>>, BackendError> {
        read_optional(&self.git_dir.join(kind.filename()))
    }

    fn write_state_file(&self, kind: StateFile, data: &[u8]) -> Result<(), BackendError> {
        atomic_write(&self.git_dir.join(kind.filename()), data)
    }

    fn delete_state_file(&self, kind: StateFile) -> Result<(), BackendError> {
        let path = self.git_dir.join(kind.filename());
        if path.is_file() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn read_config(&self) -> Result<Option<Vec<u8>>, BackendError> {
        read_optional(&self.git_dir.join("config"))
    }

    fn write_config(&self, data: &[u8]) -> Result<(), BackendError> {
        atomic_write(&self.git_dir.join("config"), data)
    }
}

#[derive(Default)]
struct InMemoryState {
    loose: HashMap<ObjectId, Vec<u8>>,
    packfiles: HashMap<String, Vec<u8>>,
    pack_indices: HashMap<String, Vec<u8>>,
    head: Option<String>,
    refs: HashMap<String, String>,
    symbolic_refs: HashMap<String, String>,
    packed_refs: Option<Vec<u8>>,
    index: Option<Vec<u8>>,
    reflogs: HashMap<String, Vec<u8>>,
    state_files: HashMap<&'static str, Vec<u8>>,
    config: Option<Vec<u8>>,
}

/// In-memory storage with the same semantics as [`FilesystemBackend`],
/// backed by plain maps. Used for tests and for in-process repositories
/// that never touch disk.
#[derive(Default)]
pub struct InMemoryBackend {
    state: RwLock<InMemoryState>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for InMemoryBackend {
    fn read_loose_object(&self, oid: &ObjectId) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.state.read().unwrap().loose.get(oid).cloned())
    }

    fn write_loose_object(&self, oid: &ObjectId, data: &[u8]) -> Result<(), BackendError> {
        self.state.write().unwrap().loose.insert(*oid, data.to_vec());
        Ok(())
    }

    fn has_loose_object(&self, oid: &ObjectId) -> Result<bool, BackendError> {
        Ok(self.state.read().unwrap().loose.contains_key(oid))
    }

    fn list_loose_objects(&self) -> Result<Vec<ObjectId>, BackendError> {
        let mut oids: Vec<ObjectId> = self.state.read().unwrap().loose.keys().copied().collect();
        oids.sort();
        Ok(oids)
    }

    fn list_packfiles(&self) -> Result<Vec<String>, BackendError> {
        let mut names: Vec<String> = self.state.read().unwrap().packfiles.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn read_packfile(&self, name: &str) -> Result<Vec<u8>, BackendError> {
        self.state
            .read()
            .unwrap()
            .packfiles
            .get(name)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(name.to_string()))
    }

    fn write_packfile(&self, name: &str, data: &[u8]) -> Result<(), BackendError> {
        self.state.write().unwrap().packfiles.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn read_pack_index(&self, name: &str) -> Result<Vec<u8>, BackendError> {
        self.state
            .read()
            .unwrap()
            .pack_indices
            .get(name)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(name.to_string()))
    }

    fn write_pack_index(&self, name: &str, data: &[u8]) -> Result<(), BackendError> {
        self.state.write().unwrap().pack_indices.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn read_head(&self) -> Result<String, BackendError> {
        self.state
            .read()
            .unwrap()
            .head
            .clone()
            .ok_or_else(|| BackendError::NotFound("HEAD".to_string()))
    }

    fn write_head(&self, content: &str) -> Result<(), BackendError> {
        self.state.write().unwrap().head = Some(content.to_string());
        Ok(())
    }

    fn read_ref(&self, name: &str) -> Result<Option<String>, BackendError> {
        Ok(self.state.read().unwrap().refs.get(name).cloned())
    }

    fn write_ref(&self, name: &str, oid: &ObjectId) -> Result<(), BackendError> {
        let mut state = self.state.write().unwrap();
        state.refs.insert(name.to_string(), oid.to_hex());
        state.symbolic_refs.remove(name);
        Ok(())
    }

    fn delete_ref(&self, name: &str) -> Result<(), BackendError> {
        let mut state = self.state.write().unwrap();
        state.refs.remove(name);
        state.symbolic_refs.remove(name);
        Ok(())
    }

    fn list_refs(&self, prefix: Option<&str>) -> Result<Vec<String>, BackendError> {
        let state = self.state.read().unwrap();
        let mut names: Vec<String> = state
            .refs
            .keys()
            .chain(state.symbolic_refs.keys())
            .filter(|n| n.starts_with("refs/"))
            .filter(|n| prefix.map(|p| n.starts_with(p)).unwrap_or(true))
            .cloned()
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn read_symbolic_ref(&self, name: &str) -> Result<Option<String>, BackendError> {
        Ok(self.state.read().unwrap().symbolic_refs.get(name).cloned())
    }

    fn write_symbolic_ref(&self, name: &str, target: &str) -> Result<(), BackendError> {
        let mut state = self.state.write().unwrap();
        state.symbolic_refs.insert(name.to_string(), target.to_string());
        state.refs.remove(name);
        Ok(())
    }

    fn read_packed_refs(&self) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.state.read().unwrap().packed_refs.clone())
    }

    fn write_packed_refs(&self, data: &[u8]) -> Result<(), BackendError> {
        self.state.write().unwrap().packed_refs = Some(data.to_vec());
        Ok(())
    }

    fn read_index(&self) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.state.read().unwrap().index.clone())
    }

    fn write_index(&self, data: &[u8]) -> Result<(), BackendError> {
        self.state.write().unwrap().index = Some(data.to_vec());
        Ok(())
    }

    fn read_reflog(&self, name: &str) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.state.read().unwrap().reflogs.get(name).cloned())
    }

    fn append_reflog(&self, name: &str, line: &[u8]) -> Result<(), BackendError> {
        let mut state = self.state.write().unwrap();
        state.reflogs.entry(name.to_string()).or_default().extend_from_slice(line);
        Ok(())
    }

    fn write_reflog(&self, name: &str, data: &[u8]) -> Result<(), BackendError> {
        self.state.write().unwrap().reflogs.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn list_reflogs(&self) -> Result<Vec<String>, BackendError> {
        let mut names: Vec<String> = self.state.read().unwrap().reflogs.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn read_state_file(&self, kind: StateFile) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.state.read().unwrap().state_files.get(kind.filename()).cloned())
    }

    fn write_state_file(&self, kind: StateFile, data: &[u8]) -> Result<(), BackendError> {
        self.state.write().unwrap().state_files.insert(kind.filename(), data.to_vec());
        Ok(())
    }

    fn delete_state_file(&self, kind: StateFile) -> Result<(), BackendError> {
        self.state.write().unwrap().state_files.remove(kind.filename());
        Ok(())
    }

    fn read_config(&self) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.state.read().unwrap().config.clone())
    }

    fn write_config(&self, data: &[u8]) -> Result<(), BackendError> {
        self.state.write().unwrap().config = Some(data.to_vec());
        Ok(())
    }
}

type BackendFactory = Box<dyn Fn() -> Box<dyn StorageBackend> + Send + Sync>;

/// Registry of storage backend constructors, keyed by a string type name
/// (`"filesystem"`, `"memory"`, ...), so a caller can select a backend by
/// configuration rather than by compiled-in type.
pub struct BackendRegistry {
    factories: Mutex<HashMap<String, BackendFactory>>,
}

impl BackendRegistry {
    fn new() -> Self {
        let registry = Self {
            factories: Mutex::new(HashMap::new()),
        };
        registry.register("memory", || Box::new(InMemoryBackend::new()));
        registry
    }

    /// Register a backend constructor under the given type name, replacing
    /// any prior registration with the same name.
    pub fn register(
        &self,
        type_name: impl Into<String>,
        factory: impl Fn() -> Box<dyn StorageBackend> + Send + Sync + 'static,
    ) {
        self.factories
            .lock()
            .unwrap()
            .insert(type_name.into(), Box::new(factory));
    }

    /// Construct a backend of the given registered type, if known.
    pub fn create(&self, type_name: &str) -> Option<Box<dyn StorageBackend>> {
        self.factories.lock().unwrap().get(type_name).map(|f| f())
    }

    /// The process-wide backend registry.
    pub fn global() -> &'static BackendRegistry {
        static REGISTRY: OnceLock<BackendRegistry> = OnceLock::new();
        REGISTRY.get_or_init(BackendRegistry::new)
    }
}
