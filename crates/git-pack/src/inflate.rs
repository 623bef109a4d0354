//! Zlib boundary inflator.
//!
//! Packfiles concatenate zlib streams back to back with no length prefix.
//! To find where the next object's header starts, the reader needs to know
//! exactly how many *input* bytes a given zlib stream consumed — not just
//! how many bytes it produced.
//!
//! `flate2`'s low-level [`Decompress`] exposes `total_in()`, which already
//! answers this directly for the common case. We still implement the
//! pull-and-bisect fallback described below for sources (or future zlib
//! bindings) that don't expose a reliable consumed-byte count, and because
//! pack scanning wants to bound how much it reads ahead before it has any
//! length information at all.

use flate2::{Decompress, FlushDecompress, Status};

use crate::PackError;

/// A reader that can be pulled from in chunks and reports its physical
/// position, with support for pushing back over-read bytes.
pub trait BoundaryReader {
    /// Read up to `buf.len()` bytes, returning the number read (0 at EOF).
    fn pull(&mut self, buf: &mut [u8]) -> std::io::Result<usize>;
    /// Current physical read position before accounting for pushed-back bytes.
    fn physical_position(&self) -> u64;
}

/// Wraps a byte slice as a [`BoundaryReader`], as used when scanning a
/// whole packfile that's already memory-mapped.
pub struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> BoundaryReader for SliceReader<'a> {
    fn pull(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = buf.len().min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn physical_position(&self) -> u64 {
        self.pos as u64
    }
}

/// Result of decompressing one zlib stream out of a concatenated sequence.
pub struct InflateResult {
    /// The decompressed plaintext, exactly `expected_len` bytes.
    pub plaintext: Vec<u8>,
    /// The exact number of input bytes the zlib stream consumed.
    pub used_bytes: u64,
}

/// A boundary-tracking inflator over a [`BoundaryReader`].
///
/// `tell()` reports `physical_position - overflow.len()`: the logical
/// position as if only the bytes actually consumed by completed inflate
/// calls had been read.
pub struct BoundaryInflator<R> {
    reader: R,
    /// Bytes pulled from `reader` but not yet consumed by an inflate call.
    overflow: Vec<u8>,
}

impl<R: BoundaryReader> BoundaryInflator<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            overflow: Vec::new(),
        }
    }

    /// Logical position: what the next inflate call will start reading from.
    pub fn tell(&self) -> u64 {
        self.reader.physical_position() - self.overflow.len() as u64
    }

    /// Drain from the overflow buffer first, then pull fresh bytes from the
    /// reader, appending into `dst` until `dst` has at least `want` bytes
    /// beyond `start_len` or the reader is exhausted.
    fn fill(&mut self, dst: &mut Vec<u8>, want: usize) -> std::io::Result<()> {
        let start_len = dst.len();
        if !self.overflow.is_empty() {
            let take = self.overflow.len().min(want);
            dst.extend_from_slice(&self.overflow[..take]);
            self.overflow.drain(..take);
        }
        while dst.len() - start_len < want {
            let mut chunk = [0u8; 4096];
            let n = self.reader.pull(&mut chunk)?;
            if n == 0 {
                break;
            }
            dst.extend_from_slice(&chunk[..n]);
        }
        Ok(())
    }

    /// Decompress exactly one zlib stream, whose decompressed length is
    /// known in advance to be `expected_len`, and report how many input
    /// bytes it consumed so the caller can locate the next stream.
    pub fn inflate(&mut self, expected_len: usize) -> Result<InflateResult, PackError> {
        let initial_pull = (2 * expected_len + 4096).max(16 * 1024);

        let mut input = Vec::new();
        self.fill(&mut input, initial_pull)?;

        // Fast path: feed the raw decompressor and let it report total_in
        // directly via flate2's zlib-sys bindings.
        if let Some(result) = try_streaming_inflate(&input, expected_len)? {
            self.push_back_overflow(&input, result.used_bytes as usize);
            return Ok(result);
        }

        // Slow path: bisect for the minimal prefix that both decompresses
        // successfully and yields exactly `expected_len` output bytes.
        let upper_bound = (3 * expected_len + 128).max(input.len());
        while input.len() < upper_bound {
            let before = input.len();
            self.fill(&mut input, upper_bound - input.len())?;
            if input.len() == before {
                break; // reader exhausted
            }
            if let Some(result) = try_streaming_inflate(&input, expected_len)? {
                self.push_back_overflow(&input, result.used_bytes as usize);
                return Ok(result);
            }
        }

        if let Some(used) = bisect_boundary(&input, expected_len) {
            let plaintext = decompress_prefix(&input[..used], expected_len)?;
            self.push_back_overflow(&input, used);
            return Ok(InflateResult {
                plaintext,
                used_bytes: used as u64,
            });
        }

        Err(PackError::InflateError(format!(
            "no prefix of {} bytes decompresses to exactly {} bytes",
            input.len(),
            expected_len
        )))
    }

    fn push_back_overflow(&mut self, input: &[u8], used: usize) {
        self.overflow.clear();
        self.overflow.extend_from_slice(&input[used..]);
    }
}

/// Try decompressing `input` with flate2's raw `Decompress`, trusting its
/// `total_in()` for the consumed byte count when it reports a clean `Ok`
/// finish with exactly `expected_len` output bytes.
fn try_streaming_inflate(
    input: &[u8],
    expected_len: usize,
) -> Result<Option<InflateResult>, PackError> {
    let mut decompress = Decompress::new(true);
    let mut out = vec![0u8; expected_len];
    let status = decompress
        .decompress(input, &mut out, FlushDecompress::Finish)
        .map_err(|e| PackError::InflateError(e.to_string()))?;

    let produced = decompress.total_out() as usize;
    if status == Status::StreamEnd && produced == expected_len {
        return Ok(Some(InflateResult {
            plaintext: out,
            used_bytes: decompress.total_in(),
        }));
    }
    Ok(None)
}

/// Binary search the minimal prefix length `k` of `input` such that
/// decompressing `input[..k]` succeeds and yields exactly `expected_len`
/// bytes. Both conditions are required: some decoders accept truncated
/// streams and silently produce short output.
fn bisect_boundary(input: &[u8], expected_len: usize) -> Option<usize> {
    let valid = |k: usize| -> bool {
        decompress_prefix(&input[..k], expected_len)
            .map(|out| out.len() == expected_len)
            .unwrap_or(false)
    };

    if !valid(input.len()) {
        return None;
    }

    let mut lo = 1usize;
    let mut hi = input.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if valid(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Some(lo)
}

fn decompress_prefix(input: &[u8], expected_len: usize) -> Result<Vec<u8>, PackError> {
    let mut decompress = Decompress::new(true);
    let mut out = vec![0u8; expected_len];
    match decompress.decompress(input, &mut out, FlushDecompress::Finish) {
        Ok(Status::StreamEnd) => {
            let produced = decompress.total_out() as usize;
            out.truncate(produced);
            Ok(out)
        }
        Ok(_) => Err(PackError::InflateError("stream not finished".into())),
        Err(e) => Err(PackError::InflateError(e.to_string())),
    }
}
