use std::cmp::Ordering;
use std::fmt;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::error::FingerprintError;
use crate::domain::length::LengthArg;
use crate::engine::fnv::FingerprintHasher;
use crate::io::open_read_only;

/// Standard number of bytes read from a file to compute its fingerprint.
pub const FP_BYTE_SIZE: usize = 255;

/// Value identity of a fingerprint taken at a given offset and size.
///
/// Keys order largest size first, then largest offset, then largest
/// fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FingerprintKey {
    #[serde(rename = "hash")]
    pub fingerprint: u64,
    pub offset: u64,
    pub size: usize,
}

impl FingerprintKey {
    /// Whether the fingerprint covers less than the standard [`FP_BYTE_SIZE`]
    /// window. Use [`Fingerprinter::is_short`] for a configured window.
    pub fn is_short(&self) -> bool {
        self.size < FP_BYTE_SIZE
    }

    pub fn offset_eq(&self, offset: u64) -> bool {
        self.offset == offset
    }
}

impl Ord for FingerprintKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .size
            .cmp(&self.size)
            .then_with(|| other.offset.cmp(&self.offset))
            .then_with(|| other.fingerprint.cmp(&self.fingerprint))
    }
}

impl PartialOrd for FingerprintKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FingerprintKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.fingerprint, self.offset, self.size)
    }
}

/// 64-bit prefix fingerprint of a file region starting at `offset`.
///
/// A new fingerprinter is blank; load data with [`read_path`](Self::read_path),
/// [`read_file`](Self::read_file), [`read_from`](Self::read_from) or
/// [`add_data`](Self::add_data). The window defaults to [`FP_BYTE_SIZE`].
#[derive(Debug, Clone)]
pub struct Fingerprinter {
    path: PathBuf,
    offset: u64,
    window: usize,
    size: usize,
    hasher: Option<FingerprintHasher>,
    fingerprint: Option<u64>,
}

impl Fingerprinter {
    pub fn new(path: impl Into<PathBuf>, offset: u64) -> Self {
        Self {
            path: path.into(),
            offset,
            window: FP_BYTE_SIZE,
            size: FP_BYTE_SIZE,
            hasher: None,
            fingerprint: None,
        }
    }

    /// Use a window other than [`FP_BYTE_SIZE`]. Must be called before data is loaded.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self.size = window;
        self
    }

    /// Open the path read-only and fingerprint the window at `offset`.
    pub fn read_path(&mut self) -> Result<&mut Self, FingerprintError> {
        let file = open_read_only(&self.path)?;
        self.read_from(file)
    }

    /// Fingerprint from an already-open file through a duplicated handle.
    ///
    /// The duplicate shares the file cursor, so `file` is left positioned
    /// after the window.
    pub fn read_file(&mut self, file: &File) -> Result<&mut Self, FingerprintError> {
        let duplicate = file
            .try_clone()
            .map_err(|source| FingerprintError::Duplicate { source })?;
        self.read_from(duplicate)
    }

    pub fn read_from<R: Read + Seek>(&mut self, mut reader: R) -> Result<&mut Self, FingerprintError> {
        reader
            .seek(SeekFrom::Start(self.offset))
            .map_err(|source| FingerprintError::Seek {
                offset: self.offset,
                source,
            })?;
        let mut data = Vec::with_capacity(self.window.min(FP_BYTE_SIZE));
        reader
            .take(self.window as u64)
            .read_to_end(&mut data)
            .map_err(|source| FingerprintError::Read { source })?;
        debug!(
            path = %self.path.display(),
            offset = self.offset,
            bytes = data.len(),
            "read fingerprint window"
        );
        Ok(self.add_data(data))
    }

    /// Fingerprint bytes the caller has already read.
    pub fn add_data(&mut self, data: impl Into<Vec<u8>>) -> &mut Self {
        self.hasher = Some(FingerprintHasher::new(data));
        self.set_fingerprint_at(self.size);
        self
    }

    /// Re-fingerprint at a smaller size; ignored until data has been loaded.
    pub fn add_size(&mut self, new_size: usize) -> &mut Self {
        if self.hasher.is_some() {
            self.set_fingerprint_at(new_size);
        }
        self
    }

    /// 64-bit fingerprint of the first `length` bytes of the loaded data.
    pub fn fingerprint_at(&self, length: impl Into<LengthArg>) -> Option<u64> {
        self.hasher.as_ref()?.fingerprint64(length).ok()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn fingerprint(&self) -> Option<u64> {
        self.fingerprint
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.hasher.as_ref()?.bytes()
    }

    pub fn data_size(&self) -> usize {
        self.data().map_or(0, <[u8]>::len)
    }

    pub fn end_position(&self) -> u64 {
        self.offset.saturating_add(self.size as u64)
    }

    /// Whether the fingerprint covers less than this fingerprinter's window.
    pub fn is_short(&self) -> bool {
        self.size < self.window
    }

    /// Key of the current fingerprint, or `None` while blank.
    pub fn key(&self) -> Option<FingerprintKey> {
        self.fingerprint.map(|fingerprint| FingerprintKey {
            fingerprint,
            offset: self.offset,
            size: self.size,
        })
    }

    /// Drop the loaded data and release the hasher.
    pub fn clear(&mut self) {
        if let Some(mut hasher) = self.hasher.take() {
            hasher.close();
        }
    }

    fn set_fingerprint_at(&mut self, size: usize) {
        let data_size = self.data_size();
        // Only a size smaller than both the window and the data narrows the fingerprint.
        let (size, length) = if size < self.window && size < data_size {
            (size, LengthArg::from(size))
        } else {
            (data_size, LengthArg::Unspecified)
        };
        self.size = size;
        self.fingerprint = self.fingerprint_at(length);
        debug!(
            path = %self.path.display(),
            offset = self.offset,
            size,
            fingerprint = ?self.fingerprint,
            "took fingerprint"
        );
    }
}
