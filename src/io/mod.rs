pub mod error;

use std::fs::{File, OpenOptions};
use std::io::Read;
use std::path::Path;

pub use error::IoError;

/// Open `path` for reading only.
///
/// This is the single place the crate turns a path into a handle; hashing
/// code only ever sees bytes or an already-open reader.
pub fn open_read_only(path: &Path) -> Result<File, IoError> {
    OpenOptions::new()
        .read(true)
        .open(path)
        .map_err(|source| IoError::OpenInput {
            path: path.display().to_string(),
            source,
        })
}

/// Materialize the whole input: the file at `path`, or `stdin` when no path is given.
pub fn read_all<R: Read>(path: Option<&Path>, stdin: R) -> Result<Vec<u8>, IoError> {
    match path {
        Some(path) => {
            let file = open_read_only(path)?;
            read_to_end(file, path.display().to_string())
        }
        None => read_to_end(stdin, "stdin".to_string()),
    }
}

fn read_to_end<R: Read>(mut reader: R, label: String) -> Result<Vec<u8>, IoError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| IoError::ReadInput { label, source })?;
    Ok(bytes)
}
