use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::domain::error::HashError;
use crate::domain::length::LengthArg;
use crate::io;
use crate::util::hash::{fnv1a32, fnv1a64};

/// Fingerprints of a whole input, as printed by `hash`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct HashReport {
    pub size: usize,
    pub effective_length: usize,
    pub fnv1a32: u32,
    pub fnv1a64: u64,
}

/// Execute `hash` over `input`, or over `stdin` when no path is given.
pub fn run<R: Read>(
    input: Option<&Path>,
    stdin: R,
    length: LengthArg,
) -> Result<HashReport, HashError> {
    let bytes = io::read_all(input, stdin)?;
    Ok(execute(&bytes, length))
}

pub fn execute(bytes: &[u8], length: LengthArg) -> HashReport {
    let effective_length = length.effective(bytes.len());
    let prefix = &bytes[..effective_length];
    HashReport {
        size: bytes.len(),
        effective_length,
        fnv1a32: fnv1a32(prefix),
        fnv1a64: fnv1a64(prefix),
    }
}

/// Ordered pipeline-step names used for `--emit-pipeline` diagnostics.
pub fn pipeline_steps() -> Vec<String> {
    vec![
        "hash_read_input".to_string(),
        "hash_fnv1a32".to_string(),
        "hash_fnv1a64".to_string(),
    ]
}

/// Determinism guards applied by `hash`.
pub fn deterministic_guards() -> Vec<String> {
    vec![
        "rust_native_execution".to_string(),
        "fixed_width_wrapping_arithmetic".to_string(),
        "length_clamped_to_input_size".to_string(),
    ]
}
