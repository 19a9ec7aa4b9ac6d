use std::path::PathBuf;

use serde::Serialize;

use crate::domain::config::FingerprintConfig;
use crate::domain::error::FingerprintError;
use crate::engine::fingerprint::{FingerprintKey, Fingerprinter};

/// Arguments of `fingerprint` after flags and config are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintCommandArgs {
    pub path: PathBuf,
    pub offset: u64,
    pub byte_size: usize,
    /// Narrower size to re-fingerprint at, as `add_size` does.
    pub size: Option<usize>,
}

impl FingerprintCommandArgs {
    /// Explicit flags win over the config section.
    pub fn resolve(
        path: PathBuf,
        offset: Option<u64>,
        size: Option<usize>,
        config: &FingerprintConfig,
    ) -> Self {
        Self {
            path,
            offset: offset.unwrap_or(config.offset),
            byte_size: config.byte_size,
            size,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FingerprintReport {
    pub path: String,
    pub fingerprint: u64,
    pub offset: u64,
    pub size: usize,
    pub data_size: usize,
    pub end_position: u64,
    pub short: bool,
    pub key: String,
}

pub fn run(args: &FingerprintCommandArgs) -> Result<FingerprintReport, FingerprintError> {
    let mut fingerprinter = Fingerprinter::new(&args.path, args.offset).with_window(args.byte_size);
    fingerprinter.read_path()?;
    if let Some(size) = args.size {
        fingerprinter.add_size(size);
    }
    let report = build_report(&fingerprinter);
    fingerprinter.clear();
    Ok(report)
}

fn build_report(fingerprinter: &Fingerprinter) -> FingerprintReport {
    // A loaded fingerprinter always has a key; the blank fallback covers zero bytes.
    let key = fingerprinter.key().unwrap_or(FingerprintKey {
        fingerprint: 0,
        offset: fingerprinter.offset(),
        size: 0,
    });
    FingerprintReport {
        path: fingerprinter.path().display().to_string(),
        fingerprint: key.fingerprint,
        offset: key.offset,
        size: key.size,
        data_size: fingerprinter.data_size(),
        end_position: fingerprinter.end_position(),
        short: fingerprinter.is_short(),
        key: key.to_string(),
    }
}

/// Ordered pipeline-step names used for `--emit-pipeline` diagnostics.
pub fn pipeline_steps() -> Vec<String> {
    vec![
        "fingerprint_open_read_only".to_string(),
        "fingerprint_read_window".to_string(),
        "fingerprint_fnv1a64".to_string(),
    ]
}

/// Determinism guards applied by `fingerprint`.
pub fn deterministic_guards() -> Vec<String> {
    vec![
        "rust_native_execution".to_string(),
        "fixed_window_from_offset".to_string(),
        "size_narrowed_only_below_window_and_data".to_string(),
    ]
}
