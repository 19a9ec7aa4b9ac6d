use thiserror::Error;

use crate::io::IoError;

/// Errors produced by a fingerprint hasher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FnvError {
    /// A query was made after `close`; there is no way to reopen.
    #[error("fingerprint hasher is closed")]
    Closed,
}

/// Errors produced by the `hash` command boundary.
#[derive(Debug, Error)]
pub enum HashError {
    /// Input bytes could not be materialized.
    #[error(transparent)]
    Input(#[from] IoError),
}

/// Errors produced while taking a prefix fingerprint of a file.
#[derive(Debug, Error)]
pub enum FingerprintError {
    /// The path could not be opened read-only.
    #[error(transparent)]
    Open(#[from] IoError),

    /// An already-open file handle could not be duplicated.
    #[error("failed to duplicate file handle: {source}")]
    Duplicate {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to seek to offset {offset}: {source}")]
    Seek {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read fingerprint window: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },
}

/// Fatal errors produced by the `session` command boundary.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read session input: {source}")]
    ReadInput {
        #[source]
        source: std::io::Error,
    },

    /// A request line was not a valid call.
    #[error("invalid call on line {line}: {source}")]
    InvalidCall {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write session output: {source}")]
    WriteOutput {
        #[source]
        source: std::io::Error,
    },
}

/// Per-call failures reported inline by a session; they never abort it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error(transparent)]
    Closed(#[from] FnvError),

    #[error("no hasher with handle {handle}")]
    UnknownHandle { handle: usize },
}

impl CallError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Closed(_) => "closed_resource",
            Self::UnknownHandle { .. } => "unknown_handle",
        }
    }
}

/// Errors produced while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file `{path}`: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for `{key}`: {message}")]
    Invalid { key: &'static str, message: String },
}
