use std::io::{BufRead, Write};

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::error::{CallError, SessionError};
use crate::domain::length::LengthArg;
use crate::engine::fnv::FingerprintHasher;

/// One request line of a session, tagged by `call`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum SessionCall {
    Construct {
        data: ByteData,
    },
    Close {
        handle: usize,
    },
    IsOpen {
        handle: usize,
    },
    IsClosed {
        handle: usize,
    },
    SizeHint {
        handle: usize,
    },
    Fingerprint32 {
        handle: usize,
        #[serde(default)]
        length: Value,
    },
    Fingerprint64 {
        handle: usize,
        #[serde(default)]
        length: Value,
    },
}

impl SessionCall {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Construct { .. } => "construct",
            Self::Close { .. } => "close",
            Self::IsOpen { .. } => "is_open",
            Self::IsClosed { .. } => "is_closed",
            Self::SizeHint { .. } => "size_hint",
            Self::Fingerprint32 { .. } => "fingerprint32",
            Self::Fingerprint64 { .. } => "fingerprint64",
        }
    }
}

/// Construction payload: UTF-8 text or raw byte values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ByteData {
    Text(String),
    Bytes(Vec<u8>),
}

impl From<ByteData> for Vec<u8> {
    fn from(value: ByteData) -> Self {
        match value {
            ByteData::Text(text) => text.into_bytes(),
            ByteData::Bytes(bytes) => bytes,
        }
    }
}

/// Handle table for hashers created during a session. Handles are never reused.
#[derive(Debug, Default)]
pub struct Session {
    hashers: Vec<FingerprintHasher>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, call: SessionCall) -> Result<Value, CallError> {
        match call {
            SessionCall::Construct { data } => {
                let handle = self.hashers.len();
                self.hashers.push(FingerprintHasher::new(data));
                debug!(handle, "constructed hasher");
                Ok(json!({ "handle": handle }))
            }
            SessionCall::Close { handle } => {
                self.get_mut(handle)?.close();
                Ok(Value::Null)
            }
            SessionCall::IsOpen { handle } => Ok(json!(self.get(handle)?.is_open())),
            SessionCall::IsClosed { handle } => Ok(json!(self.get(handle)?.is_closed())),
            SessionCall::SizeHint { handle } => Ok(json!(self.get(handle)?.size_hint())),
            SessionCall::Fingerprint32 { handle, length } => {
                let length = LengthArg::from_json(&length);
                Ok(json!(self.get(handle)?.fingerprint32(length)?))
            }
            SessionCall::Fingerprint64 { handle, length } => {
                let length = LengthArg::from_json(&length);
                Ok(json!(self.get(handle)?.fingerprint64(length)?))
            }
        }
    }

    fn get(&self, handle: usize) -> Result<&FingerprintHasher, CallError> {
        self.hashers
            .get(handle)
            .ok_or(CallError::UnknownHandle { handle })
    }

    fn get_mut(&mut self, handle: usize) -> Result<&mut FingerprintHasher, CallError> {
        self.hashers
            .get_mut(handle)
            .ok_or(CallError::UnknownHandle { handle })
    }
}

/// Counts reported after a session completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub calls: usize,
    pub failed: usize,
}

/// Replay JSON Lines calls from `input`, writing one JSON result line per call.
///
/// Failed calls are reported inline and do not stop the session; a line that
/// is not a valid call does.
pub fn run<R: BufRead, W: Write>(input: R, mut output: W) -> Result<SessionSummary, SessionError> {
    let mut session = Session::new();
    let mut summary = SessionSummary::default();

    for (line_index, line) in input.lines().enumerate() {
        let line = line.map_err(|source| SessionError::ReadInput { source })?;
        if line.trim().is_empty() {
            continue;
        }
        let call: SessionCall =
            serde_json::from_str(&line).map_err(|source| SessionError::InvalidCall {
                line: line_index + 1,
                source,
            })?;
        let name = call.name();
        let record = match session.apply(call) {
            Ok(result) => json!({
                "index": summary.calls,
                "call": name,
                "result": result,
            }),
            Err(error) => {
                summary.failed += 1;
                json!({
                    "index": summary.calls,
                    "call": name,
                    "error": error.kind(),
                    "message": error.to_string(),
                })
            }
        };
        summary.calls += 1;
        writeln!(output, "{record}").map_err(|source| SessionError::WriteOutput { source })?;
    }

    Ok(summary)
}

/// Ordered pipeline-step names used for `--emit-pipeline` diagnostics.
pub fn pipeline_steps() -> Vec<String> {
    vec![
        "session_parse_calls".to_string(),
        "session_apply_calls".to_string(),
        "session_write_results".to_string(),
    ]
}

/// Determinism guards applied by `session`.
pub fn deterministic_guards() -> Vec<String> {
    vec![
        "rust_native_execution".to_string(),
        "calls_applied_in_input_order".to_string(),
        "handles_assigned_sequentially".to_string(),
    ]
}
