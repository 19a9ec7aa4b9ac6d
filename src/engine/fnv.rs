use tracing::{debug, warn};

use crate::domain::error::FnvError;
use crate::domain::length::LengthArg;
use crate::util::hash::{FnvWord, fnv1a};

#[derive(Debug, Clone, PartialEq, Eq)]
enum HasherState {
    Open { buffer: Box<[u8]> },
    Closed,
}

/// FNV-1a fingerprint calculator over an owned, immutable byte buffer.
///
/// The hasher answers any number of 32- and 64-bit queries until `close`
/// releases the buffer. `size_hint` keeps reporting the original length
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintHasher {
    state: HasherState,
    size: usize,
}

impl FingerprintHasher {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        let buffer = data.into().into_boxed_slice();
        let size = buffer.len();
        Self {
            state: HasherState::Open { buffer },
            size,
        }
    }

    /// Release the buffer. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.is_open() {
            debug!(size = self.size, "closing fingerprint hasher");
        }
        self.state = HasherState::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, HasherState::Open { .. })
    }

    pub fn is_closed(&self) -> bool {
        !self.is_open()
    }

    /// Byte length of the buffer given at construction.
    pub fn size_hint(&self) -> usize {
        self.size
    }

    pub fn fingerprint32(&self, length: impl Into<LengthArg>) -> Result<u32, FnvError> {
        self.fingerprint(length.into())
    }

    pub fn fingerprint64(&self, length: impl Into<LengthArg>) -> Result<u64, FnvError> {
        self.fingerprint(length.into())
    }

    /// Buffer contents while open.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.state {
            HasherState::Open { buffer } => Some(&buffer[..]),
            HasherState::Closed => None,
        }
    }

    fn fingerprint<W: FnvWord>(&self, length: LengthArg) -> Result<W, FnvError> {
        let HasherState::Open { buffer } = &self.state else {
            warn!(size = self.size, "fingerprint requested on closed hasher");
            return Err(FnvError::Closed);
        };
        let effective = length.effective(self.size);
        debug!(
            size = self.size,
            effective,
            bits = std::mem::size_of::<W>() * 8,
            "computing fnv1a fingerprint"
        );
        Ok(fnv1a(&buffer[..effective]))
    }
}
