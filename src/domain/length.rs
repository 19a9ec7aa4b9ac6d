use serde_json::Value;

/// Optional length argument accepted by fingerprint queries.
///
/// `Unspecified` means "the whole buffer". `Bytes` carries the caller's value
/// verbatim, including negatives, which fold zero bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthArg {
    #[default]
    Unspecified,
    Bytes(i64),
}

impl LengthArg {
    /// Coerce a loosely-typed JSON argument.
    ///
    /// Integers become `Bytes`; every other value, including floats and
    /// `null`, is treated as absent.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(number) => {
                if let Some(signed) = number.as_i64() {
                    Self::Bytes(signed)
                } else if number.as_u64().is_some() {
                    Self::Bytes(i64::MAX)
                } else {
                    Self::Unspecified
                }
            }
            _ => Self::Unspecified,
        }
    }

    /// Number of leading bytes folded into the hash for a buffer of `size` bytes.
    pub fn effective(self, size: usize) -> usize {
        match self {
            Self::Unspecified => size,
            Self::Bytes(requested) if requested < 0 => 0,
            Self::Bytes(requested) => usize::try_from(requested).map_or(size, |n| n.min(size)),
        }
    }
}

impl From<Option<i64>> for LengthArg {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::Unspecified, Self::Bytes)
    }
}

impl From<i64> for LengthArg {
    fn from(value: i64) -> Self {
        Self::Bytes(value)
    }
}

impl From<u64> for LengthArg {
    fn from(value: u64) -> Self {
        Self::Bytes(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<usize> for LengthArg {
    fn from(value: usize) -> Self {
        Self::Bytes(i64::try_from(value).unwrap_or(i64::MAX))
    }
}
