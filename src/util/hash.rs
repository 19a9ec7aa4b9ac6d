/// Fixed-width word that FNV-1a folds bytes into.
pub trait FnvWord: Copy {
    const OFFSET_BASIS: Self;
    const FNV_PRIME: Self;

    /// One FNV-1a step: xor the byte in, then multiply by the prime modulo 2^bits.
    fn mix(self, byte: u8) -> Self;
}

impl FnvWord for u32 {
    const OFFSET_BASIS: u32 = 0x811c9dc5;
    const FNV_PRIME: u32 = 0x01000193;

    fn mix(self, byte: u8) -> Self {
        (self ^ u32::from(byte)).wrapping_mul(Self::FNV_PRIME)
    }
}

impl FnvWord for u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    fn mix(self, byte: u8) -> Self {
        (self ^ u64::from(byte)).wrapping_mul(Self::FNV_PRIME)
    }
}

/// FNV-1a over `bytes` at the width of `W`.
pub fn fnv1a<W: FnvWord>(bytes: &[u8]) -> W {
    bytes
        .iter()
        .fold(W::OFFSET_BASIS, |state, byte| state.mix(*byte))
}

pub fn fnv1a32(bytes: &[u8]) -> u32 {
    fnv1a(bytes)
}

pub fn fnv1a64(bytes: &[u8]) -> u64 {
    fnv1a(bytes)
}
