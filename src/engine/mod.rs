pub mod fingerprint;
pub mod fnv;
