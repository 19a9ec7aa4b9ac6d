pub mod fingerprint;
pub mod hash;
pub mod session;
