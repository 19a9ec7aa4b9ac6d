//! FNV-1a fingerprints used to recognize files across renames and rotations.
//!
//! [`engine::fnv::FingerprintHasher`] hashes an owned byte buffer until it is
//! closed; [`engine::fingerprint::Fingerprinter`] takes a fixed-size prefix of
//! a file and keeps its 64-bit fingerprint.

pub mod cmd;
pub mod domain;
pub mod engine;
pub mod io;
pub mod util;
