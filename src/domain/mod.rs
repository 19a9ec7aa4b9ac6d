pub mod config;
pub mod error;
pub mod length;
pub mod report;
