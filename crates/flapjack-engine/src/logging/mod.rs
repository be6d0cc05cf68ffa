//! Logging utilities.
//!
//! The crate logs through the `log` facade only; `init_logging` installs the
//! `env_logger` backend for binaries.

mod init;

#[cfg(test)]
pub(crate) mod capture;

pub use init::{LoggingConfig, init_logging};
