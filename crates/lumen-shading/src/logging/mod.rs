//! Logging utilities.
//!
//! Library code only talks to the `log` facade. Binaries call [`init_logging`]
//! early in `main` to install the `env_logger` backend.

mod init;

pub use init::{LoggingConfig, init_logging};
