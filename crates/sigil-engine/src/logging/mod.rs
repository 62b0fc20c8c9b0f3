//! Logger setup.
//!
//! One `env_logger` install behind a `Once`, with a default filter that
//! keeps wgpu's internal chatter below the engine's own output. Only the
//! `log` facade leaks into the rest of the crate.

mod init;

pub use init::{init_logging, LoggingOptions};
