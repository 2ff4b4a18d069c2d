//! Shared utilities for the toolkit workspace
//!
//! Logging setup and environment lookups used by the tool crates and
//! by binaries that host them.

pub mod env;
pub mod logging;

pub use env::{load_dotenv, non_empty_var};
pub use logging::{LogFormat, init_tracing, init_tracing_with};
