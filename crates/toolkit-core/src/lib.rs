//! Tool abstractions for agent frameworks
//!
//! This crate defines the seam between callable tools and whatever
//! orchestration framework invokes them: the [`Tool`] trait, a
//! [`ToolRegistry`] for lookup by name, and the error type tools report.

pub mod error;
pub mod registry;
pub mod tool;

pub use error::{Error, Result};
pub use registry::ToolRegistry;
pub use tool::Tool;
