//! Command handlers for CLI operations
//!
//! Handlers hold the execution logic, separate from parsing and validation.

pub mod serve;

pub use serve::ServeCommandHandler;
