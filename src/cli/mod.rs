//! CLI commands
//!
//! Command implementations for the `store-review` binary.

mod style;
mod submit;

pub use submit::run_submit;
