//! Tooling & Integration Layer
//!
//! Command-line front end over the node API.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
