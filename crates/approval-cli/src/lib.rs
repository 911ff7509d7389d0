//! api-approval CLI library
//!
//! This crate provides the command-line surface over the approval harness.

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod utils;

pub use error::{CliError, CliResult};
