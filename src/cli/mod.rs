//! CLI argument definitions and parsing.

pub mod args;

pub use args::{Cli, Command};
