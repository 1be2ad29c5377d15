//! Subcommand implementations.

pub mod admin;
pub mod node;
