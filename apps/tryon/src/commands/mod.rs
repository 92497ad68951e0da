//! Subcommand implementations.

pub mod catalog;
pub mod feedback;
pub mod submit;
