//! Subcommand handlers. Each returns the text to print on stdout.

pub mod query;
pub mod table;
