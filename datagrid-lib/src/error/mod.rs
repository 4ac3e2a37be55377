//! Error types

mod location;

pub use location::*;
