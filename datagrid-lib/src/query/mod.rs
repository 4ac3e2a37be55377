//! URL query state: parsing, filter policies and the navigating manager.

mod config;
mod manager;
mod params;
pub mod transition;

pub use config::*;
pub use manager::*;
pub use params::*;
