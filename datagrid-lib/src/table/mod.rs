//! Table state engine: sorting, selection and pagination over row data.

mod column;
pub mod pagination;
mod selection;
mod sort;
mod state;
mod view;

pub use column::*;
pub use selection::*;
pub use sort::*;
pub use state::*;
pub use view::*;
