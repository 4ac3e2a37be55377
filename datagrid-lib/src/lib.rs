//! Data table state engine and URL query state library
//!
//! Headless state for listing screens: client-side sorting, selection and
//! pagination over row data, plus filter and page state kept in the URL
//! query string.

pub mod cache;
pub mod debounce;
pub mod error;
pub mod fetch;
pub mod model;
pub mod navigate;
pub mod query;
pub mod search;
pub mod table;

pub use model::{Record, RowId, TableRow, Value};
pub use navigate::{Location, MemoryHistory, Navigator};
pub use query::{FilterConfig, FilterValue, QueryParams, QueryStateManager};
pub use table::{Column, Direction, TableOptions, TableState};
