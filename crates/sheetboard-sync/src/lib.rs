//! Sync layer: row sources for the dashboard and the Google Sheets `values` client.

mod error;
mod source;
pub mod values;

pub use error::SyncError;
pub use source::{Row, RowSource};
pub use values::ValueRange;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{SheetsClient, SheetsConfig};
