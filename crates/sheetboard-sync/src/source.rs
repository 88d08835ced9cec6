use async_trait::async_trait;

use crate::error::SyncError;

/// One sheet row: cells in column order, already stringified.
pub type Row = Vec<String>;

/// Anything that can produce the current sheet rows.
///
/// The dashboard only ever reads; one call is one fetch cycle.
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(&self) -> Result<Vec<Row>, SyncError>;
}
