use polars::prelude::DataFrame;

use crate::error::Result;

/// Append-capable table store.
///
/// The store owns durability, indexing, and natural-key uniqueness;
/// callers only append. A failed write is fatal for the caller's run,
/// and previously appended batches stay persisted.
pub trait TableStore {
    fn write(&mut self, table_name: &str, rows: &DataFrame) -> Result<()>;
}
