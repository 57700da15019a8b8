//! Per-table accumulation between flushes.
//!
//! The orchestrator merges per-instance frames here on a single thread
//! and flushes on an explicit, count-based trigger; at most one batch's
//! worth of rows is ever held per table.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use tracing::debug;

use xbrl_store::TableStore;

use crate::error::ExtractError;

#[derive(Debug, Default)]
pub(crate) struct TableAccumulator {
    pending: BTreeMap<String, DataFrame>,
}

impl TableAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one instance's rows for `table` into the running
    /// accumulation.
    pub fn merge(&mut self, table: &str, frame: DataFrame) -> Result<(), ExtractError> {
        match self.pending.get_mut(table) {
            Some(pending) => {
                pending
                    .vstack_mut(&frame)
                    .map_err(|source| ExtractError::Merge {
                        table: table.to_string(),
                        source,
                    })?;
            }
            None => {
                self.pending.insert(table.to_string(), frame);
            }
        }
        Ok(())
    }

    /// Append every row-bearing accumulation to the store, then clear.
    ///
    /// Returns the number of tables written. Clearing happens even for
    /// tables that were skipped as empty, so memory stays bounded by
    /// one batch.
    pub fn flush(&mut self, store: &mut dyn TableStore) -> Result<usize, ExtractError> {
        let pending = std::mem::take(&mut self.pending);
        let mut writes = 0;
        for (table, frame) in pending {
            if frame.height() == 0 {
                continue;
            }
            debug!(table = %table, row_count = frame.height(), "flushing table");
            store.write(&table, &frame)?;
            writes += 1;
        }
        Ok(writes)
    }
}
