//! In-memory table store.
//!
//! Records every write call verbatim. Backs tests that assert on flush
//! granularity and row multisets, and any caller that wants extracted
//! frames without touching disk.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;

use crate::error::Result;
use crate::store::TableStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    writes: Vec<(String, DataFrame)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write call, in order.
    pub fn writes(&self) -> &[(String, DataFrame)] {
        &self.writes
    }

    /// Frames written for one table, in write order.
    pub fn writes_for(&self, table_name: &str) -> Vec<&DataFrame> {
        self.writes
            .iter()
            .filter(|(name, _)| name == table_name)
            .map(|(_, frame)| frame)
            .collect()
    }

    /// Number of write calls a table has received.
    pub fn write_count(&self, table_name: &str) -> usize {
        self.writes_for(table_name).len()
    }

    /// Total rows appended to a table across all writes.
    pub fn row_count(&self, table_name: &str) -> usize {
        self.writes_for(table_name)
            .iter()
            .map(|frame| frame.height())
            .sum()
    }

    pub fn table_names(&self) -> BTreeSet<&str> {
        self.writes.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl TableStore for MemoryStore {
    fn write(&mut self, table_name: &str, rows: &DataFrame) -> Result<()> {
        self.writes.push((table_name.to_string(), rows.clone()));
        Ok(())
    }
}
