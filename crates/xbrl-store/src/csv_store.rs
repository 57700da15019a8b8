//! CSV-backed table store.
//!
//! One file per table under a root directory. The first write for a
//! table creates the file with a header row; later writes append rows
//! only, so repeated flushes accumulate.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::store::TableStore;

pub struct CsvStore {
    root: PathBuf,
}

impl CsvStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing a table. Table names are role definitions, which
    /// carry spaces and punctuation, so they are sanitized first.
    pub fn table_path(&self, table_name: &str) -> PathBuf {
        self.root.join(format!("{}.csv", sanitize_file_name(table_name)))
    }
}

impl TableStore for CsvStore {
    fn write(&mut self, table_name: &str, rows: &DataFrame) -> Result<()> {
        let path = self.table_path(table_name);
        let include_header = !path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;

        let mut frame = rows.clone();
        CsvWriter::new(file)
            .include_header(include_header)
            .finish(&mut frame)
            .map_err(|source| StoreError::Write {
                table: table_name.to_string(),
                source,
            })?;

        debug!(
            table = %table_name,
            path = %path.display(),
            row_count = rows.height(),
            include_header,
            "rows appended"
        );
        Ok(())
    }
}

fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sep = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep && !out.is_empty() {
            out.push('_');
            last_was_sep = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("table");
    }
    out
}
