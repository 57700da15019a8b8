use std::path::PathBuf;

use polars::error::PolarsError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write table {table}: {source}")]
    Write {
        table: String,
        #[source]
        source: PolarsError,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
