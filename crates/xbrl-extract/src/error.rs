use polars::error::PolarsError;

use xbrl_instance::ParseError;
use xbrl_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    #[error("failed to build rows for table {table}: {source}")]
    Frame {
        table: String,
        #[source]
        source: PolarsError,
    },
}

/// Failure of one instance's parse-and-assemble work. Recovered at
/// instance granularity: the instance is skipped and excluded from
/// every table.
#[derive(Debug, thiserror::Error)]
pub enum InstanceError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Assemble(#[from] AssembleError),
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("batch_size must be positive")]
    InvalidBatchSize,

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to merge rows for table {table}: {source}")]
    Merge {
        table: String,
        #[source]
        source: PolarsError,
    },

    /// A store write failure is fatal for the run; batches flushed
    /// before it stay persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}
