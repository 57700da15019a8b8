use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    #[error("failed to read taxonomy {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse taxonomy JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("role {role}: no root concept")]
    EmptyRole { role: String },

    #[error("role {role}: no LineItems concept under the root")]
    MissingLineItems { role: String },
}

pub type Result<T> = std::result::Result<T, TaxonomyError>;
