use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read instance {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed instance XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("instance has no schemaRef taxonomy reference")]
    MissingSchemaRef,

    #[error("context {context_id}: missing {element} element")]
    MissingElement {
        context_id: String,
        element: &'static str,
    },

    #[error("context {context_id}: invalid date value {value:?}")]
    InvalidDate {
        context_id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("context {context_id}: dimension member has no dimension attribute")]
    MissingDimension { context_id: String },

    #[error("context {context_id}: typed dimension {dimension} has no value element")]
    MissingTypedValue {
        context_id: String,
        dimension: String,
    },

    #[error("fact {fact_id} has no contextRef attribute")]
    MissingContextRef { fact_id: String },

    #[error("fact {name} references unknown context {context_id}")]
    UnknownContext { name: String, context_id: String },
}

pub type Result<T> = std::result::Result<T, ParseError>;
