//! Table schemas derived from taxonomy roles.
//!
//! A schema is derived once per role, is immutable afterwards, and is
//! shared read-only across worker threads during extraction.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the filing entity; present in every table.
pub const COL_ENTITY_ID: &str = "entity_id";
/// Point-in-time date column; present in instant tables only.
pub const COL_DATE: &str = "date";
/// Duration start column; present in duration tables only.
pub const COL_START_DATE: &str = "start_date";
/// Duration end column; present in duration tables only.
pub const COL_END_DATE: &str = "end_date";
/// Optional cross-filing disambiguation column.
pub const COL_FILING_ID: &str = "filing_id";

/// Closed set of value types a column can carry.
///
/// Taxonomy concept type strings collapse onto this enum at
/// schema-derivation time; nothing downstream dispatches on the raw
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SemanticType {
    Text,
    Integer64,
    Float64,
    Boolean,
}

impl SemanticType {
    /// Map a taxonomy concept type to a semantic column type.
    ///
    /// Unrecognized types fall back to `Text`.
    pub fn from_concept_type(concept_type: &str) -> Self {
        match concept_type {
            "Monetary" | "Integer" | "GYear" | "Energy" => SemanticType::Integer64,
            "Decimal" | "Power" | "PerUnit" => SemanticType::Float64,
            "Boolean" => SemanticType::Boolean,
            _ => SemanticType::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Text => "text",
            SemanticType::Integer64 => "integer",
            SemanticType::Float64 => "float",
            SemanticType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One typed column of a table schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub semantic_type: SemanticType,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
        }
    }
}

/// The relational shape of one taxonomy role.
///
/// `columns` preserves derivation order: identifying columns first, then
/// one string column per axis, then the line-item data columns. A table
/// is either instant (`date`) or duration (`start_date`/`end_date`),
/// never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub instant: bool,
    pub axes: Vec<String>,
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    /// Axis names as a set, for context eligibility checks.
    pub fn axis_set(&self) -> BTreeSet<String> {
        self.axes.iter().cloned().collect()
    }

    /// Type of a declared column, if the schema has it.
    pub fn column_type(&self, name: &str) -> Option<SemanticType> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .map(|column| column.semantic_type)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_type(name).is_some()
    }

    /// True for the identifying columns that key a row rather than carry
    /// reported data: `entity_id`, the date column(s), the axis columns,
    /// and `filing_id`.
    pub fn is_key_column(&self, name: &str) -> bool {
        matches!(
            name,
            COL_ENTITY_ID | COL_DATE | COL_START_DATE | COL_END_DATE | COL_FILING_ID
        ) || self.axes.iter().any(|axis| axis == name)
    }

    /// Names of the data (non-key) columns.
    pub fn data_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|column| column.name.as_str())
            .filter(|name| !self.is_key_column(name))
            .collect()
    }
}
