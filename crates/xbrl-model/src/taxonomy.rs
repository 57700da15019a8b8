//! Taxonomy input types.
//!
//! The taxonomy arrives as a pre-extracted concept tree (JSON
//! interchange); loading the underlying XSD documents is outside this
//! system. Each role is one report schedule and derives into one table.

use serde::{Deserialize, Serialize};

/// XBRL `periodType` of a concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Instant,
    Duration,
}

/// One node of a role's concept tree.
///
/// A concept with children is a grouping node; a leaf under a LineItems
/// subtree becomes a table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub name: String,
    #[serde(rename = "type")]
    pub concept_type: String,
    #[serde(default, rename = "periodType")]
    pub period_type: Option<PeriodType>,
    #[serde(default, rename = "childConcepts")]
    pub child_concepts: Vec<Concept>,
}

impl Concept {
    pub fn is_axis(&self) -> bool {
        self.concept_type == "Axis"
    }

    /// Grouping node iff it has children; this is the sole recursion
    /// rule for the LineItems walk.
    pub fn is_group(&self) -> bool {
        !self.child_concepts.is_empty()
    }

    pub fn is_line_items(&self) -> bool {
        self.name.ends_with("LineItems")
    }
}

/// One report schedule within a taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRole {
    pub uri: String,
    /// Human-readable role definition; doubles as the table name.
    pub definition: String,
    pub concepts: Concept,
}

/// A taxonomy as consumed by schema derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub roles: Vec<LinkRole>,
}
