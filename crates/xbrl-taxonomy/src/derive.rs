//! Derive table schemas from taxonomy roles.
//!
//! Each role's root abstract concept contributes its Axis children as
//! key columns and its LineItems subtree as typed data columns. The
//! derived schemas are immutable and shared read-only by extraction.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use xbrl_model::{
    COL_DATE, COL_END_DATE, COL_ENTITY_ID, COL_FILING_ID, COL_START_DATE, ColumnSpec, Concept,
    LinkRole, PeriodType, SemanticType, TableSchema, Taxonomy,
};

use crate::error::{Result, TaxonomyError};

/// Schema derivation settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeriveOptions {
    /// Append an integer `filing_id` column for cross-filing
    /// disambiguation.
    pub generate_filing_id: bool,
}

/// Derive the table schema for one role.
pub fn derive_table_schema(role: &LinkRole, options: &DeriveOptions) -> Result<TableSchema> {
    let root = role
        .concepts
        .child_concepts
        .first()
        .ok_or_else(|| TaxonomyError::EmptyRole {
            role: role.definition.clone(),
        })?;

    let axes: Vec<String> = root
        .child_concepts
        .iter()
        .filter(|concept| concept.is_axis())
        .map(|concept| concept.name.clone())
        .collect();

    let line_items: Vec<&Concept> = root
        .child_concepts
        .iter()
        .filter(|concept| concept.is_line_items())
        .collect();
    if line_items.is_empty() {
        return Err(TaxonomyError::MissingLineItems {
            role: role.definition.clone(),
        });
    }

    let mut leaves: Vec<&Concept> = Vec::new();
    for concept in &line_items {
        collect_leaf_concepts(concept, &mut leaves);
    }

    // A table is instant only when every line item reports a point in
    // time; undeclared period types count as duration.
    let instant = !leaves.is_empty()
        && leaves
            .iter()
            .all(|leaf| leaf.period_type == Some(PeriodType::Instant));

    let mut columns: Vec<ColumnSpec> = Vec::new();
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    columns.push(ColumnSpec::new(COL_ENTITY_ID, SemanticType::Text));
    seen.insert(COL_ENTITY_ID);
    if instant {
        columns.push(ColumnSpec::new(COL_DATE, SemanticType::Text));
        seen.insert(COL_DATE);
    } else {
        columns.push(ColumnSpec::new(COL_START_DATE, SemanticType::Text));
        columns.push(ColumnSpec::new(COL_END_DATE, SemanticType::Text));
        seen.insert(COL_START_DATE);
        seen.insert(COL_END_DATE);
    }
    for axis in &axes {
        if seen.insert(axis.as_str()) {
            columns.push(ColumnSpec::new(axis.clone(), SemanticType::Text));
        }
    }
    for leaf in &leaves {
        if seen.insert(leaf.name.as_str()) {
            columns.push(ColumnSpec::new(
                leaf.name.clone(),
                SemanticType::from_concept_type(&leaf.concept_type),
            ));
        }
    }
    if options.generate_filing_id {
        columns.push(ColumnSpec::new(COL_FILING_ID, SemanticType::Integer64));
    }

    Ok(TableSchema {
        name: role.definition.clone(),
        instant,
        axes,
        columns,
    })
}

/// Derive one schema per taxonomy role.
///
/// Derivation runs once per role and the returned map is the memoized
/// result for the whole run. A role that fails derivation loses its
/// table only; the failure is logged, not propagated.
pub fn derive_table_schemas(
    taxonomy: &Taxonomy,
    options: &DeriveOptions,
) -> BTreeMap<String, TableSchema> {
    let mut schemas = BTreeMap::new();
    for role in &taxonomy.roles {
        match derive_table_schema(role, options) {
            Ok(schema) => {
                debug!(
                    table = %schema.name,
                    instant = schema.instant,
                    axis_count = schema.axes.len(),
                    column_count = schema.columns.len(),
                    "schema derived"
                );
                schemas.insert(schema.name.clone(), schema);
            }
            Err(error) => {
                warn!(role = %role.definition, %error, "schema derivation failed; table omitted");
            }
        }
    }
    schemas
}

/// Flatten a LineItems subtree into its leaf concepts, depth-first.
///
/// A concept with children is a grouping node and produces no column.
fn collect_leaf_concepts<'a>(concept: &'a Concept, leaves: &mut Vec<&'a Concept>) {
    for child in &concept.child_concepts {
        if child.is_group() {
            collect_leaf_concepts(child, leaves);
        } else {
            leaves.push(child);
        }
    }
}
