//! Instance-side model: periods, axes, entities, contexts, and facts.
//!
//! A filing instance is a flat set of facts, each pointing at a context
//! that carries the entity, period, and dimension metadata needed to
//! place the fact in a table row.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schema::{COL_DATE, COL_END_DATE, COL_ENTITY_ID, COL_FILING_ID, COL_START_DATE};

/// An XBRL reporting period, either a point in time or a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub instant: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: NaiveDate,
}

impl Period {
    /// A point-in-time period. `start_date` is always absent.
    pub fn instant(end_date: NaiveDate) -> Self {
        Self {
            instant: true,
            start_date: None,
            end_date,
        }
    }

    /// A duration period. Both dates are always present.
    pub fn duration(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            instant: false,
            start_date: Some(start_date),
            end_date,
        }
    }
}

/// Whether an axis value is enumerated by the taxonomy or supplied by the
/// filing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisKind {
    Explicit,
    Typed,
}

/// A dimension qualifying a fact beyond entity and period.
///
/// Axis names have their namespace prefix stripped so they line up with
/// the axis concept names a schema derives from the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    pub name: String,
    pub value: String,
    pub kind: AxisKind,
}

/// The filer plus any dimensions attached to its context segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub identifier: String,
    pub dimensions: Vec<Axis>,
}

impl Entity {
    /// Axis names present on this entity.
    pub fn axis_names(&self) -> BTreeSet<&str> {
        self.dimensions
            .iter()
            .map(|axis| axis.name.as_str())
            .collect()
    }

    /// True when this entity's axis-name set equals `axes` exactly.
    ///
    /// Dimension order is irrelevant; an entity with extra or missing
    /// axes does not match.
    pub fn matches_axes(&self, axes: &BTreeSet<String>) -> bool {
        if self.dimensions.len() != axes.len() {
            return false;
        }
        self.dimensions.iter().all(|axis| axes.contains(&axis.name))
    }
}

/// Grouping of entity, period, and dimension metadata shared by facts.
///
/// Contexts are scoped to a single instance and discarded once row
/// assembly for that instance completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub id: String,
    pub entity: Entity,
    pub period: Period,
}

impl Context {
    /// Identifying column values for a row built from this context.
    ///
    /// The date column form follows the table, not the period: instant
    /// tables get a single `date`, duration tables get
    /// `start_date`/`end_date` (the former empty for instant contexts).
    pub fn key_values(&self, instant_table: bool, filing_id: Option<i64>) -> BTreeMap<String, String> {
        let mut values = BTreeMap::new();
        values.insert(COL_ENTITY_ID.to_string(), self.entity.identifier.clone());

        if instant_table {
            values.insert(COL_DATE.to_string(), iso_date(self.period.end_date));
        } else {
            if let Some(start) = self.period.start_date {
                values.insert(COL_START_DATE.to_string(), iso_date(start));
            }
            values.insert(COL_END_DATE.to_string(), iso_date(self.period.end_date));
        }

        for axis in &self.entity.dimensions {
            values.insert(axis.name.clone(), axis.value.clone());
        }

        if let Some(id) = filing_id {
            values.insert(COL_FILING_ID.to_string(), id.to_string());
        }

        values
    }
}

/// A single named data point tied to a context.
///
/// Facts with no value are discarded at parse time, so `value` is always
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub name: String,
    pub context_id: String,
    pub value: String,
}

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entity_with_axes(names: &[&str]) -> Entity {
        Entity {
            identifier: "C000001".to_string(),
            dimensions: names
                .iter()
                .map(|name| Axis {
                    name: (*name).to_string(),
                    value: format!("{name}Value"),
                    kind: AxisKind::Explicit,
                })
                .collect(),
        }
    }

    fn axis_set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn instant_period_has_no_start_date() {
        let period = Period::instant(date(2022, 12, 31));
        assert!(period.instant);
        assert!(period.start_date.is_none());
    }

    #[test]
    fn duration_period_has_both_dates() {
        let period = Period::duration(date(2022, 1, 1), date(2022, 12, 31));
        assert!(!period.instant);
        assert_eq!(period.start_date, Some(date(2022, 1, 1)));
    }

    #[test]
    fn matches_axes_requires_exact_set() {
        let entity = entity_with_axes(&["UtilityTypeAxis"]);
        assert!(entity.matches_axes(&axis_set(&["UtilityTypeAxis"])));
        assert!(!entity.matches_axes(&axis_set(&[])));
        assert!(!entity.matches_axes(&axis_set(&["UtilityTypeAxis", "RegionAxis"])));
        assert!(!entity.matches_axes(&axis_set(&["RegionAxis"])));

        let bare = entity_with_axes(&[]);
        assert!(bare.matches_axes(&axis_set(&[])));
        assert!(!bare.matches_axes(&axis_set(&["UtilityTypeAxis"])));
    }

    #[test]
    fn key_values_instant_table() {
        let context = Context {
            id: "c1".to_string(),
            entity: entity_with_axes(&["UtilityTypeAxis"]),
            period: Period::instant(date(2022, 12, 31)),
        };
        let values = context.key_values(true, None);
        assert_eq!(values.get(COL_ENTITY_ID).map(String::as_str), Some("C000001"));
        assert_eq!(values.get(COL_DATE).map(String::as_str), Some("2022-12-31"));
        assert_eq!(
            values.get("UtilityTypeAxis").map(String::as_str),
            Some("UtilityTypeAxisValue")
        );
        assert!(!values.contains_key(COL_START_DATE));
        assert!(!values.contains_key(COL_END_DATE));
        assert!(!values.contains_key(COL_FILING_ID));
    }

    #[test]
    fn key_values_duration_table_with_filing_id() {
        let context = Context {
            id: "c2".to_string(),
            entity: entity_with_axes(&[]),
            period: Period::duration(date(2022, 1, 1), date(2022, 12, 31)),
        };
        let values = context.key_values(false, Some(7));
        assert_eq!(values.get(COL_START_DATE).map(String::as_str), Some("2022-01-01"));
        assert_eq!(values.get(COL_END_DATE).map(String::as_str), Some("2022-12-31"));
        assert_eq!(values.get(COL_FILING_ID).map(String::as_str), Some("7"));
        assert!(!values.contains_key(COL_DATE));
    }

    #[test]
    fn key_values_instant_context_in_duration_table_omits_start() {
        let context = Context {
            id: "c3".to_string(),
            entity: entity_with_axes(&[]),
            period: Period::instant(date(2022, 12, 31)),
        };
        let values = context.key_values(false, None);
        assert!(!values.contains_key(COL_START_DATE));
        assert_eq!(values.get(COL_END_DATE).map(String::as_str), Some("2022-12-31"));
    }
}
