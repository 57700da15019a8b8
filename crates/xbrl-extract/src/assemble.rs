//! Assemble one instance's rows for one table schema.
//!
//! A context contributes a row exactly when its entity's axis-name set
//! equals the schema's axes and at least one of its facts names a
//! declared column. Rows keep the instance's context order.

use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::trace;

use xbrl_instance::Instance;
use xbrl_model::{SemanticType, TableSchema};

use crate::error::AssembleError;
use crate::values::{parse_bool, parse_f64, parse_i64};

type Record = BTreeMap<String, String>;

/// Build the typed row set for `schema` from one parsed instance.
///
/// The returned frame always carries the schema's full column list, in
/// schema order; it has zero rows when no context qualifies.
pub fn assemble(
    instance: &Instance,
    schema: &TableSchema,
    filing_id: Option<i64>,
) -> Result<DataFrame, AssembleError> {
    let axes = schema.axis_set();
    let data_columns = schema.data_columns();
    let mut records: Vec<Record> = Vec::new();

    for context in &instance.contexts {
        if !context.entity.matches_axes(&axes) {
            continue;
        }

        let mut record: Record = instance
            .facts_for(&context.id)
            .iter()
            .filter(|fact| schema.has_column(&fact.name))
            .map(|fact| (fact.name.clone(), fact.value.clone()))
            .collect();

        // A context with no facts in this table contributes no row.
        if record.is_empty() {
            continue;
        }

        record.extend(context.key_values(schema.instant, filing_id));

        // Safety net: drop rows whose data columns are all empty.
        let has_data = data_columns
            .iter()
            .any(|name| record.get(*name).is_some_and(|value| !value.is_empty()));
        if !has_data {
            trace!(table = %schema.name, context_id = %context.id, "empty row dropped");
            continue;
        }

        records.push(record);
    }

    build_frame(schema, &records)
}

/// Materialize string records as one typed `Series` per schema column.
fn build_frame(schema: &TableSchema, records: &[Record]) -> Result<DataFrame, AssembleError> {
    let mut columns: Vec<Column> = Vec::with_capacity(schema.columns.len());
    for column in &schema.columns {
        let name = column.name.as_str();
        let series = match column.semantic_type {
            SemanticType::Text => {
                let values: Vec<Option<String>> =
                    records.iter().map(|record| record.get(name).cloned()).collect();
                Series::new(name.into(), values)
            }
            SemanticType::Integer64 => {
                let values: Vec<Option<i64>> = records
                    .iter()
                    .map(|record| record.get(name).and_then(|value| parse_i64(value)))
                    .collect();
                Series::new(name.into(), values)
            }
            SemanticType::Float64 => {
                let values: Vec<Option<f64>> = records
                    .iter()
                    .map(|record| record.get(name).and_then(|value| parse_f64(value)))
                    .collect();
                Series::new(name.into(), values)
            }
            SemanticType::Boolean => {
                let values: Vec<Option<bool>> = records
                    .iter()
                    .map(|record| record.get(name).and_then(|value| parse_bool(value)))
                    .collect();
                Series::new(name.into(), values)
            }
        };
        columns.push(series.into_column());
    }

    DataFrame::new(columns).map_err(|source| AssembleError::Frame {
        table: schema.name.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::AnyValue;

    use xbrl_instance::parse_str;
    use xbrl_model::{COL_DATE, COL_END_DATE, COL_ENTITY_ID, COL_FILING_ID, COL_START_DATE, ColumnSpec};

    const INSTANCE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<xbrl xmlns="http://www.xbrl.org/2003/instance"
      xmlns:link="http://www.xbrl.org/2003/linkbase"
      xmlns:xlink="http://www.w3.org/1999/xlink"
      xmlns:xbrldi="http://xbrl.org/2006/xbrldi"
      xmlns:ferc="http://ferc.gov/form/2022-01-01/ferc">
  <link:schemaRef xlink:type="simple" xlink:href="https://ferc.gov/form/2022-01-01/form1.xsd"/>
  <context id="c1">
    <entity>
      <identifier scheme="http://www.ferc.gov/CID">E1</identifier>
    </entity>
    <period>
      <instant>2022-12-31</instant>
    </period>
  </context>
  <context id="c2">
    <entity>
      <identifier scheme="http://www.ferc.gov/CID">E1</identifier>
      <segment>
        <xbrldi:explicitMember dimension="ferc:UtilityTypeAxis">Electric</xbrldi:explicitMember>
      </segment>
    </entity>
    <period>
      <instant>2022-12-31</instant>
    </period>
  </context>
  <context id="c3">
    <entity>
      <identifier scheme="http://www.ferc.gov/CID">E1</identifier>
    </entity>
    <period>
      <startDate>2022-01-01</startDate>
      <endDate>2022-12-31</endDate>
    </period>
  </context>
  <ferc:Assets id="f1" contextRef="c1">1000</ferc:Assets>
  <ferc:Assets id="f2" contextRef="c2">400</ferc:Assets>
  <ferc:OperatingRevenue id="f3" contextRef="c3">250.5</ferc:OperatingRevenue>
  <ferc:Unrelated id="f4" contextRef="c3">9</ferc:Unrelated>
</xbrl>
"#;

    fn instance() -> Instance {
        parse_str(INSTANCE).expect("parse instance")
    }

    fn instant_schema(axes: &[&str]) -> TableSchema {
        let mut columns = vec![
            ColumnSpec::new(COL_ENTITY_ID, SemanticType::Text),
            ColumnSpec::new(COL_DATE, SemanticType::Text),
        ];
        for axis in axes {
            columns.push(ColumnSpec::new(*axis, SemanticType::Text));
        }
        columns.push(ColumnSpec::new("Assets", SemanticType::Integer64));
        TableSchema {
            name: "assets".to_string(),
            instant: true,
            axes: axes.iter().map(|axis| (*axis).to_string()).collect(),
            columns,
        }
    }

    #[test]
    fn instant_context_yields_typed_row() {
        let frame = assemble(&instance(), &instant_schema(&[]), None).expect("assemble");
        assert_eq!(frame.height(), 1);
        let row_entity = frame.column(COL_ENTITY_ID).unwrap().get(0).unwrap();
        assert_eq!(row_entity, AnyValue::String("E1"));
        let row_date = frame.column(COL_DATE).unwrap().get(0).unwrap();
        assert_eq!(row_date, AnyValue::String("2022-12-31"));
        let row_assets = frame.column("Assets").unwrap().get(0).unwrap();
        assert_eq!(row_assets, AnyValue::Int64(1000));
    }

    #[test]
    fn axis_set_must_match_exactly() {
        // The dimensioned context is excluded from the bare table and
        // included in the one-axis table; vice versa for the bare one.
        let bare = assemble(&instance(), &instant_schema(&[]), None).expect("assemble");
        assert_eq!(bare.height(), 1);

        let with_axis =
            assemble(&instance(), &instant_schema(&["UtilityTypeAxis"]), None).expect("assemble");
        assert_eq!(with_axis.height(), 1);
        let axis_value = with_axis.column("UtilityTypeAxis").unwrap().get(0).unwrap();
        assert_eq!(axis_value, AnyValue::String("Electric"));
        let assets = with_axis.column("Assets").unwrap().get(0).unwrap();
        assert_eq!(assets, AnyValue::Int64(400));
    }

    #[test]
    fn context_without_matching_facts_contributes_no_row() {
        let mut schema = instant_schema(&[]);
        schema.name = "liabilities".to_string();
        schema.columns.retain(|column| column.name != "Assets");
        schema
            .columns
            .push(ColumnSpec::new("Liabilities", SemanticType::Integer64));
        let frame = assemble(&instance(), &schema, None).expect("assemble");
        assert_eq!(frame.height(), 0);
        assert_eq!(frame.width(), 3);
    }

    #[test]
    fn duration_schema_gets_start_and_end_dates() {
        let schema = TableSchema {
            name: "income".to_string(),
            instant: false,
            axes: Vec::new(),
            columns: vec![
                ColumnSpec::new(COL_ENTITY_ID, SemanticType::Text),
                ColumnSpec::new(COL_START_DATE, SemanticType::Text),
                ColumnSpec::new(COL_END_DATE, SemanticType::Text),
                ColumnSpec::new("OperatingRevenue", SemanticType::Float64),
            ],
        };
        let frame = assemble(&instance(), &schema, None).expect("assemble");
        // c1 (instant, Assets only) has no matching fact here; c3 does.
        assert_eq!(frame.height(), 1);
        let start = frame.column(COL_START_DATE).unwrap().get(0).unwrap();
        assert_eq!(start, AnyValue::String("2022-01-01"));
        let revenue = frame.column("OperatingRevenue").unwrap().get(0).unwrap();
        assert_eq!(revenue, AnyValue::Float64(250.5));
    }

    #[test]
    fn unparsable_numeric_becomes_null() {
        let xml = INSTANCE.replace(
            r#"<ferc:Assets id="f1" contextRef="c1">1000</ferc:Assets>"#,
            r#"<ferc:Assets id="f1" contextRef="c1">not-reported</ferc:Assets>"#,
        );
        let instance = parse_str(&xml).expect("parse");
        let frame = assemble(&instance, &instant_schema(&[]), None).expect("assemble");
        assert_eq!(frame.height(), 1);
        let assets = frame.column("Assets").unwrap().get(0).unwrap();
        assert_eq!(assets, AnyValue::Null);
    }

    #[test]
    fn filing_id_column_is_populated_when_present() {
        let mut schema = instant_schema(&[]);
        schema
            .columns
            .push(ColumnSpec::new(COL_FILING_ID, SemanticType::Integer64));
        let frame = assemble(&instance(), &schema, Some(7)).expect("assemble");
        let filing = frame.column(COL_FILING_ID).unwrap().get(0).unwrap();
        assert_eq!(filing, AnyValue::Int64(7));
    }

    #[test]
    fn empty_frame_preserves_schema_columns() {
        let schema = instant_schema(&["PlantNameAxis"]);
        let frame = assemble(&instance(), &schema, None).expect("assemble");
        assert_eq!(frame.height(), 0);
        let names: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["entity_id", "date", "PlantNameAxis", "Assets"]);
    }
}
