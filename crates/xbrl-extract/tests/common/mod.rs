//! Shared fixtures for extraction integration tests.

use std::path::PathBuf;

use polars::prelude::AnyValue;

use xbrl_model::{Concept, LinkRole, PeriodType, Taxonomy};
use xbrl_store::{MemoryStore, StoreError, TableStore};

pub const BALANCE_TABLE: &str = "001 - Schedule - Balance";
pub const PLANT_TABLE: &str = "002 - Schedule - Utility Plant";

fn leaf(name: &str, concept_type: &str, period_type: PeriodType) -> Concept {
    Concept {
        name: name.to_string(),
        concept_type: concept_type.to_string(),
        period_type: Some(period_type),
        child_concepts: Vec::new(),
    }
}

fn group(name: &str, children: Vec<Concept>) -> Concept {
    Concept {
        name: name.to_string(),
        concept_type: "Abstract".to_string(),
        period_type: None,
        child_concepts: children,
    }
}

fn axis(name: &str) -> Concept {
    Concept {
        name: name.to_string(),
        concept_type: "Axis".to_string(),
        period_type: None,
        child_concepts: Vec::new(),
    }
}

/// Two instant tables: an undimensioned balance schedule and a plant
/// schedule keyed by utility type.
pub fn sample_taxonomy() -> Taxonomy {
    Taxonomy {
        roles: vec![
            LinkRole {
                uri: "http://example.com/roles/001".to_string(),
                definition: BALANCE_TABLE.to_string(),
                concepts: group(
                    "BalanceRoot",
                    vec![group(
                        "BalanceTable",
                        vec![group(
                            "BalanceLineItems",
                            vec![
                                leaf("Assets", "Monetary", PeriodType::Instant),
                                leaf("Liabilities", "Monetary", PeriodType::Instant),
                            ],
                        )],
                    )],
                ),
            },
            LinkRole {
                uri: "http://example.com/roles/002".to_string(),
                definition: PLANT_TABLE.to_string(),
                concepts: group(
                    "PlantRoot",
                    vec![group(
                        "PlantTable",
                        vec![
                            axis("UtilityTypeAxis"),
                            group(
                                "PlantLineItems",
                                vec![leaf("PlantCapacity", "Power", PeriodType::Instant)],
                            ),
                        ],
                    )],
                ),
            },
        ],
    }
}

/// One filing: an undimensioned balance context and a utility-type
/// dimensioned plant context.
pub fn instance_xml(entity: &str, assets: i64, capacity: f64) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<xbrl xmlns="http://www.xbrl.org/2003/instance"
      xmlns:link="http://www.xbrl.org/2003/linkbase"
      xmlns:xlink="http://www.w3.org/1999/xlink"
      xmlns:xbrldi="http://xbrl.org/2006/xbrldi"
      xmlns:ferc="http://ferc.gov/form/2022-01-01/ferc">
  <link:schemaRef xlink:type="simple" xlink:href="https://ferc.gov/form/2022-01-01/form1.xsd"/>
  <context id="c1">
    <entity>
      <identifier scheme="http://www.ferc.gov/CID">{entity}</identifier>
    </entity>
    <period>
      <instant>2022-12-31</instant>
    </period>
  </context>
  <context id="c2">
    <entity>
      <identifier scheme="http://www.ferc.gov/CID">{entity}</identifier>
      <segment>
        <xbrldi:explicitMember dimension="ferc:UtilityTypeAxis">Electric</xbrldi:explicitMember>
      </segment>
    </entity>
    <period>
      <instant>2022-12-31</instant>
    </period>
  </context>
  <ferc:Assets id="f1" contextRef="c1">{assets}</ferc:Assets>
  <ferc:PlantCapacity id="f2" contextRef="c2">{capacity}</ferc:PlantCapacity>
</xbrl>
"#
    )
}

/// Write numbered instance documents and return `(path, index)` pairs.
pub fn write_instances(dir: &std::path::Path, documents: &[String]) -> Vec<(PathBuf, i64)> {
    documents
        .iter()
        .enumerate()
        .map(|(index, xml)| {
            let path = dir.join(format!("filing-{index}.xbrl"));
            std::fs::write(&path, xml).expect("write instance");
            (path, index as i64)
        })
        .collect()
}

/// All values of an integer column across every write for a table,
/// sorted for multiset comparison.
pub fn sorted_i64_values(store: &MemoryStore, table: &str, column: &str) -> Vec<i64> {
    let mut values = Vec::new();
    for frame in store.writes_for(table) {
        let col = frame.column(column).expect("column");
        for idx in 0..frame.height() {
            if let AnyValue::Int64(value) = col.get(idx).expect("value") {
                values.push(value);
            }
        }
    }
    values.sort_unstable();
    values
}

/// A store whose writes always fail.
#[derive(Debug, Default)]
pub struct FailingStore;

impl TableStore for FailingStore {
    fn write(&mut self, _table_name: &str, _rows: &polars::prelude::DataFrame) -> xbrl_store::Result<()> {
        Err(StoreError::Io {
            path: PathBuf::from("unavailable"),
            source: std::io::Error::other("store offline"),
        })
    }
}
