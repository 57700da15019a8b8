use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use xbrl_cli::discover_instances;
use xbrl_extract::{ExtractOptions, extract};
use xbrl_store::CsvStore;
use xbrl_taxonomy::{DeriveOptions, derive_table_schemas, load_taxonomy};

use crate::cli::{ExtractArgs, TablesArgs};
use crate::summary::{apply_table_style, header_cell};
use crate::types::ExtractionReport;

pub fn run_extract(args: &ExtractArgs) -> Result<ExtractionReport> {
    let span = info_span!("run", taxonomy = %args.taxonomy.display());
    let _guard = span.enter();
    let start = Instant::now();

    let taxonomy = load_taxonomy(&args.taxonomy).context("load taxonomy")?;
    let instances =
        discover_instances(&args.instance_dir).context("discover filing instances")?;
    info!(
        instance_dir = %args.instance_dir.display(),
        instance_count = instances.len(),
        "instances discovered"
    );

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.instance_dir.join("tables"));
    let mut store = CsvStore::new(&output_dir).context("open table store")?;

    let options = ExtractOptions {
        batch_size: args.batch_size,
        workers: args.workers,
        generate_filing_id: args.filing_id,
    };
    let summary = extract(&taxonomy, &instances, &mut store, &options)
        .context("extract instances")?;

    if let Some(path) = &args.summary_json {
        let json = serde_json::to_string_pretty(&summary).context("serialize summary")?;
        fs::write(path, json).with_context(|| format!("write summary {}", path.display()))?;
    }

    info!(
        output_dir = %output_dir.display(),
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );

    Ok(ExtractionReport {
        output_dir,
        instance_count: instances.len(),
        summary,
    })
}

pub fn run_tables(args: &TablesArgs) -> Result<()> {
    let taxonomy = load_taxonomy(&args.taxonomy).context("load taxonomy")?;
    let options = DeriveOptions {
        generate_filing_id: args.filing_id,
    };
    let schemas = derive_table_schemas(&taxonomy, &options);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Period"),
        header_cell("Axes"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    for schema in schemas.values() {
        let period = if schema.instant { "instant" } else { "duration" };
        let axes = if schema.axes.is_empty() {
            "-".to_string()
        } else {
            schema.axes.join(", ")
        };
        table.add_row(vec![
            schema.name.clone(),
            period.to_string(),
            axes,
            schema.columns.len().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
