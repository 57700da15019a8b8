//! Extraction orchestrator.
//!
//! Derives every table schema once, fans instance parsing and row
//! assembly out over a bounded worker pool, and merges completed
//! per-instance results into per-table accumulations that flush to the
//! store after every `batch_size` instances and after the last one.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use rayon::ThreadPoolBuilder;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use xbrl_instance::parse;
use xbrl_model::{TableSchema, Taxonomy};
use xbrl_store::TableStore;
use xbrl_taxonomy::{DeriveOptions, derive_table_schemas};

use crate::accumulator::TableAccumulator;
use crate::assemble::assemble;
use crate::error::{ExtractError, InstanceError};

/// Configuration surface of one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Number of instances accumulated between store flushes.
    pub batch_size: usize,
    /// Worker pool size; platform-determined when unset.
    pub workers: Option<usize>,
    /// Append a `filing_id` column carrying each instance's sequence
    /// index.
    pub generate_filing_id: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            batch_size: 25,
            workers: None,
            generate_filing_id: false,
        }
    }
}

/// An instance excluded from the run, with the failure that excluded it.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedInstance {
    pub path: PathBuf,
    pub reason: String,
}

/// What an extraction run did: per-table row counts plus the explicit
/// skip list. Nothing is dropped without a record here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionSummary {
    /// Rows extracted per table, including zero-row tables.
    pub table_rows: BTreeMap<String, usize>,
    /// Instances excluded from every table, with reasons.
    pub skipped: Vec<SkippedInstance>,
    /// Instances parsed and assembled successfully.
    pub instances_processed: usize,
    /// Flush passes issued to the store.
    pub flushes: usize,
}

/// Run extraction over `instance_paths` against `taxonomy`, appending
/// rows to `store`.
///
/// Schemas are derived up front and shared read-only across workers;
/// each worker owns one instance end-to-end. Merge and flush run on the
/// caller thread only. A single instance's failure skips that instance;
/// a store failure aborts the run.
pub fn extract(
    taxonomy: &Taxonomy,
    instance_paths: &[(PathBuf, i64)],
    store: &mut dyn TableStore,
    options: &ExtractOptions,
) -> Result<ExtractionSummary, ExtractError> {
    if options.batch_size == 0 {
        return Err(ExtractError::InvalidBatchSize);
    }

    let span = info_span!("extract", instance_count = instance_paths.len());
    let _guard = span.enter();

    let derive_options = DeriveOptions {
        generate_filing_id: options.generate_filing_id,
    };
    let schemas = derive_table_schemas(taxonomy, &derive_options);
    info!(table_count = schemas.len(), "schemas derived");

    let pool = ThreadPoolBuilder::new()
        .num_threads(options.workers.unwrap_or(0))
        .build()?;

    let mut summary = ExtractionSummary::default();
    for name in schemas.keys() {
        summary.table_rows.insert(name.clone(), 0);
    }

    let mut accumulator = TableAccumulator::new();

    for chunk in instance_paths.chunks(options.batch_size) {
        let results: Vec<(&PathBuf, Result<BTreeMap<String, DataFrame>, InstanceError>)> = pool
            .install(|| {
                chunk
                    .par_iter()
                    .map(|(path, index)| {
                        (
                            path,
                            process_instance(path, *index, &schemas, options.generate_filing_id),
                        )
                    })
                    .collect()
            });

        // Single-threaded section: merge in submission order, then
        // flush and clear the accumulations.
        for (path, result) in results {
            match result {
                Ok(frames) => {
                    summary.instances_processed += 1;
                    for (table, frame) in frames {
                        *summary.table_rows.entry(table.clone()).or_insert(0) += frame.height();
                        accumulator.merge(&table, frame)?;
                    }
                }
                Err(error) => {
                    warn!(instance = %path.display(), %error, "instance skipped");
                    summary.skipped.push(SkippedInstance {
                        path: path.clone(),
                        reason: error.to_string(),
                    });
                }
            }
        }

        let writes = accumulator.flush(store)?;
        summary.flushes += 1;
        debug!(
            batch_instances = chunk.len(),
            tables_written = writes,
            "batch flushed"
        );
    }

    let total_rows: usize = summary.table_rows.values().sum();
    info!(
        instances_processed = summary.instances_processed,
        skipped = summary.skipped.len(),
        total_rows,
        flushes = summary.flushes,
        "extraction complete"
    );
    Ok(summary)
}

/// One worker's unit of work: parse an instance and assemble its rows
/// for every table.
fn process_instance(
    path: &Path,
    index: i64,
    schemas: &BTreeMap<String, TableSchema>,
    generate_filing_id: bool,
) -> Result<BTreeMap<String, DataFrame>, InstanceError> {
    let instance = parse(path)?;
    let filing_id = generate_filing_id.then_some(index);

    let mut frames = BTreeMap::new();
    for (name, schema) in schemas {
        let frame = assemble(&instance, schema, filing_id)?;
        if frame.height() > 0 {
            frames.insert(name.clone(), frame);
        }
    }
    Ok(frames)
}
