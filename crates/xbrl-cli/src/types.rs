use std::path::PathBuf;

use xbrl_extract::ExtractionSummary;

#[derive(Debug)]
pub struct ExtractionReport {
    pub output_dir: PathBuf,
    pub instance_count: usize,
    pub summary: ExtractionSummary,
}
