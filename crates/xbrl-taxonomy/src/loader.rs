//! Load a taxonomy from its JSON interchange form.

use std::fs;
use std::path::Path;

use tracing::debug;

use xbrl_model::Taxonomy;

use crate::error::{Result, TaxonomyError};

/// Read and deserialize a taxonomy concept tree.
pub fn load_taxonomy(path: &Path) -> Result<Taxonomy> {
    let text = fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let taxonomy: Taxonomy =
        serde_json::from_str(&text).map_err(|source| TaxonomyError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        taxonomy = %path.display(),
        role_count = taxonomy.roles.len(),
        "taxonomy loaded"
    );
    Ok(taxonomy)
}
