//! Instance file discovery.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("instance directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read instance directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// List the filing instance documents under `dir`.
///
/// Matches `.xbrl` and `.xml` files (case-insensitive), sorted by file
/// name, enumerated into the `(path, index)` pairs extraction consumes.
/// The index doubles as the `filing_id` value when id generation is on.
pub fn discover_instances(dir: &Path) -> Result<Vec<(PathBuf, i64)>, DiscoveryError> {
    if !dir.is_dir() {
        return Err(DiscoveryError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| DiscoveryError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|source| DiscoveryError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_instance = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("xbrl") || ext.eq_ignore_ascii_case("xml"))
            .unwrap_or(false);
        if is_instance {
            files.push(path);
        }
    }

    files.sort();
    Ok(files
        .into_iter()
        .enumerate()
        .map(|(index, path)| (path, index as i64))
        .collect())
}
