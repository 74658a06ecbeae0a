//! Query collector backed by a flat directory of `.sql` files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};
use crate::image_pipeline::common::error::{DrawError, Result};
use crate::image_pipeline::query::collector::QueryCollector;
use crate::image_pipeline::query::types::{QueryFile, QUERY_FILE_SUFFIX};

/// Reads every `*.sql` file directly inside a directory.
///
/// Subdirectories are not visited. Files are returned sorted by file name so
/// that the left-to-right order of the composite is stable between runs.
pub struct DirectoryQueryCollector;

impl QueryCollector for DirectoryQueryCollector {
    fn collect(&self, dir: &Path) -> Result<Vec<QueryFile>> {
        debug!("Scanning {} for query files", dir.display());

        let entries = fs::read_dir(dir)
            .map_err(|e| DrawError::Discovery(format!("{}: {}", dir.display(), e)))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| DrawError::Discovery(format!("{}: {}", dir.display(), e)))?;
            let file_type = entry
                .file_type()
                .map_err(|e| DrawError::Discovery(format!("{}: {}", entry.path().display(), e)))?;
            if !file_type.is_file() {
                continue;
            }
            if entry.file_name().to_string_lossy().ends_with(QUERY_FILE_SUFFIX) {
                paths.push(entry.path());
            }
        }
        paths.sort();

        let mut queries = Vec::with_capacity(paths.len());
        for path in paths {
            let sql = fs::read_to_string(&path)
                .map_err(|e| DrawError::Discovery(format!("{}: {}", path.display(), e)))?;
            debug!("Loaded query {} ({} bytes)", path.display(), sql.len());
            queries.push(QueryFile::new(path, sql));
        }

        info!(count = queries.len(), dir = %dir.display(), "Collected queries");
        Ok(queries)
    }
}
