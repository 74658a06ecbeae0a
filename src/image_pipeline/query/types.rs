//! Query file types

use std::path::PathBuf;

/// File name suffix that marks a file as a query.
pub const QUERY_FILE_SUFFIX: &str = ".sql";

/// A discovered query file and its SQL text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFile {
    /// Location the query was read from
    pub path: PathBuf,
    /// Full text of the file, one SQL statement
    pub sql: String,
}

impl QueryFile {
    pub fn new(path: impl Into<PathBuf>, sql: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sql: sql.into(),
        }
    }

    /// File name used to label the query in logs.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
