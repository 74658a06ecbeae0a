//! Row source backed by a SQLite database file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};
use tracing::{debug, info_span};
use crate::image_pipeline::common::error::{DrawError, Result};
use crate::image_pipeline::rows::source::RowSource;
use crate::image_pipeline::rows::types::PixelRecord;

/// Number of columns every pixel query must return.
const RECORD_COLUMNS: usize = 5;

/// Executes queries against a SQLite file.
///
/// No connection is held between queries. Each call to [`RowSource::fetch_rows`]
/// opens the database, runs the statement and closes the connection when the
/// scope ends, whether the query succeeded or not.
pub struct SqliteRowSource {
    database_path: PathBuf,
    busy_timeout: Option<Duration>,
}

impl SqliteRowSource {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            busy_timeout: None,
        }
    }

    /// How long SQLite waits on a locked database before giving up.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = Some(timeout);
        self
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        // The database is never created here; a missing file is an execution error.
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&self.database_path, flags).map_err(|e| {
            DrawError::QueryExecution(format!("{}: {}", self.database_path.display(), e))
        })?;
        debug!("Opened database {}", self.database_path.display());

        if let Some(timeout) = self.busy_timeout {
            conn.busy_timeout(timeout)
                .map_err(|e| DrawError::QueryExecution(e.to_string()))?;
        }

        let result = f(&conn);
        drop(conn);
        debug!("Closed database {}", self.database_path.display());
        result
    }
}

impl RowSource for SqliteRowSource {
    fn fetch_rows(&self, sql: &str) -> Result<Vec<PixelRecord>> {
        let _span = info_span!("fetch_rows", db = %self.database_path.display()).entered();

        self.with_connection(|conn| {
            let mut stmt = conn
                .prepare(sql)
                .map_err(|e| DrawError::QueryExecution(e.to_string()))?;

            let columns = stmt.column_count();
            if columns < RECORD_COLUMNS {
                return Err(DrawError::QueryExecution(format!(
                    "query returns {} columns, expected {} (x, y, z, channel, value)",
                    columns, RECORD_COLUMNS
                )));
            }

            let records = stmt
                .query_map([], decode_record)
                .map_err(|e| DrawError::QueryExecution(e.to_string()))?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| DrawError::QueryExecution(e.to_string()))?;

            debug!("Fetched {} pixel records", records.len());
            Ok(records)
        })
    }
}

fn decode_record(row: &Row<'_>) -> rusqlite::Result<PixelRecord> {
    Ok(PixelRecord {
        x: integer_column(row, 0)?,
        y: integer_column(row, 1)?,
        z: integer_column(row, 2)?,
        channel: integer_column(row, 3)?,
        value: integer_column(row, 4)?,
    })
}

/// Reads an integer column, truncating REAL values toward zero.
///
/// NULL reads as zero so that an unused `z` column can be left empty.
fn integer_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<i64> {
    match row.get_ref(idx)? {
        ValueRef::Integer(v) => Ok(v),
        ValueRef::Real(v) => Ok(v as i64),
        ValueRef::Null => Ok(0),
        other => Err(rusqlite::Error::InvalidColumnType(
            idx,
            format!("column {}", idx),
            other.data_type(),
        )),
    }
}
