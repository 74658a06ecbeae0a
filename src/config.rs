//! Runtime configuration drawn from the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::image_pipeline::{DrawError, Result, SqliteRowSource};

pub const OUTPUT_FILENAME_VAR: &str = "DRAWFUN_OUTPUT_FILENAME";
pub const TIMEOUT_VAR: &str = "TIMEOUT";
pub const DATABASE_VAR: &str = "DRAWFUN_DB";
pub const QUERY_DIR_VAR: &str = "DRAWFUN_QUERY_DIR";

const DEFAULT_OUTPUT_FILENAME: &str = "draw-fun.png";
const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_DATABASE: &str = "drawfun.db";

/// Settings for one `draw` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawConfig {
    /// Where the composite image is written
    pub output_path: PathBuf,
    /// How long a query waits on a locked database
    pub timeout: Duration,
    /// SQLite file the queries run against
    pub database_path: PathBuf,
    /// Directory holding the `.sql` files; `None` means the working directory
    pub query_dir: Option<PathBuf>,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILENAME),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            database_path: PathBuf::from(DEFAULT_DATABASE),
            query_dir: None,
        }
    }
}

impl DrawConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup, unset keys
    /// falling back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(output) = lookup(OUTPUT_FILENAME_VAR) {
            config.output_path = PathBuf::from(output);
        }
        if let Some(timeout) = lookup(TIMEOUT_VAR) {
            let secs = timeout.trim().parse::<u64>().map_err(|e| {
                DrawError::Config(format!("{}={:?} is not a number of seconds: {}", TIMEOUT_VAR, timeout, e))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(db) = lookup(DATABASE_VAR) {
            config.database_path = PathBuf::from(db);
        }
        if let Some(dir) = lookup(QUERY_DIR_VAR).filter(|dir| !dir.is_empty()) {
            config.query_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_path.as_os_str().is_empty() {
            return Err(DrawError::Config(format!("{} is empty", OUTPUT_FILENAME_VAR)));
        }
        if self.database_path.as_os_str().is_empty() {
            return Err(DrawError::Config(format!("{} is empty", DATABASE_VAR)));
        }
        if self.timeout.is_zero() {
            return Err(DrawError::Config(format!("{} must be positive", TIMEOUT_VAR)));
        }
        Ok(())
    }

    /// Query directory, defaulting to the current working directory.
    pub fn resolve_query_dir(&self) -> Result<PathBuf> {
        match &self.query_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    pub fn row_source(&self) -> SqliteRowSource {
        SqliteRowSource::new(&self.database_path).with_busy_timeout(self.timeout)
    }
}
