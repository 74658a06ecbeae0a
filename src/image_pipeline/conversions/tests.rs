use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tempfile::tempdir;

use crate::image_pipeline::common::error::{DrawError, Result};
use crate::image_pipeline::conversions::{FailurePolicy, PipelineConfig, QueryToImagePipeline};
use crate::image_pipeline::query::{QueryCollector, QueryFile};
use crate::image_pipeline::rows::{PixelRecord, RowSource, SqliteRowSource};

struct MockCollector {
    queries: Vec<QueryFile>,
}

impl QueryCollector for MockCollector {
    fn collect(&self, _dir: &Path) -> Result<Vec<QueryFile>> {
        Ok(self.queries.clone())
    }
}

struct FailingCollector;

impl QueryCollector for FailingCollector {
    fn collect(&self, dir: &Path) -> Result<Vec<QueryFile>> {
        Err(DrawError::Discovery(dir.display().to_string()))
    }
}

struct MockRowSource {
    results: HashMap<String, Vec<PixelRecord>>,
    executed: Arc<Mutex<Vec<String>>>,
}

impl RowSource for MockRowSource {
    fn fetch_rows(&self, sql: &str) -> Result<Vec<PixelRecord>> {
        self.executed.lock().unwrap().push(sql.to_string());
        self.results
            .get(sql)
            .cloned()
            .ok_or_else(|| DrawError::QueryExecution(format!("no such query: {}", sql)))
    }
}

fn solid_records(width: i64, height: i64, rgb: [i64; 3]) -> Vec<PixelRecord> {
    let mut records = Vec::new();
    for channel in 0..3 {
        for y in 0..height {
            for x in 0..width {
                records.push(PixelRecord::new(x, y, channel, rgb[channel as usize]));
            }
        }
    }
    records
}

fn mock_source(results: Vec<(&str, Vec<PixelRecord>)>) -> (MockRowSource, Arc<Mutex<Vec<String>>>) {
    let executed = Arc::new(Mutex::new(Vec::new()));
    let source = MockRowSource {
        results: results
            .into_iter()
            .map(|(sql, records)| (sql.to_string(), records))
            .collect(),
        executed: executed.clone(),
    };
    (source, executed)
}

fn queries(sql: &[&str]) -> Vec<QueryFile> {
    sql.iter()
        .enumerate()
        .map(|(i, sql)| QueryFile::new(format!("{}.sql", i), *sql))
        .collect()
}

#[test]
fn test_queries_run_in_collected_order() {
    let (source, executed) = mock_source(vec![
        ("red", solid_records(2, 2, [255, 0, 0])),
        ("green", solid_records(3, 1, [0, 255, 0])),
    ]);
    let collector = MockCollector { queries: queries(&["green", "red"]) };
    let pipeline = QueryToImagePipeline::with_custom(collector, source, PipelineConfig::default());

    let dir = tempdir().unwrap();
    let output = dir.path().join("out.png");
    let canvas = pipeline.run(dir.path(), &output).unwrap();

    assert_eq!(*executed.lock().unwrap(), vec!["green", "red"]);
    assert_eq!(canvas.dimensions(), (512, 256));
    assert_eq!(canvas.get_pixel(2, 0).0, [0, 255, 0]);
    assert_eq!(canvas.get_pixel(257, 1).0, [255, 0, 0]);
    assert!(output.exists());
}

#[test]
fn test_failed_query_aborts_without_output() {
    let (source, executed) = mock_source(vec![("ok", solid_records(1, 1, [1, 2, 3]))]);
    let collector = MockCollector { queries: queries(&["ok", "broken", "ok"]) };
    let pipeline = QueryToImagePipeline::with_custom(collector, source, PipelineConfig::default());

    let dir = tempdir().unwrap();
    let output = dir.path().join("out.png");
    let result = pipeline.run(dir.path(), &output);

    assert!(matches!(result, Err(DrawError::QueryExecution(_))));
    assert_eq!(executed.lock().unwrap().len(), 2);
    assert!(!output.exists());
}

#[test]
fn test_shape_failure_aborts_by_default() {
    let (source, _) = mock_source(vec![("empty", Vec::new())]);
    let collector = MockCollector { queries: queries(&["empty"]) };
    let pipeline = QueryToImagePipeline::with_custom(collector, source, PipelineConfig::default());

    let dir = tempdir().unwrap();
    let result = pipeline.run(dir.path(), dir.path().join("out.png"));
    assert!(matches!(result, Err(DrawError::Shape(_))));
}

#[test]
fn test_skip_policy_renders_surviving_queries() {
    let (source, _) = mock_source(vec![
        ("ok", solid_records(1, 1, [1, 2, 3])),
        ("empty", Vec::new()),
    ]);
    let collector = MockCollector { queries: queries(&["ok", "broken", "empty", "ok"]) };
    let config = PipelineConfig::builder()
        .failure_policy(FailurePolicy::Skip)
        .build();
    let pipeline = QueryToImagePipeline::with_custom(collector, source, config);

    let dir = tempdir().unwrap();
    let canvas = pipeline.run(dir.path(), dir.path().join("out.png")).unwrap();
    assert_eq!(canvas.dimensions(), (512, 256));
}

#[test]
fn test_skip_policy_with_nothing_left_is_empty_sequence() {
    let (source, _) = mock_source(Vec::new());
    let collector = MockCollector { queries: queries(&["broken"]) };
    let config = PipelineConfig::builder()
        .failure_policy(FailurePolicy::Skip)
        .build();
    let pipeline = QueryToImagePipeline::with_custom(collector, source, config);

    let dir = tempdir().unwrap();
    let output = dir.path().join("out.png");
    let result = pipeline.run(dir.path(), &output);
    assert!(matches!(result, Err(DrawError::EmptyImageSequence)));
    assert!(!output.exists());
}

#[test]
fn test_collector_failure_propagates() {
    let (source, executed) = mock_source(Vec::new());
    let pipeline = QueryToImagePipeline::with_custom(FailingCollector, source, PipelineConfig::default());

    let dir = tempdir().unwrap();
    let result = pipeline.run(dir.path(), dir.path().join("out.png"));
    assert!(matches!(result, Err(DrawError::Discovery(_))));
    assert!(executed.lock().unwrap().is_empty());
}

fn seed_red_squares(db: &Path) {
    let conn = Connection::open(db).unwrap();
    conn.execute_batch("CREATE TABLE pixels (x INTEGER, y INTEGER, z INTEGER, rgb INTEGER, val INTEGER);")
        .unwrap();
    for rgb in 0..3 {
        for y in 0..2 {
            for x in 0..2 {
                let val = if rgb == 0 { 255 } else { 0 };
                conn.execute(
                    "INSERT INTO pixels VALUES (?1, ?2, 0, ?3, ?4)",
                    rusqlite::params![x, y, rgb, val],
                )
                .unwrap();
            }
        }
    }
}

#[test]
fn test_three_red_squares_end_to_end() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("drawfun.db");
    seed_red_squares(&db);

    let query_dir = dir.path().join("queries");
    std::fs::create_dir(&query_dir).unwrap();
    for name in ["one.sql", "two.sql", "three.sql"] {
        std::fs::write(
            query_dir.join(name),
            "SELECT x, y, z, rgb, val FROM pixels ORDER BY rgb, y, x",
        )
        .unwrap();
    }

    let output = dir.path().join("draw-fun.png");
    let pipeline = QueryToImagePipeline::new(SqliteRowSource::new(&db), PipelineConfig::default());
    let canvas = pipeline.run(&query_dir, &output).unwrap();

    assert_eq!(canvas.dimensions(), (768, 256));
    for tile in 0..3u32 {
        let x0 = tile * 256;
        assert_eq!(canvas.get_pixel(x0, 0).0, [255, 0, 0]);
        assert_eq!(canvas.get_pixel(x0 + 1, 1).0, [255, 0, 0]);
        assert_eq!(canvas.get_pixel(x0 + 2, 0).0, [250, 250, 250]);
        assert_eq!(canvas.get_pixel(x0, 2).0, [250, 250, 250]);
    }

    let reloaded = image::open(&output).unwrap().to_rgb8();
    assert_eq!(reloaded.dimensions(), (768, 256));
    assert_eq!(reloaded.get_pixel(256, 0).0, [255, 0, 0]);
}

#[test]
fn test_directory_without_queries_writes_nothing() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("drawfun.db");
    seed_red_squares(&db);
    std::fs::write(dir.path().join("README.txt"), "no queries here").unwrap();

    let output = dir.path().join("draw-fun.png");
    let pipeline = QueryToImagePipeline::new(SqliteRowSource::new(&db), PipelineConfig::default());
    let result = pipeline.run(dir.path(), &output);

    assert!(matches!(result, Err(DrawError::EmptyImageSequence)));
    assert!(!output.exists());
}
