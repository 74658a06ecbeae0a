use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use image::RgbImage;
use drawfun_sql::config::DrawConfig;
use drawfun_sql::image_pipeline::{FailurePolicy, PipelineConfig, QueryToImagePipeline};
use drawfun_sql::logger;

use tracing::{debug, error, info};

/// Draw the results of SQL queries as a row of images
#[derive(Debug, Parser)]
#[command(name = "drawfun", version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run every query and render the composite image
    Draw(DrawArgs),
}

#[derive(Debug, clap::Args)]
struct DrawArgs {
    /// Run all queries; pass `--all false` to only print the configuration
    #[arg(
        long,
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    all: bool,

    /// Directory containing query files
    #[arg(long, default_value = "")]
    dir: String,

    /// SQLite database the queries run against
    #[arg(long)]
    db: Option<PathBuf>,

    /// Output image path, format taken from the extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Leave failing queries out of the composite instead of aborting
    #[arg(long)]
    skip_failed: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.debug);

    let config = DrawConfig::from_env().context("Failed to read configuration")?;

    let Some(Command::Draw(args)) = cli.command else {
        println!("Debug: {}", cli.debug);
        println!("Config: {:?}", config);
        return Ok(());
    };

    let config = resolve_config(&args, config);
    config.validate().context("Invalid configuration")?;
    debug!("Resolved configuration: {:?}", config);

    if let Some(canvas) = draw(&args, &config)? {
        info!(
            "Wrote {}x{} composite to {}",
            canvas.width(),
            canvas.height(),
            config.output_path.display()
        );
    }
    Ok(())
}

/// Applies command line overrides on top of the environment configuration.
///
/// An empty `--dir` keeps whatever the environment chose, which in turn
/// falls back to the working directory.
fn resolve_config(args: &DrawArgs, mut config: DrawConfig) -> DrawConfig {
    if !args.dir.is_empty() {
        config.query_dir = Some(PathBuf::from(&args.dir));
    }
    if let Some(db) = &args.db {
        config.database_path = db.clone();
    }
    if let Some(output) = &args.output {
        config.output_path = output.clone();
    }
    config
}

/// Runs the pipeline when `--all` is set; otherwise only prints the configuration.
fn draw(args: &DrawArgs, config: &DrawConfig) -> anyhow::Result<Option<RgbImage>> {
    if !args.all {
        println!("Config: {:?}", config);
        return Ok(None);
    }

    let failure_policy = if args.skip_failed {
        FailurePolicy::Skip
    } else {
        FailurePolicy::Abort
    };
    let pipeline_config = PipelineConfig::builder()
        .failure_policy(failure_policy)
        .build();
    let pipeline = QueryToImagePipeline::new(config.row_source(), pipeline_config);

    let query_dir = config.resolve_query_dir()?;
    info!("Starting drawfun...");

    match pipeline.run(&query_dir, &config.output_path) {
        Ok(canvas) => Ok(Some(canvas)),
        Err(e) => {
            error!("Draw failed: {}", e);
            Err(e).with_context(|| format!("Failed to draw queries in {}", query_dir.display()))
        }
    }
}
