//! CLI entry point for the accident visualization data prep tool.
//!
//! Provides subcommands for turning the raw accident CSV into the per-state
//! artifacts and for serving those artifacts to the browser visualization.

mod serve;

use accident_viz_prep::analyzers::analyzer::process;
use accident_viz_prep::config::{PipelineConfig, TotalsMetric};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "accident_viz_prep")]
#[command(about = "Prepare and serve US traffic accident data for visualization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample the accident CSV and write state_totals.csv and state_heatmaps.json
    Process {
        /// JSON config file; flags below override its fields
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory holding the source CSV
        #[arg(short, long)]
        input_dir: Option<PathBuf>,

        /// Directory to write the two artifacts to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Number of complete rows to sample
        #[arg(short = 'n', long)]
        sample_size: Option<usize>,

        /// Seed for the sampling RNG
        #[arg(short, long)]
        seed: Option<u64>,

        /// What the total_accidents column holds
        #[arg(short, long, value_enum)]
        metric: Option<TotalsMetric>,
    },
    /// Serve the artifacts and visualization assets over HTTP
    Serve {
        /// Directory to serve
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Port to listen on
        #[arg(short, long, default_value_t = 8000)]
        port: u16,

        /// Page to open in the browser (e.g. static_visualization.html)
        #[arg(long, default_value = "")]
        page: String,

        /// Don't open a browser tab
        #[arg(long, default_value_t = false)]
        no_open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/accident_viz_prep.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("accident_viz_prep.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            config,
            input_dir,
            output_dir,
            sample_size,
            seed,
            metric,
        } => {
            let mut pipeline = match config {
                Some(path) => PipelineConfig::load(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => PipelineConfig::default(),
            };

            if let Some(dir) = input_dir {
                pipeline.input_dir = dir;
            }
            if let Some(dir) = output_dir {
                pipeline.output_dir = dir;
            }
            if let Some(n) = sample_size {
                pipeline.sample_size = n;
            }
            if let Some(seed) = seed {
                pipeline.seed = seed;
            }
            if let Some(metric) = metric {
                pipeline.metric = metric;
            }

            let summary = process(&pipeline)?;

            info!(
                source = %summary.source.display(),
                sampled_rows = summary.sampled_rows,
                feature_records = summary.feature_records,
                states = summary.states,
                "Run 'accident_viz_prep serve' to start the visualization"
            );
        }
        Commands::Serve {
            dir,
            port,
            page,
            no_open,
        } => {
            serve::serve(&dir, port, &page, !no_open).await?;
        }
    }

    Ok(())
}
