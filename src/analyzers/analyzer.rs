use crate::analyzers::aggregate::state_totals;
use crate::analyzers::heatmap::build_heatmaps;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::expand::{expand, log_distribution};
use crate::loader::{find_source_file, load_table};
use crate::output::write_artifacts;
use crate::select::select_and_sample;
use crate::stats::SampleOverview;
use std::path::PathBuf;
use tracing::info;

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub source: PathBuf,
    pub sampled_rows: usize,
    pub feature_records: usize,
    pub states: usize,
}

/// Loads the source table, samples it, builds both aggregates and writes
/// them. Nothing is written unless every stage before the writer succeeds.
#[tracing::instrument(skip(config), fields(input_dir = %config.input_dir.display()))]
pub fn process(config: &PipelineConfig) -> Result<RunSummary> {
    let source = find_source_file(&config.input_dir)?;
    let table = load_table(&source)?;

    let sample = select_and_sample(&table, config.sample_size, config.seed)?;
    drop(table);

    let records = expand(&sample);
    log_distribution(&records);

    let totals = state_totals(&sample, config.metric);
    let heatmaps = build_heatmaps(&sample);

    write_artifacts(
        &config.state_totals_path(),
        &config.state_heatmaps_path(),
        &totals,
        &heatmaps,
        config.metric,
    )?;

    SampleOverview::from_sample(&sample).log();

    info!(
        states = totals.len(),
        metric = ?config.metric,
        "Data processed successfully"
    );

    Ok(RunSummary {
        source,
        sampled_rows: sample.incidents.len(),
        feature_records: records.len(),
        states: totals.len(),
    })
}
