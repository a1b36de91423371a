//! Persistence of the two visualization artifacts.
//!
//! Both files are staged next to their destination and only renamed into
//! place once every staged write has succeeded.

use csv::WriterBuilder;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::analyzers::types::{StateHeatmaps, StateTotal, StateTotalRow};
use crate::config::{STATE_HEATMAPS_FILE, STATE_TOTALS_FILE, TotalsMetric};
use crate::error::{PipelineError, Result};

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes `State,total_accidents` rows in the order given.
pub fn write_state_totals(
    path: &Path,
    totals: &[StateTotal],
    metric: TotalsMetric,
) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;

    for total in totals {
        writer.serialize(StateTotalRow {
            state: &total.state,
            total_accidents: total.value(metric),
        })?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes the heatmaps as a single compact JSON object.
pub fn write_state_heatmaps(path: &Path, heatmaps: &StateHeatmaps) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, heatmaps)?;
    writer.flush()?;
    Ok(())
}

/// Writes both artifacts, leaving neither in place unless both were written.
#[tracing::instrument(skip(totals, heatmaps), fields(states = totals.len()))]
pub fn write_artifacts(
    totals_path: &Path,
    heatmaps_path: &Path,
    totals: &[StateTotal],
    heatmaps: &StateHeatmaps,
    metric: TotalsMetric,
) -> Result<()> {
    let totals_tmp = staging_path(totals_path);
    let heatmaps_tmp = staging_path(heatmaps_path);

    let staged = write_state_totals(&totals_tmp, totals, metric)
        .and_then(|_| write_state_heatmaps(&heatmaps_tmp, heatmaps));
    if let Err(e) = staged {
        let _ = fs::remove_file(&totals_tmp);
        let _ = fs::remove_file(&heatmaps_tmp);
        return Err(e);
    }

    if let Err(e) = fs::rename(&totals_tmp, totals_path) {
        let _ = fs::remove_file(&totals_tmp);
        let _ = fs::remove_file(&heatmaps_tmp);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&heatmaps_tmp, heatmaps_path) {
        let _ = fs::remove_file(&heatmaps_tmp);
        error!(
            totals = %totals_path.display(),
            heatmaps = %heatmaps_path.display(),
            error = %e,
            "Totals replaced but heatmaps were not; the two files are out of sync"
        );
        return Err(e.into());
    }

    info!(
        totals = %totals_path.display(),
        heatmaps = %heatmaps_path.display(),
        "Files created"
    );
    Ok(())
}

/// Fails with [`PipelineError::MissingArtifact`] unless both artifacts exist in `dir`.
pub fn require_artifacts(dir: &Path) -> Result<()> {
    for name in [STATE_TOTALS_FILE, STATE_HEATMAPS_FILE] {
        let path = dir.join(name);
        debug!(path = %path.display(), "Checking artifact");
        if !path.is_file() {
            return Err(PipelineError::MissingArtifact { path });
        }
    }
    Ok(())
}
