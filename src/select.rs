//! Column selection, completeness filtering and seeded sampling.

use csv::StringRecord;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::loader::SourceTable;

/// Columns the pipeline asks for, in output order.
pub static DESIRED_COLUMNS: &[&str] = &[
    "Severity",
    "State",
    "City",
    "Start_Time",
    "Weather_Condition",
    "Civil_Twilight",
    "Amenity",
    "Bump",
    "Crossing",
    "Give_Way",
    "Junction",
    "No_Exit",
    "Railway",
    "Stop",
    "Traffic_Signal",
];

/// Boolean road-feature flags, in heatmap column order.
pub static ROAD_FEATURES: &[&str] = &[
    "Amenity",
    "Bump",
    "Crossing",
    "Give_Way",
    "Junction",
    "No_Exit",
    "Railway",
    "Stop",
    "Traffic_Signal",
];

/// Columns every downstream stage reads; the run cannot proceed without them.
pub static CORE_COLUMNS: &[&str] = &["Severity", "State", "Civil_Twilight"];

/// Text treated as a missing value, matching the usual CSV null markers.
static NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(value: &str) -> bool {
    NULL_MARKERS.contains(&value.trim())
}

pub fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}

/// The desired columns found in the source, with their positions.
#[derive(Debug, Clone)]
pub struct Selection {
    pub columns: Vec<(&'static str, usize)>,
}

impl Selection {
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, idx)| *idx)
    }

    /// Road features present in the source, in [`ROAD_FEATURES`] order.
    pub fn features(&self) -> Vec<&'static str> {
        ROAD_FEATURES
            .iter()
            .copied()
            .filter(|f| self.index_of(f).is_some())
            .collect()
    }
}

/// One complete incident row, restricted to the columns the aggregates read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incident {
    pub severity: String,
    pub state: String,
    pub twilight: String,
    /// One flag per entry of [`SampledTable::features`].
    pub flags: Vec<bool>,
}

/// The fixed-size sample every aggregate is computed from.
#[derive(Debug, Clone)]
pub struct SampledTable {
    pub features: Vec<&'static str>,
    pub incidents: Vec<Incident>,
}

/// Keeps the subset of [`DESIRED_COLUMNS`] present in `table`.
pub fn select_columns(table: &SourceTable) -> Result<Selection> {
    let columns: Vec<(&'static str, usize)> = DESIRED_COLUMNS
        .iter()
        .filter_map(|name| table.column_index(name).map(|idx| (*name, idx)))
        .collect();

    if columns.is_empty() {
        return Err(PipelineError::MissingRequiredColumns {
            missing: DESIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        });
    }

    let missing_core: Vec<String> = CORE_COLUMNS
        .iter()
        .filter(|c| !columns.iter().any(|(name, _)| name == *c))
        .map(|c| c.to_string())
        .collect();
    if !missing_core.is_empty() {
        return Err(PipelineError::MissingRequiredColumns {
            missing: missing_core,
        });
    }

    let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    info!(columns = ?names, "Available columns");

    Ok(Selection { columns })
}

fn field(record: &StringRecord, idx: Option<usize>) -> String {
    idx.and_then(|i| record.get(i))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Positions of the rows with no missing value in any selected column.
pub fn complete_rows(table: &SourceTable, selection: &Selection) -> Vec<usize> {
    let complete: Vec<usize> = table
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            selection
                .columns
                .iter()
                .all(|(_, idx)| record.get(*idx).is_some_and(|v| !is_missing(v)))
        })
        .map(|(row, _)| row)
        .collect();

    debug!(
        complete = complete.len(),
        dropped = table.records.len() - complete.len(),
        "Dropped incomplete rows"
    );
    complete
}

/// Builds the [`Incident`] for one source row.
pub fn to_incident(record: &StringRecord, selection: &Selection, feature_idx: &[usize]) -> Incident {
    Incident {
        severity: field(record, selection.index_of("Severity")),
        state: field(record, selection.index_of("State")),
        twilight: field(record, selection.index_of("Civil_Twilight")),
        flags: feature_idx
            .iter()
            .map(|i| record.get(*i).is_some_and(parse_flag))
            .collect(),
    }
}

/// Draws exactly `size` distinct items using a ChaCha8 stream seeded from `seed`.
///
/// The same input order, size and seed always yield the same sample, in the
/// same order.
pub fn sample<T>(items: Vec<T>, size: usize, seed: u64) -> Result<Vec<T>> {
    if items.is_empty() || size == 0 {
        return Err(PipelineError::EmptySample);
    }
    if items.len() < size {
        return Err(PipelineError::InsufficientSampleSize {
            requested: size,
            available: items.len(),
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let picked = rand::seq::index::sample(&mut rng, items.len(), size);

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    Ok(picked
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect())
}

/// Runs selection, filtering and sampling in one go.
#[tracing::instrument(skip(table))]
pub fn select_and_sample(table: &SourceTable, size: usize, seed: u64) -> Result<SampledTable> {
    let selection = select_columns(table)?;
    let rows = sample(complete_rows(table, &selection), size, seed)?;

    let features = selection.features();
    let feature_idx: Vec<usize> = features
        .iter()
        .filter_map(|f| selection.index_of(f))
        .collect();
    let incidents: Vec<Incident> = rows
        .into_iter()
        .map(|row| to_incident(&table.records[row], &selection, &feature_idx))
        .collect();

    info!(
        rows = incidents.len(),
        columns = selection.columns.len(),
        "Sample data shape"
    );

    Ok(SampledTable {
        features,
        incidents,
    })
}
