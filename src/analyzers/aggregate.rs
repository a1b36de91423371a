use crate::analyzers::population::{population_millions, rate_per_100k};
use crate::analyzers::types::StateTotal;
use crate::config::TotalsMetric;
use crate::select::SampledTable;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Counts sampled incidents per state, ordered by state code.
///
/// Every total carries the per-100k rate as well; states missing from the
/// population table get `None`. A warning is logged for each such state when
/// the rate is the metric being written.
pub fn state_totals(sample: &SampledTable, metric: TotalsMetric) -> Vec<StateTotal> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for incident in &sample.incidents {
        *counts.entry(incident.state.as_str()).or_default() += 1;
    }

    let totals: Vec<StateTotal> = counts
        .into_iter()
        .map(|(state, count)| {
            let rate = population_millions(state).map(|millions| rate_per_100k(count, millions));

            if rate.is_none() && metric == TotalsMetric::RatePer100k {
                warn!(state, count, "State has no population entry, rate left empty");
            }

            StateTotal {
                state: state.to_string(),
                count,
                rate_per_100k: rate,
            }
        })
        .collect();

    debug!(states = totals.len(), "State totals computed");
    totals
}
