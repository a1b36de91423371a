use crate::analyzers::types::{HeatmapRow, StateHeatmaps, Twilight};
use crate::select::SampledTable;
use std::collections::BTreeMap;
use tracing::debug;

/// Counts, per state and twilight phase, the incidents with each feature flag set.
///
/// Every state in the sample gets both a `Day` and a `Night` row, zero-filled
/// when the state has no incidents in that phase. Incidents whose twilight is
/// neither phase contribute to no row.
pub fn build_heatmaps(sample: &SampledTable) -> StateHeatmaps {
    let features = &sample.features;
    let mut grid: BTreeMap<&str, [Vec<usize>; 2]> = BTreeMap::new();

    for incident in &sample.incidents {
        let slots = grid
            .entry(incident.state.as_str())
            .or_insert_with(|| [vec![0; features.len()], vec![0; features.len()]]);

        let Some(twilight) = Twilight::parse(&incident.twilight) else {
            continue;
        };
        let slot = &mut slots[twilight as usize];

        for (count, set) in slot.iter_mut().zip(&incident.flags) {
            if *set {
                *count += 1;
            }
        }
    }

    let heatmaps: StateHeatmaps = grid
        .into_iter()
        .map(|(state, slots)| {
            let rows = Twilight::ALL.map(|twilight| HeatmapRow {
                twilight,
                counts: features
                    .iter()
                    .copied()
                    .zip(slots[twilight as usize].iter().copied())
                    .collect(),
            });
            (state.to_string(), rows)
        })
        .collect();

    debug!(states = heatmaps.len(), "State heatmaps built");
    heatmaps
}
