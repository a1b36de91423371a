//! Data types produced by the aggregation stages.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::config::TotalsMetric;

/// Civil twilight phase of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Twilight {
    Day,
    Night,
}

impl Twilight {
    /// Heatmap row order.
    pub const ALL: [Twilight; 2] = [Twilight::Day, Twilight::Night];

    pub fn as_str(self) -> &'static str {
        match self {
            Twilight::Day => "Day",
            Twilight::Night => "Night",
        }
    }

    /// Exact, case-sensitive match; padded values are not a phase.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Day" => Some(Twilight::Day),
            "Night" => Some(Twilight::Night),
            _ => None,
        }
    }
}

/// Sampled incident count for one state.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTotal {
    pub state: String,
    pub count: usize,
    /// `None` when the state is missing from the population table.
    pub rate_per_100k: Option<f64>,
}

/// Value written to the `total_accidents` column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TotalValue {
    Count(usize),
    Rate(Option<f64>),
}

impl StateTotal {
    pub fn value(&self, metric: TotalsMetric) -> TotalValue {
        match metric {
            TotalsMetric::Count => TotalValue::Count(self.count),
            TotalsMetric::RatePer100k => TotalValue::Rate(self.rate_per_100k),
        }
    }
}

/// One row of `state_totals.csv`.
#[derive(Debug, Serialize)]
pub struct StateTotalRow<'a> {
    #[serde(rename = "State")]
    pub state: &'a str,
    pub total_accidents: TotalValue,
}

/// Feature counts for one (state, twilight) slice.
///
/// Serializes as a flat object: `"twilight"` first, then each feature in
/// column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapRow {
    pub twilight: Twilight,
    pub counts: Vec<(&'static str, usize)>,
}

impl HeatmapRow {
    #[cfg(test)]
    pub fn empty(twilight: Twilight, features: &[&'static str]) -> Self {
        Self {
            twilight,
            counts: features.iter().map(|f| (*f, 0)).collect(),
        }
    }

    #[cfg(test)]
    pub fn get(&self, feature: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(name, _)| *name == feature)
            .map(|(_, count)| *count)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

impl Serialize for HeatmapRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len() + 1))?;
        map.serialize_entry("twilight", &self.twilight)?;
        for (feature, count) in &self.counts {
            map.serialize_entry(feature, count)?;
        }
        map.end()
    }
}

/// State code to `[Day, Night]` rows, ordered by state code.
pub type StateHeatmaps = BTreeMap<String, [HeatmapRow; 2]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twilight_parse() {
        assert_eq!(Twilight::parse("Day"), Some(Twilight::Day));
        assert_eq!(Twilight::parse("Night"), Some(Twilight::Night));
        assert_eq!(Twilight::parse(" Day"), None);
        assert_eq!(Twilight::parse("Night "), None);
        assert_eq!(Twilight::parse("night"), None);
    }

    #[test]
    fn test_heatmap_row_serializes_twilight_first() {
        let mut row = HeatmapRow::empty(Twilight::Night, &["Stop", "Bump"]);
        row.counts[0].1 = 3;

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"twilight":"Night","Stop":3,"Bump":0}"#);
        assert_eq!(row.get("Stop"), Some(3));
        assert_eq!(row.get("Crossing"), None);
        assert_eq!(row.total(), 3);
    }

    #[test]
    fn test_total_value_by_metric() {
        let total = StateTotal {
            state: "CA".to_string(),
            count: 2,
            rate_per_100k: None,
        };
        assert_eq!(total.value(TotalsMetric::Count), TotalValue::Count(2));
        assert_eq!(total.value(TotalsMetric::RatePer100k), TotalValue::Rate(None));
    }
}
