//! Long-form expansion of sampled incidents into (severity, twilight, feature) records.

use tracing::info;

use crate::select::SampledTable;
use crate::stats::value_counts;

pub const NO_FEATURE: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    pub severity: String,
    pub twilight: String,
    pub feature: String,
}

/// One record per true feature flag of each incident, or a single
/// [`NO_FEATURE`] record when none is set.
pub fn expand(sample: &SampledTable) -> Vec<FeatureRecord> {
    sample
        .incidents
        .iter()
        .flat_map(|incident| {
            let record = |feature: &str| FeatureRecord {
                severity: incident.severity.clone(),
                twilight: incident.twilight.clone(),
                feature: feature.to_string(),
            };

            let tagged: Vec<FeatureRecord> = sample
                .features
                .iter()
                .zip(&incident.flags)
                .filter(|(_, set)| **set)
                .map(|(feature, _)| record(*feature))
                .collect();

            if tagged.is_empty() {
                vec![record(NO_FEATURE)]
            } else {
                tagged
            }
        })
        .collect()
}

/// Record counts per feature, most frequent first (ties by name).
pub fn feature_distribution(records: &[FeatureRecord]) -> Vec<(String, usize)> {
    value_counts(records.iter().map(|r| r.feature.as_str()))
}

/// Logs the expanded record count and the per-feature distribution.
pub fn log_distribution(records: &[FeatureRecord]) {
    info!(records = records.len(), "Feature records expanded");
    for (feature, count) in feature_distribution(records) {
        info!(feature = %feature, count, "Feature distribution");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::Incident;

    fn incident(state: &str, twilight: &str, flags: Vec<bool>) -> Incident {
        Incident {
            severity: "2".to_string(),
            state: state.to_string(),
            twilight: twilight.to_string(),
            flags,
        }
    }

    fn sample() -> SampledTable {
        SampledTable {
            features: vec!["Crossing", "Junction", "Stop"],
            incidents: vec![
                incident("CA", "Day", vec![true, false, false]),
                incident("CA", "Day", vec![false, false, false]),
                incident("TX", "Night", vec![false, true, true]),
            ],
        }
    }

    #[test]
    fn test_expand_one_record_per_true_flag() {
        let records = expand(&sample());
        let features: Vec<_> = records.iter().map(|r| r.feature.as_str()).collect();

        assert_eq!(features, vec!["Crossing", "None", "Junction", "Stop"]);
        assert_eq!(records[2].twilight, "Night");
    }

    #[test]
    fn test_expand_record_count_per_incident() {
        let mut s = sample();
        s.incidents.push(incident("NV", "Night", vec![true, true, true]));
        let records = expand(&s);

        let mut expected_total = 0;
        for inc in &s.incidents {
            let single = SampledTable {
                features: s.features.clone(),
                incidents: vec![inc.clone()],
            };
            let set = inc.flags.iter().filter(|f| **f).count();
            let expected = set.max(1);

            assert_eq!(expand(&single).len(), expected);
            assert!(expected <= s.features.len() + 1);
            expected_total += expected;
        }
        assert_eq!(records.len(), expected_total);
        assert_eq!(records.len(), 1 + 1 + 2 + 3);
        assert!(records[4..].iter().all(|r| r.twilight == "Night"));
    }

    #[test]
    fn test_expand_without_feature_columns() {
        let s = SampledTable {
            features: vec![],
            incidents: vec![
                incident("OH", "Day", vec![]),
                incident("OH", "Night", vec![]),
            ],
        };
        let records = expand(&s);

        assert_eq!(records.len(), s.incidents.len());
        assert!(records.iter().all(|r| r.feature == NO_FEATURE));
    }

    #[test]
    fn test_feature_distribution_sorted() {
        let records = expand(&sample());
        let distribution = feature_distribution(&records);

        assert_eq!(
            distribution,
            vec![
                ("Crossing".to_string(), 1),
                ("Junction".to_string(), 1),
                ("None".to_string(), 1),
                ("Stop".to_string(), 1),
            ]
        );
    }
}
