use std::collections::HashMap;
use tracing::info;

use crate::select::SampledTable;

/// Value counts of the categorical columns of a sample.
#[derive(Debug, Default, PartialEq)]
pub struct SampleOverview {
    pub rows: usize,
    pub twilight: Vec<(String, usize)>,
    pub severity: Vec<(String, usize)>,
}

impl SampleOverview {
    pub fn from_sample(sample: &SampledTable) -> Self {
        SampleOverview {
            rows: sample.incidents.len(),
            twilight: value_counts(sample.incidents.iter().map(|i| i.twilight.as_str())),
            severity: value_counts(sample.incidents.iter().map(|i| i.severity.as_str())),
        }
    }

    /// Percentage of the sampled incidents that `count` represents.
    pub fn share(&self, count: usize) -> f64 {
        match self.rows {
            0 => 0.0,
            rows => count as f64 * 100.0 / rows as f64,
        }
    }

    pub fn log(&self) {
        for (value, count) in &self.twilight {
            info!(
                twilight = %value,
                count,
                share = self.share(*count),
                "Civil twilight distribution"
            );
        }
        for (value, count) in &self.severity {
            info!(
                severity = %value,
                count,
                share = self.share(*count),
                "Severity distribution"
            );
        }
    }
}

/// Counts occurrences, most frequent first (ties by value).
pub(crate) fn value_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }

    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(v, c)| (v.to_string(), c))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::Incident;

    fn incident(severity: &str, twilight: &str) -> Incident {
        Incident {
            severity: severity.to_string(),
            state: "CA".to_string(),
            twilight: twilight.to_string(),
            flags: vec![],
        }
    }

    #[test]
    fn test_share_of_empty_sample() {
        let overview = SampleOverview::default();
        assert_eq!(overview.share(3), 0.0);
    }

    #[test]
    fn test_twilight_and_severity_shares() {
        let sample = SampledTable {
            features: vec![],
            incidents: vec![
                incident("2", "Day"),
                incident("3", "Night"),
                incident("2", "Day"),
                incident("2", "Day"),
            ],
        };
        let overview = SampleOverview::from_sample(&sample);

        let (_, night) = overview.twilight.iter().find(|(t, _)| t == "Night").unwrap();
        assert_eq!(overview.share(*night), 25.0);
        let (top, count) = &overview.severity[0];
        assert_eq!(top, "2");
        assert_eq!(overview.share(*count), 75.0);
    }

    #[test]
    fn test_from_sample_empty() {
        let sample = SampledTable {
            features: vec![],
            incidents: vec![],
        };
        assert_eq!(SampleOverview::from_sample(&sample), SampleOverview::default());
    }

    #[test]
    fn test_from_sample_value_counts() {
        let sample = SampledTable {
            features: vec![],
            incidents: vec![
                incident("2", "Day"),
                incident("3", "Night"),
                incident("2", "Day"),
                incident("4", "Day"),
            ],
        };
        let overview = SampleOverview::from_sample(&sample);

        assert_eq!(overview.rows, 4);
        assert_eq!(
            overview.twilight,
            vec![("Day".to_string(), 3), ("Night".to_string(), 1)]
        );
        assert_eq!(
            overview.severity,
            vec![("2".to_string(), 2), ("3".to_string(), 1), ("4".to_string(), 1)]
        );
    }
}
