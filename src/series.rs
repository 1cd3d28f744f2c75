// 📈 Series Projector - disclosed medians for the growth curve

use crate::aggregator::CohortStatistics;
use crate::gate::SegmentStatistic;
use crate::segment::ExperienceSegment;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub segment: ExperienceSegment,
    pub median: f64,
    pub sample_count: usize,
}

/// One point per unlocked segment, in canonical segment order. Locked segments are
/// left out entirely.
pub fn project_series(stats: &CohortStatistics) -> Vec<SeriesPoint> {
    stats
        .iter()
        .filter_map(|(segment, stat)| match stat {
            SegmentStatistic::Unlocked {
                sample_count,
                median,
                ..
            } => Some(SeriesPoint {
                segment,
                median: *median,
                sample_count: *sample_count,
            }),
            SegmentStatistic::Locked { .. } => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::aggregate_cohort;
    use crate::submission::{CohortKey, SubmissionRecord};

    #[test]
    fn test_empty_when_nothing_unlocked() {
        let stats = CohortStatistics::all_locked();
        assert!(project_series(&stats).is_empty());
    }

    #[test]
    fn test_points_follow_canonical_order_and_skip_locked() {
        let key = CohortKey::new("VA", "hospital");
        let mut records = Vec::new();
        // Senior first in input, entry second, mid only partially filled
        for i in 0..5 {
            records.push(SubmissionRecord::salaried(&key, 15.0, 180_000.0 + i as f64 * 1_000.0));
            records.push(SubmissionRecord::hourly(&key, 0.5, 50.0 + i as f64));
        }
        records.push(SubmissionRecord::salaried(&key, 7.0, 140_000.0));

        let series = project_series(&aggregate_cohort(&records));
        let segments: Vec<ExperienceSegment> = series.iter().map(|p| p.segment).collect();
        assert_eq!(
            segments,
            vec![ExperienceSegment::Entry, ExperienceSegment::Senior]
        );

        assert_eq!(series[0].median, 52.0 * 2080.0);
        assert_eq!(series[1].median, 182_000.0);
        assert!(series.iter().all(|p| p.sample_count == 5));
    }

    #[test]
    fn test_projection_is_restartable() {
        let key = CohortKey::new("MD", "retail");
        let records: Vec<SubmissionRecord> = (0..5)
            .map(|i| SubmissionRecord::salaried(&key, 4.0, 100_000.0 + i as f64 * 10_000.0))
            .collect();
        let stats = aggregate_cohort(&records);

        assert_eq!(project_series(&stats), project_series(&stats));
    }
}
