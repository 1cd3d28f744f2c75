// 🔒 Anonymity Gate - per-segment disclosure control
// A segment discloses percentiles only once it holds DISCLOSURE_THRESHOLD samples.

use crate::percentile::percentile;
use crate::segment::ExperienceSegment;
use serde::Serialize;
use tracing::trace;

/// Minimum sample count before any magnitude is disclosed.
pub const DISCLOSURE_THRESHOLD: usize = 5;

/// Gated outcome for one segment of one cohort.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SegmentStatistic {
    Locked {
        sample_count: usize,
        threshold: usize,
    },
    Unlocked {
        sample_count: usize,
        p25: f64,
        median: f64,
        p75: f64,
    },
}

impl SegmentStatistic {
    pub fn sample_count(&self) -> usize {
        match self {
            SegmentStatistic::Locked { sample_count, .. } => *sample_count,
            SegmentStatistic::Unlocked { sample_count, .. } => *sample_count,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self, SegmentStatistic::Unlocked { .. })
    }

    /// Locked statistic for a segment with no fetched data.
    pub fn empty() -> Self {
        SegmentStatistic::Locked {
            sample_count: 0,
            threshold: DISCLOSURE_THRESHOLD,
        }
    }
}

/// Apply the disclosure policy to one segment's sample.
///
/// Nothing is sorted or estimated for a locked segment.
pub fn gate(segment: ExperienceSegment, sample: &[f64]) -> SegmentStatistic {
    let sample_count = sample.len();

    if sample_count < DISCLOSURE_THRESHOLD {
        trace!(%segment, sample_count, "segment locked");
        return SegmentStatistic::Locked {
            sample_count,
            threshold: DISCLOSURE_THRESHOLD,
        };
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    SegmentStatistic::Unlocked {
        sample_count,
        p25: percentile(&sorted, 0.25),
        median: percentile(&sorted, 0.5),
        p75: percentile(&sorted, 0.75),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_samples_are_locked() {
        for size in 0..DISCLOSURE_THRESHOLD {
            let sample: Vec<f64> = (0..size).map(|i| 50_000.0 + i as f64).collect();
            let stat = gate(ExperienceSegment::Early, &sample);

            assert_eq!(
                stat,
                SegmentStatistic::Locked {
                    sample_count: size,
                    threshold: 5,
                }
            );
            assert!(!stat.is_unlocked());
        }
    }

    #[test]
    fn test_locked_json_has_no_magnitudes() {
        let stat = gate(ExperienceSegment::Entry, &[145_600.0]);
        let json = serde_json::to_value(&stat).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"status": "locked", "sample_count": 1, "threshold": 5})
        );
    }

    #[test]
    fn test_threshold_sample_unlocks_with_ordered_quartiles() {
        // Unsorted input; the gate sorts before estimating
        let sample = [130_000.0, 100_000.0, 140_000.0, 110_000.0, 120_000.0];
        let stat = gate(ExperienceSegment::Early, &sample);

        assert_eq!(
            stat,
            SegmentStatistic::Unlocked {
                sample_count: 5,
                p25: 110_000.0,
                median: 120_000.0,
                p75: 130_000.0,
            }
        );
    }

    #[test]
    fn test_unlocked_quartiles_are_monotonic() {
        let sample = [
            48_000.0, 250_000.0, 61_500.0, 61_500.0, 99_999.0, 12.0, 73_000.0, 88_250.0,
        ];
        match gate(ExperienceSegment::Senior, &sample) {
            SegmentStatistic::Unlocked {
                sample_count,
                p25,
                median,
                p75,
            } => {
                assert_eq!(sample_count, sample.len());
                assert!(p25 <= median);
                assert!(median <= p75);
            }
            other => panic!("expected unlocked, got {:?}", other),
        }
    }
}
