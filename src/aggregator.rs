// 📊 Cohort Aggregator - Normalizer → Classifier → Estimator → Gate
// Statistics are recomputed from a fresh snapshot on every call; nothing is cached.

use crate::gate::{gate, SegmentStatistic};
use crate::normalizer::{normalize, NormalizedRecord};
use crate::segment::ExperienceSegment;
use crate::source::RecordSource;
use crate::submission::{CohortKey, SubmissionRecord};
use futures::future::join_all;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

// ============================================================================
// COHORT STATISTICS
// ============================================================================

/// Gated statistics for all four segments of one cohort (never partial).
#[derive(Debug, Clone, PartialEq)]
pub struct CohortStatistics {
    segments: [SegmentStatistic; 4],
}

impl CohortStatistics {
    /// Every segment locked with a zero count. Used when a cohort could not be fetched.
    pub fn all_locked() -> Self {
        CohortStatistics {
            segments: std::array::from_fn(|_| SegmentStatistic::empty()),
        }
    }

    pub fn get(&self, segment: ExperienceSegment) -> &SegmentStatistic {
        &self.segments[segment.index()]
    }

    /// Segments in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ExperienceSegment, &SegmentStatistic)> {
        ExperienceSegment::ALL.into_iter().zip(self.segments.iter())
    }

    pub fn unlocked_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_unlocked()).count()
    }
}

impl Serialize for CohortStatistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.segments.len()))?;
        for (segment, stat) in self.iter() {
            map.serialize_entry(segment.label(), stat)?;
        }
        map.end()
    }
}

// ============================================================================
// SINGLE COHORT
// ============================================================================

/// Partition one cohort's records into segments and gate each segment on its own.
///
/// Records that cannot be normalized are dropped without being counted.
pub fn aggregate_cohort(records: &[SubmissionRecord]) -> CohortStatistics {
    let mut samples: [Vec<f64>; 4] = Default::default();
    let mut dropped = 0usize;

    for record in records {
        match normalize(record) {
            NormalizedRecord::Valid {
                segment,
                annual_income,
            } => samples[segment.index()].push(annual_income),
            NormalizedRecord::Rejected { reason } => {
                dropped += 1;
                debug!(%reason, "dropping submission from aggregation");
            }
        }
    }

    let segments = std::array::from_fn(|i| gate(ExperienceSegment::ALL[i], &samples[i]));
    let stats = CohortStatistics { segments };

    debug!(
        records = records.len(),
        dropped,
        unlocked = stats.unlocked_count(),
        "cohort aggregated"
    );

    stats
}

/// Fetch one cohort and aggregate it. A failed fetch yields `all_locked()`.
pub async fn fetch_cohort_statistics<S>(source: &S, key: &CohortKey) -> CohortStatistics
where
    S: RecordSource + ?Sized,
{
    match source.fetch(key).await {
        Ok(records) => {
            let stats = aggregate_cohort(&records);
            info!(
                cohort = %key,
                records = records.len(),
                unlocked = stats.unlocked_count(),
                "cohort statistics computed"
            );
            stats
        }
        Err(e) => {
            warn!(cohort = %key, error = %e, "record fetch failed; cohort reported as locked");
            CohortStatistics::all_locked()
        }
    }
}

// ============================================================================
// COMPARISON MATRIX
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortRow {
    pub key: CohortKey,
    pub statistics: CohortStatistics,
}

/// Statistics for several cohorts, in the order they were requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonMatrix {
    pub rows: Vec<CohortRow>,
}

impl ComparisonMatrix {
    pub fn get(&self, key: &CohortKey) -> Option<&CohortStatistics> {
        self.rows
            .iter()
            .find(|row| row.key == *key)
            .map(|row| &row.statistics)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Fetch and aggregate every cohort concurrently, then assemble the matrix once
/// all of them have finished. Repeated keys are requested once, at their first position.
pub async fn compare_cohorts<S>(source: &S, keys: &[CohortKey]) -> ComparisonMatrix
where
    S: RecordSource + ?Sized,
{
    let mut seen = HashSet::new();
    let unique: Vec<&CohortKey> = keys.iter().filter(|key| seen.insert(*key)).collect();

    let tasks = unique.into_iter().map(|key| async move {
        CohortRow {
            key: key.clone(),
            statistics: fetch_cohort_statistics(source, key).await,
        }
    });

    ComparisonMatrix {
        rows: join_all(tasks).await,
    }
}

/// Compare one category across regions.
pub async fn compare_regions<S>(source: &S, category: &str, regions: &[String]) -> ComparisonMatrix
where
    S: RecordSource + ?Sized,
{
    let keys: Vec<CohortKey> = regions
        .iter()
        .map(|region| CohortKey::new(region, category))
        .collect();

    compare_cohorts(source, &keys).await
}

// ============================================================================
// TESTS
// ============================================================================
