// Record sources - where the aggregator gets a cohort's raw submissions
// Passed in explicitly; the engine holds no client of its own.

use crate::error::SourceError;
use crate::submission::{CohortKey, SubmissionRecord};
use async_trait::async_trait;

#[async_trait]
pub trait RecordSource: Send + Sync {
    /// All stored submissions for one (region, category) cohort.
    async fn fetch(&self, key: &CohortKey) -> Result<Vec<SubmissionRecord>, SourceError>;
}

/// Immutable in-memory snapshot of submissions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<SubmissionRecord>,
}

impl MemoryStore {
    pub fn new(records: Vec<SubmissionRecord>) -> Self {
        MemoryStore { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordSource for MemoryStore {
    async fn fetch(&self, key: &CohortKey) -> Result<Vec<SubmissionRecord>, SourceError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.cohort_key() == *key)
            .cloned()
            .collect())
    }
}
