// Salary Insights - Core Library
// Aggregation and anonymity-gating engine, plus the store, CLI and API glue around it

pub mod submission;   // Data model + intake contract
pub mod normalizer;   // Income Normalizer
pub mod segment;      // Bucket Classifier
pub mod percentile;   // Percentile Estimator
pub mod gate;         // Anonymity Gate
pub mod source;       // Record-source seam
pub mod aggregator;   // Cohort Aggregator + comparison matrix
pub mod series;       // Series Projector
pub mod store;        // SQLite persistence + CSV import
pub mod display;
pub mod config;
pub mod telemetry;
pub mod error;

// Re-export commonly used types
pub use submission::{CohortKey, NewSubmission, PayKind, SubmissionRecord};
pub use normalizer::{annualize, normalize, NormalizedRecord, RejectReason, HOURS_PER_YEAR};
pub use segment::{ExperienceSegment, SEGMENT_BOUNDARIES};
pub use percentile::percentile;
pub use gate::{gate, SegmentStatistic, DISCLOSURE_THRESHOLD};
pub use source::{MemoryStore, RecordSource};
pub use aggregator::{
    aggregate_cohort, compare_cohorts, compare_regions, fetch_cohort_statistics,
    CohortRow, CohortStatistics, ComparisonMatrix,
};
pub use series::{project_series, SeriesPoint};
pub use store::{
    count_submissions, insert_imported, insert_submission, load_csv, query_submissions,
    setup_database, CsvBatch, ImportSummary, ImportedRow, SqliteStore,
};
pub use display::{category_label, format_money, submit_link, unlock_progress};
pub use config::AppConfig;
pub use error::{IntakeError, SourceError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
