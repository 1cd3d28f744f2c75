// Error types for the library seams
// Record fetches and intake validation get typed errors; application code wraps them in anyhow.

use thiserror::Error;

/// Failure reported by a record source while fetching one cohort.
///
/// The aggregator never propagates this: a failed cohort degrades to all-locked.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("record query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("record store lock poisoned")]
    Poisoned,

    #[error("record source unavailable: {0}")]
    Unavailable(String),
}

/// Why a new submission was refused at intake.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntakeError {
    #[error("years of experience must be a finite number")]
    InvalidYears,

    #[error("hourly submissions need an hourly rate")]
    MissingHourlyRate,

    #[error("salaried submissions need an annual salary")]
    MissingAnnualSalary,

    #[error("pay amounts must be finite numbers")]
    InvalidPayAmount,

    #[error("unsupported pay type: {0}")]
    UnsupportedPayType(String),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}
