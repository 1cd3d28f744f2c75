// 📝 Submission Model - raw compensation reports and the intake contract
// Records are supplied by the store and never mutated by the engine.

use crate::error::IntakeError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// PAY KIND
// ============================================================================

/// How a submission reports its pay.
///
/// Parsed from free text so that rows written by older intake forms still load;
/// anything unrecognised is kept as `Unsupported` and rejected by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PayKind {
    Hourly,
    Salaried,
    Unsupported(String),
}

impl PayKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "hourly" => PayKind::Hourly,
            // "salary" is the spelling the original submit form stored
            "salaried" | "salary" => PayKind::Salaried,
            _ => PayKind::Unsupported(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PayKind::Hourly => "hourly",
            PayKind::Salaried => "salaried",
            PayKind::Unsupported(raw) => raw,
        }
    }
}

impl From<String> for PayKind {
    fn from(raw: String) -> Self {
        PayKind::parse(&raw)
    }
}

impl From<PayKind> for String {
    fn from(kind: PayKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for PayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// COHORT KEY
// ============================================================================

/// (region, category) pair identifying one independent statistical population.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CohortKey {
    pub region: String,
    pub category: String,
}

impl CohortKey {
    /// Build a key in canonical form: upper-case region code, lower-case category.
    pub fn new(region: &str, category: &str) -> Self {
        CohortKey {
            region: canonical_region(region),
            category: canonical_category(category),
        }
    }
}

impl fmt::Display for CohortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.region, self.category)
    }
}

pub fn canonical_region(region: &str) -> String {
    region.trim().to_uppercase()
}

pub fn canonical_category(category: &str) -> String {
    category.trim().to_lowercase()
}

// ============================================================================
// SUBMISSION RECORD
// ============================================================================

/// One stored compensation report, as handed to the engine by a record source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub category: String,
    pub region: String,
    pub years_experience: f64,
    pub pay_kind: PayKind,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub annual_salary: Option<f64>,
    #[serde(default)]
    pub employer: Option<String>,
}

impl SubmissionRecord {
    pub fn hourly(key: &CohortKey, years_experience: f64, rate: f64) -> Self {
        SubmissionRecord {
            category: key.category.clone(),
            region: key.region.clone(),
            years_experience,
            pay_kind: PayKind::Hourly,
            hourly_rate: Some(rate),
            annual_salary: None,
            employer: None,
        }
    }

    pub fn salaried(key: &CohortKey, years_experience: f64, salary: f64) -> Self {
        SubmissionRecord {
            category: key.category.clone(),
            region: key.region.clone(),
            years_experience,
            pay_kind: PayKind::Salaried,
            hourly_rate: None,
            annual_salary: Some(salary),
            employer: None,
        }
    }

    pub fn cohort_key(&self) -> CohortKey {
        CohortKey::new(&self.region, &self.category)
    }
}

// ============================================================================
// INTAKE CONTRACT
// ============================================================================

/// A new report as accepted from the submit form, the CLI or a CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubmission {
    pub category: String,
    pub region: String,
    pub years_experience: f64,
    pub pay_type: PayKind,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub annual_salary: Option<f64>,
    #[serde(default)]
    pub employer: Option<String>,
}

impl NewSubmission {
    /// Intake-side checks. The engine does not rely on these; it re-applies the
    /// normalizer rules to whatever ends up stored.
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.region.trim().is_empty() {
            return Err(IntakeError::EmptyField("region"));
        }
        if self.category.trim().is_empty() {
            return Err(IntakeError::EmptyField("category"));
        }
        if !self.years_experience.is_finite() {
            return Err(IntakeError::InvalidYears);
        }

        let amount = match &self.pay_type {
            PayKind::Hourly => self.hourly_rate.ok_or(IntakeError::MissingHourlyRate)?,
            PayKind::Salaried => self.annual_salary.ok_or(IntakeError::MissingAnnualSalary)?,
            PayKind::Unsupported(raw) => {
                return Err(IntakeError::UnsupportedPayType(raw.clone()))
            }
        };
        if !amount.is_finite() {
            return Err(IntakeError::InvalidPayAmount);
        }

        Ok(())
    }

    /// Canonical record for storage: only the pay field matching the pay kind is kept
    /// and a blank employer becomes absent.
    pub fn into_record(self) -> SubmissionRecord {
        let key = CohortKey::new(&self.region, &self.category);
        let (hourly_rate, annual_salary) = match self.pay_type {
            PayKind::Hourly => (self.hourly_rate, None),
            PayKind::Salaried => (None, self.annual_salary),
            PayKind::Unsupported(_) => (self.hourly_rate, self.annual_salary),
        };
        let employer = self
            .employer
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        SubmissionRecord {
            category: key.category,
            region: key.region,
            years_experience: self.years_experience,
            pay_kind: self.pay_type,
            hourly_rate,
            annual_salary,
            employer,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
