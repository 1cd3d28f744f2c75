// 💵 Income Normalizer - one annualized figure per submission
// Every record is turned into a validated outcome once, at this boundary.

use crate::segment::ExperienceSegment;
use crate::submission::{PayKind, SubmissionRecord};
use serde::Serialize;
use thiserror::Error;

/// Full-time hours per year (40 h/week * 52 weeks).
pub const HOURS_PER_YEAR: f64 = 40.0 * 52.0;

// ============================================================================
// NORMALIZATION OUTCOME
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Error)]
pub enum RejectReason {
    #[error("hourly record without a finite hourly rate")]
    MissingHourlyRate,

    #[error("salaried record without a finite annual salary")]
    MissingAnnualSalary,

    #[error("annualized income is not finite")]
    NonFiniteIncome,

    #[error("unsupported pay kind: {0}")]
    UnsupportedPayKind(String),

    #[error("years of experience is not a finite number")]
    UnclassifiableExperience,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum NormalizedRecord {
    Valid {
        segment: ExperienceSegment,
        annual_income: f64,
    },
    Rejected {
        reason: RejectReason,
    },
}

// ============================================================================
// NORMALIZER
// ============================================================================

/// Annualized income for a record, or the reason it cannot contribute.
///
/// Zero and negative amounts are accepted; only finiteness is checked.
pub fn annualize(record: &SubmissionRecord) -> Result<f64, RejectReason> {
    let annual = match &record.pay_kind {
        PayKind::Hourly => match record.hourly_rate {
            Some(rate) if rate.is_finite() => rate * HOURS_PER_YEAR,
            _ => return Err(RejectReason::MissingHourlyRate),
        },
        PayKind::Salaried => match record.annual_salary {
            Some(salary) if salary.is_finite() => salary,
            _ => return Err(RejectReason::MissingAnnualSalary),
        },
        PayKind::Unsupported(raw) => return Err(RejectReason::UnsupportedPayKind(raw.clone())),
    };

    // A huge but finite hourly rate can still overflow after scaling
    if !annual.is_finite() {
        return Err(RejectReason::NonFiniteIncome);
    }

    Ok(annual)
}

/// Normalize and classify in one pass.
pub fn normalize(record: &SubmissionRecord) -> NormalizedRecord {
    let annual_income = match annualize(record) {
        Ok(value) => value,
        Err(reason) => return NormalizedRecord::Rejected { reason },
    };

    match ExperienceSegment::classify(record.years_experience) {
        Some(segment) => NormalizedRecord::Valid {
            segment,
            annual_income,
        },
        None => NormalizedRecord::Rejected {
            reason: RejectReason::UnclassifiableExperience,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::CohortKey;

    fn key() -> CohortKey {
        CohortKey::new("MD", "retail")
    }

    #[test]
    fn test_hourly_rate_is_scaled_by_full_time_hours() {
        let record = SubmissionRecord::hourly(&key(), 1.0, 70.0);
        assert_eq!(annualize(&record), Ok(145_600.0));
        assert_eq!(HOURS_PER_YEAR, 2080.0);
    }

    #[test]
    fn test_salary_passes_through_unchanged() {
        let record = SubmissionRecord::salaried(&key(), 4.0, 123_456.78);
        assert_eq!(annualize(&record), Ok(123_456.78));
    }

    #[test]
    fn test_missing_or_non_finite_fields_are_rejected() {
        let mut record = SubmissionRecord::hourly(&key(), 1.0, 70.0);
        record.hourly_rate = None;
        assert_eq!(annualize(&record), Err(RejectReason::MissingHourlyRate));

        record.hourly_rate = Some(f64::NAN);
        assert_eq!(annualize(&record), Err(RejectReason::MissingHourlyRate));

        let mut record = SubmissionRecord::salaried(&key(), 1.0, 90_000.0);
        record.annual_salary = Some(f64::INFINITY);
        assert_eq!(annualize(&record), Err(RejectReason::MissingAnnualSalary));

        // A salaried record carrying only an hourly rate does not count
        record.annual_salary = None;
        record.hourly_rate = Some(50.0);
        assert_eq!(annualize(&record), Err(RejectReason::MissingAnnualSalary));
    }

    #[test]
    fn test_unsupported_pay_kind_is_rejected() {
        let mut record = SubmissionRecord::salaried(&key(), 1.0, 90_000.0);
        record.pay_kind = PayKind::parse("per_diem");
        assert_eq!(
            annualize(&record),
            Err(RejectReason::UnsupportedPayKind("per_diem".to_string()))
        );
    }

    #[test]
    fn test_overflowing_hourly_rate_is_rejected() {
        let record = SubmissionRecord::hourly(&key(), 1.0, f64::MAX);
        assert_eq!(annualize(&record), Err(RejectReason::NonFiniteIncome));
    }

    #[test]
    fn test_zero_and_negative_amounts_are_accepted() {
        let record = SubmissionRecord::salaried(&key(), 1.0, 0.0);
        assert_eq!(annualize(&record), Ok(0.0));

        let record = SubmissionRecord::hourly(&key(), 1.0, -10.0);
        assert_eq!(annualize(&record), Ok(-20_800.0));
    }

    #[test]
    fn test_normalize_assigns_segment() {
        let record = SubmissionRecord::hourly(&key(), 1.0, 70.0);
        assert_eq!(
            normalize(&record),
            NormalizedRecord::Valid {
                segment: ExperienceSegment::Entry,
                annual_income: 145_600.0,
            }
        );
    }

    #[test]
    fn test_normalize_rejects_unclassifiable_experience() {
        let record = SubmissionRecord::salaried(&key(), f64::NAN, 80_000.0);
        assert_eq!(
            normalize(&record),
            NormalizedRecord::Rejected {
                reason: RejectReason::UnclassifiableExperience,
            }
        );
    }
}
