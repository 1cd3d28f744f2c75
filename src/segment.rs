// Experience segments - four fixed, ordered buckets
// Boundary years 2, 5 and 10 belong to the lower bucket.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper (inclusive) bounds of the first three segments.
pub const SEGMENT_BOUNDARIES: [f64; 3] = [2.0, 5.0, 10.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperienceSegment {
    #[serde(rename = "0–2 years")]
    Entry,
    #[serde(rename = "3–5 years")]
    Early,
    #[serde(rename = "6–10 years")]
    Mid,
    #[serde(rename = "10+ years")]
    Senior,
}

impl ExperienceSegment {
    /// Canonical display order.
    pub const ALL: [ExperienceSegment; 4] = [
        ExperienceSegment::Entry,
        ExperienceSegment::Early,
        ExperienceSegment::Mid,
        ExperienceSegment::Senior,
    ];

    /// Map years of experience to a segment; `None` when the value is not finite.
    pub fn classify(years: f64) -> Option<Self> {
        if !years.is_finite() {
            return None;
        }

        let [entry_max, early_max, mid_max] = SEGMENT_BOUNDARIES;
        let segment = if years <= entry_max {
            ExperienceSegment::Entry
        } else if years <= early_max {
            ExperienceSegment::Early
        } else if years <= mid_max {
            ExperienceSegment::Mid
        } else {
            ExperienceSegment::Senior
        };

        Some(segment)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExperienceSegment::Entry => "0–2 years",
            ExperienceSegment::Early => "3–5 years",
            ExperienceSegment::Mid => "6–10 years",
            ExperienceSegment::Senior => "10+ years",
        }
    }

    /// Position in `ALL`.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for ExperienceSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_belong_to_lower_segment() {
        assert_eq!(ExperienceSegment::classify(0.0), Some(ExperienceSegment::Entry));
        assert_eq!(ExperienceSegment::classify(2.0), Some(ExperienceSegment::Entry));
        assert_eq!(ExperienceSegment::classify(2.5), Some(ExperienceSegment::Early));
        assert_eq!(ExperienceSegment::classify(5.0), Some(ExperienceSegment::Early));
        assert_eq!(ExperienceSegment::classify(5.01), Some(ExperienceSegment::Mid));
        assert_eq!(ExperienceSegment::classify(10.0), Some(ExperienceSegment::Mid));
        assert_eq!(ExperienceSegment::classify(10.5), Some(ExperienceSegment::Senior));
        assert_eq!(ExperienceSegment::classify(42.0), Some(ExperienceSegment::Senior));
    }

    #[test]
    fn test_every_non_negative_value_lands_in_exactly_one_segment() {
        let mut years = 0.0;
        while years <= 15.0 {
            let segment = ExperienceSegment::classify(years).unwrap();
            let matching = ExperienceSegment::ALL
                .iter()
                .filter(|s| **s == segment)
                .count();
            assert_eq!(matching, 1, "years {} classified ambiguously", years);
            years += 0.25;
        }
    }

    #[test]
    fn test_non_finite_is_unclassifiable() {
        assert_eq!(ExperienceSegment::classify(f64::NAN), None);
        assert_eq!(ExperienceSegment::classify(f64::INFINITY), None);
        assert_eq!(ExperienceSegment::classify(f64::NEG_INFINITY), None);
    }

    #[test]
    fn test_canonical_order_and_labels() {
        let labels: Vec<&str> = ExperienceSegment::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["0–2 years", "3–5 years", "6–10 years", "10+ years"]);

        for (i, segment) in ExperienceSegment::ALL.iter().enumerate() {
            assert_eq!(segment.index(), i);
        }
        assert!(ExperienceSegment::Entry < ExperienceSegment::Senior);
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&ExperienceSegment::Mid).unwrap();
        assert_eq!(json, "\"6–10 years\"");
    }
}
