// Fixed display format for presentation layers
// US-style whole-unit money, unlock progress and submit links for locked cells.

use crate::submission::CohortKey;

/// `$128,000` style: rounded to whole units, comma thousands separators.
/// Non-finite values render as an empty string.
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Percentage of the way to disclosure, capped at 100.
pub fn unlock_progress(sample_count: usize, threshold: usize) -> f64 {
    if threshold == 0 {
        return 100.0;
    }
    (sample_count as f64 / threshold as f64 * 100.0).min(100.0)
}

/// Link to the submit form pre-filled for a cohort.
pub fn submit_link(base_url: &str, key: &CohortKey) -> String {
    format!(
        "{}/submit?state={}&role={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(&key.region),
        urlencoding::encode(&key.category)
    )
}

/// Human label for a category code (`managed_care` -> `managed care`).
pub fn category_label(category: &str) -> String {
    category.replace('_', " ")
}
