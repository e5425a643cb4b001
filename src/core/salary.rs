use crate::domain::model::{Currency, SalaryFields};

/// Postings with only a lower bound tend to understate the real figure.
const LOWER_BOUND_FACTOR: f64 = 1.2;
/// And those with only an upper bound overstate it.
const UPPER_BOUND_FACTOR: f64 = 0.8;

/// Estimates a single salary figure from an optional range.
pub fn predict_salary(from: Option<u64>, to: Option<u64>) -> Option<f64> {
    match (from, to) {
        (Some(from), Some(to)) => Some(((u128::from(from) + u128::from(to)) / 2) as f64),
        (Some(from), None) => Some(from as f64 * LOWER_BOUND_FACTOR),
        (None, Some(to)) => Some(to as f64 * UPPER_BOUND_FACTOR),
        (None, None) => None,
    }
}

/// Normalizes a vacancy salary into `target`, or `None` when it cannot be
/// expressed there.
pub fn normalize(fields: &SalaryFields, target: &Currency) -> Option<f64> {
    match &fields.currency {
        Some(currency) if currency == target => predict_salary(fields.from, fields.to),
        _ => None,
    }
}
