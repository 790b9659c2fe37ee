//! Single-step verification
use crate::profile::ConsistencyProfile;
use cot_core::{CotError, Verification};

/// Re-evaluate `expression` and compare it to `expected`.
///
/// The comparison is `|actual - expected| < profile.tolerance`. The tolerance
/// is absolute, so very large magnitudes can pass with a large relative error.
pub fn verify_with(
    profile: &ConsistencyProfile,
    expression: &str,
    expected: f64,
) -> Result<Verification, CotError> {
    let actual = cot_eval::evaluate(expression)?;
    let is_correct = (actual - expected).abs() < profile.tolerance;

    tracing::debug!(expression, expected, actual, is_correct, "verified step");

    Ok(Verification {
        expression: expression.to_string(),
        expected,
        actual,
        is_correct,
    })
}

/// Verify with the standard profile
pub fn verify(expression: &str, expected: f64) -> Result<Verification, CotError> {
    verify_with(&ConsistencyProfile::standard(), expression, expected)
}
