//! Deterministic price estimation formulas.
//!
//! Two independent formulas exist on purpose: the primary heuristic prices a
//! set by piece count scaled with an age factor, while the flat fallback is
//! used when a model-backed estimate fails mid-flight. They use different
//! per-piece rates and must not be unified.

/// Per-piece rate of the primary heuristic.
pub const PRIMARY_RATE_PER_PIECE: f64 = 0.10;
/// Age factor gained per year since release.
pub const AGE_FACTOR_PER_YEAR: f64 = 0.05;
/// Per-piece rate of the flat fallback used after a failed model call.
pub const FALLBACK_RATE_PER_PIECE: f64 = 0.12;

/// Primary heuristic: `pieces * 0.10 * max(1.0, age * 0.05)`.
///
/// The floor keeps current-year sets at an age factor of exactly 1.0.
pub fn heuristic_estimate(num_parts: u32, release_year: i32, current_year: i32) -> f64 {
    let age_years = f64::from(current_year.saturating_sub(release_year));
    let age_factor = (age_years * AGE_FACTOR_PER_YEAR).max(1.0);
    f64::from(num_parts) * PRIMARY_RATE_PER_PIECE * age_factor
}

/// Flat fallback: `pieces * 0.12`.
pub fn fallback_estimate(num_parts: u32) -> f64 {
    f64::from(num_parts) * FALLBACK_RATE_PER_PIECE
}

/// Render an amount for display, rounded to two decimal places.
pub fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}
