//! Validation utilities for the roast loss calculator
//!
//! The classifier itself accepts any thresholds so it can always produce
//! an answer; these checks are for the settings surface to call before
//! accepting new values.

use crate::models::RoastLevels;

/// Validate that roast level thresholds are finite and strictly ascending.
pub fn validate_levels(levels: &RoastLevels) -> Result<(), &'static str> {
    let bounds = [
        levels.light_lo,
        levels.light_hi,
        levels.med_hi,
        levels.m_dark_hi,
    ];
    if bounds.iter().any(|v| !v.is_finite()) {
        return Err("Thresholds must be finite numbers");
    }
    if !bounds.windows(2).all(|pair| pair[0] < pair[1]) {
        return Err("Thresholds must be strictly ascending");
    }
    Ok(())
}

/// Convenience boolean form of [`validate_levels`]
pub fn levels_are_ascending(levels: &RoastLevels) -> bool {
    validate_levels(levels).is_ok()
}
