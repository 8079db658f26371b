//! Roast level thresholds and classification

use serde::{Deserialize, Serialize};

/// Loss-percentage boundaries partitioning the axis into five bands.
///
/// The boundaries are meant to be strictly ascending; the classifier does
/// not enforce that and simply takes the first matching band, so
/// misconfigured thresholds still produce an answer (see
/// [`crate::validation::validate_levels`] for the settings-side check).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoastLevels {
    pub light_lo: f64,
    pub light_hi: f64,
    pub med_hi: f64,
    pub m_dark_hi: f64,
}

impl Default for RoastLevels {
    fn default() -> Self {
        Self {
            light_lo: 11.0,
            light_hi: 13.0,
            med_hi: 15.0,
            m_dark_hi: 17.0,
        }
    }
}

impl RoastLevels {
    /// Classify a loss percentage into a roast level band.
    ///
    /// A value of zero or below means the row is not computable yet (no
    /// drop weight entered, or zero charge) and maps to the awaiting
    /// sentinel rather than a real band.
    pub fn classify(&self, loss_percent: f64) -> RoastLevel {
        if loss_percent <= 0.0 {
            RoastLevel::AwaitingCalculation
        } else if loss_percent < self.light_lo {
            RoastLevel::VeryLight
        } else if loss_percent < self.light_hi {
            RoastLevel::Light
        } else if loss_percent < self.med_hi {
            RoastLevel::Medium
        } else if loss_percent < self.m_dark_hi {
            RoastLevel::MediumDark
        } else {
            RoastLevel::Dark
        }
    }
}

/// Roast levels, ordered by severity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RoastLevel {
    AwaitingCalculation,
    VeryLight,
    Light,
    Medium,
    MediumDark,
    Dark,
}

impl RoastLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoastLevel::AwaitingCalculation => "awaiting_calculation",
            RoastLevel::VeryLight => "very_light",
            RoastLevel::Light => "light",
            RoastLevel::Medium => "medium",
            RoastLevel::MediumDark => "medium_dark",
            RoastLevel::Dark => "dark",
        }
    }

    /// Korean display label, shown in the UI and written to CSV exports
    pub fn label_ko(&self) -> &'static str {
        match self {
            RoastLevel::AwaitingCalculation => "(계산 대기)",
            RoastLevel::VeryLight => "라이트(아주 밝음)",
            RoastLevel::Light => "라이트",
            RoastLevel::Medium => "미디움",
            RoastLevel::MediumDark => "미디움 다크",
            RoastLevel::Dark => "다크",
        }
    }
}

impl std::fmt::Display for RoastLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoastLevel::AwaitingCalculation => write!(f, "Awaiting Calculation"),
            RoastLevel::VeryLight => write!(f, "Very Light"),
            RoastLevel::Light => write!(f, "Light"),
            RoastLevel::Medium => write!(f, "Medium"),
            RoastLevel::MediumDark => write!(f, "Medium Dark"),
            RoastLevel::Dark => write!(f, "Dark"),
        }
    }
}
