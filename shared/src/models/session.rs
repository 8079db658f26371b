//! Session state: everything one roasting session carries

use serde::{Deserialize, Serialize};

use super::{BatchRow, RoastLevels};

/// In-memory session state.
///
/// Numeric inputs stay as raw text; parsing happens inside the calculation
/// pass so that any input, including an empty field, yields defined
/// results. Persistence writes each field under its own key, so a loader
/// substitutes the matching default for any absent or malformed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    /// Green coffee charge weight in grams, shared by all rows
    pub charge: String,
    pub rows: Vec<BatchRow>,
    /// Grams of roasted coffee consumed per cupping session
    pub cupping_per_session: String,
    /// Number of cupping sessions (fixed-count mode)
    pub cupping_sessions: String,
    /// Target remaining weight for the charge suggestion
    pub target_remain: String,
    pub levels: RoastLevels,
    /// Deduct one cupping draw per batch with a recorded drop instead of a
    /// fixed session count. Chosen per invocation, never persisted.
    pub per_batch_cupping: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            charge: "130".into(),
            rows: vec![BatchRow::new(1)],
            cupping_per_session: "15".into(),
            cupping_sessions: "1".into(),
            target_remain: "100".into(),
            levels: RoastLevels::default(),
            per_batch_cupping: false,
        }
    }
}

impl Session {
    /// Parse a stored row list; malformed JSON counts as absent.
    pub fn rows_from_json(text: &str) -> Option<Vec<BatchRow>> {
        serde_json::from_str(text).ok()
    }

    /// Parse stored thresholds; malformed JSON counts as absent.
    pub fn levels_from_json(text: &str) -> Option<RoastLevels> {
        serde_json::from_str(text).ok()
    }
}
