//! Batch row model

use serde::{Deserialize, Serialize};

/// One roast batch entry as the user typed it.
///
/// The drop weight stays raw text and is parsed on demand, so a half-typed
/// field never breaks the calculation pass. Agtron, development time, and
/// notes are reference fields only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchRow {
    pub id: u32,
    /// Roasted drop weight in grams, free text
    #[serde(default)]
    pub drop_weight: String,
    /// Agtron color reading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agtron: Option<String>,
    /// Development time percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BatchRow {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Identifier for a newly added row: one past the highest existing id.
    /// Ids are never reassigned after creation (CSV import excepted, which
    /// renumbers the whole table).
    pub fn next_id(rows: &[BatchRow]) -> u32 {
        rows.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }
}
