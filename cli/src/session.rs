//! Session state lifecycle: load at start, write back on every change

use shared::{validate_levels, BatchRow, CsvImport, RoastLevels, Session};
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::store::{self, KeyValueStore};

/// Owns the live session and its backing store. Every mutation persists
/// its key before returning, so there is never dirty in-memory state.
pub struct SessionStore<S: KeyValueStore> {
    store: S,
    pub session: Session,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Load session state, substituting the documented default for every
    /// absent or malformed key.
    pub fn load(store: S) -> Self {
        let defaults = Session::default();
        let session = Session {
            charge: store.get(store::KEY_CHARGE).unwrap_or(defaults.charge),
            rows: store
                .get(store::KEY_ROWS)
                .and_then(|text| Session::rows_from_json(&text))
                .unwrap_or(defaults.rows),
            cupping_per_session: store
                .get(store::KEY_CUP_PER)
                .unwrap_or(defaults.cupping_per_session),
            cupping_sessions: store
                .get(store::KEY_CUP_NUM)
                .unwrap_or(defaults.cupping_sessions),
            target_remain: store.get(store::KEY_TARGET).unwrap_or(defaults.target_remain),
            levels: store
                .get(store::KEY_LEVELS)
                .and_then(|text| Session::levels_from_json(&text))
                .unwrap_or(defaults.levels),
            per_batch_cupping: false,
        };
        Self { store, session }
    }

    fn save_rows(&mut self) -> AppResult<()> {
        let text = serde_json::to_string(&self.session.rows)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        self.store.set(store::KEY_ROWS, &text)
    }

    fn save_levels(&mut self) -> AppResult<()> {
        let text = serde_json::to_string(&self.session.levels)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        self.store.set(store::KEY_LEVELS, &text)
    }

    pub fn set_charge(&mut self, charge: &str) -> AppResult<()> {
        self.session.charge = charge.to_string();
        self.store.set(store::KEY_CHARGE, charge)
    }

    pub fn set_cupping_per_session(&mut self, value: &str) -> AppResult<()> {
        self.session.cupping_per_session = value.to_string();
        self.store.set(store::KEY_CUP_PER, value)
    }

    pub fn set_cupping_sessions(&mut self, value: &str) -> AppResult<()> {
        self.session.cupping_sessions = value.to_string();
        self.store.set(store::KEY_CUP_NUM, value)
    }

    pub fn set_target_remain(&mut self, value: &str) -> AppResult<()> {
        self.session.target_remain = value.to_string();
        self.store.set(store::KEY_TARGET, value)
    }

    /// Append a row; the id continues from the highest existing one.
    pub fn add_row(
        &mut self,
        drop_weight: Option<String>,
        agtron: Option<String>,
        dev_time: Option<String>,
        notes: Option<String>,
    ) -> AppResult<u32> {
        let id = BatchRow::next_id(&self.session.rows);
        self.session.rows.push(BatchRow {
            id,
            drop_weight: drop_weight.unwrap_or_default(),
            agtron,
            dev_time,
            notes,
        });
        self.save_rows()?;
        Ok(id)
    }

    /// Update fields of an existing row in place; `None` leaves a field
    /// untouched, an empty string clears an optional one.
    pub fn edit_row(
        &mut self,
        id: u32,
        drop_weight: Option<String>,
        agtron: Option<String>,
        dev_time: Option<String>,
        notes: Option<String>,
    ) -> AppResult<()> {
        let row = self
            .session
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::RowNotFound(id))?;

        let optional = |v: String| if v.is_empty() { None } else { Some(v) };
        if let Some(v) = drop_weight {
            row.drop_weight = v;
        }
        if let Some(v) = agtron {
            row.agtron = optional(v);
        }
        if let Some(v) = dev_time {
            row.dev_time = optional(v);
        }
        if let Some(v) = notes {
            row.notes = optional(v);
        }
        self.save_rows()
    }

    pub fn remove_row(&mut self, id: u32) -> AppResult<()> {
        let before = self.session.rows.len();
        self.session.rows.retain(|r| r.id != id);
        if self.session.rows.len() == before {
            return Err(AppError::RowNotFound(id));
        }
        self.save_rows()
    }

    /// Restore the single empty default row with id 1.
    pub fn reset_rows(&mut self) -> AppResult<()> {
        self.session.rows = vec![BatchRow::new(1)];
        self.save_rows()
    }

    /// Accept new thresholds only if they are strictly ascending; the
    /// classifier itself stays tolerant of whatever is already stored.
    pub fn set_levels(&mut self, levels: RoastLevels) -> AppResult<()> {
        validate_levels(&levels).map_err(|e| AppError::Validation(e.to_string()))?;
        self.session.levels = levels;
        self.save_levels()
    }

    pub fn reset_levels(&mut self) -> AppResult<()> {
        self.session.levels = RoastLevels::default();
        self.save_levels()
    }

    /// Replace the row table with an import result. An import that parsed
    /// no rows leaves the table unchanged. Returns the number of rows
    /// taken over.
    pub fn import_rows(&mut self, import: CsvImport) -> AppResult<usize> {
        for warning in &import.warnings {
            warn!("import: {}", warning);
        }
        if import.rows.is_empty() {
            debug!("import produced no rows; keeping existing table");
            return Ok(0);
        }
        let count = import.rows.len();
        self.session.rows = import.rows;
        self.save_rows()?;
        Ok(count)
    }
}
