//! WebAssembly module for the roast loss calculator
//!
//! Exposes the computation core to the browser front end:
//! - Full calculation pass (rows + configuration to metrics + aggregates)
//! - CSV encode/decode
//! - Roast level classification
//! - Threshold validation
//!
//! The UI owns all widgets, storage wiring, and file handling; it calls in
//! with raw field values and renders the returned JSON.

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript bindings
pub use shared::calc::*;
pub use shared::models::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&"roast loss calculator core loaded".into());
}

/// Run the full calculation pass over a session JSON blob, returning
/// computed rows and aggregates as JSON.
#[wasm_bindgen]
pub fn compute_session(session_json: &str) -> Result<String, JsValue> {
    let session: shared::Session = serde_json::from_str(session_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid session JSON: {}", e)))?;
    let computation = shared::compute(&session);
    serde_json::to_string(&computation)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Parse free-text numeric input; invalid text degrades to zero
#[wasm_bindgen]
pub fn parse_number(text: &str) -> f64 {
    shared::to_number(text)
}

/// Round to two decimal places, ties away from zero
#[wasm_bindgen]
pub fn round_two(n: f64) -> f64 {
    shared::round2(n)
}

/// Classify a loss percentage, returning the display label. Malformed
/// levels JSON falls back to the default thresholds.
#[wasm_bindgen]
pub fn classify_roast_level(loss_percent: f64, levels_json: &str) -> String {
    let levels: shared::RoastLevels = serde_json::from_str(levels_json).unwrap_or_default();
    levels.classify(loss_percent).label_ko().to_string()
}

/// Check that thresholds parse and are strictly ascending, for the
/// settings form to call before accepting new values
#[wasm_bindgen]
pub fn levels_are_valid(levels_json: &str) -> bool {
    serde_json::from_str::<shared::RoastLevels>(levels_json)
        .map(|levels| shared::levels_are_ascending(&levels))
        .unwrap_or(false)
}

/// Serialize a session to the nine-column CSV blob, BOM included
#[wasm_bindgen]
pub fn encode_csv(session_json: &str) -> Result<String, JsValue> {
    let session: shared::Session = serde_json::from_str(session_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid session JSON: {}", e)))?;
    let computation = shared::compute(&session);
    Ok(shared::encode(&computation.items, computation.charge))
}

/// Parse a CSV blob into `{rows, warnings}` JSON. Lenient: malformed
/// lines come back with warnings instead of an error.
#[wasm_bindgen]
pub fn decode_csv(text: &str) -> Result<String, JsValue> {
    let import = shared::decode(text);
    serde_json::to_string(&import)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Default export filename embedding today's date in ISO form
#[wasm_bindgen]
pub fn default_export_filename() -> String {
    let iso: String = js_sys::Date::new_0().to_iso_string().into();
    format!("roast_loss_{}.csv", &iso[..10])
}
