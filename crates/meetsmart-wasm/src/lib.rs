//! WASM bindings for meetsmart-engine.
//!
//! Exposes common-window intersection and best-time selection to the web
//! frontend via `wasm-bindgen`. Requests and results cross the boundary as
//! JSON strings in the same shape the HTTP API uses.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p meetsmart-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir frontend/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/meetsmart_wasm.wasm
//! ```

use meetsmart_engine::SLOT_STEP_MINUTES;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Native entry points (JSON in, JSON out, String errors)
// ---------------------------------------------------------------------------

fn best_times_json(request_json: &str, step_minutes: i64) -> Result<String, String> {
    let response = meetsmart_engine::compute_best_times(request_json, step_minutes)
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&response).map_err(|e| format!("Serialization error: {}", e))
}

fn common_windows_json(request_json: &str, step_minutes: i64) -> Result<String, String> {
    let windows = meetsmart_engine::compute_common_windows(request_json, step_minutes)
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&windows).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute the best meeting times for an event and its responses.
///
/// `request_json` is `{event, responses}` as returned by the API. Returns a
/// JSON string `{best_times: [{time, score}], response_count,
/// participation_rate}` where `time` is `"start~end"`.
///
/// # Arguments
/// - `request_json` -- event plus collected responses
/// - `step_minutes` -- optional grid step (defaults to 10)
#[wasm_bindgen(js_name = "findBestTimes")]
pub fn find_best_times(request_json: &str, step_minutes: Option<i32>) -> Result<String, JsValue> {
    let step = step_minutes.map_or(SLOT_STEP_MINUTES, i64::from);
    best_times_json(request_json, step).map_err(|e| JsValue::from_str(&e))
}

/// List every window where all respondents are free.
///
/// Returns a JSON array of `{start, end, duration_minutes}` objects.
#[wasm_bindgen(js_name = "findCommonWindows")]
pub fn find_common_windows(
    request_json: &str,
    step_minutes: Option<i32>,
) -> Result<String, JsValue> {
    let step = step_minutes.map_or(SLOT_STEP_MINUTES, i64::from);
    common_windows_json(request_json, step).map_err(|e| JsValue::from_str(&e))
}
