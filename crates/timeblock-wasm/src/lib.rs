//! WASM bindings for timeblock-engine.
//!
//! Exposes calendar layout, multi-day splitting, zone conversion and the
//! sizing helpers to the browser rendering layer via `wasm-bindgen`. Complex
//! values cross the boundary as JSON strings in the same shapes the backend
//! API serves.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p timeblock-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/timeblock-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/timeblock_wasm.wasm
//! ```

use timeblock_engine::time::parse_timezone;
use timeblock_engine::{
    CalendarInput, CalendarLayout, CombinedTimeEventInDayEntry, EstimatedTextMeasure,
    LayoutOptions, ZonedParams,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn zoned_params(date: &str, time: Option<String>) -> Result<ZonedParams, JsValue> {
    Ok(ZonedParams {
        start_date: date
            .parse()
            .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", date, e)))?,
        start_time_in_day: time,
    })
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Build the per-day buckets and lane offsets for a calendar view.
///
/// `input_json` is `{in_day: [...], full_days: [...]}`; `options_json` is
/// `{timezone, include_archived}` (either key may be omitted). Returns
/// `{full_days, in_day, lanes}` keyed by `YYYY-MM-DD`.
#[wasm_bindgen(js_name = "buildCalendarLayout")]
pub fn build_calendar_layout(input_json: &str, options_json: &str) -> Result<String, JsValue> {
    let input: CalendarInput = serde_json::from_str(input_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid calendar JSON: {}", e)))?;
    let options: LayoutOptions = if options_json.trim().is_empty() {
        LayoutOptions::default()
    } else {
        serde_json::from_str(options_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid options JSON: {}", e)))?
    };

    let layout = CalendarLayout::build(&input, &options).map_err(js_error)?;
    to_json(&layout)
}

/// Split one in-day entry (already in display time) into `{day1, day2, day3}`.
#[wasm_bindgen(js_name = "splitInDayEntry")]
pub fn split_in_day_entry(entry_json: &str) -> Result<String, JsValue> {
    let entry: CombinedTimeEventInDayEntry = serde_json::from_str(entry_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid entry JSON: {}", e)))?;
    let split = timeblock_engine::split_in_day_entry(&entry).map_err(js_error)?;
    to_json(&split)
}

/// Reinterpret a stored UTC date and `HH:mm` time in `timezone`.
///
/// Returns `{start_date, start_time_in_day}`; an absent time passes through.
#[wasm_bindgen(js_name = "convertToZone")]
pub fn convert_to_zone(date: &str, time: Option<String>, timezone: &str) -> Result<String, JsValue> {
    let tz = parse_timezone(timezone).map_err(js_error)?;
    let converted =
        timeblock_engine::convert_to_zone(&zoned_params(date, time)?, &tz).map_err(js_error)?;
    to_json(&converted)
}

/// Interpret a date and `HH:mm` time as wall-clock in `timezone` and return UTC.
#[wasm_bindgen(js_name = "convertToUtc")]
pub fn convert_to_utc(date: &str, time: Option<String>, timezone: &str) -> Result<String, JsValue> {
    let tz = parse_timezone(timezone).map_err(js_error)?;
    let converted =
        timeblock_engine::convert_to_utc(&zoned_params(date, time)?, &tz).map_err(js_error)?;
    to_json(&converted)
}

/// Truncate a label with `...` so it fits `container_width` pixels.
#[wasm_bindgen(js_name = "clipLabelToWidth")]
pub fn clip_label_to_width(text: &str, font_size: f64, container_width: f64) -> String {
    timeblock_engine::clip_label_to_width(
        text,
        font_size,
        container_width,
        &EstimatedTextMeasure::default(),
    )
    .into_owned()
}

/// Vertical offset in rem for a block starting `start_mins` after midnight.
#[wasm_bindgen(js_name = "minutesToRems")]
pub fn minutes_to_rems(start_mins: i32) -> f64 {
    timeblock_engine::minutes_to_rems(i64::from(start_mins))
}

/// Whole 15-minute quarters a block occupies, capped at midnight, at least one.
#[wasm_bindgen(js_name = "durationInQuarters")]
pub fn duration_in_quarters(minutes_since_start_of_day: i32, duration_mins: u32) -> u32 {
    timeblock_engine::duration_in_quarters(i64::from(minutes_since_start_of_day), duration_mins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_json_round_trip() {
        let input = r#"{"in_day":[{"time_event":{"id":"a","namespace":"inbox-task","start_date":"2026-01-15","start_time_in_day":"09:00","duration_mins":30},"entry":{"entry_kind":"inbox_task","ref_id":"it","name":"A","status":"accepted"}}]}"#;
        let out = build_calendar_layout(input, "").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["lanes"]["2026-01-15"]["a"], 0);
    }

    #[test]
    fn sizing_helpers_pass_through() {
        assert_eq!(minutes_to_rems(30), 2.0);
        assert_eq!(duration_in_quarters(0, 5), 1);
        assert_eq!(clip_label_to_width("Hi", 12.0, 100.0), "Hi");
    }
}
