//! WASM bindings for the rates crate.
//!
//! Rates cross the boundary as JSON strings so the records come back exactly as
//! the caller passed them in.

use serde_json::Value;
use wasm_bindgen::prelude::*;

/// Select the lowest rate from a JSON array of smart rates.
///
/// # Arguments
/// * `rates_json` - JSON array of rate objects with `rate` and `time_in_transit`
/// * `max_delivery_days` - Maximum acceptable transit days
/// * `delivery_accuracy` - Percentile key, e.g. `percentile_90`
///
/// # Returns
/// JSON string of the selected rate
#[wasm_bindgen(js_name = getLowestSmartRate)]
pub fn get_lowest_smart_rate(
    rates_json: &str,
    max_delivery_days: i32,
    delivery_accuracy: &str,
) -> Result<String, JsValue> {
    let rates: Vec<Value> = serde_json::from_str(rates_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;

    let lowest = crate::select_lowest_rate(&rates, i64::from(max_delivery_days), delivery_accuracy)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(lowest.to_string())
}

/// List the accepted delivery accuracy keys.
#[wasm_bindgen(js_name = deliveryAccuracyValues)]
pub fn delivery_accuracy_values() -> Vec<JsValue> {
    crate::DeliveryAccuracy::ACCEPTED_VALUES
        .iter()
        .map(|value| JsValue::from_str(value))
        .collect()
}
