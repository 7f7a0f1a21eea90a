//! WASM bindings for webhook verification.

use wasm_bindgen::prelude::*;

/// Validate a webhook and return its body as a JSON string.
///
/// # Arguments
/// * `event_body` - Raw request body bytes
/// * `signature` - Value of the `X-Hmac-Signature` header, if present
/// * `webhook_secret` - Shared webhook secret
///
/// # Returns
/// The verified body re-serialized as JSON, or the error message
#[wasm_bindgen(js_name = validateWebhook)]
pub fn validate_webhook(
    event_body: &[u8],
    signature: Option<String>,
    webhook_secret: &str,
) -> Result<String, JsValue> {
    let headers: Vec<(&str, String)> = signature
        .map(|value| vec![(crate::SIGNATURE_HEADER, value)])
        .unwrap_or_default();

    crate::validate_webhook(event_body, &headers, webhook_secret)
        .map(|event| event.to_string())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compute the `X-Hmac-Signature` header value for a body.
#[wasm_bindgen(js_name = signWebhook)]
pub fn sign_webhook(event_body: &[u8], webhook_secret: &str) -> String {
    crate::sign_webhook(event_body, webhook_secret)
}

/// Constant-time comparison of two strings.
#[wasm_bindgen(js_name = constantTimeEq)]
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    crate::constant_time_compare(a.as_bytes(), b.as_bytes())
}
