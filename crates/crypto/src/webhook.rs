//! Webhook payload verification.
//!
//! The sender signs the raw request body with HMAC-SHA256 keyed by the shared
//! webhook secret and sends `hmac-sha256-hex=<lowercase hex>` in the
//! `X-Hmac-Signature` header. The secret is NFKD-normalized before use, so
//! visually identical secrets typed on different systems produce the same key.
//!
//! Verification must run on the exact bytes received. Re-serializing parsed
//! JSON changes whitespace and key order and will not verify.

use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;

use crate::{hmac_sha256, verify_signature, Result, SignatureHeaders, WebhookError};

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "X-Hmac-Signature";

/// Prefix of the signature header value.
pub const SIGNATURE_PREFIX: &str = "hmac-sha256-hex=";

/// Verify a webhook and return its parsed JSON body.
///
/// # Arguments
/// * `event_body` - Raw request body bytes, exactly as received
/// * `headers` - Request headers
/// * `webhook_secret` - Shared secret configured for the webhook
///
/// # Errors
/// * [`WebhookError::MissingSignature`] if `X-Hmac-Signature` is absent or null
/// * [`WebhookError::VerificationFailed`] for a wrong signature, wrong secret,
///   tampered body or a body that is not JSON
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use shipkit_crypto::{sign_webhook, validate_webhook, SIGNATURE_HEADER};
///
/// let body = br#"{"description":"tracker.updated"}"#;
/// let mut headers = HashMap::new();
/// headers.insert(SIGNATURE_HEADER.to_string(), sign_webhook(body, "s3cr3t"));
///
/// let event = validate_webhook(body, &headers, "s3cr3t").unwrap();
/// assert_eq!(event["description"], "tracker.updated");
/// ```
pub fn validate_webhook<H>(event_body: &[u8], headers: &H, webhook_secret: &str) -> Result<Value>
where
    H: SignatureHeaders + ?Sized,
{
    WebhookVerifier::new(webhook_secret).verify(event_body, headers)
}

/// Compute the `X-Hmac-Signature` value a sender attaches to `event_body`.
pub fn sign_webhook(event_body: &[u8], webhook_secret: &str) -> String {
    signature_with_key(&normalize_secret(webhook_secret), event_body)
}

/// NFKD-normalize a secret and return its UTF-8 bytes.
pub fn normalize_secret(webhook_secret: &str) -> Vec<u8> {
    webhook_secret.nfkd().collect::<String>().into_bytes()
}

fn signature_with_key(key: &[u8], event_body: &[u8]) -> String {
    format!("{SIGNATURE_PREFIX}{}", hmac_sha256(key, event_body))
}

/// Verifier bound to one webhook secret.
///
/// Normalizes the secret once; use it when the same secret checks many
/// requests. Immutable, so it can be shared across threads.
#[derive(Clone)]
pub struct WebhookVerifier {
    key: Vec<u8>,
}

impl WebhookVerifier {
    /// Creates a verifier for `webhook_secret`.
    pub fn new(webhook_secret: &str) -> Self {
        Self {
            key: normalize_secret(webhook_secret),
        }
    }

    /// Verify a webhook and return its parsed JSON body.
    ///
    /// Same semantics as [`validate_webhook`].
    pub fn verify<H>(&self, event_body: &[u8], headers: &H) -> Result<Value>
    where
        H: SignatureHeaders + ?Sized,
    {
        let Some(signature) = headers.signature() else {
            warn!("Webhook rejected: no {} header", SIGNATURE_HEADER);
            return Err(WebhookError::MissingSignature);
        };

        self.verify_signature(event_body, signature)
    }

    /// Verify a signature header value already pulled from the request.
    pub fn verify_signature(&self, event_body: &[u8], signature: &str) -> Result<Value> {
        let expected = self.sign(event_body);

        let verified = verify_signature(signature, &expected)
            .inspect_err(|_| debug!("Webhook signature mismatch"))
            .and_then(|()| {
                let text = String::from_utf8_lossy(event_body);
                serde_json::from_str::<Value>(&text).map_err(|err| {
                    debug!(error = %err, "Signed webhook body is not valid JSON");
                    WebhookError::VerificationFailed
                })
            });

        match verified {
            Ok(event) => {
                debug!(body_len = event_body.len(), "Webhook verified");
                Ok(event)
            }
            Err(_) => {
                warn!(body_len = event_body.len(), "Webhook verification failed");
                Err(WebhookError::VerificationFailed)
            }
        }
    }

    /// Compute the signature header value for `event_body` with this secret.
    pub fn sign(&self, event_body: &[u8]) -> String {
        signature_with_key(&self.key, event_body)
    }
}

impl fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("key", &"[redacted]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::HashMap;

    const SECRET: &str = "sécret";
    const BODY: &[u8] = br#"{"id":"evt_123","description":"batch.created","result":{"id":"batch_1"}}"#;

    fn headers_with(signature: &str) -> HashMap<String, String> {
        HashMap::from([(SIGNATURE_HEADER.to_string(), signature.to_string())])
    }

    #[test]
    fn test_valid_webhook_returns_parsed_body() {
        let headers = headers_with(&sign_webhook(BODY, SECRET));

        let event = validate_webhook(BODY, &headers, SECRET).unwrap();
        assert_eq!(event, serde_json::from_slice::<Value>(BODY).unwrap());
        assert_eq!(event["result"]["id"], "batch_1");
    }

    #[test]
    fn test_signature_format() {
        let signature = sign_webhook(b"{}", "secret");
        let hex = signature.strip_prefix(SIGNATURE_PREFIX).unwrap();

        assert_eq!(hex, hmac_sha256(b"secret", b"{}"));
        assert_eq!(hex.len(), 64);
    }

    #[test]
    fn test_missing_header() {
        let headers: HashMap<String, String> = HashMap::new();
        assert_eq!(
            validate_webhook(BODY, &headers, SECRET),
            Err(WebhookError::MissingSignature)
        );
    }

    #[test]
    fn test_null_header() {
        let headers = json!({"X-Hmac-Signature": null});
        assert_eq!(
            validate_webhook(BODY, headers.as_object().unwrap(), SECRET),
            Err(WebhookError::MissingSignature)
        );
    }

    #[test]
    fn test_lowercase_header_name_is_missing() {
        let headers = HashMap::from([(
            "x-hmac-signature".to_string(),
            sign_webhook(BODY, SECRET),
        )]);
        assert_eq!(
            validate_webhook(BODY, &headers, SECRET),
            Err(WebhookError::MissingSignature)
        );
    }

    #[test]
    fn test_wrong_secret() {
        let headers = headers_with(&sign_webhook(BODY, "another secret"));
        assert_eq!(
            validate_webhook(BODY, &headers, SECRET),
            Err(WebhookError::VerificationFailed)
        );
    }

    #[test]
    fn test_tampered_body() {
        let headers = headers_with(&sign_webhook(BODY, SECRET));
        let tampered = br#"{"id":"evt_123","description":"batch.created","result":{"id":"batch_2"}}"#;

        assert_eq!(
            validate_webhook(tampered, &headers, SECRET),
            Err(WebhookError::VerificationFailed)
        );
    }

    #[test]
    fn test_uppercase_hex_is_rejected() {
        let signature = sign_webhook(BODY, SECRET);
        let hex = signature.strip_prefix(SIGNATURE_PREFIX).unwrap().to_uppercase();
        let headers = headers_with(&format!("{SIGNATURE_PREFIX}{hex}"));

        assert_eq!(
            validate_webhook(BODY, &headers, SECRET),
            Err(WebhookError::VerificationFailed)
        );
    }

    #[test]
    fn test_bare_hex_without_prefix_is_rejected() {
        let signature = sign_webhook(BODY, SECRET);
        let hex = signature.strip_prefix(SIGNATURE_PREFIX).unwrap();

        assert_eq!(
            validate_webhook(BODY, &headers_with(hex), SECRET),
            Err(WebhookError::VerificationFailed)
        );
    }

    #[test]
    fn test_signed_non_json_body_fails_uniformly() {
        let body = b"not json at all";
        let headers = headers_with(&sign_webhook(body, SECRET));

        let err = validate_webhook(body, &headers, SECRET).unwrap_err();
        assert_eq!(err, WebhookError::VerificationFailed);
        assert_eq!(
            err.to_string(),
            "Webhook received did not originate from EasyPost or had a webhook secret mismatch."
        );
    }

    #[test]
    fn test_signed_body_with_invalid_utf8_is_decoded_lossily() {
        let body = b"{\"id\":\"evt_9\",\"note\":\"caf\xe9\"}";
        assert!(std::str::from_utf8(body).is_err());
        let headers = headers_with(&sign_webhook(body, SECRET));

        let event = validate_webhook(body, &headers, SECRET).unwrap();
        assert_eq!(event["id"], "evt_9");
        assert_eq!(event["note"], "caf\u{fffd}");
    }

    #[test]
    fn test_secret_is_nfkd_normalized() {
        // U+00E9 (precomposed) and "e" + U+0301 (combining) normalize to the same bytes
        let composed = "s\u{00e9}cret";
        let decomposed = "se\u{0301}cret";
        assert_eq!(normalize_secret(composed), normalize_secret(decomposed));

        let headers = headers_with(&sign_webhook(BODY, composed));
        assert!(validate_webhook(BODY, &headers, decomposed).is_ok());

        // Compatibility forms fold too: the "fi" ligature becomes "fi"
        assert_eq!(normalize_secret("\u{fb01}le"), b"file".to_vec());
    }

    #[test]
    fn test_key_uses_normalized_bytes() {
        let expected = format!(
            "{SIGNATURE_PREFIX}{}",
            hmac_sha256("se\u{0301}cret".as_bytes(), BODY)
        );
        assert_eq!(sign_webhook(BODY, "s\u{00e9}cret"), expected);
    }

    #[test]
    fn test_verifier_reuse() {
        let verifier = WebhookVerifier::new(SECRET);
        let other = br#"{"id":"evt_456"}"#;

        let headers = headers_with(&verifier.sign(BODY));
        assert!(verifier.verify(BODY, &headers).is_ok());
        assert_eq!(
            verifier.verify(other, &headers),
            Err(WebhookError::VerificationFailed)
        );
        assert!(verifier.verify_signature(other, &verifier.sign(other)).is_ok());
    }

    #[test]
    fn test_verifier_debug_redacts_key() {
        let debug = format!("{:?}", WebhookVerifier::new("hunter2"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_verifier_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WebhookVerifier>();
    }

    proptest! {
        #[test]
        fn prop_any_signature_byte_flip_fails(index in 0usize..80, bit in 0u8..7) {
            let signature = sign_webhook(BODY, SECRET);
            let mut bytes = signature.into_bytes();
            let index = index % bytes.len();
            bytes[index] ^= 1 << bit;
            let flipped = String::from_utf8_lossy(&bytes).into_owned();

            let result = validate_webhook(BODY, &headers_with(&flipped), SECRET);
            prop_assert_eq!(result, Err(WebhookError::VerificationFailed));
        }

        #[test]
        fn prop_any_body_byte_flip_fails(index in 0usize..256, bit in 0u8..8) {
            let headers = headers_with(&sign_webhook(BODY, SECRET));
            let mut body = BODY.to_vec();
            let index = index % body.len();
            body[index] ^= 1 << bit;

            let result = validate_webhook(&body, &headers, SECRET);
            prop_assert_eq!(result, Err(WebhookError::VerificationFailed));
        }

        #[test]
        fn prop_other_secret_fails(secret in "\\PC{1,24}") {
            prop_assume!(normalize_secret(&secret) != normalize_secret(SECRET));
            let headers = headers_with(&sign_webhook(BODY, &secret));

            let result = validate_webhook(BODY, &headers, SECRET);
            prop_assert_eq!(result, Err(WebhookError::VerificationFailed));
        }

        #[test]
        fn prop_signed_json_round_trips(value in "[a-zA-Z0-9 ]{0,32}", secret in "\\PC{0,16}") {
            let body = serde_json::to_vec(&json!({"value": value})).unwrap();
            let headers = headers_with(&sign_webhook(&body, &secret));

            let event = validate_webhook(&body, &headers, &secret).unwrap();
            prop_assert_eq!(&event["value"], &json!(value));
        }
    }
}
