//! HMAC-SHA256 signing and signature comparison.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{Result, WebhookError};

type HmacSha256 = Hmac<Sha256>;

/// Generate HMAC-SHA256 signature.
///
/// # Arguments
/// * `key` - Secret key bytes
/// * `message` - Message to sign
///
/// # Returns
/// Signature as lowercase hex string
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key)
        .expect("HMAC can take key of any size");
    mac.update(message);
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

/// Verify a received signature against the expected value in constant time.
///
/// # Arguments
/// * `signature` - The signature as received
/// * `expected` - The signature computed locally
///
/// # Returns
/// Ok(()) if signatures match, `WebhookError::VerificationFailed` otherwise
pub fn verify_signature(signature: &str, expected: &str) -> Result<()> {
    if crate::constant_time_compare(signature.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(WebhookError::VerificationFailed)
    }
}
