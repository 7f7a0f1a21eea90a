//! Error types for the crypto crate.

use thiserror::Error;

/// Result type alias for webhook verification.
pub type Result<T> = std::result::Result<T, WebhookError>;

/// Errors that can occur while verifying a webhook.
///
/// `VerificationFailed` deliberately carries nothing: a bad secret, a tampered
/// body and an unparseable payload are indistinguishable to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// The signature header is absent or null
    #[error("Webhook received does not contain an HMAC signature.")]
    MissingSignature,

    /// The signature did not match or the payload could not be read
    #[error("Webhook received did not originate from EasyPost or had a webhook secret mismatch.")]
    VerificationFailed,
}

/// Error code for integration with shipkit error handling.
/// Range: 12xxx for webhook errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookErrorCode {
    /// Signature header missing
    MissingSignature = 12001,
    /// Signature or payload rejected
    VerificationFailed = 12002,
}

impl WebhookError {
    /// Returns the error code for this error.
    pub fn code(&self) -> WebhookErrorCode {
        match self {
            WebhookError::MissingSignature => WebhookErrorCode::MissingSignature,
            WebhookError::VerificationFailed => WebhookErrorCode::VerificationFailed,
        }
    }
}
