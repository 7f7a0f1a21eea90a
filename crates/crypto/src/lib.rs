//! Webhook verification for shipkit.
//!
//! This crate provides:
//! - HMAC-SHA256 signing of raw webhook bodies
//! - Constant-time signature comparison
//! - `X-Hmac-Signature` webhook validation with NFKD-normalized secrets
//! - WASM bindings for the JavaScript SDK
//!
//! Every verification failure other than a missing header surfaces as the
//! same [`WebhookError::VerificationFailed`], whatever the internal cause.

#![warn(missing_docs)]

mod error;
mod headers;
mod hmac_impl;
mod timing;
mod webhook;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{Result, WebhookError, WebhookErrorCode};
pub use headers::SignatureHeaders;
pub use hmac_impl::{hmac_sha256, verify_signature};
pub use timing::constant_time_compare;
pub use webhook::{
    normalize_secret, sign_webhook, validate_webhook, WebhookVerifier, SIGNATURE_HEADER,
    SIGNATURE_PREFIX,
};
