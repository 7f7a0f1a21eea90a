//! Webhook signing and verification commands

use anyhow::Context;
use serde_json::{Map, Value};
use shipkit_crypto::{sign_webhook, WebhookVerifier, SIGNATURE_HEADER};
use shipkit_telemetry::Timer;
use std::path::Path;

use super::read_file;
use crate::config::Config;
use crate::output::Status;

/// Where the signature for `verify-webhook` comes from
pub enum SignatureSource<'a> {
    /// `--signature` value
    Value(&'a str),
    /// `--headers` JSON file holding the request headers
    HeadersFile(&'a Path),
    /// Neither given
    None,
}

/// Verify a webhook body and print the event
pub fn verify(
    body_path: &Path,
    source: SignatureSource<'_>,
    secret: Option<&str>,
    config: &Config,
    json: bool,
) -> anyhow::Result<()> {
    let secret = config.webhook_secret(secret)?;
    let body = read_file(body_path)?;
    let headers = load_headers(source)?;

    let verifier = WebhookVerifier::new(&secret);
    let timer = Timer::start("validate_webhook");
    let verified = verifier.verify(&body, &headers);
    timer.stop();
    let event = verified?;

    if json {
        println!("{}", serde_json::to_string(&event)?);
    } else {
        Status::success("Webhook signature verified");
        if let Some(description) = event.get("description").and_then(Value::as_str) {
            Status::info(&format!("Event: {}", description));
        }
        println!("{}", serde_json::to_string_pretty(&event)?);
    }

    Ok(())
}

/// Print the signature header value for a body
pub fn sign(body_path: &Path, secret: Option<&str>, config: &Config, json: bool) -> anyhow::Result<()> {
    let secret = config.webhook_secret(secret)?;
    let body = read_file(body_path)?;
    let signature = sign_webhook(&body, &secret);

    if json {
        let mut header = Map::new();
        header.insert(SIGNATURE_HEADER.to_string(), Value::String(signature));
        println!("{}", Value::Object(header));
    } else {
        println!("{}", signature);
    }

    Ok(())
}

fn load_headers(source: SignatureSource<'_>) -> anyhow::Result<Map<String, Value>> {
    match source {
        SignatureSource::Value(signature) => {
            let mut headers = Map::new();
            headers.insert(SIGNATURE_HEADER.to_string(), Value::String(signature.to_string()));
            Ok(headers)
        }
        SignatureSource::HeadersFile(path) => {
            let data = read_file(path)?;
            serde_json::from_slice(&data)
                .with_context(|| format!("{} is not a JSON object of headers", path.display()))
        }
        SignatureSource::None => Ok(Map::new()),
    }
}
