//! Rate selection commands

use anyhow::{bail, Context};
use serde_json::Value;
use shipkit_rates::{
    parse_delivery_days, qualifying_rates, select_lowest_rate, DeliveryAccuracy, SmartRate,
};
use shipkit_telemetry::Timer;
use std::path::Path;

use super::read_file;
use crate::config::Config;
use crate::output::{format_count, Status};

/// Print the lowest qualifying rate from a JSON file
pub fn lowest_rate(
    path: &Path,
    max_days: Option<&str>,
    accuracy: Option<&str>,
    config: &Config,
    json: bool,
) -> anyhow::Result<()> {
    let max_delivery_days = match max_days {
        Some(raw) => parse_delivery_days(raw)?,
        None => config
            .schema
            .rates
            .max_delivery_days
            .context("No --max-days given and [rates] max_delivery_days is not set")?,
    };
    let accuracy = accuracy
        .map(str::to_string)
        .unwrap_or_else(|| config.schema.rates.delivery_accuracy.to_string());

    let rates = load_rates(path)?;

    let timer = Timer::start("select_lowest_rate");
    let selected = select_lowest_rate(&rates, max_delivery_days, &accuracy);
    timer.stop();
    let lowest = selected?;

    if json {
        println!("{}", serde_json::to_string_pretty(lowest)?);
        return Ok(());
    }

    let accuracy: DeliveryAccuracy = accuracy.parse()?;
    let considered = qualifying_rates(&rates, max_delivery_days, accuracy)
        .filter(|rate| rate.price().is_some())
        .count();

    Status::header("Lowest rate");
    Status::success(&describe(lowest, accuracy));
    Status::info(&format!(
        "{} of {} deliver within {} days at {}",
        format_count(considered, "rate", "rates"),
        rates.len(),
        max_delivery_days,
        accuracy
    ));

    Ok(())
}

/// List the accepted delivery accuracy keys
pub fn accuracies(json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(DeliveryAccuracy::ACCEPTED_VALUES)?);
    } else {
        for accuracy in DeliveryAccuracy::ALL {
            println!("{}", accuracy);
        }
    }
    Ok(())
}

/// Accepts a bare array of rates or an object with a `rates` array, such as a
/// shipment or a smartrate response
fn load_rates(path: &Path) -> anyhow::Result<Vec<Value>> {
    let data = read_file(path)?;
    let value: Value = serde_json::from_slice(&data)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    match value {
        Value::Array(rates) => Ok(rates),
        Value::Object(mut object) => match object.remove("rates") {
            Some(Value::Array(rates)) => Ok(rates),
            _ => bail!("{} has no \"rates\" array", path.display()),
        },
        _ => bail!("Expected a JSON array of rates in {}", path.display()),
    }
}

fn describe(rate: &Value, accuracy: DeliveryAccuracy) -> String {
    let text = |name: &str| match rate.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    };

    let days = rate
        .transit_days(accuracy)
        .map(|days| days.to_string())
        .unwrap_or_else(|| "?".to_string());

    format!(
        "{} {} {} {} ({} days)",
        text("carrier"),
        text("service"),
        text("rate"),
        text("currency"),
        days
    )
}
