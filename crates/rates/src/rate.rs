//! Rate records accepted by the selector.
//!
//! The selector only needs two things from a record: its price and its transit
//! days at a confidence level. [`SmartRate`] captures that, and is implemented
//! for the typed [`Rate`] model as well as for raw `serde_json::Value` objects
//! straight out of an API response.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::DeliveryAccuracy;

/// A rate-like record the selector can compare.
pub trait SmartRate {
    /// Price as a finite float, or `None` if it cannot be parsed.
    fn price(&self) -> Option<f64>;

    /// Estimated transit days at the given confidence, or `None` if unknown.
    ///
    /// Fractional estimates are kept as they are; the bound check compares
    /// numerically.
    fn transit_days(&self, accuracy: DeliveryAccuracy) -> Option<f64>;
}

/// Transit-day estimates per confidence level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInTransit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile_50: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile_75: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile_85: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile_90: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile_95: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile_97: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile_99: Option<u32>,
}

impl TimeInTransit {
    /// Same estimate at every confidence level.
    pub fn uniform(days: u32) -> Self {
        DeliveryAccuracy::ALL
            .into_iter()
            .fold(Self::default(), |tit, accuracy| tit.with(accuracy, days))
    }

    /// Sets the estimate for one confidence level.
    pub fn with(mut self, accuracy: DeliveryAccuracy, days: u32) -> Self {
        *self.slot_mut(accuracy) = Some(days);
        self
    }

    /// Returns the estimate for one confidence level.
    pub fn get(&self, accuracy: DeliveryAccuracy) -> Option<u32> {
        match accuracy {
            DeliveryAccuracy::Percentile50 => self.percentile_50,
            DeliveryAccuracy::Percentile75 => self.percentile_75,
            DeliveryAccuracy::Percentile85 => self.percentile_85,
            DeliveryAccuracy::Percentile90 => self.percentile_90,
            DeliveryAccuracy::Percentile95 => self.percentile_95,
            DeliveryAccuracy::Percentile97 => self.percentile_97,
            DeliveryAccuracy::Percentile99 => self.percentile_99,
        }
    }

    fn slot_mut(&mut self, accuracy: DeliveryAccuracy) -> &mut Option<u32> {
        match accuracy {
            DeliveryAccuracy::Percentile50 => &mut self.percentile_50,
            DeliveryAccuracy::Percentile75 => &mut self.percentile_75,
            DeliveryAccuracy::Percentile85 => &mut self.percentile_85,
            DeliveryAccuracy::Percentile90 => &mut self.percentile_90,
            DeliveryAccuracy::Percentile95 => &mut self.percentile_95,
            DeliveryAccuracy::Percentile97 => &mut self.percentile_97,
            DeliveryAccuracy::Percentile99 => &mut self.percentile_99,
        }
    }
}

/// A smart rate as returned by the shipping API.
///
/// Fields the selector does not use are kept in `extra`, so a deserialized
/// record serializes back to the same object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Decimal amount as sent on the wire; numbers are stored in their JSON text form.
    #[serde(deserialize_with = "string_or_number")]
    pub rate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default)]
    pub time_in_transit: TimeInTransit,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Rate {
    /// Creates a rate with only the fields the selector reads.
    pub fn new(rate: impl Into<String>, time_in_transit: TimeInTransit) -> Self {
        Self {
            id: None,
            carrier: None,
            service: None,
            rate: rate.into(),
            currency: None,
            time_in_transit,
            extra: Map::new(),
        }
    }

    /// Sets carrier and service.
    pub fn with_service(mut self, carrier: impl Into<String>, service: impl Into<String>) -> Self {
        self.carrier = Some(carrier.into());
        self.service = Some(service.into());
        self
    }

    /// Sets the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl SmartRate for Rate {
    fn price(&self) -> Option<f64> {
        parse_price(&self.rate)
    }

    fn transit_days(&self, accuracy: DeliveryAccuracy) -> Option<f64> {
        self.time_in_transit.get(accuracy).map(f64::from)
    }
}

impl SmartRate for Value {
    fn price(&self) -> Option<f64> {
        match self.get("rate")? {
            Value::String(s) => parse_price(s),
            Value::Number(n) => n.as_f64().filter(|price| price.is_finite()),
            _ => None,
        }
    }

    fn transit_days(&self, accuracy: DeliveryAccuracy) -> Option<f64> {
        self.get("time_in_transit")?
            .get(accuracy.as_str())?
            .as_f64()
    }
}

impl<T: SmartRate + ?Sized> SmartRate for &T {
    fn price(&self) -> Option<f64> {
        (**self).price()
    }

    fn transit_days(&self, accuracy: DeliveryAccuracy) -> Option<f64> {
        (**self).transit_days(accuracy)
    }
}

/// Parses a decimal price string.
///
/// Reads the longest leading float: leading whitespace, an optional sign,
/// digits with an optional fraction, then an optional exponent. Whatever
/// follows is ignored, so `"5.00 USD"` is `5.0`. Returns `None` when no digits
/// lead the input or the value is not finite.
pub fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let end = float_prefix_len(trimmed.as_bytes());
    if end == 0 {
        return None;
    }

    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
}

fn float_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digits_from(end + 1 + sign);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }

    end
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected rate as string or number, got {other}"
        ))),
    }
}
