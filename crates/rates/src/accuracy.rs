//! Delivery accuracy (confidence percentile) keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RateError;

/// Statistical confidence that a shipment arrives within its stated transit days.
///
/// Parsing is case-insensitive, so `"PERCENTILE_90"` and `"percentile_90"` are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeliveryAccuracy {
    /// 50th percentile
    #[serde(rename = "percentile_50")]
    Percentile50,
    /// 75th percentile
    #[serde(rename = "percentile_75")]
    Percentile75,
    /// 85th percentile
    #[serde(rename = "percentile_85")]
    Percentile85,
    /// 90th percentile
    #[serde(rename = "percentile_90")]
    Percentile90,
    /// 95th percentile
    #[serde(rename = "percentile_95")]
    Percentile95,
    /// 97th percentile
    #[serde(rename = "percentile_97")]
    Percentile97,
    /// 99th percentile
    #[serde(rename = "percentile_99")]
    Percentile99,
}

impl DeliveryAccuracy {
    /// Every key, in ascending percentile order.
    pub const ALL: [DeliveryAccuracy; 7] = [
        DeliveryAccuracy::Percentile50,
        DeliveryAccuracy::Percentile75,
        DeliveryAccuracy::Percentile85,
        DeliveryAccuracy::Percentile90,
        DeliveryAccuracy::Percentile95,
        DeliveryAccuracy::Percentile97,
        DeliveryAccuracy::Percentile99,
    ];

    /// Wire names of [`DeliveryAccuracy::ALL`], same order.
    pub const ACCEPTED_VALUES: &'static [&'static str] = &[
        "percentile_50",
        "percentile_75",
        "percentile_85",
        "percentile_90",
        "percentile_95",
        "percentile_97",
        "percentile_99",
    ];

    /// Returns the wire name, e.g. `percentile_90`.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        Self::ACCEPTED_VALUES[*self as usize]
    }

    /// Returns the percentile as a number, e.g. `90`.
    pub fn percentile(&self) -> u8 {
        match self {
            DeliveryAccuracy::Percentile50 => 50,
            DeliveryAccuracy::Percentile75 => 75,
            DeliveryAccuracy::Percentile85 => 85,
            DeliveryAccuracy::Percentile90 => 90,
            DeliveryAccuracy::Percentile95 => 95,
            DeliveryAccuracy::Percentile97 => 97,
            DeliveryAccuracy::Percentile99 => 99,
        }
    }
}

impl fmt::Display for DeliveryAccuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryAccuracy {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowercase = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|accuracy| accuracy.as_str() == lowercase)
            .ok_or_else(|| RateError::InvalidDeliveryAccuracy {
                value: s.to_string(),
                accepted: Self::ACCEPTED_VALUES,
            })
    }
}
