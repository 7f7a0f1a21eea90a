//! Shipping rate selection for shipkit.
//!
//! This crate provides:
//! - Delivery accuracy (confidence percentile) keys as a closed enum
//! - A typed smart-rate model, plus support for raw JSON rate objects
//! - Lowest-rate selection under a delivery-days bound
//! - WASM bindings for the JavaScript SDK
//!
//! # Example
//!
//! ```
//! use shipkit_rates::{select_lowest_rate, DeliveryAccuracy, Rate, TimeInTransit};
//!
//! let rates = vec![
//!     Rate::new("9.10", TimeInTransit::default().with(DeliveryAccuracy::Percentile90, 2)),
//!     Rate::new("6.25", TimeInTransit::default().with(DeliveryAccuracy::Percentile90, 5)),
//! ];
//!
//! let lowest = select_lowest_rate(&rates, 2, "PERCENTILE_90").unwrap();
//! assert_eq!(lowest.rate, "9.10");
//! ```

mod accuracy;
mod error;
mod rate;
mod select;

#[cfg(feature = "wasm")]
mod wasm;

pub use accuracy::DeliveryAccuracy;
pub use error::{RateError, RateErrorCode, Result};
pub use rate::{parse_price, Rate, SmartRate, TimeInTransit};
pub use select::{lowest_rate, parse_delivery_days, qualifying_rates, select_lowest_rate};
