//! Error types for the rates crate.

use thiserror::Error;

/// Result type alias for rate selection.
pub type Result<T> = std::result::Result<T, RateError>;

/// Errors that can occur while selecting a rate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    /// The requested delivery accuracy is not one of the known percentile keys
    #[error("Invalid deliveryAccuracy value, must be one of: {}", .accepted.join(", "))]
    InvalidDeliveryAccuracy {
        /// The value as supplied by the caller
        value: String,
        /// Every accepted key, in ascending percentile order
        accepted: &'static [&'static str],
    },

    /// The delivery-days bound is not a base-10 integer
    #[error("Invalid deliveryDays value: {0:?} is not an integer")]
    InvalidDeliveryDays(String),

    /// No candidate satisfied the delivery constraint
    #[error("No rates found.")]
    NoRatesFound,
}

/// Error code for integration with shipkit error handling.
/// Range: 11xxx for rate errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateErrorCode {
    /// A caller-supplied argument was rejected before any rate was inspected
    InvalidArgument = 11001,
    /// No rate qualified
    NotFound = 11002,
}

impl RateError {
    /// Returns the error code for this error.
    pub fn code(&self) -> RateErrorCode {
        match self {
            RateError::InvalidDeliveryAccuracy { .. } | RateError::InvalidDeliveryDays(_) => {
                RateErrorCode::InvalidArgument
            }
            RateError::NoRatesFound => RateErrorCode::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DeliveryAccuracy;

    #[test]
    fn test_invalid_accuracy_message_lists_keys() {
        let err = RateError::InvalidDeliveryAccuracy {
            value: "bogus".to_string(),
            accepted: DeliveryAccuracy::ACCEPTED_VALUES,
        };

        assert_eq!(
            err.to_string(),
            "Invalid deliveryAccuracy value, must be one of: percentile_50, percentile_75, \
             percentile_85, percentile_90, percentile_95, percentile_97, percentile_99"
        );
        assert_eq!(err.code(), RateErrorCode::InvalidArgument);
    }

    #[test]
    fn test_not_found() {
        assert_eq!(RateError::NoRatesFound.to_string(), "No rates found.");
        assert_eq!(RateError::NoRatesFound.code(), RateErrorCode::NotFound);
        assert_eq!(RateErrorCode::NotFound as u32, 11002);
    }
}
