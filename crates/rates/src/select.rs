//! Lowest-rate selection.

use tracing::debug;

use crate::{DeliveryAccuracy, RateError, Result, SmartRate};

/// Returns the cheapest rate that arrives within `max_delivery_days` at the
/// requested confidence level.
///
/// `delivery_accuracy` is matched case-insensitively against the known
/// percentile keys and is validated before any rate is looked at.
///
/// A rate qualifies when its transit days at that confidence are known and do
/// not exceed the bound. Rates without an estimate for the key, or whose price
/// does not parse, never qualify. Among qualifying rates the strictly lowest
/// price wins, so equal prices keep the earliest rate in input order.
///
/// # Errors
/// * [`RateError::InvalidDeliveryAccuracy`] for an unknown key
/// * [`RateError::NoRatesFound`] when nothing qualifies, including an empty slice
///
/// # Example
/// ```
/// use shipkit_rates::{select_lowest_rate, Rate, TimeInTransit};
///
/// let rates = vec![
///     Rate::new("12.00", TimeInTransit::uniform(1)),
///     Rate::new("5.00", TimeInTransit::uniform(6)),
///     Rate::new("8.50", TimeInTransit::uniform(3)),
/// ];
///
/// let lowest = select_lowest_rate(&rates, 3, "percentile_90").unwrap();
/// assert_eq!(lowest.rate, "8.50");
/// ```
pub fn select_lowest_rate<'a, R: SmartRate>(
    rates: &'a [R],
    max_delivery_days: i64,
    delivery_accuracy: &str,
) -> Result<&'a R> {
    let accuracy: DeliveryAccuracy = delivery_accuracy.parse()?;
    lowest_rate(rates, max_delivery_days, accuracy)
}

/// Same as [`select_lowest_rate`] with an already-parsed confidence level.
pub fn lowest_rate<R: SmartRate>(
    rates: &[R],
    max_delivery_days: i64,
    accuracy: DeliveryAccuracy,
) -> Result<&R> {
    let mut lowest: Option<(&R, f64)> = None;
    let mut qualifying = 0usize;

    for rate in qualifying_rates(rates, max_delivery_days, accuracy) {
        let Some(price) = rate.price() else {
            debug!("Skipping rate with unparseable price");
            continue;
        };
        qualifying += 1;

        if lowest.is_none_or(|(_, best)| price < best) {
            lowest = Some((rate, price));
        }
    }

    debug!(
        candidates = rates.len(),
        qualifying,
        max_delivery_days,
        accuracy = %accuracy,
        selected_price = lowest.map(|(_, price)| price),
        "Rate selection finished"
    );

    lowest.map(|(rate, _)| rate).ok_or(RateError::NoRatesFound)
}

/// Iterates the rates that meet the delivery constraint, in input order.
///
/// Prices are not inspected here.
pub fn qualifying_rates<R: SmartRate>(
    rates: &[R],
    max_delivery_days: i64,
    accuracy: DeliveryAccuracy,
) -> impl Iterator<Item = &R> {
    let bound = max_delivery_days as f64;
    rates.iter().filter(move |rate| {
        rate.transit_days(accuracy)
            .is_some_and(|days| days <= bound)
    })
}

/// Coerces a delivery-days bound given as text to an integer.
///
/// Follows integer-prefix parsing: leading whitespace and a sign are allowed,
/// then base-10 digits are read up to the first non-digit. `"3 days"` is `3`.
///
/// # Errors
/// [`RateError::InvalidDeliveryDays`] when no digits lead the input or the
/// value overflows.
pub fn parse_delivery_days(input: &str) -> Result<i64> {
    let trimmed = input.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if end == 0 {
        return Err(RateError::InvalidDeliveryDays(input.to_string()));
    }

    let digits = if negative {
        format!("-{}", &unsigned[..end])
    } else {
        unsigned[..end].to_string()
    };

    digits
        .parse::<i64>()
        .map_err(|_| RateError::InvalidDeliveryDays(input.to_string()))
}
