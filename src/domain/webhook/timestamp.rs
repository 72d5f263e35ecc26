//! Delivery timestamp parsing and freshness check.

use chrono::{DateTime, Duration, Utc};

use super::errors::WebhookError;

/// Parses `timestamp_header` as RFC 3339 and checks it lies within
/// `max_clock_skew` of `now`, in either direction.
///
/// A skew exactly equal to the window is accepted.
///
/// # Errors
///
/// - `TimestampParse` - header is not RFC 3339
/// - `TimestampExpired` - absolute skew exceeds `max_clock_skew`
pub fn validate_timestamp(
    timestamp_header: &str,
    now: DateTime<Utc>,
    max_clock_skew: Duration,
) -> Result<DateTime<Utc>, WebhookError> {
    let timestamp = DateTime::parse_from_rfc3339(timestamp_header)
        .map_err(|e| WebhookError::TimestampParse(e.to_string()))?
        .with_timezone(&Utc);

    let skew = (now - timestamp).abs();
    if skew > max_clock_skew {
        return Err(WebhookError::TimestampExpired {
            skew_secs: skew.num_seconds(),
            window_secs: max_clock_skew.num_seconds(),
        });
    }

    Ok(timestamp)
}
