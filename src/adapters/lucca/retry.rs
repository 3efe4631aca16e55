//! Retry policy for transient HTTP failures
//!
//! Only GET requests are issued, so every request is safe to replay. A
//! response whose status is in the retry set is retried with exponential
//! backoff; a `Retry-After` header replaces the computed delay.

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use std::time::Duration;

/// Statuses treated as transient
pub const RETRY_STATUSES: [u16; 7] = [425, 429, 500, 502, 503, 504, 507];

/// Immutable retry settings for one client
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,

    /// Seconds multiplied by `2^(retry - 1)` before each retry
    pub backoff_factor: f64,

    /// Ceiling for the computed backoff
    pub max_backoff: Duration,

    /// Statuses that trigger a retry
    pub retry_statuses: Vec<u16>,

    /// Use the server's `Retry-After` instead of the computed backoff
    pub respect_retry_after: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: 1.1,
            max_backoff: Duration::from_secs(120),
            retry_statuses: RETRY_STATUSES.to_vec(),
            respect_retry_after: true,
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Whether `status` belongs to the retry set
    pub fn is_retryable_status(&self, status: StatusCode) -> bool {
        self.retry_statuses.contains(&status.as_u16())
    }

    /// Computed backoff before retry number `retry` (1-based)
    pub fn backoff(&self, retry: u32) -> Duration {
        if retry == 0 || self.backoff_factor <= 0.0 {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(retry - 1).unwrap_or(i32::MAX);
        let secs = self.backoff_factor * 2f64.powi(exponent);
        if !secs.is_finite() || secs >= self.max_backoff.as_secs_f64() {
            return self.max_backoff;
        }
        Duration::from_secs_f64(secs)
    }

    /// Delay before retry number `retry`, honoring `Retry-After` when allowed
    pub fn delay(&self, retry: u32, retry_after: Option<Duration>) -> Duration {
        match retry_after {
            Some(wait) if self.respect_retry_after => wait,
            _ => self.backoff(retry),
        }
    }
}

/// Reads the `Retry-After` header of a response
pub fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| parse_retry_after(value, Utc::now()))
}

/// Parses a `Retry-After` value: delta-seconds or an HTTP date
///
/// Dates in the past yield a zero wait.
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if value.bytes().all(|b| b.is_ascii_digit()) {
        return value.parse::<u64>().ok().map(Duration::from_secs);
    }

    let at = DateTime::parse_from_rfc2822(value).ok()?;
    Some(
        (at.with_timezone(&Utc) - now)
            .to_std()
            .unwrap_or(Duration::ZERO),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use reqwest::header::HeaderValue;
    use test_case::test_case;

    #[test_case(425 ; "too early")]
    #[test_case(429 ; "too many requests")]
    #[test_case(500 ; "internal error")]
    #[test_case(502 ; "bad gateway")]
    #[test_case(503 ; "unavailable")]
    #[test_case(504 ; "gateway timeout")]
    #[test_case(507 ; "insufficient storage")]
    fn test_retryable_statuses(code: u16) {
        let policy = RetryPolicy::default();
        assert!(policy.is_retryable_status(StatusCode::from_u16(code).unwrap()));
    }

    #[test_case(400 ; "bad request")]
    #[test_case(401 ; "unauthorized")]
    #[test_case(404 ; "not found")]
    #[test_case(501 ; "not implemented")]
    fn test_non_retryable_statuses(code: u16) {
        let policy = RetryPolicy::default();
        assert!(!policy.is_retryable_status(StatusCode::from_u16(code).unwrap()));
    }

    #[test]
    fn test_backoff_grows_exponentially() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(0), Duration::ZERO);
        assert_eq!(policy.backoff(1), Duration::from_secs_f64(1.1));
        assert_eq!(policy.backoff(2), Duration::from_secs_f64(2.2));
        assert_eq!(policy.backoff(3), Duration::from_secs_f64(4.4));
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(20), Duration::from_secs(120));
        assert_eq!(policy.backoff(u32::MAX), Duration::from_secs(120));
    }

    #[test]
    fn test_zero_factor_disables_backoff() {
        let policy = RetryPolicy {
            backoff_factor: 0.0,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.backoff(3), Duration::ZERO);
    }

    #[test]
    fn test_retry_after_replaces_backoff() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.delay(1, Some(Duration::from_secs(7))),
            Duration::from_secs(7)
        );

        let ignoring = RetryPolicy {
            respect_retry_after: false,
            ..RetryPolicy::default()
        };
        assert_eq!(
            ignoring.delay(1, Some(Duration::from_secs(7))),
            Duration::from_secs_f64(1.1)
        );
    }

    #[test]
    fn test_parse_retry_after_seconds() {
        let now = Utc::now();
        assert_eq!(parse_retry_after("30", now), Some(Duration::from_secs(30)));
        assert_eq!(parse_retry_after(" 0 ", now), Some(Duration::ZERO));
        assert_eq!(parse_retry_after("", now), None);
        assert_eq!(parse_retry_after("soon", now), None);
    }

    #[test]
    fn test_parse_retry_after_http_date() {
        let now = Utc.with_ymd_and_hms(2015, 10, 21, 7, 27, 30).unwrap();
        assert_eq!(
            parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT", now),
            Some(Duration::from_secs(30))
        );

        let later = Utc.with_ymd_and_hms(2015, 10, 21, 8, 0, 0).unwrap();
        assert_eq!(
            parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT", later),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_retry_after_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(retry_after(&headers), None);

        headers.insert(RETRY_AFTER, HeaderValue::from_static("12"));
        assert_eq!(retry_after(&headers), Some(Duration::from_secs(12)));
    }
}
