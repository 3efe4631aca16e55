//! Client-side request throttling
//!
//! The API starts answering 429 at roughly 50 requests per minute. A token
//! bucket shared by every request of a client keeps parallel exports under
//! that budget instead of relying on retries alone.

use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Token bucket refilled at a constant rate
#[derive(Debug)]
struct TokenBucket {
    /// Available tokens
    tokens: f64,
    /// Maximum burst size
    capacity: f64,
    /// Tokens per second
    rate: f64,
    /// Last refill time
    last_refill: Instant,
}

impl TokenBucket {
    fn new(rate: f64, capacity: f64, now: Instant) -> Self {
        Self {
            tokens: capacity,
            capacity,
            rate,
            last_refill: now,
        }
    }

    /// Takes one token, or returns how long to wait for the next one
    fn try_consume(&mut self, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.rate).min(self.capacity);
        self.last_refill = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            None
        } else {
            Some(Duration::from_secs_f64((1.0 - self.tokens) / self.rate))
        }
    }
}

/// Shared request budget
#[derive(Debug)]
pub struct RequestThrottle {
    bucket: Mutex<TokenBucket>,
}

impl RequestThrottle {
    /// Creates a throttle allowing `requests_per_minute`; `0` means unlimited
    ///
    /// The burst size is the per-second share of the budget, at least one.
    pub fn per_minute(requests_per_minute: u32) -> Option<Self> {
        if requests_per_minute == 0 {
            return None;
        }
        let rate = f64::from(requests_per_minute) / 60.0;
        let capacity = rate.floor().max(1.0);
        Some(Self {
            bucket: Mutex::new(TokenBucket::new(rate, capacity, Instant::now())),
        })
    }

    /// Waits until a request may be sent
    pub async fn acquire(&self) {
        loop {
            let wait = self.bucket.lock().await.try_consume(Instant::now());
            match wait {
                None => return,
                Some(delay) => {
                    tracing::debug!(delay_ms = delay.as_millis(), "Throttling request");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
