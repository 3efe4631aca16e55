//! Lucca HR API adapter
//!
//! This module provides the HTTP side of the exporter: the [`ApiClient`]
//! seam, its reqwest implementation, the retry policy and the shared
//! request throttle.

pub mod client;
pub mod retry;
pub mod throttle;

pub use client::{ApiClient, HttpClientConfig, LuccaClient};
pub use retry::RetryPolicy;
pub use throttle::RequestThrottle;
