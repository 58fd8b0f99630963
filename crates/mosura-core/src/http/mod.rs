//! Resilient JSON HTTP client for a single base URL.

mod client;
mod retry;

pub use client::{BaseClient, RequestOptions};
pub use retry::{retry_with_backoff, RetryPolicy};
