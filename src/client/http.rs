use reqwest::Client;
use std::time::Duration;

/// Build the pooled HTTP client used for all backend calls. The request
/// timeout bounds every call; a timeout surfaces as a `Transport` failure
/// and cancels only that call.
pub fn build_backend_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}
