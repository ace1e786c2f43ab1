//! HTTP client configuration and building.
//!
//! Every request vaulter makes goes through a client built here, so
//! timeouts and TLS settings stay in one place.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout (default: 30s)
    pub timeout: Duration,
    /// Connection timeout (default: 10s)
    pub connect_timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("vaulter/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Build a configured HTTP client.
///
/// Creates a reqwest client with rustls TLS and the specified timeouts.
///
/// # Errors
///
/// Returns an error if the client cannot be built (e.g., TLS initialization fails).
///
/// # Examples
///
/// ```
/// use vaulter_common::{HttpConfig, build_http_client};
/// use std::time::Duration;
///
/// let config = HttpConfig {
///     timeout: Duration::from_secs(60),
///     ..HttpConfig::default()
/// };
/// let client = build_http_client(&config).expect("Failed to build client");
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(&config.user_agent)
        .use_rustls_tls()
        .build()
}
