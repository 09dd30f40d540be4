//! Connection pooling: a [`bb8`] manager that hands out `reqwest::Client`
//! handles bound to one base URL (`spec.md` §7, C8).
//!
//! `reqwest::Client` is itself a cheap, `Arc`-backed handle over a pooled
//! `hyper` connection pool, so "checking out a connection" here really means
//! checking out the shared client handle; the pool's job is to bound
//! concurrent in-flight callers and apply the configured checkout timeout,
//! not to manage sockets directly.

use std::time::Duration;

use async_trait::async_trait;
use bb8::ManageConnection;

use crate::config::ClientConfig;

/// `bb8` connection manager producing `reqwest::Client` handles configured
/// from a [`ClientConfig`].
pub struct HttpConnectionManager {
    base_url: String,
    open_timeout: Duration,
    keep_alive: Duration,
}

impl HttpConnectionManager {
    /// Build a manager for the given configuration.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url(),
            open_timeout: config.open_timeout,
            keep_alive: config.keep_alive,
        }
    }

    /// The base URL every connection from this manager targets.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ManageConnection for HttpConnectionManager {
    type Connection = reqwest::Client;
    type Error = reqwest::Error;

    async fn connect(&self) -> Result<Self::Connection, Self::Error> {
        reqwest::Client::builder()
            .connect_timeout(self.open_timeout)
            .pool_idle_timeout(self.keep_alive)
            .build()
    }

    async fn is_valid(&self, _conn: &mut Self::Connection) -> Result<(), Self::Error> {
        Ok(())
    }

    fn has_broken(&self, _conn: &mut Self::Connection) -> bool {
        false
    }
}

/// Build a `bb8` pool from a [`ClientConfig`].
///
/// # Errors
/// Returns a `reqwest::Error` if the initial pooled connection cannot be
/// built (TLS backend misconfiguration).
pub async fn build_pool(config: &ClientConfig) -> Result<bb8::Pool<HttpConnectionManager>, reqwest::Error> {
    bb8::Pool::builder()
        .max_size(config.pool_size)
        .connection_timeout(config.pool_timeout)
        .build(HttpConnectionManager::new(config))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_reports_configured_base_url() {
        let config = ClientConfig::new("example.com", 8080);
        let manager = HttpConnectionManager::new(&config);
        assert_eq!(manager.base_url(), "http://example.com:8080");
    }
}
