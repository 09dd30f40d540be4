//! Configuration surfaces for the client and server (`spec.md` §6).
//!
//! The builder constructors are the primary, fully-specified construction
//! path; [`ClientConfig::from_env`] layers `figment`'s environment provider
//! on top purely as a convenience, matching the teacher crate's use of
//! `figment` for overlay configuration.

use std::{sync::Arc, time::Duration};

use serde::Deserialize;

use crate::{
    middleware::MiddlewareStack,
    protocol::{DEFAULT_PROTOCOL, Protocol},
    server::ServiceDispatch,
};

/// Client-side configuration (`spec.md` §6 "Configuration surface (client)").
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Default Thrift protocol used for requests.
    pub protocol: Protocol,
    /// Target host.
    pub host: String,
    /// Target port.
    pub port: u16,
    /// Whether to use TLS.
    pub ssl: bool,
    /// Connect timeout.
    pub open_timeout: Duration,
    /// Per-call receive timeout.
    pub rpc_timeout: Duration,
    /// Idle connection lifetime.
    pub keep_alive: Duration,
    /// Maximum concurrent pooled connections.
    pub pool_size: u32,
    /// Pool-checkout timeout.
    pub pool_timeout: Duration,
}

/// The subset of [`ClientConfig`] that can sensibly be overridden from
/// environment variables (`THTP_HOST`, `THTP_PORT`, `THTP_SSL`,
/// `THTP_POOL_SIZE`); timeouts and the protocol choice stay builder-only.
#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    host: Option<String>,
    port: Option<u16>,
    ssl: Option<bool>,
    pool_size: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            protocol: DEFAULT_PROTOCOL,
            host: "localhost".to_owned(),
            port: 80,
            ssl: false,
            open_timeout: Duration::from_secs(5),
            rpc_timeout: Duration::from_secs(30),
            keep_alive: Duration::from_secs(60),
            pool_size: 10,
            pool_timeout: Duration::from_secs(5),
        }
    }
}

impl ClientConfig {
    /// Start building a configuration targeting `host:port`.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Set the default protocol.
    #[must_use]
    pub const fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Enable TLS.
    #[must_use]
    pub const fn ssl(mut self, ssl: bool) -> Self {
        self.ssl = ssl;
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub const fn open_timeout(mut self, timeout: Duration) -> Self {
        self.open_timeout = timeout;
        self
    }

    /// Set the per-call receive timeout.
    #[must_use]
    pub const fn rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = timeout;
        self
    }

    /// Set the idle keep-alive lifetime.
    #[must_use]
    pub const fn keep_alive(mut self, timeout: Duration) -> Self {
        self.keep_alive = timeout;
        self
    }

    /// Set the maximum pool size.
    #[must_use]
    pub const fn pool_size(mut self, size: u32) -> Self {
        self.pool_size = size;
        self
    }

    /// Set the pool-checkout timeout.
    #[must_use]
    pub const fn pool_timeout(mut self, timeout: Duration) -> Self {
        self.pool_timeout = timeout;
        self
    }

    /// The `scheme://host:port` base URL this configuration resolves to.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.ssl { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }

    /// Overlay environment variables prefixed `THTP_` (e.g. `THTP_HOST`,
    /// `THTP_PORT`) onto a default configuration.
    ///
    /// # Errors
    /// Returns a `figment` error if an overridden value fails to parse.
    pub fn from_env() -> Result<Self, figment::Error> {
        use figment::{Figment, providers::Env};

        let overrides: EnvOverrides = Figment::from(Env::prefixed("THTP_")).extract()?;
        let mut config = Self::default();
        if let Some(host) = overrides.host {
            config.host = host;
        }
        if let Some(port) = overrides.port {
            config.port = port;
        }
        if let Some(ssl) = overrides.ssl {
            config.ssl = ssl;
        }
        if let Some(pool_size) = overrides.pool_size {
            config.pool_size = pool_size;
        }
        Ok(config)
    }
}

/// Server-side configuration (`spec.md` §6 "Configuration surface
/// (server)"): a service descriptor plus the handler objects that answer
/// it and the middleware chain they run behind. Not loaded from the
/// environment — the embedding application builds this programmatically
/// and hands it to [`crate::server::ThtpService::from_config`].
pub struct ServerConfig {
    /// Canonical dotted-lowercase service path, e.g.
    /// `thtp.test.calculator_service`.
    pub service_path: String,
    /// Handler objects, tried in order for each RPC.
    pub handlers: Vec<Arc<dyn ServiceDispatch>>,
    /// Middleware chain composed around every handler call.
    pub middleware: Arc<MiddlewareStack>,
}

impl ServerConfig {
    /// Build a server configuration for the given service path and
    /// handlers, with an empty middleware chain.
    #[must_use]
    pub fn new(service_path: impl Into<String>, handlers: Vec<Arc<dyn ServiceDispatch>>) -> Self {
        Self { service_path: service_path.into(), handlers, middleware: Arc::new(MiddlewareStack::new()) }
    }

    /// Replace the middleware chain.
    #[must_use]
    pub fn middleware(mut self, middleware: Arc<MiddlewareStack>) -> Self {
        self.middleware = middleware;
        self
    }
}
