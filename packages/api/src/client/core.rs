//! Core `Client` structures and construction

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use greq_client::config::{
    HttpConfig, SharedDefaults, Validator, DEFAULT_MAX_WORKERS, MAX_TIMEOUT,
};
use greq_client::error;
use greq_client::pool::{Worker, WorkerPool};
use greq_client::trace::{DiagnosticSink, TracingSink};
use greq_client::{RequestExecutor, Result};

/// HTTP client with shared per-client defaults.
///
/// Cloning is cheap; clones share the same defaults and pool.
#[derive(Clone)]
pub struct Client {
    pub(crate) executor: Arc<RequestExecutor>,
    pub(crate) defaults: Arc<SharedDefaults>,
}

impl Client {
    /// Client dispatching through `pool` with a per-request `timeout`.
    ///
    /// With `trace` on, every request emits one timing record through a
    /// [`TracingSink`]. Timeouts above `MAX_TIMEOUT` are clamped to it.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use greq::{Client, Worker};
    ///
    /// # fn main() -> greq::Result<()> {
    /// let pool = Arc::new(Worker::new(16)?);
    /// let client = Client::new(pool, Duration::from_secs(5), true);
    /// client.set_header("x-request-source", "billing");
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn new<P>(pool: Arc<P>, timeout: Duration, trace: bool) -> Self
    where
        P: WorkerPool + 'static,
    {
        if timeout > MAX_TIMEOUT {
            tracing::debug!(requested = ?timeout, max = ?MAX_TIMEOUT, "timeout clamped");
        }
        let config = HttpConfig::default()
            .with_timeout(timeout.min(MAX_TIMEOUT))
            .with_trace(trace);
        Self::from_parts(pool, config, Arc::new(TracingSink::new()))
    }

    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    fn from_parts(
        pool: Arc<dyn WorkerPool>,
        config: HttpConfig,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let defaults = Arc::new(SharedDefaults::new());
        let executor = RequestExecutor::new(pool, defaults.clone(), config, sink);
        Self {
            executor: Arc::new(executor),
            defaults,
        }
    }

    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        self.executor.config()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", self.executor.config())
            .field("defaults", &self.defaults.snapshot())
            .finish()
    }
}

/// Builder for a [`Client`] with a custom pool, sink or configuration.
#[derive(Default)]
pub struct ClientBuilder {
    pool: Option<Arc<dyn WorkerPool>>,
    config: HttpConfig,
    sink: Option<Arc<dyn DiagnosticSink>>,
}

impl ClientBuilder {
    /// Pool requests are dispatched through.
    /// Defaults to a [`Worker`] with `DEFAULT_MAX_WORKERS` slots.
    #[must_use]
    pub fn pool<P>(mut self, pool: Arc<P>) -> Self
    where
        P: WorkerPool + 'static,
    {
        self.pool = Some(pool);
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    #[must_use]
    pub fn trace(mut self, enabled: bool) -> Self {
        self.config = self.config.with_trace(enabled);
        self
    }

    /// Receiver of timing records. Defaults to [`TracingSink`].
    #[must_use]
    pub fn sink<S>(mut self, sink: S) -> Self
    where
        S: DiagnosticSink + 'static,
    {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Replace timeout and trace settings at once.
    #[must_use]
    pub fn config(mut self, config: HttpConfig) -> Self {
        self.config = config;
        self
    }

    /// # Errors
    ///
    /// Returns a builder error when the configuration is invalid or the
    /// default pool cannot be created.
    pub fn build(self) -> Result<Client> {
        self.config.validate().map_err(error::configuration)?;

        let pool: Arc<dyn WorkerPool> = match self.pool {
            Some(pool) => pool,
            None => Arc::new(Worker::new(DEFAULT_MAX_WORKERS)?),
        };
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(TracingSink::new()) as Arc<dyn DiagnosticSink>);

        tracing::debug!(
            timeout = ?self.config.timeout,
            trace = self.config.trace,
            "client configured"
        );

        Ok(Client::from_parts(pool, self.config, sink))
    }
}
