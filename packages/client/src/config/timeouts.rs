//! Builder methods for executor and worker configuration

use std::time::Duration;

use super::core::{HttpConfig, WorkerConfig};

impl HttpConfig {
    /// Set the request timeout
    ///
    /// Controls how long to wait for a complete request/response cycle before timing out.
    /// This includes pool admission, connection establishment, request sending and
    /// reading the whole response body.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use greq_client::config::HttpConfig;
    ///
    /// let config = HttpConfig::default().with_timeout(Duration::from_secs(5));
    /// assert_eq!(config.timeout, Duration::from_secs(5));
    /// ```
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable per-request timing records
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

impl WorkerConfig {
    /// Set the number of requests allowed to execute concurrently
    #[must_use]
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Set the connection timeout
    ///
    /// Bounds each individual TCP connect attempt. The request deadline
    /// bounds the whole exchange regardless.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_tcp_nodelay(mut self, enable: bool) -> Self {
        self.tcp_nodelay = enable;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}
