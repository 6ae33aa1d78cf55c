//! Core configuration structures and their defaults

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default per-request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default bound on concurrently executing requests per worker pool.
pub const DEFAULT_MAX_WORKERS: usize = 32;

/// Executor configuration
///
/// Holds the request deadline and whether requests are instrumented with
/// connection-lifecycle timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Deadline for the complete exchange, body read included
    pub timeout: Duration,

    /// Emit one timing record per request
    pub trace: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            trace: false,
        }
    }
}

/// Worker pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Maximum number of requests executing at once
    pub max_workers: usize,

    /// Per-address connect timeout; the request deadline still applies when unset
    pub connect_timeout: Option<Duration>,

    /// Enable TCP_NODELAY
    pub tcp_nodelay: bool,

    /// User-Agent sent when the request carries none
    pub user_agent: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            connect_timeout: None,
            tcp_nodelay: true,
            user_agent: concat!("greq/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
