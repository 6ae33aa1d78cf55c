//! # greq client internals
//!
//! Request construction, the bounded worker pool, connection establishment
//! with lifecycle hooks and per-request timing diagnostics for the `greq`
//! facade.
//!
//! ## Features
//!
//! - **Bounded execution** through a semaphore-limited worker pool
//! - **Deadline per request** covering admission, connect and the body read
//! - **Connection lifecycle hooks** for DNS, TCP, TLS and first byte
//! - **Timing records** emitted once per instrumented request
//! - **Rustls TLS** with webpki roots
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use greq_client::config::{HttpConfig, SharedDefaults};
//! use greq_client::executor::RequestExecutor;
//! use greq_client::http::{OutboundRequest, Params};
//! use greq_client::pool::Worker;
//! use greq_client::trace::TracingSink;
//!
//! # async fn run() -> greq_client::Result<()> {
//! let executor = RequestExecutor::new(
//!     Arc::new(Worker::new(8)?),
//!     Arc::new(SharedDefaults::new()),
//!     HttpConfig::default().with_trace(true),
//!     Arc::new(TracingSink::new()),
//! );
//!
//! let params = Params::from([("key", "value")]);
//! let request = OutboundRequest::new(http::Method::GET, "http://127.0.0.1:8080/", Some(&params));
//! let response = executor.resolve(request).await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod connect;
pub mod error;
pub mod executor;
pub mod http;
pub mod pool;
pub mod trace;

pub use crate::config::{HttpConfig, RequestDefaults, SharedDefaults, WorkerConfig};
pub use crate::error::{Error, HttpError, Result};
pub use crate::executor::RequestExecutor;
pub use crate::http::{HttpResponse, OutboundRequest, Params};
pub use crate::pool::{Completion, Worker, WorkerPool};
pub use crate::trace::{
    ConnectionObserver, DiagnosticSink, NoopSink, TimingRecord, TracingSink,
};

pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
