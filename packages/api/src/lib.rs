//! # greq
//!
//! HTTP client facade with per-client defaults (headers, host override,
//! basic auth), a bounded worker pool, deadlines and optional per-request
//! latency breakdowns.
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use greq::{Client, Params, Worker};
//!
//! # async fn run() -> greq::Result<()> {
//! let client = Client::new(Arc::new(Worker::new(16)?), Duration::from_secs(10), true);
//! client.set_basic_auth("scott", "fine").set_header("accept", "text/plain");
//!
//! let params = Params::from([("key", "TEST_HELLO")]);
//! let response = client.post("https://api.example.com/submit", Some(&params)).await?;
//! println!("{} {}", response.status(), response.text());
//! # Ok(())
//! # }
//! ```
//!
//! With tracing on, each request emits one DEBUG `"http trace"` event
//! carrying the DNS, TCP, TLS, server processing and transfer durations.

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod client;

pub use client::{Client, ClientBuilder};

pub use greq_client::config::{HttpConfig, WorkerConfig, MAX_TIMEOUT};
pub use greq_client::error::{Error, Kind, Result};
pub use greq_client::http::{HttpResponse, Params};
pub use greq_client::pool::{Completion, Worker, WorkerPool};
pub use greq_client::trace::{
    ConnectionObserver, DiagnosticSink, NoopSink, TimingRecord, TracingSink,
};
pub use greq_client::{Method, StatusCode};
