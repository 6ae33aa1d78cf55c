//! Bounded request execution
//!
//! A [`WorkerPool`] takes a fully built request, drives it to a raw response
//! before the deadline and hands that response (or the transport error) to
//! the caller's [`Completion`] exactly once.

mod transport;
mod worker;

use bytes::Bytes;
use futures::future::BoxFuture;
use http_body_util::Full;
use tokio::time::Instant;

use crate::error::Result;
use crate::http::HttpResponse;

pub use transport::{ConnectionTask, Exchange, Transport};
pub use worker::Worker;

/// Turns the raw exchange outcome into a buffered response.
pub type Completion = Box<
    dyn FnOnce(Result<http::Response<hyper::body::Incoming>>) -> BoxFuture<'static, Result<HttpResponse>>
        + Send,
>;

/// Executes requests on a bounded set of workers.
pub trait WorkerPool: Send + Sync {
    /// Run `request` and feed the outcome to `completion`.
    ///
    /// Admission and the exchange must both finish before `deadline`.
    fn execute(
        &self,
        request: http::Request<Full<Bytes>>,
        deadline: Instant,
        completion: Completion,
    ) -> BoxFuture<'_, Result<HttpResponse>>;
}
