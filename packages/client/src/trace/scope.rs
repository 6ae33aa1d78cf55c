//! Finalize-once trace scope for one request

use std::sync::Arc;

use bytes::Bytes;

use super::observer::TraceHandle;
use super::record::TimingRecord;
use super::sink::DiagnosticSink;
use super::timeline::TraceTimestamps;
use crate::http::{OutboundRequest, Scheme};

/// Owns the timestamps of one instrumented request.
///
/// The record is computed and emitted when the scope is dropped, so every
/// exit path of the request (success, error, deadline, or the caller
/// abandoning the future) produces exactly one record.
pub struct TraceScope {
    timestamps: Arc<TraceTimestamps>,
    sink: Arc<dyn DiagnosticSink>,
    scheme: Scheme,
    url: String,
    method: String,
    param: String,
    body: Bytes,
}

impl TraceScope {
    #[must_use]
    pub fn open(request: &OutboundRequest, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            timestamps: Arc::new(TraceTimestamps::new()),
            sink,
            scheme: request.scheme(),
            url: request.url().to_string(),
            method: request.method().to_string(),
            param: request.param().to_owned(),
            body: Bytes::new(),
        }
    }

    /// Request extension routing transport callbacks into this scope.
    #[must_use]
    pub fn handle(&self) -> TraceHandle {
        TraceHandle::new(self.timestamps.clone())
    }

    #[must_use]
    pub fn timestamps(&self) -> Arc<TraceTimestamps> {
        self.timestamps.clone()
    }

    /// Echo the response body into the record.
    pub fn set_body(&mut self, body: &Bytes) {
        self.body = body.clone();
    }
}

impl Drop for TraceScope {
    fn drop(&mut self) {
        let record = TimingRecord::from_timeline(
            std::mem::take(&mut self.url),
            std::mem::take(&mut self.method),
            std::mem::take(&mut self.param),
            String::from_utf8_lossy(&self.body).into_owned(),
            self.scheme,
            &self.timestamps.snapshot(),
        );
        self.sink.emit(&record);
    }
}
