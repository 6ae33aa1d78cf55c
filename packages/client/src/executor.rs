//! Request execution with optional lifecycle tracing
//!
//! [`RequestExecutor::resolve`] applies the client's shared defaults, attaches
//! a trace scope when instrumentation is on, dispatches through the worker
//! pool under a deadline and buffers the response body.

use std::sync::Arc;
use std::time::Duration;

use http::header::{HeaderValue, CONTENT_TYPE};
use http_body_util::BodyExt;
use tokio::time::Instant;

use crate::config::{HttpConfig, SharedDefaults};
use crate::error::{self, Result};
use crate::http::{HttpResponse, OutboundRequest, FORM_CONTENT_TYPE};
use crate::pool::{Completion, WorkerPool};
use crate::trace::{DiagnosticSink, TraceScope, TraceTimestamps};

pub struct RequestExecutor {
    pool: Arc<dyn WorkerPool>,
    defaults: Arc<SharedDefaults>,
    config: HttpConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl RequestExecutor {
    #[must_use]
    pub fn new(
        pool: Arc<dyn WorkerPool>,
        defaults: Arc<SharedDefaults>,
        config: HttpConfig,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            pool,
            defaults,
            config,
            sink,
        }
    }

    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    #[must_use]
    pub fn defaults(&self) -> &Arc<SharedDefaults> {
        &self.defaults
    }

    /// Execute a request built by the caller.
    ///
    /// A construction error is returned as is, without dispatch and without a
    /// timing record. With instrumentation on, every other outcome emits
    /// exactly one record.
    ///
    /// # Errors
    ///
    /// Builder errors from construction or invalid stored headers, `Timeout`
    /// when the deadline passes, and transport or body errors from the pool.
    pub async fn resolve(&self, request: Result<OutboundRequest>) -> Result<HttpResponse> {
        let mut request = request?;
        self.defaults.apply(request.headers_mut())?;

        if request.is_mutating() && !request.headers().contains_key(CONTENT_TYPE) {
            request
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        }

        let mut scope = self
            .config
            .trace
            .then(|| TraceScope::open(&request, self.sink.clone()));
        if let Some(scope) = &scope {
            request.extensions_mut().insert(scope.handle());
        }

        let url = request.url().clone();
        tracing::trace!(method = %request.method(), url = %url, "dispatching request");

        let completion = read_body(scope.as_ref().map(TraceScope::timestamps));
        let deadline = deadline_after(self.config.timeout);

        let result = tokio::time::timeout_at(
            deadline,
            self.pool.execute(request.into_inner(), deadline, completion),
        )
        .await
        .unwrap_or_else(|_| Err(error::timeout()));

        match result {
            Ok(response) => {
                if let Some(scope) = scope.as_mut() {
                    scope.set_body(response.body());
                }
                Ok(response)
            }
            Err(e) => Err(e.with_url(url)),
        }
    }
}

/// Deadlines past what `Instant` can represent are pinned to a far-future instant.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

fn deadline_after(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout).unwrap_or_else(|| now + FAR_FUTURE)
}

/// Completion that buffers the body and marks the end of the stream.
fn read_body(timestamps: Option<Arc<TraceTimestamps>>) -> Completion {
    Box::new(move |response| {
        Box::pin(async move {
            let response = response?;
            let status = response.status();
            let collected = response.into_body().collect().await;
            if let Some(timestamps) = &timestamps {
                timestamps.stream_end();
            }
            let body = collected.map_err(error::body)?.to_bytes();
            Ok(HttpResponse::new(status, body))
        })
    })
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
