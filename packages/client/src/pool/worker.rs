use std::sync::Arc;

use bytes::Bytes;
use futures::future::BoxFuture;
use http_body_util::Full;
use tokio::sync::Semaphore;
use tokio::time::Instant;

use super::transport::{Exchange, Transport};
use super::{Completion, WorkerPool};
use crate::config::{Validator, WorkerConfig};
use crate::error::{self, Result};
use crate::http::HttpResponse;

/// Semaphore-bounded [`WorkerPool`] running each request over a fresh connection.
///
/// A slot is held from admission until the completion has finished reading
/// the body.
pub struct Worker {
    permits: Arc<Semaphore>,
    max_workers: usize,
    transport: Transport,
}

impl Worker {
    /// Pool with `max_workers` slots and default worker settings.
    ///
    /// # Errors
    ///
    /// Returns a builder error if `max_workers` is zero or the TLS
    /// configuration cannot be built.
    pub fn new(max_workers: usize) -> Result<Self> {
        Self::with_config(WorkerConfig::default().with_max_workers(max_workers))
    }

    /// # Errors
    ///
    /// Returns a builder error if `config` fails validation or the TLS
    /// configuration cannot be built.
    pub fn with_config(config: WorkerConfig) -> Result<Self> {
        let tls = crate::connect::default_client_config().map_err(error::configuration)?;
        Self::with_tls_config(config, tls)
    }

    /// Pool trusting the roots of a caller supplied rustls configuration.
    ///
    /// # Errors
    ///
    /// Returns a builder error if `config` fails validation.
    pub fn with_tls_config(config: WorkerConfig, tls: Arc<rustls::ClientConfig>) -> Result<Self> {
        config.validate().map_err(error::configuration)?;
        Ok(Self {
            permits: Arc::new(Semaphore::new(config.max_workers)),
            max_workers: config.max_workers,
            transport: Transport::new(config, tls),
        })
    }

    #[must_use]
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Slots not currently held by a request.
    #[must_use]
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Stop admitting work. Requests already running finish normally.
    pub fn close(&self) {
        self.permits.close();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }
}

impl WorkerPool for Worker {
    fn execute(
        &self,
        request: http::Request<Full<Bytes>>,
        deadline: Instant,
        completion: Completion,
    ) -> BoxFuture<'_, Result<HttpResponse>> {
        Box::pin(async move {
            let _permit = tokio::time::timeout_at(deadline, self.permits.acquire())
                .await
                .map_err(|_| error::timeout())?
                .map_err(error::pool)?;

            tracing::trace!(
                available = self.permits.available_permits(),
                max = self.max_workers,
                "worker slot acquired"
            );

            let exchange = async {
                match self.transport.round_trip(request).await {
                    Ok(Exchange { response, connection }) => {
                        let result = completion(Ok(response)).await;
                        drop(connection);
                        result
                    }
                    Err(e) => completion(Err(e)).await,
                }
            };

            tokio::time::timeout_at(deadline, exchange)
                .await
                .map_err(|_| error::timeout())?
        })
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("max_workers", &self.max_workers)
            .field("available", &self.permits.available_permits())
            .finish_non_exhaustive()
    }
}
