//! One HTTP/1.1 exchange over a freshly established connection

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use http::header::{HeaderValue, HOST, USER_AGENT};
use http::uri::{PathAndQuery, Uri};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use tokio::task::JoinHandle;

use crate::config::WorkerConfig;
use crate::connect::{
    connect_to_address_list, establish_rustls_connection, resolve_host, MaybeTlsStream,
    TracedStream,
};
use crate::error::{self, BadScheme, Result};
use crate::http::Scheme;
use crate::trace::{ConnectionObserver, TraceHandle};

/// Raw response head plus the task driving its connection.
///
/// The connection stays alive while the body is read and is torn down when
/// the exchange is dropped.
pub struct Exchange {
    pub response: http::Response<Incoming>,
    pub connection: ConnectionTask,
}

/// Background task polling a hyper connection; aborted on drop.
pub struct ConnectionTask(JoinHandle<()>);

impl ConnectionTask {
    fn spawn<F>(connection: F) -> Self
    where
        F: Future<Output = hyper::Result<()>> + Send + 'static,
    {
        Self(tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::debug!("connection error: {}", e);
            }
        }))
    }
}

impl Drop for ConnectionTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Dials the request's authority and performs a single round trip.
pub struct Transport {
    config: WorkerConfig,
    tls: Arc<rustls::ClientConfig>,
}

impl Transport {
    #[must_use]
    pub fn new(config: WorkerConfig, tls: Arc<rustls::ClientConfig>) -> Self {
        Self { config, tls }
    }

    /// Connect to the request's authority and send it.
    ///
    /// Lifecycle hooks fire on the [`TraceHandle`] in the request
    /// extensions, if there is one.
    ///
    /// # Errors
    ///
    /// `Connect` for DNS, TCP or TLS failures, `Request` for HTTP protocol
    /// failures and `Builder` for a URI without a supported scheme or host.
    pub async fn round_trip(&self, mut request: http::Request<Full<Bytes>>) -> Result<Exchange> {
        let trace = request.extensions().get::<TraceHandle>().cloned();
        let observer: Option<&dyn ConnectionObserver> = trace.as_ref().map(TraceHandle::observer);

        let uri = request.uri().clone();
        let scheme = match uri.scheme_str() {
            Some("http") => Scheme::Http,
            Some("https") => Scheme::Https,
            _ => return Err(error::builder(BadScheme)),
        };
        let host = uri
            .host()
            .map(|h| h.trim_start_matches('[').trim_end_matches(']'))
            .filter(|h| !h.is_empty())
            .ok_or_else(error::missing_host)?;
        let port = uri.port_u16().unwrap_or_else(|| scheme.default_port());

        let addrs = resolve_host(host, port, observer).await.map_err(error::connect)?;
        let tcp = connect_to_address_list(
            &addrs,
            self.config.connect_timeout,
            self.config.tcp_nodelay,
            observer,
        )
        .await
        .map_err(error::connect)?;

        let stream = match scheme {
            Scheme::Http => MaybeTlsStream::Plain(tcp),
            Scheme::Https => {
                let tls = establish_rustls_connection(tcp, host, self.tls.clone())
                    .await
                    .map_err(error::connect)?;
                MaybeTlsStream::Tls(Box::new(tls))
            }
        };

        let io = TokioIo::new(TracedStream::new(stream, trace.clone()));
        let mut builder = http1::Builder::new();
        builder.title_case_headers(true);
        let (mut sender, connection) = builder
            .handshake::<_, Full<Bytes>>(io)
            .await
            .map_err(error::request)?;
        let connection = ConnectionTask::spawn(connection);

        sender.ready().await.map_err(error::request)?;
        if let Some(observer) = observer {
            observer.got_conn();
        }

        self.prepare(&mut request, &uri)?;
        let response = sender.send_request(request).await.map_err(error::request)?;

        Ok(Exchange {
            response,
            connection,
        })
    }

    fn prepare(&self, request: &mut http::Request<Full<Bytes>>, uri: &Uri) -> Result<()> {
        let headers = request.headers_mut();
        if !headers.contains_key(HOST) {
            if let Some(authority) = uri.authority() {
                let host_port = authority
                    .as_str()
                    .rsplit('@')
                    .next()
                    .unwrap_or(authority.as_str());
                let value = HeaderValue::from_str(host_port).map_err(error::invalid_header)?;
                headers.insert(HOST, value);
            }
        }
        if !headers.contains_key(USER_AGENT) && !self.config.user_agent.is_empty() {
            let value =
                HeaderValue::from_str(&self.config.user_agent).map_err(error::invalid_header)?;
            headers.insert(USER_AGENT, value);
        }

        let target = uri
            .path_and_query()
            .cloned()
            .unwrap_or_else(|| PathAndQuery::from_static("/"));
        *request.uri_mut() = Uri::from(target);
        Ok(())
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
