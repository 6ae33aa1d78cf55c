//! Observer interface fired by the transport at connection phase boundaries

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

/// Hooks invoked by the transport while executing one request.
///
/// Every hook has a no-op default so observers only implement the phases
/// they care about. Hooks may fire from the connection task, so
/// implementations must be thread-safe.
pub trait ConnectionObserver: Send + Sync {
    /// Name resolution is about to start. Not fired for IP literal hosts.
    fn dns_start(&self, _host: &str) {}

    /// Name resolution finished, successfully or not.
    fn dns_done(&self, _addrs: &[SocketAddr]) {}

    /// A TCP connect attempt to `addr` is starting.
    fn connect_start(&self, _addr: SocketAddr) {}

    /// A TCP connect attempt finished; `error` is set when it failed.
    fn connect_done(&self, _addr: SocketAddr, _error: Option<&io::Error>) {}

    /// The connection, TLS included, is ready to carry the request.
    fn got_conn(&self) {}

    /// The first byte of the response arrived.
    fn first_response_byte(&self) {}
}

/// Request extension carrying the observer for that request.
#[derive(Clone)]
pub struct TraceHandle(Arc<dyn ConnectionObserver>);

impl TraceHandle {
    pub fn new(observer: Arc<dyn ConnectionObserver>) -> Self {
        Self(observer)
    }

    #[must_use]
    pub fn observer(&self) -> &dyn ConnectionObserver {
        &*self.0
    }
}

impl std::fmt::Debug for TraceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TraceHandle")
    }
}
