//! DNS resolution for TCP connections
//!
//! IP literals take a fast path that skips the resolver entirely, so no
//! resolution hooks fire for them.

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::connect::error::ConnectError;
use crate::trace::ConnectionObserver;

/// Resolve `host` to socket addresses on `port`.
///
/// # Errors
///
/// Returns `ConnectError::Dns` when the resolver fails and
/// `ConnectError::NoAddresses` when it succeeds with an empty answer.
///
/// # Examples
/// ```no_run
/// # async fn run() -> Result<(), greq_client::connect::ConnectError> {
/// use greq_client::connect::resolve_host;
///
/// let addrs = resolve_host("127.0.0.1", 8080, None).await?;
/// assert_eq!(addrs.len(), 1);
/// # Ok(())
/// # }
/// ```
pub async fn resolve_host(
    host: &str,
    port: u16,
    observer: Option<&dyn ConnectionObserver>,
) -> Result<Vec<SocketAddr>, ConnectError> {
    let host = host.trim_start_matches('[').trim_end_matches(']');

    if let Ok(ip) = IpAddr::from_str(host) {
        return Ok(vec![SocketAddr::new(ip, port)]);
    }

    if let Some(observer) = observer {
        observer.dns_start(host);
    }

    let resolved = tokio::net::lookup_host((host, port)).await;
    let addrs: Vec<SocketAddr> = match resolved {
        Ok(addrs) => addrs.collect(),
        Err(source) => {
            if let Some(observer) = observer {
                observer.dns_done(&[]);
            }
            return Err(ConnectError::Dns {
                host: host.to_string(),
                source,
            });
        }
    };

    if let Some(observer) = observer {
        observer.dns_done(&addrs);
    }

    if addrs.is_empty() {
        Err(ConnectError::NoAddresses(host.to_string()))
    } else {
        Ok(addrs)
    }
}
