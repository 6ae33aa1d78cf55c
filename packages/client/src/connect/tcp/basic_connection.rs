//! Basic TCP connection establishment
//!
//! Tries each resolved address in order with optional per-attempt timeout.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpStream;

use crate::connect::error::ConnectError;
use crate::trace::ConnectionObserver;

/// Connect to first available address with timeout support.
///
/// # Errors
///
/// Returns `ConnectError::Unreachable` carrying the last attempt's error
/// when no address accepts the connection.
pub async fn connect_to_address_list(
    addrs: &[SocketAddr],
    timeout: Option<Duration>,
    nodelay: bool,
    observer: Option<&dyn ConnectionObserver>,
) -> Result<TcpStream, ConnectError> {
    let mut last_error = None;

    for &addr in addrs {
        if let Some(observer) = observer {
            observer.connect_start(addr);
        }

        let attempt = match timeout {
            Some(t) => match tokio::time::timeout(t, TcpStream::connect(addr)).await {
                Ok(result) => result,
                Err(_) => Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("connect to {addr} timed out after {t:?}"),
                )),
            },
            None => TcpStream::connect(addr).await,
        };

        if let Some(observer) = observer {
            observer.connect_done(addr, attempt.as_ref().err());
        }

        match attempt {
            Ok(stream) => {
                if nodelay {
                    if let Err(e) = stream.set_nodelay(true) {
                        tracing::debug!("Failed to set TCP_NODELAY on {}: {}", addr, e);
                    }
                }
                return Ok(stream);
            }
            Err(e) => {
                // Log error and continue to next address
                tracing::debug!("Failed to connect to {}: {}", addr, e);
                last_error = Some(e);
            }
        }
    }

    Err(ConnectError::Unreachable(last_error.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "No addresses to connect to")
    })))
}
