//! Connection establishment failures

use std::io;

/// Why a connection to the target server could not be established.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("DNS resolution failed for {host}: {source}")]
    Dns {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("No addresses resolved for {0}")]
    NoAddresses(String),

    #[error("Failed to connect to any address: {0}")]
    Unreachable(#[source] io::Error),

    #[error("Invalid server name {host}")]
    InvalidServerName {
        host: String,
        #[source]
        source: rustls::pki_types::InvalidDnsNameError,
    },

    #[error("TLS handshake with {host} failed: {source}")]
    Tls {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("TLS configuration error: {0}")]
    TlsConfig(#[from] rustls::Error),
}
