//! TLS connection establishment using rustls

use std::sync::Arc;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::TlsConnector;

use crate::connect::error::ConnectError;

/// Client configuration trusting the bundled webpki roots.
///
/// # Errors
///
/// Returns `ConnectError::TlsConfig` if the crypto provider rejects the
/// default protocol versions.
pub fn default_client_config() -> Result<Arc<ClientConfig>, ConnectError> {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    client_config_with_roots(roots)
}

/// Client configuration trusting exactly `roots`, offering HTTP/1.1 over ALPN.
///
/// # Errors
///
/// Returns `ConnectError::TlsConfig` if the crypto provider rejects the
/// default protocol versions.
pub fn client_config_with_roots(roots: RootCertStore) -> Result<Arc<ClientConfig>, ConnectError> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let mut config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_root_certificates(roots)
        .with_no_client_auth();
    config.alpn_protocols = vec![b"http/1.1".to_vec()];
    Ok(Arc::new(config))
}

/// Establish TLS connection using rustls.
///
/// Performs the handshake over an existing TCP stream, verifying the
/// server certificate against `host`.
///
/// # Errors
///
/// Returns `ConnectError::InvalidServerName` for a host rustls cannot
/// verify against and `ConnectError::Tls` if the handshake fails.
pub async fn establish_rustls_connection(
    stream: TcpStream,
    host: &str,
    config: Arc<ClientConfig>,
) -> Result<TlsStream<TcpStream>, ConnectError> {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    let server_name =
        ServerName::try_from(host.to_string()).map_err(|source| ConnectError::InvalidServerName {
            host: host.to_string(),
            source,
        })?;

    TlsConnector::from(config)
        .connect(server_name, stream)
        .await
        .map_err(|source| ConnectError::Tls {
            host: host.to_string(),
            source,
        })
}
