//! Connection establishment with lifecycle hooks
//!
//! Name resolution, TCP connect and the rustls handshake each report their
//! phase boundaries to the request's [`ConnectionObserver`](crate::trace::ConnectionObserver).

pub mod error;
pub mod stream;
pub mod tcp;

pub use error::ConnectError;
pub use stream::{MaybeTlsStream, TracedStream};
pub use tcp::{
    client_config_with_roots, connect_to_address_list, default_client_config,
    establish_rustls_connection, resolve_host,
};
