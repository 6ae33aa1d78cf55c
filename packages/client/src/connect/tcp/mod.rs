//! TCP connection utilities
//!
//! DNS resolution, sequential connect over the resolved address list and
//! rustls session establishment.

pub mod basic_connection;
pub mod dns;
pub mod tls;

pub use basic_connection::connect_to_address_list;
pub use dns::resolve_host;
pub use tls::{client_config_with_roots, default_client_config, establish_rustls_connection};
