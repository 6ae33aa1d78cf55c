//! Basic authentication

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::header::AUTHORIZATION;

use crate::client::core::Client;

impl Client {
    /// Send `Authorization: Basic <base64(username:password)>` with every
    /// subsequent request, replacing any earlier credentials.
    pub fn set_basic_auth(&self, username: &str, password: &str) -> &Self {
        let encoded = STANDARD.encode(format!("{username}:{password}"));
        self.defaults
            .set_header(AUTHORIZATION.as_str(), format!("Basic {encoded}"));
        self
    }
}
