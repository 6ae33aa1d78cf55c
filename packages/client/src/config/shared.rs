//! Per-client request defaults shared by every dispatched request
//!
//! Setters take the write lock, dispatch takes the read lock. The lock only
//! ever guards the in-memory map: nothing here performs I/O.

use hashbrown::HashMap;
use http::header::{AUTHORIZATION, HOST};
use http::{HeaderMap, HeaderName, HeaderValue};
use parking_lot::RwLock;

use crate::error::{self, Result};

/// Header and host values applied to each outgoing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDefaults {
    /// Canonical header name to value, last write wins
    pub headers: HashMap<String, String>,
    /// `Host` override; the connection still targets the URL's authority
    pub host: Option<String>,
}

/// Reader/writer guarded [`RequestDefaults`].
#[derive(Debug, Default)]
pub struct SharedDefaults {
    inner: RwLock<RequestDefaults>,
}

impl SharedDefaults {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under the canonical form of `name`, replacing any previous value.
    pub fn set_header(&self, name: &str, value: impl Into<String>) {
        let name = canonical_header_name(name);
        let value = value.into();
        self.inner.write().headers.insert(name, value);
    }

    /// Set the `Host` override. An empty host clears it.
    pub fn set_host(&self, host: impl Into<String>) {
        let host = host.into();
        self.inner.write().host = if host.is_empty() { None } else { Some(host) };
    }

    /// Copy of the current defaults.
    #[must_use]
    pub fn snapshot(&self) -> RequestDefaults {
        self.inner.read().clone()
    }

    #[must_use]
    pub fn host(&self) -> Option<String> {
        self.inner.read().host.clone()
    }

    /// Write the stored headers and host override into `headers`.
    ///
    /// # Errors
    ///
    /// Returns a builder error when a stored name or value is not a legal
    /// HTTP header; nothing is dispatched in that case.
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        let defaults = self.inner.read();

        for (name, value) in &defaults.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(error::invalid_header)?;
            let mut header_value = HeaderValue::from_str(value).map_err(error::invalid_header)?;
            if header_name == AUTHORIZATION {
                header_value.set_sensitive(true);
            }
            headers.insert(header_name, header_value);
        }

        if let Some(host) = defaults.host.as_deref() {
            let value = HeaderValue::from_str(host).map_err(error::invalid_header)?;
            headers.insert(HOST, value);
        }

        Ok(())
    }
}

/// Canonical HTTP header casing: the first letter of every `-` separated
/// word upper-case, everything else lower-case.
///
/// ```
/// use greq_client::config::canonical_header_name;
///
/// assert_eq!(canonical_header_name("x-reQUEST-id"), "X-Request-Id");
/// assert_eq!(canonical_header_name("content-type"), "Content-Type");
/// ```
#[must_use]
pub fn canonical_header_name(name: &str) -> String {
    let mut canonical = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.trim().chars() {
        if upper {
            canonical.extend(c.to_uppercase());
        } else {
            canonical.extend(c.to_lowercase());
        }
        upper = c == '-';
    }
    canonical
}
