//! Outbound request construction
//!
//! A request is built fresh for every call from a method, a URL and an
//! optional parameter set. GET carries the parameters in the query string,
//! every other method carries them URL-encoded in the body.

use bytes::Bytes;
use http::{Method, Request};
use http_body_util::Full;
use url::Url;

use super::params::Params;
use crate::error::{self, Result};

/// Content type set on PUT/POST/DELETE unless the caller chose one.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// URL scheme of an outbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    #[must_use]
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

/// A request ready to be handed to the executor.
#[derive(Debug)]
pub struct OutboundRequest {
    url: Url,
    scheme: Scheme,
    param: String,
    inner: Request<Full<Bytes>>,
}

impl OutboundRequest {
    /// Build a request for `method` against `url`.
    ///
    /// # Errors
    ///
    /// Returns a builder error for a malformed URL, a scheme other than
    /// `http`/`https`, or parameters that cannot be encoded.
    pub fn new(method: Method, url: &str, params: Option<&Params>) -> Result<Self> {
        let mut url = Url::parse(url).map_err(error::url_parse_error)?;
        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            _ => return Err(error::url_bad_scheme(url)),
        };

        let param = match params {
            Some(params) => params.encode()?,
            None => String::new(),
        };

        let body = if method == Method::GET {
            if !param.is_empty() {
                let query = match url.query() {
                    Some(existing) if !existing.is_empty() => format!("{existing}&{param}"),
                    _ => param.clone(),
                };
                url.set_query(Some(&query));
            }
            Bytes::new()
        } else {
            Bytes::from(param.clone())
        };

        let inner = Request::builder()
            .method(method)
            .uri(url.as_str())
            .body(Full::new(body))
            .map_err(|e| error::builder(e).with_url(url.clone()))?;

        Ok(Self {
            url,
            scheme,
            param,
            inner,
        })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    #[must_use]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The URL-encoded parameter string, echoed into timing records.
    #[must_use]
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Whether the method carries its parameters as a form body.
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        matches!(
            *self.inner.method(),
            Method::PUT | Method::POST | Method::DELETE
        )
    }

    #[must_use]
    pub fn headers(&self) -> &http::HeaderMap {
        self.inner.headers()
    }

    pub fn headers_mut(&mut self) -> &mut http::HeaderMap {
        self.inner.headers_mut()
    }

    pub fn extensions_mut(&mut self) -> &mut http::Extensions {
        self.inner.extensions_mut()
    }

    #[must_use]
    pub fn into_inner(self) -> Request<Full<Bytes>> {
        self.inner
    }
}
