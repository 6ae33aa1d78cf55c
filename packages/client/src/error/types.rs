use std::error::Error as StdError;
use std::fmt;

/// A Result alias where the Err case is `greq_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur while building or executing a request.
pub struct Error {
    inner: Box<Inner>,
}

struct Inner {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync>>,
    url: Option<url::Url>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Malformed URL, unsupported scheme, invalid header or parameter encoding
    Builder,
    /// The per-request deadline elapsed
    Timeout,
    /// DNS resolution, TCP connect or TLS handshake failure
    Connect,
    /// HTTP protocol failure while sending the request or receiving headers
    Request,
    /// Failure while draining the response body
    Body,
    /// The worker pool refused the submission
    Pool,
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner {
                kind,
                source: None,
                url: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: url::Url) -> Self {
        self.inner.url = Some(url);
        self
    }

    /// The category this error belongs to.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// Get the URL associated with this error, if any
    #[must_use]
    pub fn url(&self) -> Option<&url::Url> {
        self.inner.url.as_ref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("greq::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref url) = self.inner.url {
            f.field("url", url);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.kind {
            Kind::Builder => f.write_str("builder error")?,
            Kind::Timeout => f.write_str("request timeout")?,
            Kind::Connect => f.write_str("error connecting to server")?,
            Kind::Request => f.write_str("error sending request")?,
            Kind::Body => f.write_str("error reading response body")?,
            Kind::Pool => f.write_str("worker pool unavailable")?,
        }

        if let Some(ref url) = self.inner.url {
            write!(f, " for url ({url})")?;
        }

        if let Some(ref source) = self.inner.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
