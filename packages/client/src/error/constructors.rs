use super::helpers::{BadScheme, MissingHost, TimedOut};
use super::types::{Error, Kind};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Creates an `Error` for a builder error.
pub fn builder<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

/// Creates an `Error` for a request error.
pub fn request<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Request).with(e.into())
}

/// Creates an `Error` for a body error.
pub fn body<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Body).with(e.into())
}

/// Creates an `Error` for connection establishment failures.
pub fn connect<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Connect).with(e.into())
}

/// Creates an `Error` for a pool that cannot accept work.
pub fn pool<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Pool).with(e.into())
}

/// Creates an `Error` for an elapsed deadline.
pub fn timeout() -> Error {
    Error::new(Kind::Timeout).with(TimedOut)
}

pub fn invalid_header<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

pub fn url_parse_error<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

pub fn url_bad_scheme(url: url::Url) -> Error {
    Error::new(Kind::Builder).with(BadScheme).with_url(url)
}

pub fn missing_host() -> Error {
    Error::new(Kind::Builder).with(MissingHost)
}

pub fn configuration<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}
