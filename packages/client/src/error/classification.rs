use std::error::Error as StdError;
use std::io;

use super::helpers::TimedOut;
use super::types::{Error, Kind};

impl Error {
    /// Returns true if the error came from building the request.
    #[must_use]
    pub fn is_builder(&self) -> bool {
        self.kind() == Kind::Builder
    }

    /// Returns true if the error is related to a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        if self.kind() == Kind::Timeout {
            return true;
        }

        let mut source = self.source();

        while let Some(err) = source {
            if err.is::<TimedOut>() {
                return true;
            }
            if let Some(hyper_err) = err.downcast_ref::<hyper::Error>() {
                if hyper_err.is_timeout() {
                    return true;
                }
            }
            if let Some(io) = err.downcast_ref::<io::Error>() {
                if io.kind() == io::ErrorKind::TimedOut {
                    return true;
                }
            }
            source = err.source();
        }

        false
    }

    /// Returns true if the error is related to establishing the connection
    #[must_use]
    pub fn is_connect(&self) -> bool {
        self.kind() == Kind::Connect
    }

    /// Returns true if the error is related to the request
    #[must_use]
    pub fn is_request(&self) -> bool {
        self.kind() == Kind::Request
    }

    /// Returns true if the error is related to the response body
    #[must_use]
    pub fn is_body(&self) -> bool {
        self.kind() == Kind::Body
    }

    /// Returns true if the worker pool refused the request
    #[must_use]
    pub fn is_pool(&self) -> bool {
        self.kind() == Kind::Pool
    }
}

#[cfg(test)]
mod tests {
    use super::super::constructors;

    #[test]
    fn timeout_is_classified_as_timeout() {
        let err = constructors::timeout();
        assert!(err.is_timeout());
        assert!(!err.is_builder());
    }

    #[test]
    fn io_timeout_source_counts_as_timeout() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "connect timed out");
        let err = constructors::connect(io);
        assert!(err.is_connect());
        assert!(err.is_timeout());
    }

    #[test]
    fn display_includes_url_and_source() {
        let url = url::Url::parse("ftp://example.com/file").expect("valid url");
        let err = constructors::url_bad_scheme(url);
        let text = err.to_string();
        assert!(text.starts_with("builder error"));
        assert!(text.contains("ftp://example.com/file"));
        assert!(text.contains("not http or https"));
    }
}
