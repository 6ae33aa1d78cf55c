//! Fully buffered HTTP response

use bytes::Bytes;
use http::StatusCode;

/// Status and complete body of a finished exchange.
///
/// Non-success statuses are ordinary responses; only transport, timeout
/// and body-read failures are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status: StatusCode,
    body: Bytes,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: StatusCode, body: Bytes) -> Self {
        Self { status, body }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Body decoded as UTF-8, invalid sequences replaced.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
