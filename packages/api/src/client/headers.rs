//! Shared header and host configuration

use hashbrown::HashMap;

use crate::client::core::Client;

impl Client {
    /// Store a header sent with every subsequent request.
    ///
    /// The name is canonicalized (`x-request-ID` becomes `X-Request-Id`) and
    /// a second write to the same canonical name replaces the first.
    ///
    /// # Examples
    /// ```no_run
    /// # use std::sync::Arc;
    /// # use std::time::Duration;
    /// # use greq::{Client, Worker};
    /// # fn main() -> greq::Result<()> {
    /// let client = Client::new(Arc::new(Worker::new(4)?), Duration::from_secs(5), false);
    /// client
    ///     .set_header("accept", "text/plain")
    ///     .set_header("x-trace-id", "abc123");
    /// # Ok(())
    /// # }
    /// ```
    pub fn set_header(&self, name: &str, value: &str) -> &Self {
        self.defaults.set_header(name, value);
        self
    }

    /// Override the `Host` header. The connection still targets the URL's
    /// authority. An empty host removes the override.
    pub fn set_host(&self, host: &str) -> &Self {
        self.defaults.set_host(host);
        self
    }

    /// Snapshot of the stored headers, keyed by canonical name.
    #[must_use]
    pub fn headers(&self) -> HashMap<String, String> {
        self.defaults.snapshot().headers
    }

    #[must_use]
    pub fn host(&self) -> Option<String> {
        self.defaults.host()
    }
}
