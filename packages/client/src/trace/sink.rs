//! Destinations for timing records

use std::borrow::Cow;

use super::record::{format_duration, TimingRecord};

/// Receives one [`TimingRecord`] per instrumented request.
///
/// Emission happens on the request path, so implementations should be quick
/// and must not panic.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, record: &TimingRecord);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&TimingRecord) + Send + Sync,
{
    fn emit(&self, record: &TimingRecord) {
        self(record);
    }
}

/// Emits records as `tracing` DEBUG events named `http trace`.
#[derive(Debug, Clone)]
pub struct TracingSink {
    name: Cow<'static, str>,
    ip: Option<String>,
}

impl Default for TracingSink {
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("greq"),
            ip: None,
        }
    }
}

impl TracingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the `name` field attached to every event
    #[must_use]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Tag every event with the address of the emitting host
    #[must_use]
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }
}

impl DiagnosticSink for TracingSink {
    fn emit(&self, record: &TimingRecord) {
        tracing::debug!(
            name = %self.name,
            ip = self.ip.as_deref().unwrap_or_default(),
            url = %record.url,
            method = %record.method,
            param = %record.param,
            body = %record.body,
            dns_lookup = %format_duration(record.dns_lookup),
            tcp_connection = %format_duration(record.tcp_connection),
            tls_handshake = %format_duration(record.tls_handshake),
            server_processing = %format_duration(record.server_processing),
            content_transfer = %format_duration(record.content_transfer),
            name_lookup = %format_duration(record.name_lookup),
            connect = %format_duration(record.connect),
            pre_transfer = %format_duration(record.pre_transfer),
            start_transfer = %format_duration(record.start_transfer),
            total = %format_duration(record.total),
            "http trace"
        );
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn emit(&self, _record: &TimingRecord) {}
}
