//! Timing record derived from a request timeline

use std::time::Duration;

use serde::Serialize;

use super::timeline::Timeline;
use crate::http::Scheme;

/// Latency breakdown of one request.
///
/// Phase durations (`dns_lookup` … `content_transfer`) cover consecutive
/// segments of the timeline; cumulative durations (`name_lookup` … `total`)
/// are measured from t0. Plain HTTP has no handshake phase, so its TLS
/// time is folded into `tcp_connection` and `tls_handshake` stays zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimingRecord {
    pub url: String,
    pub method: String,
    pub body: String,
    pub param: String,
    #[serde(serialize_with = "human")]
    pub dns_lookup: Duration,
    #[serde(serialize_with = "human")]
    pub tcp_connection: Duration,
    #[serde(serialize_with = "human")]
    pub tls_handshake: Duration,
    #[serde(serialize_with = "human")]
    pub server_processing: Duration,
    #[serde(serialize_with = "human")]
    pub content_transfer: Duration,
    #[serde(serialize_with = "human")]
    pub name_lookup: Duration,
    #[serde(serialize_with = "human")]
    pub connect: Duration,
    #[serde(serialize_with = "human")]
    pub pre_transfer: Duration,
    #[serde(serialize_with = "human")]
    pub start_transfer: Duration,
    #[serde(serialize_with = "human")]
    pub total: Duration,
}

impl TimingRecord {
    /// Derive the durations of a finished request from its timeline.
    #[must_use]
    pub fn from_timeline(
        url: String,
        method: String,
        param: String,
        body: String,
        scheme: Scheme,
        timeline: &Timeline,
    ) -> Self {
        let span = Timeline::span;
        let Timeline {
            trace_start: t0,
            dns_done: t1,
            connect_done: t2,
            conn_acquired: t3,
            first_byte: t4,
            stream_end: t5,
        } = *timeline;

        let (tcp_connection, tls_handshake, connect) = match scheme {
            Scheme::Https => (span(t1, t2), span(t2, t3), span(t0, t2)),
            Scheme::Http => (span(t1, t3), Duration::ZERO, span(t0, t3)),
        };

        Self {
            url,
            method,
            body,
            param,
            dns_lookup: span(t0, t1),
            tcp_connection,
            tls_handshake,
            server_processing: span(t3, t4),
            content_transfer: span(t4, t5),
            name_lookup: span(t0, t1),
            connect,
            pre_transfer: span(t0, t3),
            start_transfer: span(t0, t4),
            total: span(t0, t5),
        }
    }

    /// Duration fields with their record names, in emission order.
    #[must_use]
    pub fn durations(&self) -> [(&'static str, Duration); 10] {
        [
            ("dns_lookup", self.dns_lookup),
            ("tcp_connection", self.tcp_connection),
            ("tls_handshake", self.tls_handshake),
            ("server_processing", self.server_processing),
            ("content_transfer", self.content_transfer),
            ("name_lookup", self.name_lookup),
            ("connect", self.connect),
            ("pre_transfer", self.pre_transfer),
            ("start_transfer", self.start_transfer),
            ("total", self.total),
        ]
    }
}

/// Human-readable rendering used for emitted durations, e.g. `1.503ms`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    format!("{duration:?}")
}

fn human<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("{duration:?}"))
}
