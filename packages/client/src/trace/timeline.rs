//! Per-request timestamp capture

use std::io;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::observer::ConnectionObserver;

/// The six instants captured during one request. Unfired events stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeline {
    /// t0: name resolution started
    pub trace_start: Option<Instant>,
    /// t1: name resolution finished, or the first connect attempt for IP hosts
    pub dns_done: Option<Instant>,
    /// t2: TCP connect finished
    pub connect_done: Option<Instant>,
    /// t3: connection ready to send
    pub conn_acquired: Option<Instant>,
    /// t4: first response byte
    pub first_byte: Option<Instant>,
    /// t5: response body fully read
    pub stream_end: Option<Instant>,
}

impl Timeline {
    /// `later - earlier`, zero when either instant is missing or out of order.
    #[must_use]
    pub fn span(earlier: Option<Instant>, later: Option<Instant>) -> Duration {
        match (earlier, later) {
            (Some(earlier), Some(later)) => later.saturating_duration_since(earlier),
            _ => Duration::ZERO,
        }
    }
}

/// Thread-safe [`ConnectionObserver`] recording a [`Timeline`].
#[derive(Debug, Default)]
pub struct TraceTimestamps {
    timeline: Mutex<Timeline>,
}

impl TraceTimestamps {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record t5 once the body read has finished.
    ///
    /// When no resolution phase was observed t0 falls back to t1 so the
    /// cumulative durations start at the first connect attempt.
    pub fn stream_end(&self) {
        let mut timeline = self.timeline.lock();
        timeline.stream_end = Some(Instant::now());
        if timeline.trace_start.is_none() {
            timeline.trace_start = timeline.dns_done;
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Timeline {
        *self.timeline.lock()
    }
}

impl ConnectionObserver for TraceTimestamps {
    fn dns_start(&self, _host: &str) {
        self.timeline.lock().trace_start = Some(Instant::now());
    }

    fn dns_done(&self, _addrs: &[SocketAddr]) {
        self.timeline.lock().dns_done = Some(Instant::now());
    }

    fn connect_start(&self, _addr: SocketAddr) {
        let mut timeline = self.timeline.lock();
        if timeline.dns_done.is_none() {
            // connecting to an IP literal
            timeline.dns_done = Some(Instant::now());
        }
    }

    fn connect_done(&self, _addr: SocketAddr, _error: Option<&io::Error>) {
        self.timeline.lock().connect_done = Some(Instant::now());
    }

    fn got_conn(&self) {
        self.timeline.lock().conn_acquired = Some(Instant::now());
    }

    fn first_response_byte(&self) {
        let mut timeline = self.timeline.lock();
        if timeline.first_byte.is_none() {
            timeline.first_byte = Some(Instant::now());
        }
    }
}
