//! Connection-lifecycle tracing
//!
//! The transport reports phase boundaries to a [`ConnectionObserver`] found in
//! the request extensions. [`TraceTimestamps`] turns those callbacks into a
//! [`Timeline`], a [`TraceScope`] finalizes it into exactly one
//! [`TimingRecord`] and hands it to a [`DiagnosticSink`].

pub mod observer;
pub mod record;
pub mod scope;
pub mod sink;
pub mod timeline;

pub use observer::{ConnectionObserver, TraceHandle};
pub use record::TimingRecord;
pub use scope::TraceScope;
pub use sink::{DiagnosticSink, NoopSink, TracingSink};
pub use timeline::{Timeline, TraceTimestamps};
