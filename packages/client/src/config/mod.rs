//! Client, worker and shared request configuration
//!
//! `HttpConfig` governs the executor (deadline, instrumentation), `WorkerConfig`
//! the bundled worker pool, and `SharedDefaults` the per-client header/host map
//! that every dispatched request reads.

pub mod core;
pub mod shared;
pub mod timeouts;
pub mod validation;

pub use self::core::{HttpConfig, WorkerConfig, DEFAULT_MAX_WORKERS, DEFAULT_TIMEOUT};
pub use self::shared::{canonical_header_name, RequestDefaults, SharedDefaults};
pub use self::validation::{ConfigResult, ConfigurationError, Validator, MAX_TIMEOUT};
