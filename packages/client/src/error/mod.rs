pub mod classification;
pub mod constructors;
pub mod helpers;
pub mod types;

pub use constructors::*;
pub use helpers::{BadScheme, MissingHost, TimedOut};
pub use types::{Error, Kind, Result};

pub type HttpError = Error;
