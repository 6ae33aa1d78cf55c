//! The `Client` facade
//!
//! Chainable header, host and basic-auth configuration shared by every
//! request, plus the four verb entry points.

pub mod auth;
pub mod core;
pub mod headers;
pub mod methods;

pub use self::core::{Client, ClientBuilder};
