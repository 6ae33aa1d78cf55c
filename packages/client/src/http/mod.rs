//! Outbound request construction and buffered responses

pub mod params;
pub mod request;
pub mod response;

pub use params::Params;
pub use request::{OutboundRequest, Scheme, FORM_CONTENT_TYPE};
pub use response::HttpResponse;
