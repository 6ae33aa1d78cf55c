use std::fmt;

/// A marker type to indicate that a request ran past its deadline.
#[derive(Debug)]
pub struct TimedOut;

impl fmt::Display for TimedOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("deadline elapsed")
    }
}

impl std::error::Error for TimedOut {}

/// A marker type to indicate that a URI scheme was bad.
#[derive(Debug)]
pub struct BadScheme;

impl fmt::Display for BadScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("URL scheme is not http or https")
    }
}

impl std::error::Error for BadScheme {}

/// A marker type to indicate that a URL carried no host.
#[derive(Debug)]
pub struct MissingHost;

impl fmt::Display for MissingHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("URL has no host")
    }
}

impl std::error::Error for MissingHost {}
