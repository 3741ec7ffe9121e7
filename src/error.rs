//! Unified error type.

use std::fmt;

/// The error type returned by tollgate's fallible operations.
///
/// Request-level outcomes (401, 404, 405) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// startup failures: reading configuration or binding the listening socket.
#[derive(Debug)]
pub enum Error {
    /// The listener could not be bound or stopped accepting.
    Io(std::io::Error),
    /// The process environment holds an invalid configuration value.
    Config(envy::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<envy::Error> for Error {
    fn from(e: envy::Error) -> Self {
        Self::Config(e)
    }
}
