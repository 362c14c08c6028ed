// ABOUTME: Platform connection error types with SNAFU pattern.
// ABOUTME: Covers endpoint parsing and scheme support for programmatic handling.

use snafu::Snafu;

/// Errors raised while constructing a platform client.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PlatformError {
    #[snafu(display("invalid api endpoint '{endpoint}': {reason}"))]
    Endpoint { endpoint: String, reason: String },

    #[snafu(display("unsupported api scheme '{scheme}': point at an http endpoint or gateway"))]
    UnsupportedScheme { scheme: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformErrorKind {
    /// The endpoint string could not be parsed into host and port.
    InvalidEndpoint,
    /// The endpoint scheme is not one the client can speak.
    UnsupportedScheme,
}

impl PlatformError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> PlatformErrorKind {
        match self {
            PlatformError::Endpoint { .. } => PlatformErrorKind::InvalidEndpoint,
            PlatformError::UnsupportedScheme { .. } => PlatformErrorKind::UnsupportedScheme,
        }
    }
}
