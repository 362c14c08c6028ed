// ABOUTME: Validated route hostname type.
// ABOUTME: Hostnames are single DNS labels under the platform's shared domain.

use super::app_name::{AppName, MAX_APP_NAME_LEN};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostNameError {
    #[error("route hostname cannot be empty")]
    Empty,

    #[error("route hostname exceeds maximum length of {MAX_APP_NAME_LEN} characters")]
    TooLong,

    #[error("route hostname cannot start or end with a hyphen")]
    EdgeHyphen,

    #[error("invalid character in route hostname: '{0}'")]
    InvalidChar(char),
}

/// The hostname an application answers on, a single DNS label.
///
/// Shares the app-name length cap so the derived `-green` host is always a
/// valid label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostName(String);

impl HostName {
    pub fn new(value: &str) -> Result<Self, HostNameError> {
        if value.is_empty() {
            return Err(HostNameError::Empty);
        }

        if value.len() > MAX_APP_NAME_LEN {
            return Err(HostNameError::TooLong);
        }

        if value.starts_with('-') || value.ends_with('-') {
            return Err(HostNameError::EdgeHyphen);
        }

        for c in value.chars() {
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
                return Err(HostNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append a deployment suffix. Infallible for the same reason as
    /// `AppName::with_suffix`.
    pub(crate) fn with_suffix(&self, suffix: &str) -> HostName {
        HostName(format!("{}-{}", self.0, suffix))
    }
}

impl From<&AppName> for HostName {
    /// An app name is always a valid hostname: the character sets and length
    /// caps are identical.
    fn from(name: &AppName) -> Self {
        HostName(name.as_str().to_string())
    }
}

impl fmt::Display for HostName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
