// ABOUTME: Validated application name type.
// ABOUTME: Ensures names stay valid when deployment suffixes are appended.

use std::fmt;
use thiserror::Error;

/// Room reserved for the longest deployment suffix ("-green").
const SUFFIX_ROOM: usize = 6;

/// Maximum base name length so a suffixed name still fits a 63-char label.
pub const MAX_APP_NAME_LEN: usize = 63 - SUFFIX_ROOM;

#[derive(Debug, Error)]
pub enum AppNameError {
    #[error("application name cannot be empty")]
    Empty,

    #[error("application name exceeds maximum length of {MAX_APP_NAME_LEN} characters")]
    TooLong,

    #[error("application name cannot start with a hyphen")]
    StartsWithHyphen,

    #[error("application name cannot end with a hyphen")]
    EndsWithHyphen,

    #[error("application name must be lowercase")]
    NotLowercase,

    #[error("invalid character in application name: '{0}'")]
    InvalidChar(char),
}

/// Logical name of a deployed application.
///
/// The length cap leaves room for the `-green`/`-blue` suffixes, which is
/// what makes identity derivation total.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppName(String);

impl AppName {
    pub fn new(value: &str) -> Result<Self, AppNameError> {
        if value.is_empty() {
            return Err(AppNameError::Empty);
        }

        if value.len() > MAX_APP_NAME_LEN {
            return Err(AppNameError::TooLong);
        }

        if value.starts_with('-') {
            return Err(AppNameError::StartsWithHyphen);
        }

        if value.ends_with('-') {
            return Err(AppNameError::EndsWithHyphen);
        }

        for c in value.chars() {
            if c.is_ascii_uppercase() {
                return Err(AppNameError::NotLowercase);
            }
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
                return Err(AppNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append a deployment suffix. Infallible: the base name leaves room for
    /// the suffix and the suffix alphabet is a subset of the name alphabet.
    pub(crate) fn with_suffix(&self, suffix: &str) -> AppName {
        AppName(format!("{}-{}", self.0, suffix))
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
