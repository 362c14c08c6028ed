// ABOUTME: Application identity value: name, route hostname, and domain.
// ABOUTME: Immutable; derived identities are built with the with_* methods.

use super::{AppName, HostName};
use std::fmt;

/// The identity of one application on the platform: its logical name, the
/// route hostname it answers on, and the shared route domain.
///
/// Identities are values. Deriving a variant (different name, different
/// host) produces a new identity; nothing is mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    name: AppName,
    host: HostName,
    domain: String,
}

impl AppIdentity {
    pub fn new(name: AppName, host: HostName, domain: impl Into<String>) -> Self {
        Self {
            name,
            host,
            domain: domain.into(),
        }
    }

    pub fn name(&self) -> &AppName {
        &self.name
    }

    pub fn host(&self) -> &HostName {
        &self.host
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Fully qualified route for this identity.
    pub fn route(&self) -> String {
        format!("{}.{}", self.host, self.domain)
    }

    /// Same route and domain, different application name.
    pub fn with_name(&self, name: AppName) -> AppIdentity {
        AppIdentity {
            name,
            host: self.host.clone(),
            domain: self.domain.clone(),
        }
    }

    /// Same domain, different application name and route hostname.
    pub fn with_name_and_host(&self, name: AppName, host: HostName) -> AppIdentity {
        AppIdentity {
            name,
            host,
            domain: self.domain.clone(),
        }
    }
}

impl fmt::Display for AppIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.route())
    }
}
