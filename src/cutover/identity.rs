// ABOUTME: Derives the green and blue identities from the live identity.
// ABOUTME: Pure and total; derived once per run so identities stay stable.

use crate::types::AppIdentity;

/// The three application identities a cutover run operates on.
///
/// - `live` is the application that owns the primary name and route.
/// - `green` is the candidate deployed in stage 1, answering on the
///   temporary `-green` route.
/// - `blue` is the backup record: the primary hostname under the `-blue`
///   name. It is never bound to a route during this stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutoverIdentities {
    pub live: AppIdentity,
    pub green: AppIdentity,
    pub blue: AppIdentity,
}

impl CutoverIdentities {
    /// Derive the green and blue identities from the live one. Called
    /// exactly once per run.
    pub fn derive(live: &AppIdentity) -> Self {
        let green = live.with_name_and_host(
            live.name().with_suffix("green"),
            live.host().with_suffix("green"),
        );
        let blue = live.with_name(live.name().with_suffix("blue"));

        Self {
            live: live.clone(),
            green,
            blue,
        }
    }

    /// The green application addressed by the primary route, used when the
    /// primary route is bound to the candidate during the handover.
    pub fn green_on_primary(&self) -> AppIdentity {
        self.live.with_name(self.green.name().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AppName, HostName};

    fn live(name: &str, host: &str) -> AppIdentity {
        AppIdentity::new(
            AppName::new(name).unwrap(),
            HostName::new(host).unwrap(),
            "apps.example.com",
        )
    }

    #[test]
    fn green_suffixes_name_and_host() {
        let ids = CutoverIdentities::derive(&live("x", "x"));
        assert_eq!(ids.green.name().as_str(), "x-green");
        assert_eq!(ids.green.host().as_str(), "x-green");
    }

    #[test]
    fn blue_suffixes_name_and_keeps_host() {
        let ids = CutoverIdentities::derive(&live("x", "x"));
        assert_eq!(ids.blue.name().as_str(), "x-blue");
        assert_eq!(ids.blue.host().as_str(), "x");
    }

    #[test]
    fn derivation_is_deterministic() {
        let app = live("api", "api");
        assert_eq!(
            CutoverIdentities::derive(&app),
            CutoverIdentities::derive(&app)
        );
    }

    #[test]
    fn green_on_primary_keeps_primary_route() {
        let ids = CutoverIdentities::derive(&live("api", "www"));
        let bound = ids.green_on_primary();
        assert_eq!(bound.name().as_str(), "api-green");
        assert_eq!(bound.host().as_str(), "www");
        assert_eq!(bound.route(), "www.apps.example.com");
    }

    #[test]
    fn domain_is_carried_unchanged() {
        let ids = CutoverIdentities::derive(&live("api", "api"));
        assert_eq!(ids.green.domain(), "apps.example.com");
        assert_eq!(ids.blue.domain(), "apps.example.com");
    }
}
