// ABOUTME: Configuration types and parsing for greenlight.yml.
// ABOUTME: Handles YAML parsing, env var interpolation, and target merging.

mod env_value;
mod init;

pub use env_value::EnvValue;
pub use init::init_config;

use crate::error::{Error, Result};
use crate::types::{AppIdentity, AppName, HostName};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "greenlight.yml";
pub const CONFIG_FILENAME_ALT: &str = "greenlight.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".greenlight/config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Primary application name; the candidate and backup names derive
    /// from it.
    #[serde(deserialize_with = "deserialize_app_name")]
    pub app: AppName,

    /// Route hostname. Defaults to the application name.
    #[serde(default, deserialize_with = "deserialize_host_name_option")]
    pub host: Option<HostName>,

    /// Shared route domain, e.g. `apps.example.com`.
    pub domain: String,

    /// Control-plane API endpoint, e.g. `http://api.pcf.example.com`.
    pub api: String,

    /// Bearer token for the control plane. Defaults to reading
    /// `GREENLIGHT_API_TOKEN` from the environment.
    #[serde(default = "default_token")]
    pub token: EnvValue,

    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    #[serde(default)]
    pub targets: HashMap<String, Target>,
}

/// Per-target overrides, merged over the base config.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Target {
    #[serde(default)]
    pub api: Option<String>,

    #[serde(default)]
    pub domain: Option<String>,

    #[serde(default, deserialize_with = "deserialize_host_name_option")]
    pub host: Option<HostName>,

    #[serde(default)]
    pub token: Option<EnvValue>,
}

fn default_token() -> EnvValue {
    EnvValue::FromEnv {
        var: "GREENLIGHT_API_TOKEN".to_string(),
        default: None,
    }
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    pub fn for_target(&self, name: &str) -> Result<Config> {
        let target = self
            .targets
            .get(name)
            .ok_or_else(|| Error::UnknownTarget(name.to_string()))?;

        let mut merged = self.clone();

        if let Some(ref api) = target.api {
            merged.api = api.clone();
        }
        if let Some(ref domain) = target.domain {
            merged.domain = domain.clone();
        }
        if let Some(ref host) = target.host {
            merged.host = Some(host.clone());
        }
        if let Some(ref token) = target.token {
            merged.token = token.clone();
        }

        Ok(merged)
    }

    /// The route hostname, falling back to the application name.
    pub fn route_host(&self) -> HostName {
        self.host
            .clone()
            .unwrap_or_else(|| HostName::from(&self.app))
    }

    /// The live identity this deployment cuts over to.
    pub fn live_identity(&self) -> AppIdentity {
        AppIdentity::new(self.app.clone(), self.route_host(), self.domain.clone())
    }

    pub fn template() -> Self {
        Config {
            app: AppName::new("my-app").unwrap(),
            host: None,
            domain: "apps.example.com".to_string(),
            api: "http://api.example.com".to_string(),
            token: default_token(),
            request_timeout: default_request_timeout(),
            targets: HashMap::new(),
        }
    }
}

// Custom deserializers

fn deserialize_app_name<'de, D>(deserializer: D) -> std::result::Result<AppName, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    AppName::new(&s).map_err(serde::de::Error::custom)
}

fn deserialize_host_name_option<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<HostName>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    opt.map(|s| HostName::new(&s).map_err(serde::de::Error::custom))
        .transpose()
}
