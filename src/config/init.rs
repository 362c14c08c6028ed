// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates greenlight.yml template files.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::AppName;

use super::{CONFIG_FILENAME, Config};

pub fn init_config(dir: &Path, app: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(a) = app {
        config.app = AppName::new(a).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    }

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"app: {}
domain: {}
api: {}
# Route hostname defaults to the app name
# host: {}
# Bearer token is read from GREENLIGHT_API_TOKEN unless overridden:
# token:
#   env: MY_TOKEN_VAR
"#,
        config.app, config.domain, config.api, config.app
    )
}
