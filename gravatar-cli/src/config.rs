use std::{path::Path, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use gravatar::adapters::outbound::{DEFAULT_MAX_FILE_SIZE, GRAVATAR_API_URL};
use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub api: ApiSettings,
    pub upload: UploadSettings,
}

#[serde_as]
#[derive(Deserialize, Clone)]
pub struct ApiSettings {
    pub url: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub timeout_secs: u64,
    pub token: Option<String>,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct UploadSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub max_file_size: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("url", &self.url)
            .field("timeout_secs", &self.timeout_secs)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

pub fn read_config() -> Result<Settings> {
    let base_path = std::env::current_dir().context("Failed to determine the current directory")?;

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .context("Failed to parse APP_ENVIRONMENT")?;

    read_config_from(&base_path.join("config"), environment)
}

pub fn read_config_from(config_directory: &Path, environment: Environment) -> Result<Settings> {
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .set_default("api.url", GRAVATAR_API_URL)?
        .set_default("api.timeout_secs", 30_i64)?
        .set_default("upload.max_file_size", DEFAULT_MAX_FILE_SIZE as i64)?
        .add_source(config::File::from(config_directory.join("base.yaml")).required(false))
        .add_source(
            config::File::from(config_directory.join(environment_filename)).required(false),
        )
        .add_source(
            config::Environment::with_prefix("GRAVATAR")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("Failed to load configuration")?;

    settings
        .try_deserialize::<Settings>()
        .context("Invalid configuration")
}

#[derive(Display, Debug, EnumString, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn defaults_apply_without_config_files() {
        let dir = tempfile::tempdir().unwrap();

        let settings = read_config_from(dir.path(), Environment::Local).unwrap();

        assert_eq!(settings.api.url, GRAVATAR_API_URL);
        assert_eq!(settings.api.timeout(), Duration::from_secs(30));
        assert_eq!(settings.upload.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn environment_file_overrides_base() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("base.yaml"),
            "api:\n  url: http://localhost:9000\n  timeout_secs: 10\n",
        )
        .unwrap();
        fs::write(dir.path().join("production.yaml"), "api:\n  timeout_secs: 5\n").unwrap();

        let settings = read_config_from(dir.path(), Environment::Production).unwrap();

        assert_eq!(settings.api.url, "http://localhost:9000");
        assert_eq!(settings.api.timeout_secs, 5);
    }

    #[test]
    fn token_is_not_debug_printed() {
        let api = ApiSettings {
            url: GRAVATAR_API_URL.to_string(),
            timeout_secs: 30,
            token: Some("secret".to_string()),
        };
        assert!(!format!("{api:?}").contains("secret"));
    }

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!(
            Environment::from_str("PRODUCTION").unwrap(),
            Environment::Production
        );
        assert!(Environment::from_str("staging").is_err());
    }
}
