use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Source};
use error_stack::{report, ResultExt};
use thiserror::Error;

use crate::domain::fortune::FALLBACK_TEXT;

use super::{
    anthropic_config::AnthropicConfig, fortune_config::FortuneConfig,
    sheets_config::SpreadsheetConfig,
};

pub const DEFAULT_CONFIG_PATH: &str = "Config";

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const SPREADSHEET_ID_ENV: &str = "SPREADSHEET_ID";
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

const ENV_OVERRIDES: [(&str, &str); 2] = [
    ("anthropic.api_key", API_KEY_ENV),
    ("sheets.spreadsheet_id", SPREADSHEET_ID_ENV),
];

#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("failed to read the configuration")]
    ReadFailed,
    #[error("invalid configuration at `{path}`")]
    InvalidField { path: String },
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub anthropic: AnthropicConfig,
    pub sheets: SpreadsheetConfig,
    pub fortune: FortuneConfig,
}

impl AppConfig {
    /// Loads the configuration from the defaults, the optional config file
    /// named by `CONFIG_PATH` and the environment, in increasing precedence.
    pub fn load() -> error_stack::Result<Self, AppConfigError> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        Self::from_sources(
            config::File::with_name(&config_path).required(false),
            |key| std::env::var(key).ok(),
        )
        .attach_printable_lazy(|| format!("Config file: {}", config_path))
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("anthropic.model", "claude-sonnet-4-20250514")?
            .set_default("anthropic.max_tokens", 1000_i64)?
            .set_default("anthropic.base_url", "https://api.anthropic.com/v1")?
            .set_default("anthropic.timeout_secs", 60_i64)?
            .set_default("sheets.priv_key", "credentials.json")?
            .set_default("sheets.worksheet", "fortune_data")?
            .set_default("sheets.timeout_secs", 60_i64)?
            .set_default("fortune.fallback_text", FALLBACK_TEXT)
    }

    fn from_sources<S>(
        file: S,
        env: impl Fn(&str) -> Option<String>,
    ) -> error_stack::Result<Self, AppConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let config = Self::defaults()
            .map(|builder| builder.add_source(file))
            .and_then(|builder| builder.set_override_option("anthropic.api_key", env(API_KEY_ENV)))
            .and_then(|builder| {
                builder.set_override_option("sheets.spreadsheet_id", env(SPREADSHEET_ID_ENV))
            })
            .and_then(|builder| builder.build())
            .change_context(AppConfigError::ReadFailed)?;

        serde_path_to_error::deserialize(config).map_err(|err| {
            let path = field_path(&err.path().to_string(), &err.inner().to_string());
            let env_hint = ENV_OVERRIDES
                .iter()
                .find(|(key, _)| *key == path)
                .map(|(_, env)| format!("Set it with the {} environment variable", env));

            let report =
                report!(err.into_inner()).change_context(AppConfigError::InvalidField { path });
            match env_hint {
                Some(hint) => report.attach_printable(hint),
                None => report,
            }
        })
    }
}

fn missing_field(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("missing field `")?;
    rest.split('`').next()
}

/// The deserializer reports a missing field at its parent struct, so the
/// field name is taken from the message.
fn field_path(parent: &str, message: &str) -> String {
    match missing_field(message) {
        Some(field) if parent == "." || parent.is_empty() => field.to_string(),
        Some(field) => format!("{}.{}", parent, field),
        None => parent.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| vars.get(key).cloned()
    }

    fn toml(source: &str) -> impl Source + Send + Sync + 'static {
        File::from_str(source, FileFormat::Toml)
    }

    #[test]
    fn test_defaults_with_env_only() {
        let config = AppConfig::from_sources(
            toml(""),
            env(&[(API_KEY_ENV, "sk-test"), (SPREADSHEET_ID_ENV, "sheet-123")]),
        )
        .unwrap();

        assert_eq!(config.anthropic.api_key.as_ref(), "sk-test");
        assert_eq!(config.anthropic.model.as_ref(), "claude-sonnet-4-20250514");
        assert_eq!(config.anthropic.max_tokens, 1000);
        assert_eq!(config.anthropic.timeout_secs, 60);
        assert_eq!(config.sheets.spreadsheet_id.as_ref(), "sheet-123");
        assert_eq!(config.sheets.worksheet.as_ref(), "fortune_data");
        assert_eq!(config.sheets.priv_key.as_ref(), "credentials.json");
        assert_eq!(config.fortune.fallback_text, FALLBACK_TEXT);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = AppConfig::from_sources(
            toml(
                r#"
                [anthropic]
                api_key = "from-file"
                model = "claude-3-5-haiku-latest"
                max_tokens = 300

                [sheets]
                spreadsheet_id = "file-sheet"
                timeout_secs = 15
                "#,
            ),
            env(&[]),
        )
        .unwrap();

        assert_eq!(config.anthropic.api_key.as_ref(), "from-file");
        assert_eq!(config.anthropic.model.as_ref(), "claude-3-5-haiku-latest");
        assert_eq!(config.anthropic.max_tokens, 300);
        assert_eq!(config.sheets.spreadsheet_id.as_ref(), "file-sheet");
        assert_eq!(config.sheets.timeout_secs, 15);
        assert_eq!(config.sheets.worksheet.as_ref(), "fortune_data");
    }

    #[test]
    fn test_env_overrides_file() {
        let config = AppConfig::from_sources(
            toml(
                r#"
                [anthropic]
                api_key = "from-file"

                [sheets]
                spreadsheet_id = "file-sheet"
                "#,
            ),
            env(&[(API_KEY_ENV, "from-env"), (SPREADSHEET_ID_ENV, "env-sheet")]),
        )
        .unwrap();

        assert_eq!(config.anthropic.api_key.as_ref(), "from-env");
        assert_eq!(config.sheets.spreadsheet_id.as_ref(), "env-sheet");
    }

    #[test]
    fn test_missing_api_key_reports_path() {
        let result = AppConfig::from_sources(toml(""), env(&[(SPREADSHEET_ID_ENV, "sheet-123")]));

        let report = result.unwrap_err();
        match report.current_context() {
            AppConfigError::InvalidField { path } => assert_eq!(path, "anthropic.api_key"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(format!("{:?}", report).contains(API_KEY_ENV));
    }

    #[test]
    fn test_missing_spreadsheet_id_names_env_var() {
        let result = AppConfig::from_sources(toml(""), env(&[(API_KEY_ENV, "sk")]));

        let report = result.unwrap_err();
        match report.current_context() {
            AppConfigError::InvalidField { path } => assert_eq!(path, "sheets.spreadsheet_id"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(format!("{:?}", report).contains(SPREADSHEET_ID_ENV));
    }

    #[test]
    fn test_field_path() {
        assert_eq!(
            field_path("anthropic", "missing field `api_key`"),
            "anthropic.api_key"
        );
        assert_eq!(
            field_path("anthropic", "missing field `api_key` for key `anthropic`"),
            "anthropic.api_key"
        );
        assert_eq!(field_path(".", "missing field `fortune`"), "fortune");
        assert_eq!(
            field_path("anthropic.max_tokens", "invalid type: string \"lots\""),
            "anthropic.max_tokens"
        );
    }

    #[test]
    fn test_wrong_type_reports_path() {
        let result = AppConfig::from_sources(
            toml(
                r#"
                [anthropic]
                max_tokens = "lots"
                "#,
            ),
            env(&[(API_KEY_ENV, "sk"), (SPREADSHEET_ID_ENV, "sheet")]),
        );

        match result.unwrap_err().current_context() {
            AppConfigError::InvalidField { path } => assert!(path.ends_with("max_tokens")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_api_key_is_redacted() {
        let config = AppConfig::from_sources(
            toml(""),
            env(&[(API_KEY_ENV, "sk-secret"), (SPREADSHEET_ID_ENV, "sheet")]),
        )
        .unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
