//! Configuration loading.
//!
//! Layers, lowest to highest precedence: built-in defaults, an optional TOML
//! file passed with `--config`, then `MEETSMART_*` environment variables.

use std::path::Path;

use clap::ValueEnum;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use meetsmart_engine::SLOT_STEP_MINUTES;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Minutes between consecutive candidate start times.
    pub step_minutes: i64,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_minutes: SLOT_STEP_MINUTES,
            format: OutputFormat::Json,
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("MEETSMART_")).extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_use_ten_minute_grid_and_json() {
        Jail::expect_with(|_jail| {
            let config = Config::load_from(None)?;
            assert_eq!(config, Config::default());
            assert_eq!(config.step_minutes, 10);
            assert_eq!(config.format, OutputFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn toml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("meetsmart.toml", "step_minutes = 15\nformat = \"text\"\n")?;
            let config = Config::load_from(Some(Path::new("meetsmart.toml")))?;
            assert_eq!(config.step_minutes, 15);
            assert_eq!(config.format, OutputFormat::Text);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_toml() {
        Jail::expect_with(|jail| {
            jail.create_file("meetsmart.toml", "step_minutes = 15\n")?;
            jail.set_env("MEETSMART_STEP_MINUTES", "5");
            let config = Config::load_from(Some(Path::new("meetsmart.toml")))?;
            assert_eq!(config.step_minutes, 5);
            Ok(())
        });
    }

    #[test]
    fn unknown_format_fails_to_load() {
        Jail::expect_with(|jail| {
            jail.set_env("MEETSMART_FORMAT", "yaml");
            assert!(Config::load_from(None).is_err());
            Ok(())
        });
    }
}
