//! Layered configuration: defaults, then `bookshelf.toml` (or `--config`),
//! then `BOOKSHELF_*` environment variables, then command-line flags.

use std::path::{Path, PathBuf};

use bookshelf_validator::form::DateSource;
use chrono::NaiveDate;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_FILE: &str = "bookshelf.toml";

/// Environment keys read as top-level settings. Logging has its own
/// `BOOKSHELF_LOG*` variables.
const ENV_KEYS: &[&str] = &["data", "products_data", "messages", "today", "date_source"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Catalog JSON file.
    pub data: Option<PathBuf>,
    /// Product catalog JSON file.
    pub products_data: Option<PathBuf>,
    /// `.properties` file overriding the built-in texts.
    pub messages: Option<PathBuf>,
    /// Pinned "today"; the wall clock when absent.
    pub today: Option<NaiveDate>,
    /// Where date fields are validated from.
    pub date_source: DateSource,
    /// Logging.
    pub log: bookshelf_log::Config,
}

/// Flag values that take precedence over every other layer.
#[derive(Debug, Default, Serialize)]
struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    products_data: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    today: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_source: Option<DateSource>,
}

impl AppConfig {
    /// Builds the layered figment for `cli`.
    pub fn figment(cli: &Cli) -> Figment {
        let defaults = Self {
            log: bookshelf_log::Config::from_env(),
            ..Self::default()
        };
        let file = cli.config.as_deref().unwrap_or(Path::new(DEFAULT_FILE));
        let overrides = Overrides {
            data: cli.data.clone(),
            products_data: cli.products_data.clone(),
            today: cli.today,
            date_source: cli.date_source.map(DateSource::from),
        };

        Figment::from(Serialized::defaults(defaults))
            .merge(Toml::file(file))
            .merge(Env::prefixed("BOOKSHELF_").only(ENV_KEYS))
            .merge(Serialized::defaults(overrides))
    }

    /// Loads the configuration for `cli`.
    ///
    /// An explicit `--config` file must exist; the default file is optional.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        if let Some(path) = &cli.config
            && !path.is_file()
        {
            anyhow::bail!("config file {} not found", path.display());
        }
        Ok(Self::figment(cli).extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use figment::Jail;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("bookshelf").chain(args.iter().copied()))
    }

    #[test]
    fn layers_apply_in_order() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_FILE,
                r#"
                    data = "from-file.json"
                    today = "2024-01-01"
                    date_source = "record"

                    [log]
                    level = "debug"
                "#,
            )?;
            jail.set_env("BOOKSHELF_TODAY", "2024-02-02");
            jail.set_env("BOOKSHELF_PRODUCTS_DATA", "from-env.json");

            let config = AppConfig::load(&cli(&["genres"])).map_err(|e| e.to_string())?;
            assert_eq!(config.data, Some(PathBuf::from("from-file.json")));
            assert_eq!(config.today, NaiveDate::from_ymd_opt(2024, 2, 2));
            assert_eq!(config.products_data, Some(PathBuf::from("from-env.json")));
            assert_eq!(config.date_source, DateSource::Record);
            assert_eq!(config.log.level, "debug");

            let config = AppConfig::load(&cli(&["--today", "2024-03-03", "--data", "flag.json", "genres"]))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.today, NaiveDate::from_ymd_opt(2024, 3, 3));
            assert_eq!(config.data, Some(PathBuf::from("flag.json")));
            Ok(())
        });
    }

    #[test]
    fn defaults_without_file() {
        Jail::expect_with(|_| {
            let config = AppConfig::load(&cli(&["genres"])).map_err(|e| e.to_string())?;
            assert_eq!(config.data, None);
            assert_eq!(config.date_source, DateSource::Control);
            Ok(())
        });
    }

    #[test]
    fn explicit_config_must_exist() {
        Jail::expect_with(|_| {
            assert!(AppConfig::load(&cli(&["--config", "missing.toml", "genres"])).is_err());
            Ok(())
        });
    }
}
