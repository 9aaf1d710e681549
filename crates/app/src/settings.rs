//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` and `PARTY_LEDGER__*` environment variables,
//! e.g. `PARTY_LEDGER__APP__LEVEL=debug`.
use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Report {
    /// Appended to every rendered amount.
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub report: Report,
}

impl Settings {
    /// Loads settings from `path`, or from `./settings.*` when it exists.
    pub fn new(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("settings").required(false),
        };

        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("report.currency", "€")?
            .add_source(file)
            .add_source(Environment::with_prefix("PARTY_LEDGER").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_file() {
        let settings = Settings::new(None).unwrap();
        assert!(!settings.app.level.is_empty());
        assert!(!settings.report.currency.is_empty());
    }

    #[test]
    fn file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("party_ledger_{}.toml", std::process::id()));
        std::fs::write(&path, "[report]\ncurrency = \" USD\"\n").unwrap();

        let settings = Settings::new(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.report.currency, " USD");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("party_ledger_missing_settings.toml");
        assert!(Settings::new(Some(&path)).is_err());
    }
}
