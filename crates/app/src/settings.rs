//! Handles settings for the application. Configuration is read from a
//! `settings` file (e.g. `settings.toml`) in the working directory, and
//! every key can be overridden by a `MYBUDGET__`-prefixed environment
//! variable, e.g. `MYBUDGET__SERVER__PORT=8080`.
//!
//! See `settings.example.toml` for the layout.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// Where the ledger lives. The server authenticates against the `users`
/// table of this database, so it must be a file the admin CLI can reach.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    /// Path of a sqlite file, created when missing.
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("MYBUDGET").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn try_parse(toml: &str) -> Result<Settings, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn parse(toml: &str) -> Settings {
        try_parse(toml).unwrap()
    }

    #[test]
    fn sqlite_server_section() {
        let settings = parse(
            r#"
            [app]
            level = "debug"

            [server]
            port = 3000
            database = { sqlite = "./mybudget.db" }
            "#,
        );

        assert_eq!(settings.app.level, "debug");
        let server = settings.server.unwrap();
        assert_eq!(server.port, 3000);
        assert!(server.bind.is_none());
        assert!(matches!(server.database, Database::Sqlite(path) if path == "./mybudget.db"));
    }

    #[test]
    fn default_level_when_app_is_missing() {
        let settings = parse(
            r#"
            [server]
            bind = "0.0.0.0"
            port = 8080
            database = { sqlite = "/var/lib/mybudget/ledger.db" }
            "#,
        );

        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.unwrap().bind.as_deref(), Some("0.0.0.0"));
    }

    #[test]
    fn in_memory_database_is_rejected() {
        let result = try_parse(
            r#"
            [server]
            port = 8080
            database = "memory"
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn no_server_section() {
        assert!(parse("[app]\nlevel = \"warn\"").server.is_none());
    }
}
