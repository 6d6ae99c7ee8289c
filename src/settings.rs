use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::persist::PersistenceMode;

/// Runtime settings, layered as: defaults, then `nl2sql.toml` (or the file
/// named by `NL2SQL_CONFIG`), then `NL2SQL_*` variables, then `PORT`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// SQLite path, `:memory:` for a throwaway database.
    pub database: String,
    /// Load the reference dataset on startup.
    pub seed: bool,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log: String,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let file = std::env::var("NL2SQL_CONFIG").unwrap_or_else(|_| "nl2sql".to_string());
        Self::load_from(&file)
    }

    pub fn load_from(file: &str) -> Result<Self> {
        let settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("database", ":memory:")?
            .set_default("seed", true)?
            .set_default("log", "info")?
            .add_source(File::with_name(file).required(false))
            .add_source(Environment::with_prefix("NL2SQL").try_parsing(true))
            .set_override_option("port", std::env::var("PORT").ok())?
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn persistence_mode(&self) -> PersistenceMode {
        PersistenceMode::from_path(&self.database)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_values_override_defaults() {
        let path = std::env::temp_dir().join("nl2sql_settings_test.toml");
        std::fs::write(&path, "database = \"company.db\"\nseed = false\n").unwrap();
        let settings = Settings::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.database, "company.db");
        assert!(!settings.seed);
        assert_eq!(settings.persistence_mode(), PersistenceMode::File("company.db".into()));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::load_from("no_such_nl2sql_settings").unwrap();
        assert_eq!(settings.persistence_mode(), PersistenceMode::InMemory);
        assert!(settings.seed);
        assert!(settings.address().ends_with(&settings.port.to_string()));
    }
}
