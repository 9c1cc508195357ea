//! Application configuration.
//!
//! Everything is environment-driven with local-run defaults: a base data
//! directory holding the glossary files and SQLite database, an output
//! directory for generated artifacts, and the bind address.

use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub glossary_dir: PathBuf,
    pub output_dir: PathBuf,
    pub database_path: PathBuf,
    pub bind_addr: String,
}

impl AppConfig {
    /// Builds the configuration from environment variables.
    ///
    /// - `PREDTCT_DATA_DIR` (default `./data`): holds `glossary/` and the
    ///   database file
    /// - `PREDTCT_OUTPUT_DIR` (default `./output`): generated artifacts
    /// - `PREDTCT_BIND` (default `127.0.0.1:5000`)
    pub fn from_env() -> Self {
        let data_dir = PathBuf::from(env_or("PREDTCT_DATA_DIR", "./data"));
        let output_dir = PathBuf::from(env_or("PREDTCT_OUTPUT_DIR", "./output"));
        let bind_addr = env_or("PREDTCT_BIND", "127.0.0.1:5000");

        Self {
            glossary_dir: data_dir.join("glossary"),
            database_path: data_dir.join("predtct.db"),
            output_dir,
            bind_addr,
        }
    }

    /// Creates the directories the service writes into.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        if let Some(parent) = self.database_path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_derive_from_data_dir() {
        // Only assert on the derived structure; the env itself is not
        // touched so parallel tests stay independent.
        let config = AppConfig {
            glossary_dir: PathBuf::from("./data").join("glossary"),
            database_path: PathBuf::from("./data").join("predtct.db"),
            output_dir: PathBuf::from("./output"),
            bind_addr: "127.0.0.1:5000".into(),
        };

        assert!(config.glossary_dir.ends_with("glossary"));
        assert!(config.database_path.ends_with("predtct.db"));
    }
}
