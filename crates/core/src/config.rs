//! Configuration loading utilities
//!
//! Two kinds of configuration live here:
//! 1. TOML config files for the API server, searched in standard locations
//! 2. Database credentials, read from a dotenv-style file whose path the
//!    ingestion tools take on the command line

use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;

use crate::APP_NAME;

/// Describes where a configuration was loaded from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Explicit path provided via CLI or env var
    Explicit(PathBuf),
    /// Found in current working directory
    CurrentDir(PathBuf),
    /// Found in XDG config home (~/.config/dwd-atlas/)
    XdgConfig(PathBuf),
    /// Found in system config (/etc/dwd-atlas/)
    System(PathBuf),
    /// No config file found, using defaults
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ConfigSource::Explicit(p) => Some(p),
            ConfigSource::CurrentDir(p) => Some(p),
            ConfigSource::XdgConfig(p) => Some(p),
            ConfigSource::System(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Explicit(p) => write!(f, "{}", p.display()),
            ConfigSource::CurrentDir(p) => write!(f, "{}", p.display()),
            ConfigSource::XdgConfig(p) => write!(f, "{}", p.display()),
            ConfigSource::System(p) => write!(f, "{}", p.display()),
            ConfigSource::Defaults => write!(f, "(defaults)"),
        }
    }
}

/// Find a configuration file in standard locations
///
/// Search order:
/// 1. Environment variable (e.g., DWD_ATLAS_CONFIG)
/// 2. Current directory (api.toml)
/// 3. XDG config home ($XDG_CONFIG_HOME/dwd-atlas/ or ~/.config/dwd-atlas/)
/// 4. System config (/etc/dwd-atlas/)
pub fn find_config_file(env_var: &str, filename: &str) -> ConfigSource {
    // 1. Environment variable
    if let Ok(path) = env::var(env_var) {
        let p = PathBuf::from(&path);
        if p.exists() {
            return ConfigSource::Explicit(p);
        }
    }

    // 2. Current directory
    let local = PathBuf::from(filename);
    if local.exists() {
        return ConfigSource::CurrentDir(local);
    }

    // 3. XDG config home
    let xdg_path = get_xdg_config_path(filename);
    if xdg_path.exists() {
        return ConfigSource::XdgConfig(xdg_path);
    }

    // 4. System config
    let system = PathBuf::from(format!("/etc/{}/{}", APP_NAME, filename));
    if system.exists() {
        return ConfigSource::System(system);
    }

    ConfigSource::Defaults
}

/// Get the XDG config path for a given filename
fn get_xdg_config_path(filename: &str) -> PathBuf {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join(APP_NAME).join(filename)
    } else if let Ok(home) = env::var("HOME") {
        PathBuf::from(home)
            .join(".config")
            .join(APP_NAME)
            .join(filename)
    } else {
        // Fallback - won't exist but keeps the code simple
        PathBuf::from(format!(".config/{}/{}", APP_NAME, filename))
    }
}

/// Load and parse a TOML configuration file
///
/// # Returns
/// * `Ok(config)` - Successfully loaded and parsed config, or defaults when
///   no file was found
/// * `Err(e)` - Failed to read or parse the config file
pub fn load_config<T: DeserializeOwned + Default>(source: &ConfigSource) -> anyhow::Result<T> {
    match source.path() {
        Some(path) => {
            let mut file = File::open(path)?;
            let mut content = String::new();
            file.read_to_string(&mut content)?;
            let config: T = toml::from_str(&content)?;
            Ok(config)
        }
        None => Ok(T::default()),
    }
}

/// Postgres connection parameters
///
/// Loaded from a dotenv-style file exposing `DB_NAME`, `DB_USER`, `DB_PASS`,
/// `DB_HOST` and `DB_PORT`. Missing or invalid values fail before any
/// ingestion begins.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub name: String,
    pub user: String,
    pub pass: String,
    pub host: String,
    pub port: u16,
}

impl DbConfig {
    /// Load credentials from the dotenv file at `path`
    pub fn from_env_file(path: &Path) -> anyhow::Result<Self> {
        dotenvy::from_path(path)
            .with_context(|| format!("failed to load env file: {}", path.display()))?;
        Self::from_env()
    }

    /// Load credentials from already-set environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let name = require_var("DB_NAME")?;
        let user = require_var("DB_USER")?;
        let pass = require_var("DB_PASS")?;
        let host = require_var("DB_HOST")?;
        let port = require_var("DB_PORT")?
            .parse::<u16>()
            .context("DB_PORT is not a valid port number")?;

        Ok(Self {
            name,
            user,
            pass,
            host,
            port,
        })
    }
}

fn require_var(key: &str) -> anyhow::Result<String> {
    let value = env::var(key).with_context(|| format!("missing environment variable {}", key))?;
    if value.trim().is_empty() {
        anyhow::bail!("environment variable {} is empty", key);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_source_display() {
        let source = ConfigSource::CurrentDir(PathBuf::from("test.toml"));
        assert_eq!(format!("{}", source), "test.toml");

        let source = ConfigSource::Defaults;
        assert_eq!(format!("{}", source), "(defaults)");
    }

    #[test]
    fn test_missing_env_file_fails() {
        let err = DbConfig::from_env_file(Path::new("/nonexistent/path/.env")).unwrap_err();
        assert!(err.to_string().contains("failed to load env file"));
    }
}
