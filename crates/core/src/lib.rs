//! DWD Station Atlas Core Library
//!
//! Shared utilities for the ingestion tools and the API server:
//! - Configuration loading (XDG-compliant)
//! - Database credential loading from dotenv-style files

mod config;

pub use config::{find_config_file, load_config, ConfigSource, DbConfig};

/// Application name used for XDG paths
pub const APP_NAME: &str = "dwd-atlas";

/// Default API port
pub const DEFAULT_API_PORT: u16 = 9700;
