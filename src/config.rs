use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{AuditError, Result};
use crate::providers::System;

pub const API_KEY_VAR: &str = "CLIO_API_KEY";

pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_VAR).ok()
}

/// Bearer token for both systems.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// An unset or empty value is treated as missing.
    pub fn from_value(value: Option<String>) -> Result<Self> {
        match value {
            Some(token) if !token.is_empty() => Ok(Credential(token)),
            _ => Err(AuditError::MissingCredential(API_KEY_VAR)),
        }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

/// Base URL overrides, mainly for pointing at a sandbox.
#[derive(Debug, Deserialize, Default)]
pub struct EndpointsConfig {
    pub manage: Option<String>,
    pub grow: Option<String>,
}

impl AppConfig {
    pub fn base_url(&self, system: System) -> &str {
        let configured = match system {
            System::Manage => self.endpoints.manage.as_deref(),
            System::Grow => self.endpoints.grow.as_deref(),
        };
        configured.unwrap_or_else(|| system.default_base_url())
    }
}

fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".clio-audit")
        .join("config.toml")
}

/// Loads the config file. The default location is optional; an explicit
/// path must exist.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = config_path();
            if !path.exists() {
                return Ok(AppConfig::default());
            }
            path
        }
    };
    let contents = std::fs::read_to_string(&path).map_err(|e| AuditError::Config {
        path: path.clone(),
        message: e.to_string(),
    })?;
    parse_config(&contents).map_err(|message| AuditError::Config { path, message })
}

fn parse_config(contents: &str) -> std::result::Result<AppConfig, String> {
    toml::from_str(contents).map_err(|e| e.to_string())
}
