//! Service configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. A TOML file, if `TODOS_CONFIG` names one
//! 3. Environment variables (`TODOS_*` prefix)
//!
//! Environment variables take precedence over config file values.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::api::DEFAULT_ROOT;
use crate::error::Error;
use crate::health::{LIVENESS_PATH, READINESS_PATH};

/// Environment variable prefix
const ENV_PREFIX: &str = "TODOS";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind: SocketAddr,

    /// Path of the todo collection, e.g. `/api/v1/todos`
    pub root: String,

    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,

    /// JSON document backing the store. In-memory store when unset.
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            root: DEFAULT_ROOT.to_owned(),
            log_level: "info".to_owned(),
            data_file: None,
        }
    }
}

impl Config {
    /// Load configuration from the optional file and the process environment.
    pub fn load() -> Result<Self, Error> {
        let config = match std::env::var(format!("{ENV_PREFIX}_CONFIG")) {
            Ok(path) => Self::load_from_path(path)?,
            Err(_) => Self::default(),
        };
        config.with_overrides(|name| std::env::var(name).ok())
    }

    /// Load configuration from a TOML file, without environment overrides.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| Error::ConfigRead { path: path.to_owned(), source })?;
        toml::from_str(&content)
            .map_err(|source| Error::ConfigParse { path: path.to_owned(), source })
    }

    /// Applies `TODOS_*` overrides looked up through `var`, then validates.
    pub fn with_overrides(
        mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Error> {
        // TODOS_BIND
        if let Some(val) = var(&format!("{ENV_PREFIX}_BIND")) {
            self.bind = val.parse().map_err(|source| Error::InvalidAddr { addr: val, source })?;
        }

        // TODOS_ROOT
        if let Some(val) = var(&format!("{ENV_PREFIX}_ROOT")) {
            self.root = val;
        }

        // TODOS_LOG
        if let Some(val) = var(&format!("{ENV_PREFIX}_LOG")) {
            self.log_level = val;
        }

        // TODOS_DATA_FILE, empty means in-memory
        if let Some(val) = var(&format!("{ENV_PREFIX}_DATA_FILE")) {
            self.data_file = if val.is_empty() { None } else { Some(PathBuf::from(val)) };
        }

        self.root = normalize_root(&self.root)?;
        Ok(self)
    }
}

/// `todos/` → `/todos`. A root that reduces to nothing, holds route syntax,
/// or takes a health check path is rejected.
fn normalize_root(root: &str) -> Result<String, Error> {
    let trimmed = root.trim().trim_matches('/');
    if trimmed.is_empty() || trimmed.contains(['{', '}', '*']) {
        return Err(Error::InvalidRoot(root.to_owned()));
    }
    let normalized = format!("/{trimmed}");
    if normalized == LIVENESS_PATH || normalized == READINESS_PATH {
        return Err(Error::InvalidRoot(root.to_owned()));
    }
    Ok(normalized)
}
