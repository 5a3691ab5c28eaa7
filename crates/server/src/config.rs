//! Fabric environment configuration.
//!
//! Fabric keeps its settings in `~/.config/fabric/.env` (`KEY=VALUE` lines).
//! This module reads that file plus the process environment and produces the
//! settings the server needs. Resolution order: CLI/process environment,
//! then the Fabric environment file, then built-in defaults.
//!
//! A missing or unreadable file is not an error — the server still starts
//! against the default backend address.

use anyhow::Context as _;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default Fabric REST API address (`fabric --serve` default).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Resolved settings for the Fabric backend client.
#[derive(Debug, Clone)]
pub struct FabricSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl FabricSettings {
    /// Resolve settings from explicit overrides (CLI flags / process env,
    /// already merged by clap) and the Fabric environment file.
    #[must_use]
    pub fn resolve(base_url: Option<String>, api_key: Option<String>, timeout: Duration) -> Self {
        let env = load_fabric_env();
        Self {
            base_url: base_url
                .or_else(|| env.get("FABRIC_BASE_URL").cloned())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: api_key.or_else(|| env.get("FABRIC_API_KEY").cloned()),
            timeout,
        }
    }
}

/// Path to the Fabric environment file, honoring `XDG_CONFIG_HOME`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set.
pub fn fabric_env_path() -> anyhow::Result<PathBuf> {
    let base = if let Ok(v) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(v)
    } else {
        let home = std::env::var("HOME").context("HOME is not set")?;
        PathBuf::from(home).join(".config")
    };
    Ok(base.join("fabric").join(".env"))
}

/// Load the Fabric environment file, degrading to empty on any problem.
#[must_use]
pub fn load_fabric_env() -> HashMap<String, String> {
    match fabric_env_path() {
        Ok(path) => load_env_file(&path),
        Err(e) => {
            tracing::info!(error = %e, "cannot determine Fabric environment file path");
            HashMap::new()
        }
    }
}

/// Read and parse one env file. Missing or unreadable files yield an empty
/// map (logged at info level); malformed lines are skipped with a warning.
#[must_use]
pub fn load_env_file(path: &Path) -> HashMap<String, String> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "Fabric environment file not found");
            return HashMap::new();
        }
        Err(e) => {
            tracing::info!(path = %path.display(), error = %e, "cannot access Fabric environment file");
            return HashMap::new();
        }
    };
    parse_env_lines(path, &contents)
}

fn parse_env_lines(path: &Path, contents: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for (idx, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parsed = line.split_once('=').and_then(|(key, value)| {
            let key = key.trim();
            if key.is_empty() { None } else { Some((key, value)) }
        });
        let Some((key, value)) = parsed else {
            tracing::warn!(
                path = %path.display(),
                line = idx + 1,
                "malformed line in Fabric environment file"
            );
            continue;
        };

        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        vars.insert(key.to_string(), value.to_string());
    }
    vars
}

/// Extract `DEFAULT_MODEL` and `DEFAULT_VENDOR` from the Fabric environment.
///
/// Either can be `None`; empty strings count as unset. These are not used by
/// the current tools — pattern execution is a stub — but are surfaced at
/// startup so a misconfigured environment is visible early.
#[must_use]
pub fn default_model() -> (Option<String>, Option<String>) {
    default_model_from(&load_fabric_env())
}

fn default_model_from(env: &HashMap<String, String>) -> (Option<String>, Option<String>) {
    let model = env.get("DEFAULT_MODEL").filter(|v| !v.is_empty()).cloned();
    if model.is_none() {
        tracing::warn!("DEFAULT_MODEL not found in Fabric environment configuration");
    }

    let vendor = env.get("DEFAULT_VENDOR").filter(|v| !v.is_empty()).cloned();
    if vendor.is_none() {
        tracing::warn!("DEFAULT_VENDOR not found in Fabric environment configuration");
    }

    (model, vendor)
}
