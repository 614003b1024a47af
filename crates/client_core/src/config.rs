use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const SETTINGS_FILE: &str = "predict_client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("malformed settings file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid server url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Resolves settings from `predict_client.toml`, the process environment and
/// an optional command-line override, in increasing precedence.
pub fn load_settings(cli_server_url: Option<&str>) -> Result<ClientSettings, SettingsError> {
    load_settings_from(
        Path::new(SETTINGS_FILE),
        |name| std::env::var(name).ok(),
        cli_server_url,
    )
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
    cli_server_url: Option<&str>,
) -> Result<ClientSettings, SettingsError> {
    let mut server_url = DEFAULT_SERVER_URL.to_string();

    if let Some(file_cfg) = read_settings_file(path)? {
        if let Some(v) = file_cfg.server_url {
            server_url = v;
        }
    }

    for name in ["PREDICT_SERVER_URL", "APP__SERVER_URL"] {
        if let Some(v) = env(name).filter(|v| !v.trim().is_empty()) {
            server_url = v;
        }
    }

    if let Some(v) = cli_server_url.filter(|v| !v.trim().is_empty()) {
        server_url = v.to_string();
    }

    Ok(ClientSettings {
        server_url: normalize_server_url(&server_url)?,
    })
}

fn read_settings_file(path: &Path) -> Result<Option<FileSettings>, SettingsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    toml::from_str(&raw)
        .map(Some)
        .map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

pub fn normalize_server_url(raw: &str) -> Result<String, SettingsError> {
    let trimmed = raw.trim();
    let invalid = |reason: String| SettingsError::InvalidUrl {
        url: trimmed.to_string(),
        reason,
    };

    let parsed = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".into()));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".into()));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
