use std::io::Write;
use std::path::{Path, PathBuf};

use super::types::{AppSettings, ConfigError};
use crate::app_dirs::{self, AppDirError};

pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Overrides `api.base_url` without touching the file.
pub const API_URL_ENV: &str = "FLEETDECK_API_URL";

/// Path of `config.toml`, creating the app directory if needed.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(|err| match err {
        AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        AppDirError::CreateDir { path, source } => ConfigError::CreateDir { path, source },
    })?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load settings, writing the defaults out when no file exists yet.
///
/// `FLEETDECK_API_URL` is applied after loading and is never persisted.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    let path = config_path()?;
    let settings = if path.exists() {
        load_from(&path)?
    } else {
        let defaults = AppSettings::default();
        save_to_path(&defaults, &path)?;
        tracing::info!("Wrote default config to {}", path.display());
        defaults
    };
    Ok(apply_env_overrides(settings, std::env::var(API_URL_ENV).ok()))
}

pub fn load_from(path: &Path) -> Result<AppSettings, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<AppSettings>(&text)
        .map(AppSettings::normalized)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
}

/// Write `settings` through a temporary file so a crash never leaves half a config.
pub fn save_to_path(settings: &AppSettings, path: &Path) -> Result<(), ConfigError> {
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(data.as_bytes()).map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;
    file.persist(path).map_err(|err| write_err(err.error))?;
    Ok(())
}

pub fn apply_env_overrides(mut settings: AppSettings, api_url: Option<String>) -> AppSettings {
    if let Some(url) = api_url.map(|url| url.trim().to_string()).filter(|url| !url.is_empty()) {
        tracing::info!("Using API base URL from {API_URL_ENV}: {url}");
        settings.api.base_url = url;
    }
    settings
}
