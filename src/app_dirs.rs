//! Location of the `.fleetdeck` folder that holds config and logs.
//!
//! Defaults to the OS config directory; `FLEETDECK_CONFIG_HOME` points it
//! somewhere else for tests or portable installs.

use std::path::PathBuf;

use directories::BaseDirs;
use thiserror::Error;

pub const APP_DIR_NAME: &str = ".fleetdeck";
pub const CONFIG_HOME_ENV: &str = "FLEETDECK_CONFIG_HOME";
const LOGS_DIR_NAME: &str = "logs";

#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("Neither {CONFIG_HOME_ENV} nor an OS config directory is available")]
    NoBaseDir,
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The `.fleetdeck` root, created on demand.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let base = base_dir().ok_or(AppDirError::NoBaseDir)?;
    create(base.join(APP_DIR_NAME))
}

/// `logs/` under the app root, created on demand.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    create(app_root_dir()?.join(LOGS_DIR_NAME))
}

fn base_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_HOME_ENV) {
        Some(home) if !home.is_empty() => Some(PathBuf::from(home)),
        _ => BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()),
    }
}

fn create(dir: PathBuf) -> Result<PathBuf, AppDirError> {
    match std::fs::create_dir_all(&dir) {
        Ok(()) => Ok(dir),
        Err(source) => Err(AppDirError::CreateDir { path: dir, source }),
    }
}
