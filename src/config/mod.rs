//! `config.toml` handling.

mod io;
mod types;

pub use io::{
    API_URL_ENV, CONFIG_FILE_NAME, apply_env_overrides, config_path, load_from, load_or_default,
    save_to_path,
};
pub use types::{
    ApiSettings, AppSettings, ConfigError, DEFAULT_API_BASE_URL, MapSettings, PollingSettings,
    SnapshotEndpoint,
};
