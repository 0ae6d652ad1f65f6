use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fleet::model::LatLon;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5001/api";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 7;
pub const DEFAULT_CENTER: LatLon = LatLon::new(13.7563, 100.5018);
const MIN_ZOOM: f32 = 1.0;
const MAX_ZOOM: f32 = 19.0;

/// Settings stored in `config.toml`.
///
/// Sections: `api`, `polling`, `map`. Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub polling: PollingSettings,
    #[serde(default)]
    pub map: MapSettings,
}

impl AppSettings {
    /// Clamp values into their usable ranges.
    pub fn normalized(mut self) -> Self {
        self.polling.interval_secs = self.polling.interval_secs.max(1);
        self.api.connect_timeout_secs = self.api.connect_timeout_secs.max(1);
        self.api.read_timeout_secs = self.api.read_timeout_secs.max(1);
        self.api.max_response_bytes = self.api.max_response_bytes.max(1024);
        self.map.initial_zoom = clamp_zoom(self.map.initial_zoom);
        self.map.selection_zoom = clamp_zoom(self.map.selection_zoom);
        if !(self.map.default_center.lat.is_finite() && self.map.default_center.lon.is_finite()) {
            self.map.default_center = DEFAULT_CENTER;
        }
        self
    }
}

fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_finite() {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        MIN_ZOOM
    }
}

/// Which path serves the truck snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotEndpoint {
    #[default]
    Trucks,
    Vehicles,
}

impl SnapshotEndpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::Trucks => "trucks",
            Self::Vehicles => "vehicles",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub snapshot_endpoint: SnapshotEndpoint,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    pub max_response_bytes: usize,
}

impl ApiSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            snapshot_endpoint: SnapshotEndpoint::default(),
            connect_timeout_secs: 5,
            read_timeout_secs: 10,
            max_response_bytes: 8 * 1024 * 1024,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingSettings {
    pub interval_secs: u64,
}

impl PollingSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub initial_zoom: f32,
    pub selection_zoom: f32,
    /// Used until the warehouse location is known, or when it never arrives.
    pub default_center: LatLon,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            initial_zoom: 12.0,
            selection_zoom: 15.0,
            default_center: DEFAULT_CENTER,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("No suitable config directory found")]
    NoConfigDir,
}
