use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

use fleetdeck::app_dirs::CONFIG_HOME_ENV;
use fleetdeck::config::API_URL_ENV;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Points the app directory at a temp dir and clears the URL override for one test.
pub struct FleetdeckEnvGuard {
    previous_home: Option<String>,
    previous_url: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl FleetdeckEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous_home = std::env::var(CONFIG_HOME_ENV).ok();
        let previous_url = std::env::var(API_URL_ENV).ok();
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME_ENV, path);
            std::env::remove_var(API_URL_ENV);
        }
        Self {
            previous_home,
            previous_url,
            _lock: lock,
        }
    }

    pub fn set_api_url(&self, url: &str) {
        // SAFETY: the guard holds the global env lock.
        unsafe {
            std::env::set_var(API_URL_ENV, url);
        }
    }
}

impl Drop for FleetdeckEnvGuard {
    fn drop(&mut self) {
        restore(CONFIG_HOME_ENV, self.previous_home.take());
        restore(API_URL_ENV, self.previous_url.take());
    }
}

fn restore(key: &str, value: Option<String>) {
    // SAFETY: called from Drop while the global env lock is still held.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}
