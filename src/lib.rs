//! Library exports for reuse in benchmarks and tests.
/// Backend client trait and its HTTP implementation.
pub mod api;
/// Application directory resolution.
pub mod app_dirs;
/// `config.toml` loading and saving.
pub mod config;
/// egui front end.
pub mod egui_app;
/// Snapshot model, reconciliation and derived views.
pub mod fleet;
/// HTTP agent and retry helpers.
pub mod http_client;
/// Tracing subscriber setup.
pub mod logging;
/// Background snapshot polling.
pub mod poller;
