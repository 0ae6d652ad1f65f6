//! Global tracing subscriber writing to stdout and one log file per launch.
//!
//! Log files live in the app directory's `logs/` folder. Their names carry
//! the launch time, so name order is age order and only the newest few are
//! kept.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs::{self, AppDirError};

const KEEP_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "fleetdeck_";
const LOG_FILE_EXT: &str = ".log";
const DEFAULT_FILTER: &str = "info";

const FILE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
const LINE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Keeps the non-blocking file writer flushing until exit.
static FILE_WRITER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Log directory unavailable: {0}")]
    Dir(#[from] AppDirError),
    #[error("Log file I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to stamp log file name: {0}")]
    FileName(#[from] time::error::Format),
    #[error("A global tracing subscriber is already installed: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the subscriber. Later calls do nothing.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init() -> Result<(), LoggingError> {
    if FILE_WRITER_GUARD.get().is_some() {
        return Ok(());
    }

    let log_dir = app_dirs::logs_dir()?;
    let launched = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let file_name = log_file_name(launched)?;
    let removed = prune_logs(&log_dir, KEEP_LOG_FILES.saturating_sub(1))?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::never(&log_dir, &file_name));
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let timer = line_timer();
    tracing::subscriber::set_global_default(
        Registry::default()
            .with(filter)
            .with(fmt::layer().with_timer(timer.clone()).with_writer(std::io::stdout))
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_timer(timer)
                    .with_writer(file_writer),
            ),
    )?;
    let _ = FILE_WRITER_GUARD.set(guard);

    tracing::info!(
        "Logging to {} ({removed} old log files removed)",
        log_dir.join(&file_name).display()
    );
    Ok(())
}

fn log_file_name(launched: OffsetDateTime) -> Result<String, LoggingError> {
    Ok(format!(
        "{LOG_FILE_PREFIX}{}{LOG_FILE_EXT}",
        launched.format(FILE_STAMP)?
    ))
}

fn is_log_file(name: &str) -> bool {
    name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_EXT)
}

/// Remove the oldest log files so at most `keep` remain. Returns how many went.
fn prune_logs(dir: &Path, keep: usize) -> Result<usize, LoggingError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| LoggingError::Io { path, source }
    };
    let mut names: Vec<String> = fs::read_dir(dir)
        .map_err(io_err(dir))?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_log_file(name))
        .collect();
    if names.len() <= keep {
        return Ok(0);
    }
    names.sort_unstable();
    let excess = names.len() - keep;
    for name in &names[..excess] {
        let path = dir.join(name);
        fs::remove_file(&path).map_err(io_err(&path))?;
    }
    Ok(excess)
}

fn line_timer() -> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, LINE_STAMP.into())
}
