use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

use crate::error::AppResult;

/// Handle to change the log filter after start-up.
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Plain-text `fmt` layer writing to a log file.
pub type FileLayer<S> = fmt::Layer<S, DefaultFields, Format, Mutex<File>>;

/// ## Summary
/// Creates a plain-text layer writing to `path`. An existing file is replaced.
///
/// ## Errors
/// Returns an error if the file cannot be created.
pub fn file_layer<S>(path: &Path) -> AppResult<FileLayer<S>>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    Ok(fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(File::create(path)?)))
}

/// ## Summary
/// Installs the global subscriber: a reloadable filter starting at `debug`,
/// a console layer and, when `log_file` is given, a file layer.
///
/// ## Errors
/// Returns an error if the log file cannot be created.
pub fn init_tracing(log_file: Option<&Path>) -> AppResult<FilterHandle> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));
    let file_layer = log_file.map(file_layer).transpose()?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(file_layer)
        .init();

    if let Some(path) = log_file {
        tracing::debug!(path = %path.display(), "Logging to file");
    }

    Ok(filter_handle)
}

/// ## Summary
/// Replaces the active filter with `level`, keeping the current one if
/// `level` is not a valid filter directive.
pub fn apply_log_level(handle: &FilterHandle, level: &str) {
    if let Ok(filter) = EnvFilter::try_new(level) {
        if let Err(e) = handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %level, "Invalid log level in config, keeping debug");
    }
}
