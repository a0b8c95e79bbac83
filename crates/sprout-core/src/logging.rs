//! tracing subscriber setup shared by sprout binaries

use std::path::Path;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;

const FALLBACK_LEVEL: LevelFilter = LevelFilter::WARN;

/// Parse a level name (`error`, `warn`, `info`, `debug`, `trace`, `off`).
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    level.trim().parse::<LevelFilter>().ok()
}

/// Install the global fmt subscriber.
///
/// Logs go to stderr unless `file` is set, in which case they are appended
/// to that file through a non-blocking writer. Keep the returned guard alive
/// for the lifetime of the program so buffered lines are flushed on exit.
/// Calling this more than once leaves the first subscriber in place.
pub fn init_logging(level: &str, file: Option<&Path>) -> Option<WorkerGuard> {
    let parsed = parse_level(level);
    let max_level = parsed.unwrap_or(FALLBACK_LEVEL);

    let guard = match file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let name = path.file_name().unwrap_or(path.as_os_str());
            let appender = tracing_appender::rolling::never(dir.unwrap_or(Path::new(".")), name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = tracing_subscriber::fmt()
                .with_max_level(max_level)
                .with_ansi(false)
                .with_writer(writer)
                .try_init();
            Some(guard)
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_max_level(max_level)
                .with_writer(std::io::stderr)
                .try_init();
            None
        }
    };

    if parsed.is_none() {
        tracing::warn!("Unknown log level '{}', using {}", level, FALLBACK_LEVEL);
    }

    guard
}
