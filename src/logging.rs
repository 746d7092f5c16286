//! File logging. The terminal belongs to the UI, so logs only go to a file.

use std::fs;
use std::io;
use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::Directive, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Install the global subscriber writing to `path`.
///
/// The default level is `info` (`debug` when verbose). The returned guard flushes pending records on drop and must outlive the app.
pub fn init(path: &Path, verbose: bool) -> io::Result<WorkerGuard> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        fs::create_dir_all(dir)?;
    }
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("invalid log file path: {}", path.display())))?;

    let appender = tracing_appender::rolling::never(dir.unwrap_or(Path::new(".")), file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let directive: Directive = format!("ecotips={}", level.as_str().to_lowercase())
        .parse()
        .map_err(io::Error::other)?;
    // RUST_LOG wins over the default level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(directive));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .with_filter(filter),
        )
        .try_init()
        .map_err(io::Error::other)?;

    Ok(guard)
}
