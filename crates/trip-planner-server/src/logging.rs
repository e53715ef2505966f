use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::configuration::LogSettings;

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber: stdout (plain or JSON) plus an optional
/// daily rotated file. `RUST_LOG` overrides the default `info` filter.
///
/// The returned guard flushes the file writer and must live as long as the
/// server.
pub fn setup_logging(name: &str, settings: &LogSettings) -> Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (json_layer, plain_layer) = if settings.json {
        (Some(fmt::layer().json().with_current_span(true)), None)
    } else {
        (None, Some(fmt::layer().with_target(false)))
    };

    let (file_layer, guard) = match &settings.dir {
        Some(dir) => {
            let file_appender =
                RollingFileAppender::new(Rotation::DAILY, dir, format!("{name}.log"));
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(plain_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
