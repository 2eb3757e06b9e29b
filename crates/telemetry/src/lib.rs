use std::fs::File;

use tracing::info_span;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, writer::BoxMakeWriter, MakeWriter},
    prelude::*,
    EnvFilter,
};

/// Where diagnostics should be written. Both sinks are optional.
#[derive(Default)]
pub struct TelemetryConfig {
    console_writer: Option<BoxMakeWriter>,
    file: Option<File>,
}

impl TelemetryConfig {
    /// Show warnings and errors on the given writer, usually stderr.
    pub fn with_console_writer<W>(mut self, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        self.console_writer = Some(BoxMakeWriter::new(writer));
        self
    }

    /// Record every event allowed by `RUST_LOG` (default `info`) in the given file.
    pub fn with_file_writer(mut self, file: File) -> Self {
        self.file = Some(file);
        self
    }
}

/// Keeps the background log writer alive. Pending lines are flushed when this is dropped.
pub struct TelemetryGuard {
    _file_guard: Option<WorkerGuard>,
}

pub fn install(config: TelemetryConfig) -> TelemetryGuard {
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_writer, file_guard) = match config.file {
        Some(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(filter_layer)
        .with(file_writer.map(|writer| {
            fmt::layer()
                .pretty()
                .with_ansi(false)
                .with_writer(writer)
        }))
        .with(config.console_writer.map(|writer| {
            fmt::layer()
                .compact()
                .with_ansi(true)
                .without_time()
                .with_target(false)
                .with_writer(writer)
                .with_filter(LevelFilter::WARN)
        }))
        .init();

    TelemetryGuard {
        _file_guard: file_guard,
    }
}

pub fn install_error_handler() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .install();
}

/// Run `f` inside the span every other event of this process hangs off.
pub fn with_root_span<T>(command: &str, description: &str, f: impl FnOnce() -> T) -> T {
    let span = info_span!("root", command, description);
    let _entered = span.enter();

    f()
}
