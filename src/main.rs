//! langslide binary entrypoint: configuration, logging, then one command.

mod args;

use std::fmt;
use std::path::Path;
use std::process::ExitCode;
use std::sync::OnceLock;

use clap::Parser;
use langslide::config::Settings;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Log timestamps in local time.
struct LangslideTimer;

impl tracing_subscriber::fmt::time::FormatTime for LangslideTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        w.write_str(&chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string())
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Build the level filter.
///
/// Inputs:
/// - `level`: Level from `--log-level` / `--verbose`.
///
/// Output:
/// - `RUST_LOG` when set, otherwise `level`.
fn env_filter(level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
}

/// What: Initialize logging to `<log_dir>/langslide_<timestamp>.log`, mirrored to stderr.
///
/// Inputs:
/// - `log_dir`: Configured log folder; created when missing.
/// - `level`: Default level filter.
///
/// Details:
/// - Falls back to stderr-only logging when the file cannot be opened.
fn init_logging(log_dir: &Path, level: &str) {
    let file_name = format!("langslide_{}.log", chrono::Local::now().format("%Y%m%d%H%M%S"));
    let log_path = log_dir.join(file_name);
    let opened = std::fs::create_dir_all(log_dir).and_then(|()| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
    });
    match opened {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking.and(std::io::stderr))
                .with_timer(LangslideTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::debug!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(LangslideTimer)
                .init();
            tracing::warn!(
                path = %log_path.display(),
                error = %e,
                "failed to open log file; using stderr"
            );
        }
    }
}

/// Record version and configuration directory once logging is live.
fn log_startup(settings: &Settings) {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_dir = %settings.base_dir.display(),
        "langslide starting"
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = args::Args::parse();

    let settings = match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("langslide: {err}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings.log_dir(), &args::determine_log_level(&args));
    log_startup(&settings);

    match args::run(&args, &settings).await {
        Ok(()) => {
            tracing::info!("langslide finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "run failed");
            eprintln!("langslide: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use langslide::config::Settings;

    /// In-memory log sink.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    /// What: The startup event names the configuration directory.
    ///
    /// Inputs:
    /// - Settings loaded from `/srv/decks`; subscriber writing to memory.
    ///
    /// Output:
    /// - One `langslide starting` line carrying `config_dir=/srv/decks`.
    fn startup_event_reaches_subscriber() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let settings = Settings {
            base_dir: PathBuf::from("/srv/decks"),
            ..Settings::default()
        };
        tracing::subscriber::with_default(subscriber, || super::log_startup(&settings));

        let out = String::from_utf8(captured.0.lock().expect("lock").clone()).expect("utf8");
        assert_eq!(out.matches("langslide starting").count(), 1);
        assert!(out.contains("config_dir=/srv/decks"));
    }

    #[test]
    /// What: The log timer writes a non-empty timestamp.
    ///
    /// Inputs:
    /// - Tracing writer buffer.
    ///
    /// Output:
    /// - Buffer holds a `YYYY-MM-DDTHH:MM:SS` timestamp.
    fn timer_formats_time() {
        use tracing_subscriber::fmt::time::FormatTime;
        let mut buf = String::new();
        let mut writer = tracing_subscriber::fmt::format::Writer::new(&mut buf);
        super::LangslideTimer.format_time(&mut writer).expect("format");
        assert_eq!(buf.len(), 19);
        assert_eq!(&buf[10..11], "T");
    }
}
