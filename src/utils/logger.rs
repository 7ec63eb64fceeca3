use crate::config::LogConfig;
use crate::utils::error::{GreeterError, Result};
use crate::utils::log_file::{scan_log_directory, DailyLogWriter};
use crate::utils::log_format::LineFormat;
use chrono::{Days, Local, NaiveDate};
use std::fs;
use tracing::Dispatch;
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

const CRATE_TARGET: &str = "greeter";

/// Target for events carrying internal error details. Only the file sink
/// accepts it, so these never reach the console.
pub const DIAGNOSTICS_TARGET: &str = "greeter::diagnostics";

struct LogSession {
    dispatch: Dispatch,
    // Dropping the guard drains the queue and closes the file.
    _guard: WorkerGuard,
}

/// Owns the console and daily file sinks and the retention policy for the
/// log directory.
///
/// No global subscriber is installed; callers run their work under
/// [`LogManager::dispatch`].
pub struct LogManager {
    config: LogConfig,
    console: Option<BoxMakeWriter>,
    session: Option<LogSession>,
}

impl LogManager {
    /// Manager whose console sink writes to stdout.
    pub fn new(config: LogConfig) -> Self {
        Self::with_console(config, std::io::stdout)
    }

    /// Manager whose console sink writes to `console` instead of stdout.
    pub fn with_console<W>(config: LogConfig, console: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        Self {
            config,
            console: Some(BoxMakeWriter::new(console)),
            session: None,
        }
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// Creates the log directory, attaches the sinks and prunes stale files.
    ///
    /// Calling this again on an initialized manager does nothing.
    pub fn initialize(&mut self) -> Result<()> {
        if self.session.is_some() {
            return Ok(());
        }

        let directory = &self.config.log_directory;
        fs::create_dir_all(directory).map_err(|source| GreeterError::FileSystem {
            path: directory.clone(),
            source,
        })?;
        let file_writer =
            DailyLogWriter::new(directory).map_err(|source| GreeterError::FileSystem {
                path: directory.clone(),
                source,
            })?;
        let log_path = file_writer.current_path();
        let (non_blocking, guard) = NonBlockingBuilder::default()
            .lossy(false)
            .finish(file_writer);

        let console_level = if self.config.verbose { "debug" } else { "info" };
        let console_filter = EnvFilter::new(format!(
            "{}={},{}=off",
            CRATE_TARGET, console_level, DIAGNOSTICS_TARGET
        ));
        let console_writer = self
            .console
            .take()
            .unwrap_or_else(|| BoxMakeWriter::new(std::io::stdout));
        let file_filter = EnvFilter::new(format!("{}=debug", CRATE_TARGET));

        let subscriber = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(LineFormat::simple())
                    .with_ansi(false)
                    .with_writer(console_writer)
                    .with_filter(console_filter),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(LineFormat::detailed())
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .with_filter(file_filter),
            );

        let dispatch = Dispatch::new(subscriber);
        self.session = Some(LogSession {
            dispatch: dispatch.clone(),
            _guard: guard,
        });

        tracing::dispatcher::with_default(&dispatch, || {
            self.cleanup_old_logs();
            tracing::info!("Logging system initialized successfully");
            tracing::debug!("Detailed log file: {}", log_path.display());
        });
        Ok(())
    }

    /// The configured sink, or `None` before [`LogManager::initialize`].
    pub fn dispatch(&self) -> Option<&Dispatch> {
        self.session.as_ref().map(|session| &session.dispatch)
    }

    pub fn cleanup_old_logs(&self) -> usize {
        self.cleanup_old_logs_as_of(Local::now().date_naive())
    }

    /// Deletes `app_<YYYYMMDD>.log` files dated strictly before
    /// `today - retention_days`. Per-file failures are logged and skipped.
    pub fn cleanup_old_logs_as_of(&self, today: NaiveDate) -> usize {
        let _span = tracing::debug_span!("cleanup_old_logs").entered();

        let Some(cutoff) = today.checked_sub_days(Days::new(self.config.retention_days.into()))
        else {
            return 0;
        };

        let (log_files, unparsed) = match scan_log_directory(&self.config.log_directory) {
            Ok(scan) => scan,
            Err(e) => {
                tracing::warn!(
                    "Failed to read log directory {}: {}",
                    self.config.log_directory.display(),
                    e
                );
                return 0;
            }
        };

        for path in &unparsed {
            tracing::warn!("Skipping log file with unrecognised name: {}", path.display());
        }

        let mut deleted = 0;
        for log_file in log_files.iter().filter(|log_file| log_file.date < cutoff) {
            match fs::remove_file(&log_file.path) {
                Ok(()) => {
                    deleted += 1;
                    tracing::debug!("Removed old log file: {}", log_file.path.display());
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to remove old log file {}: {}",
                        log_file.path.display(),
                        e
                    );
                }
            }
        }

        if deleted > 0 {
            tracing::info!(
                "Removed {} log file(s) older than {} day(s)",
                deleted,
                self.config.retention_days
            );
        }
        deleted
    }
}
