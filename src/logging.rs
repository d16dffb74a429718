//! Per-stage logging setup.
//!
//! Each stage binary constructs one [`LogContext`] at startup, which installs
//! a process-wide subscriber writing events both to the console and to
//! `logs/<stage>.log`. The context is an explicit value held by the entry
//! point rather than ambient mutable state.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::errors::PipelineError;

/// Handle to the logging configuration installed for one stage process.
pub struct LogContext {
    stage: &'static str,
    log_path: PathBuf,
}

impl LogContext {
    /// Stage name the context was initialized for.
    pub fn stage(&self) -> &'static str {
        self.stage
    }

    /// Path of the stage log file.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

/// Shared append handle to the stage log file; one clone per fmt event.
#[derive(Clone)]
struct StageLogWriter(Arc<File>);

impl Write for StageLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self.0).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&*self.0).flush()
    }
}

/// Create the log directory, open `<log_dir>/<stage>.log` for appending, and
/// install a console + file subscriber at debug level (overridable through
/// `RUST_LOG`). Installing twice in one process leaves the first subscriber
/// in place.
pub fn init_stage_logging(
    stage: &'static str,
    log_dir: impl AsRef<Path>,
) -> Result<LogContext, PipelineError> {
    let log_dir = log_dir.as_ref();
    fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(format!("{stage}.log"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    let writer = StageLogWriter(Arc::new(file));

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(move || writer.clone()),
        )
        .try_init();

    Ok(LogContext {
        stage,
        log_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_log_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let context = init_stage_logging("stage_under_test", &log_dir).unwrap();
        assert_eq!(context.stage(), "stage_under_test");
        assert_eq!(context.log_path(), log_dir.join("stage_under_test.log"));
        assert!(context.log_path().exists());
    }
}
