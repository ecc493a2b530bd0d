//! File logging bootstrap.
//!
//! The TUI owns the terminal, so all diagnostics go to rotating files under
//! the data directory. Initialization happens once per process and never
//! panics; a broken logger only costs the log output.

use std::path::Path;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;

const LOG_FILE_BASENAME: &str = "filament";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

fn default_level() -> &'static str {
    if cfg!(debug_assertions) { "debug" } else { "info" }
}

/// Initializes rotating file logs under `log_dir`. Idempotent; failures are
/// reported but never fatal.
pub fn init(log_dir: &Path) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(log_dir)
        .map_err(|e| format!("failed to create log directory {}: {e}", log_dir.display()))?;

    let logger = Logger::try_with_str(default_level())
        .map_err(|e| format!("invalid log level: {e}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .start()
        .map_err(|e| format!("failed to start logger: {e}"))?;

    let _ = LOGGER.set(logger);
    info!(
        "filament {} started on {}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );
    Ok(())
}
