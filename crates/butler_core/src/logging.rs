//! File logging for one tracker instance.
//!
//! # Responsibility
//! - Start rolling file logs from a [`ButlerConfig`].
//! - Record the version, level and data file a process started with.
//!
//! # Invariants
//! - No `log_dir` means no logger; log macros stay no-ops and core works.
//! - The first successful start wins. Later calls with the same level and
//!   directory succeed; anything else is [`LoggingError::Conflict`].
//! - Relative log directories resolve against the working directory.

use crate::config::ButlerConfig;
use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, LogSpecification, Logger, LoggerHandle,
    Naming, WriteMode,
};
use log::{info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const LOG_FILE_BASENAME: &str = "butler";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    level: LevelFilter,
    log_dir: PathBuf,
    _handle: LoggerHandle,
}

#[derive(Debug)]
pub enum LoggingError {
    InvalidLevel(String),
    EmptyDir,
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Backend(FlexiLoggerError),
    /// Logging already runs with another level or directory.
    Conflict {
        level: LevelFilter,
        log_dir: PathBuf,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected off|error|warn|info|debug|trace"
            ),
            Self::EmptyDir => write!(f, "log_dir cannot be empty"),
            Self::Io { path, source } => {
                write!(f, "cannot prepare log directory `{}`: {source}", path.display())
            }
            Self::Backend(err) => write!(f, "failed to start logger: {err}"),
            Self::Conflict { level, log_dir } => write!(
                f,
                "logging already runs at `{level}` in `{}`",
                log_dir.display()
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FlexiLoggerError> for LoggingError {
    fn from(value: FlexiLoggerError) -> Self {
        Self::Backend(value)
    }
}

/// Starts file logging as configured.
///
/// Returns `Ok(false)` when `config.log_dir` is unset and nothing was started.
///
/// # Errors
/// - `log_level` is not a `log` level name.
/// - `log_dir` is empty or cannot be created.
/// - Logging already runs with a different level or directory.
pub fn init_logging(config: &ButlerConfig) -> Result<bool, LoggingError> {
    let Some(log_dir) = config.log_dir.as_deref() else {
        return Ok(false);
    };
    let level = parse_level(&config.log_level)?;
    let log_dir = resolve_log_dir(log_dir)?;

    let active = ACTIVE_LOGGER.get_or_try_init(|| start(level, &log_dir, config))?;
    if active.level != level || active.log_dir != log_dir {
        return Err(LoggingError::Conflict {
            level: active.level,
            log_dir: active.log_dir.clone(),
        });
    }
    Ok(true)
}

/// Returns the active level and directory, if logging was started.
pub fn logging_status() -> Option<(LevelFilter, PathBuf)> {
    ACTIVE_LOGGER
        .get()
        .map(|active| (active.level, active.log_dir.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(
    level: LevelFilter,
    log_dir: &Path,
    config: &ButlerConfig,
) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(log_dir).map_err(|source| LoggingError::Io {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let spec = LogSpecification::builder().default(level).build();
    let handle = Logger::with(spec)
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
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    info!(
        "event=app_start module=logging status=ok version={} level={} data_file={}",
        crate::core_version(),
        level,
        config.data_file.display()
    );

    Ok(ActiveLogger {
        level,
        log_dir: log_dir.to_path_buf(),
        _handle: handle,
    })
}

fn parse_level(value: &str) -> Result<LevelFilter, LoggingError> {
    LevelFilter::from_str(value.trim())
        .map_err(|_| LoggingError::InvalidLevel(value.trim().to_string()))
}

fn resolve_log_dir(log_dir: &Path) -> Result<PathBuf, LoggingError> {
    if log_dir.as_os_str().is_empty() {
        return Err(LoggingError::EmptyDir);
    }
    if log_dir.is_absolute() {
        return Ok(log_dir.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(log_dir))
        .map_err(|source| LoggingError::Io {
            path: log_dir.to_path_buf(),
            source,
        })
}
