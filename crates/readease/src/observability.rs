//! Logging setup: a compact stderr layer plus an optional JSONL file layer.
//!
//! The file layer is enabled by `READEASE_LOG_PATH` (an exact file),
//! `READEASE_LOG_DIR`, or the `log_dir` config key (daily-rolling files
//! named `readease.jsonl.<date>`). `READEASE_LOG_PATH` wins over the
//! directories; the environment wins over config.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PATH_ENV: &str = "READEASE_LOG_PATH";
const LOG_DIR_ENV: &str = "READEASE_LOG_DIR";
const LOG_FILE_NAME: &str = "readease.jsonl";

/// Where JSONL logs go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Exact log file; never rotated.
    pub log_path: Option<PathBuf>,
    /// Directory for daily-rolling log files.
    pub log_dir: Option<PathBuf>,
}

/// A resolved file destination.
#[derive(Debug, PartialEq, Eq)]
enum FileTarget<'a> {
    Exact { dir: &'a Path, file_name: &'a str },
    Daily { dir: &'a Path },
}

impl ObservabilityConfig {
    /// Read the environment, falling back to `config_log_dir` for the directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            log_path: env_path.filter(|p| !p.as_os_str().is_empty()),
            log_dir: env_dir
                .filter(|p| !p.as_os_str().is_empty())
                .or(config_dir),
        }
    }

    fn file_target(&self) -> Option<FileTarget<'_>> {
        if let Some(ref path) = self.log_path
            && let Some(file_name) = path.file_name().and_then(|n| n.to_str())
        {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            return Some(FileTarget::Exact { dir, file_name });
        }
        self.log_dir
            .as_deref()
            .map(|dir| FileTarget::Daily { dir })
    }
}

/// Level used when `RUST_LOG` is unset.
fn default_level(quiet: bool, verbose: u8, config_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => config_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Build the filter: `RUST_LOG` if set, otherwise the flags and config level.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(quiet, verbose, config_level)))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must live until
/// the process exits.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match config.file_target() {
        Some(target) => {
            let appender = match target {
                FileTarget::Exact { dir, file_name } => {
                    create_dir(dir)?;
                    tracing_appender::rolling::never(dir, file_name)
                }
                FileTarget::Daily { dir } => {
                    create_dir(dir)?;
                    tracing_appender::rolling::daily(dir, LOG_FILE_NAME)
                }
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

fn create_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(default_level(true, 2, "info"), "error");
    }

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_level(false, 0, "warn"), "warn");
        assert_eq!(default_level(false, 1, "warn"), "debug");
        assert_eq!(default_level(false, 3, "warn"), "trace");
    }

    #[test]
    fn no_file_target_by_default() {
        let config = ObservabilityConfig::resolve(None, None, None);
        assert_eq!(config, ObservabilityConfig::default());
        assert!(config.file_target().is_none());
    }

    #[test]
    fn env_dir_wins_over_config_dir() {
        let config = ObservabilityConfig::resolve(
            None,
            Some(PathBuf::from("/var/log/readease")),
            Some(PathBuf::from("/tmp/logs")),
        );
        assert_eq!(
            config.file_target(),
            Some(FileTarget::Daily {
                dir: Path::new("/var/log/readease")
            })
        );
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let config = ObservabilityConfig::resolve(
            Some(PathBuf::new()),
            Some(PathBuf::new()),
            Some(PathBuf::from("/tmp/logs")),
        );
        assert!(config.log_path.is_none());
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
    }

    #[test]
    fn exact_path_wins_over_directories() {
        let config = ObservabilityConfig::resolve(
            Some(PathBuf::from("/tmp/run/score.log")),
            Some(PathBuf::from("/var/log/readease")),
            None,
        );
        assert_eq!(
            config.file_target(),
            Some(FileTarget::Exact {
                dir: Path::new("/tmp/run"),
                file_name: "score.log"
            })
        );
    }

    #[test]
    fn bare_file_name_logs_to_current_dir() {
        let config = ObservabilityConfig::resolve(Some(PathBuf::from("score.log")), None, None);
        assert_eq!(
            config.file_target(),
            Some(FileTarget::Exact {
                dir: Path::new("."),
                file_name: "score.log"
            })
        );
    }
}
