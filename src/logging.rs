//! Tracing subscriber setup
//!
//! The interactive view owns the terminal, so its logs go to a file in the
//! cache directory. One-shot output modes log to stderr. Verbosity follows
//! `RUST_LOG` and defaults to `info`.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Log file name inside the cache directory
pub const LOG_FILE_NAME: &str = "skycast.log";

/// Where log output is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to a file
    File(PathBuf),
    Stderr,
    /// Discard everything (no writable location)
    Disabled,
}

impl LogTarget {
    /// Log file under `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::File(dir.join(LOG_FILE_NAME))
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber
///
/// Calling this twice is harmless; the second subscriber is ignored.
pub fn init(target: LogTarget) -> std::io::Result<()> {
    let result = match target {
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::Disabled => return Ok(()),
    };

    if result.is_ok() {
        tracing::debug!("Logging initialized");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_in_dir_uses_log_file_name() {
        let target = LogTarget::in_dir(Path::new("/tmp/skycast"));
        assert_eq!(target, LogTarget::File(PathBuf::from("/tmp/skycast/skycast.log")));
    }

    #[test]
    fn test_init_file_creates_log() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("logs").join(LOG_FILE_NAME);

        init(LogTarget::File(path.clone())).expect("init should succeed");

        assert!(path.exists());
    }

    #[test]
    fn test_init_disabled_is_noop() {
        assert!(init(LogTarget::Disabled).is_ok());
    }
}
