//! `tracing` subscriber setup.
//!
//! CLI commands log to stderr. The TUI owns the terminal, so it only logs
//! when a log file is configured.

use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::error::{AppError, EXIT_CONFIG};

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Only `Settings::log_file`, if set; otherwise logging stays off.
    FileOnly,
}

pub fn init(settings: &Settings, target: LogTarget) -> Result<(), AppError> {
    let filter = EnvFilter::try_new(&settings.log_filter).map_err(|e| {
        AppError::new(EXIT_CONFIG, format!("Invalid log filter '{}': {e}", settings.log_filter))
    })?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    // `try_init` fails only if a global subscriber already exists (e.g. under
    // the test harness); that is not an error for us.
    match (&settings.log_file, target) {
        (Some(path), _) => {
            let file = File::create(path).map_err(|e| {
                AppError::new(EXIT_CONFIG, format!("Failed to create log file '{}': {e}", path.display()))
            })?;
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
        (None, LogTarget::Stderr) => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
        (None, LogTarget::FileOnly) => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EncoderPolicy;

    fn settings(filter: &str) -> Settings {
        Settings {
            artifact_path: "modelcheck.json".into(),
            encoder_policy: EncoderPolicy::AllowFallback,
            log_filter: filter.to_string(),
            log_file: None,
        }
    }

    #[test]
    fn rejects_invalid_filter() {
        let err = init(&settings("yield_predictor=notalevel"), LogTarget::FileOnly).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_CONFIG);
    }

    #[test]
    fn tui_without_log_file_installs_nothing() {
        assert!(init(&settings("debug"), LogTarget::FileOnly).is_ok());
    }
}
