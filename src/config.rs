//! Runtime settings.
//!
//! Each setting is taken from the command line first, then from the
//! environment (a `.env` file in the working directory is honoured), then
//! from a built-in default.

use std::path::PathBuf;

use crate::cli::CommonArgs;
use crate::domain::EncoderPolicy;

/// Artifact file used when neither `--artifact` nor `YIELDP_ARTIFACT` is set.
pub const DEFAULT_ARTIFACT: &str = "modelcheck.json";

pub const ENV_ARTIFACT: &str = "YIELDP_ARTIFACT";
pub const ENV_REQUIRE_ENCODERS: &str = "YIELDP_REQUIRE_ENCODERS";
pub const ENV_LOG: &str = "YIELDP_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";
const VERBOSE_LOG_FILTER: &str = "debug";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Artifact path, relative paths resolved against the working directory.
    pub artifact_path: PathBuf,
    pub encoder_policy: EncoderPolicy,
    /// `tracing_subscriber::EnvFilter` directive string.
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings from CLI arguments and the process environment.
    pub fn from_args(args: &CommonArgs) -> Self {
        dotenvy::dotenv().ok();
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// Resolve settings with an explicit environment lookup.
    pub fn resolve(args: &CommonArgs, env: impl Fn(&str) -> Option<String>) -> Self {
        let artifact_path = args
            .artifact
            .clone()
            .or_else(|| env(ENV_ARTIFACT).filter(|v| !v.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT));

        let require = args.require_encoders || env(ENV_REQUIRE_ENCODERS).is_some_and(|v| is_truthy(&v));
        let encoder_policy = if require {
            EncoderPolicy::RequireTrained
        } else {
            EncoderPolicy::AllowFallback
        };

        let log_filter = if args.verbose > 0 {
            VERBOSE_LOG_FILTER.to_string()
        } else {
            env(ENV_LOG)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
        };

        Self {
            artifact_path,
            encoder_policy,
            log_filter,
            log_file: args.log_file.clone(),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
