//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves settings and starts logging
//! - runs one prediction, inspects the artifact, or launches the TUI form

use clap::Parser;

use crate::artifact::{ArtifactSource, ArtifactStore};
use crate::cli::{Command, CommonArgs, PredictArgs};
use crate::config::Settings;
use crate::error::AppError;
use crate::logging::LogTarget;

pub mod pipeline;

/// Entry point for the `yieldp` binary.
pub fn run() -> Result<(), AppError> {
    // `yieldp` and `yieldp -a model.json` behave like `yieldp tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Predict(args) => handle_predict(args),
        Command::Inspect(args) => handle_inspect(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let settings = Settings::from_args(&args.common);
    crate::logging::init(&settings, LogTarget::Stderr)?;

    let store = ArtifactStore::new(&settings.artifact_path);
    match pipeline::submit(&store, &args.raw_input(), settings.encoder_policy) {
        pipeline::Submission::Predicted { lines, warnings, .. } => {
            for line in lines {
                println!("{line}");
            }
            for warning in warnings {
                eprintln!("{warning}");
            }
            Ok(())
        }
        // Print to stdout like a result and still report failure via the exit code.
        pipeline::Submission::Failed { error, line } => {
            println!("{line}");
            Err(AppError::new(
                crate::error::EXIT_SUBMISSION,
                format!("yieldp: prediction failed ({})", error.kind()),
            ))
        }
    }
}

fn handle_inspect(args: CommonArgs) -> Result<(), AppError> {
    let settings = Settings::from_args(&args);
    crate::logging::init(&settings, LogTarget::Stderr)?;

    let store = ArtifactStore::new(&settings.artifact_path);
    let bundle = store.load()?;
    print!(
        "{}",
        crate::report::format_artifact_summary(&store.path().display().to_string(), &bundle)
    );
    Ok(())
}

fn handle_tui(args: CommonArgs) -> Result<(), AppError> {
    let settings = Settings::from_args(&args);
    crate::logging::init(&settings, LogTarget::FileOnly)?;
    crate::tui::run(settings)
}

/// Rewrite argv so `yieldp` defaults to `yieldp tui`.
///
/// Rules:
/// - `yieldp`                      -> `yieldp tui`
/// - `yieldp -a m.json ...`        -> `yieldp tui -a m.json ...`
/// - `yieldp --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "predict" | "inspect" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["yieldp"])), argv(&["yieldp", "tui"]));
    }

    #[test]
    fn leading_flag_is_routed_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["yieldp", "-a", "m.json"])),
            argv(&["yieldp", "tui", "-a", "m.json"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for args in [&["yieldp", "predict"][..], &["yieldp", "--help"], &["yieldp", "inspect"]] {
            assert_eq!(rewrite_args(argv(args)), argv(args));
        }
    }
}
