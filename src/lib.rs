//! `yield-predictor` library crate.
//!
//! The binary (`yieldp`) is a thin wrapper around this library so that:
//!
//! - the encoding/inference pipeline is testable without spawning processes
//! - the CLI and the TUI form share one submission path

pub mod app;
pub mod artifact;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod features;
pub mod logging;
pub mod models;
pub mod report;
pub mod tui;
