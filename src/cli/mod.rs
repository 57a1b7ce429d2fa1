//! Command-line parsing for the yield predictor.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the encoding/inference code. `PredictArgs` plays the role of
//! the input form: it owns the field bounds, so the pipeline never re-checks them.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{CROPS, FieldBounds, RawInput, SOIL_TYPES};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "yieldp", version, about = "AI driven crop yield prediction")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict yield for one set of field values and print the result lines.
    Predict(PredictArgs),
    /// Load the artifact and describe its model, encoders and scaler.
    Inspect(CommonArgs),
    /// Launch the interactive form.
    Tui(CommonArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone, Default)]
pub struct CommonArgs {
    /// Artifact JSON file (default: $YIELDP_ARTIFACT, then modelcheck.json).
    #[arg(short = 'a', long, value_name = "JSON")]
    pub artifact: Option<PathBuf>,

    /// Fail instead of falling back to fixed label positions when the artifact
    /// has no trained encoder for a feature.
    #[arg(long)]
    pub require_encoders: bool,

    /// Write logs to this file (the TUI logs nowhere otherwise).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Field values for `yieldp predict`.
#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Soil type.
    #[arg(long, value_parser = SOIL_TYPES)]
    pub soil_type: String,

    /// Crop.
    #[arg(long, value_parser = CROPS)]
    pub crop: String,

    /// Rainfall in mm (50-4000).
    #[arg(long, value_parser = clap::value_parser!(u32).range(50..=4000))]
    pub rainfall: u32,

    /// Temperature in degrees Celsius (-20.0 to 50.0).
    #[arg(long, allow_negative_numbers = true, value_parser = parse_temperature)]
    pub temperature: f64,

    /// Fertiliser quantity (0.0 to 150000.0).
    #[arg(long, value_parser = parse_fertiliser)]
    pub fertiliser: f64,

    /// Pesticide quantity (0.0 to 1000.0).
    #[arg(long, value_parser = parse_pesticide)]
    pub pesticide: f64,

    /// Land area in acres (0.1 to 100.0).
    #[arg(long, value_parser = parse_land_area)]
    pub land_area: f64,
}

impl PredictArgs {
    pub fn raw_input(&self) -> RawInput {
        RawInput {
            soil_type: self.soil_type.clone(),
            crop: self.crop.clone(),
            rainfall_mm: self.rainfall,
            temperature_celsius: self.temperature,
            fertiliser_quantity: self.fertiliser,
            pesticide_quantity: self.pesticide,
            land_area: self.land_area,
        }
    }
}

fn parse_temperature(s: &str) -> Result<f64, String> {
    parse_bounded(s, FieldBounds::TEMPERATURE)
}

fn parse_fertiliser(s: &str) -> Result<f64, String> {
    parse_bounded(s, FieldBounds::FERTILISER)
}

fn parse_pesticide(s: &str) -> Result<f64, String> {
    parse_bounded(s, FieldBounds::PESTICIDE)
}

fn parse_land_area(s: &str) -> Result<f64, String> {
    parse_bounded(s, FieldBounds::LAND_AREA)
}

fn parse_bounded(s: &str, bounds: FieldBounds) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|e| format!("'{s}' is not a number: {e}"))?;
    if !bounds.contains(value) {
        return Err(format!(
            "{} must be between {} and {}",
            bounds.name, bounds.min, bounds.max
        ));
    }
    Ok(value)
}
