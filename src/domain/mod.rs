//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the fixed categorical domains (`SOIL_TYPES`, `CROPS`) and feature column order
//! - numeric field bounds owned by the input form (`FieldBounds`)
//! - per-submission values (`RawInput`, `FeatureVector`, `YieldEstimate`)

pub mod types;

pub use types::*;
