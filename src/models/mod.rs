//! Predictor implementations.
//!
//! Models are deserialized straight from the artifact and checked for internal
//! consistency at load time. `predict` checks the row width and the output.

pub mod linear;
pub mod tree;

pub use linear::LinearRegressor;
pub use tree::{Aggregation, RegressionTree, TreeEnsemble};

use crate::error::PipelineError;

fn check_row_width(expected: usize, row: &[f64]) -> Result<(), PipelineError> {
    if row.len() != expected {
        return Err(PipelineError::PredictionError(format!(
            "model expects {expected} features, got {}",
            row.len()
        )));
    }
    Ok(())
}

fn finite_prediction(y: f64) -> Result<f64, PipelineError> {
    if !y.is_finite() {
        return Err(PipelineError::PredictionError(format!("model produced a non-finite value ({y})")));
    }
    Ok(y)
}
