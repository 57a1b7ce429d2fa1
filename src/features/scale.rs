//! Fitted numeric scalers.
//!
//! - `StandardScaler`: `(x - mean) / scale`, either term optional
//! - `MinMaxScaler`: `x * scale + min`
//!
//! Parameters are checked for internal consistency at load time. The row width
//! is checked against the fitted width in `transform`.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::artifact::Scaler;
use crate::domain::FEATURE_WIDTH;
use crate::error::PipelineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-column mean; absent when fitted without centering.
    #[serde(default)]
    pub mean: Option<Vec<f64>>,
    /// Per-column scale; absent when fitted without unit variance.
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
}

impl StandardScaler {
    /// With neither term present the scaler is the identity.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if let Some(mean) = &self.mean {
            check_params("standard scaler mean", mean)?;
        }
        if let Some(scale) = &self.scale {
            check_params("standard scaler scale", scale)?;
        }
        if let (Some(mean), Some(scale)) = (&self.mean, &self.scale) {
            check_same_len("standard scaler", mean.len(), scale.len())?;
        }
        Ok(())
    }
}

impl Scaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean
            .as_ref()
            .or(self.scale.as_ref())
            .map_or(FEATURE_WIDTH, Vec::len)
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, PipelineError> {
        check_width(self.n_features(), row)?;
        let mut x = DVector::from_column_slice(row);
        if let Some(mean) = &self.mean {
            x -= DVector::from_column_slice(mean);
        }
        if let Some(scale) = &self.scale {
            // A constant column was fitted with scale 0; leave it unscaled.
            let scale = DVector::from_iterator(scale.len(), scale.iter().map(|&s| if s == 0.0 { 1.0 } else { s }));
            x.component_div_assign(&scale);
        }
        Ok(x.as_slice().to_vec())
    }

    fn describe(&self) -> String {
        format!(
            "standard (n_features={}, center={}, scale={})",
            self.n_features(),
            self.mean.is_some(),
            self.scale.is_some()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub min: Vec<f64>,
    pub scale: Vec<f64>,
}

impl MinMaxScaler {
    pub fn validate(&self) -> Result<(), PipelineError> {
        check_params("min-max scaler min", &self.min)?;
        check_params("min-max scaler scale", &self.scale)?;
        check_same_len("min-max scaler", self.min.len(), self.scale.len())
    }
}

impl Scaler for MinMaxScaler {
    fn n_features(&self) -> usize {
        self.scale.len()
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, PipelineError> {
        check_width(self.n_features(), row)?;
        let x = DVector::from_column_slice(row)
            .component_mul(&DVector::from_column_slice(&self.scale))
            + DVector::from_column_slice(&self.min);
        Ok(x.as_slice().to_vec())
    }

    fn describe(&self) -> String {
        format!("min_max (n_features={})", self.n_features())
    }
}

fn check_params(what: &str, values: &[f64]) -> Result<(), PipelineError> {
    if values.is_empty() {
        return Err(PipelineError::ArtifactMalformed(format!("{what} is empty")));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(PipelineError::ArtifactMalformed(format!("{what} contains non-finite values")));
    }
    Ok(())
}

fn check_same_len(what: &str, first: usize, second: usize) -> Result<(), PipelineError> {
    if first != second {
        return Err(PipelineError::ArtifactMalformed(format!(
            "{what} parameters have {first} and {second} entries"
        )));
    }
    Ok(())
}

fn check_width(expected: usize, row: &[f64]) -> Result<(), PipelineError> {
    if row.len() != expected {
        return Err(PipelineError::ScalingError {
            expected,
            actual: row.len(),
        });
    }
    Ok(())
}
