//! Linear regressor: `coefficients · x + intercept`.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::artifact::Predictor;
use crate::error::PipelineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LinearRegressor {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.coefficients.is_empty() {
            return Err(PipelineError::ArtifactMalformed(
                "linear model has no coefficients".to_string(),
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(PipelineError::ArtifactMalformed(
                "linear model contains non-finite parameters".to_string(),
            ));
        }
        Ok(())
    }
}

impl Predictor for LinearRegressor {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, row: &[f64]) -> Result<f64, PipelineError> {
        super::check_row_width(self.n_features(), row)?;
        let beta = DVector::from_column_slice(&self.coefficients);
        let x = DVector::from_column_slice(row);
        super::finite_prediction(beta.dot(&x) + self.intercept)
    }

    fn describe(&self) -> String {
        format!("linear (n_features={})", self.n_features())
    }
}
