//! Artifact Store: the pre-trained model, categorical encoders and scaler.
//!
//! The three members are opaque capabilities to the rest of the crate. The
//! pipeline only talks to them through `Predictor`, `CategoryEncoder` and
//! `Scaler`; the JSON schema that produces them lives in `format`.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::PipelineError;

pub mod format;
pub mod store;

pub use format::{ArtifactDocument, ModelSpec, ScalerSpec};
pub use store::{ArtifactSource, ArtifactStore};

/// A fitted regressor: one feature row in, one scalar out.
pub trait Predictor: fmt::Debug {
    fn n_features(&self) -> usize;

    fn predict(&self, row: &[f64]) -> Result<f64, PipelineError>;

    /// One-line human description (used by `yieldp inspect`).
    fn describe(&self) -> String;
}

/// A fitted categorical encoder: a known label maps to its trained code.
pub trait CategoryEncoder: fmt::Debug {
    /// Trained code of `label`, or `None` if it was not seen during training.
    fn transform(&self, label: &str) -> Option<usize>;

    fn classes(&self) -> &[String];
}

/// A fitted numeric transform over a fixed-width row.
pub trait Scaler: fmt::Debug {
    fn n_features(&self) -> usize;

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, PipelineError>;

    fn describe(&self) -> String;
}

/// Feature name → fitted categorical encoder.
#[derive(Debug, Default)]
pub struct EncoderBundle {
    encoders: BTreeMap<String, Box<dyn CategoryEncoder>>,
}

impl EncoderBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, feature: impl Into<String>, encoder: Box<dyn CategoryEncoder>) {
        self.encoders.insert(feature.into(), encoder);
    }

    pub fn get(&self, feature: &str) -> Option<&dyn CategoryEncoder> {
        self.encoders.get(feature).map(|e| e.as_ref())
    }

    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.encoders.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }
}

/// Model, encoders and scaler loaded together from one artifact.
#[derive(Debug)]
pub struct ArtifactBundle {
    pub model: Box<dyn Predictor>,
    pub encoders: EncoderBundle,
    pub scaler: Box<dyn Scaler>,
}
