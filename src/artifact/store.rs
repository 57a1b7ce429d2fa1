//! File-backed artifact loading.
//!
//! The store is stateless: every `load` re-reads and re-validates the file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::artifact::{ArtifactBundle, ArtifactDocument};
use crate::error::PipelineError;

/// Anything that can produce a fresh `ArtifactBundle` per submission.
pub trait ArtifactSource {
    fn load(&self) -> Result<ArtifactBundle, PipelineError>;
}

/// Reads one JSON artifact from a fixed path.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    path: PathBuf,
}

impl ArtifactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<ArtifactDocument, PipelineError> {
        let text = fs::read_to_string(&self.path).map_err(|e| PipelineError::ArtifactMissing {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| PipelineError::ArtifactMissing {
            path: self.path.clone(),
            reason: format!("not a valid artifact document: {e}"),
        })
    }
}

impl ArtifactSource for ArtifactStore {
    fn load(&self) -> Result<ArtifactBundle, PipelineError> {
        let bundle = self.read_document()?.into_bundle()?;
        tracing::debug!(
            path = %self.path.display(),
            model = %bundle.model.describe(),
            scaler = %bundle.scaler.describe(),
            encoders = bundle.encoders.len(),
            "loaded artifact"
        );
        Ok(bundle)
    }
}

/// An in-memory document re-validated on every load.
impl ArtifactSource for ArtifactDocument {
    fn load(&self) -> Result<ArtifactBundle, PipelineError> {
        self.clone().into_bundle()
    }
}
