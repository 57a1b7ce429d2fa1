//! JSON artifact schema.
//!
//! An artifact is one JSON object with three members:
//!
//! ```text
//! {
//!   "model":   { "kind": "linear" | "tree_ensemble", ... },
//!   "encoder": { "<feature>": { "classes": [...] }, ... },
//!   "scaler":  { "kind": "standard" | "min_max", ... }
//! }
//! ```
//!
//! Parsing is lenient about member presence (each is optional at the serde
//! level) so that a missing member is reported as a malformed artifact rather
//! than a generic parse failure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::artifact::{ArtifactBundle, EncoderBundle, Predictor, Scaler};
use crate::domain::{CROP, SOIL_TYPE};
use crate::error::PipelineError;
use crate::features::{LabelEncoder, MinMaxScaler, StandardScaler};
use crate::models::{LinearRegressor, TreeEnsemble};

/// Serialized model member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    Linear(LinearRegressor),
    TreeEnsemble(TreeEnsemble),
}

/// Serialized scaler member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerSpec {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
}

/// Top-level artifact document as stored on disk.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArtifactDocument {
    #[serde(default)]
    pub model: Option<ModelSpec>,
    #[serde(default)]
    pub encoder: Option<BTreeMap<String, LabelEncoder>>,
    #[serde(default)]
    pub scaler: Option<ScalerSpec>,
}

impl ArtifactDocument {
    /// Validate all three members and build the runtime bundle.
    pub fn into_bundle(self) -> Result<ArtifactBundle, PipelineError> {
        let model = self.model.ok_or_else(|| missing_member("model"))?;
        let encoder = self.encoder.ok_or_else(|| missing_member("encoder"))?;
        let scaler = self.scaler.ok_or_else(|| missing_member("scaler"))?;

        let model: Box<dyn Predictor> = match model {
            ModelSpec::Linear(m) => {
                m.validate()?;
                Box::new(m)
            }
            ModelSpec::TreeEnsemble(m) => {
                m.validate()?;
                Box::new(m)
            }
        };

        let scaler: Box<dyn Scaler> = match scaler {
            ScalerSpec::Standard(s) => {
                s.validate()?;
                Box::new(s)
            }
            ScalerSpec::MinMax(s) => {
                s.validate()?;
                Box::new(s)
            }
        };

        let mut encoders = EncoderBundle::new();
        for (feature, enc) in encoder {
            if feature != SOIL_TYPE && feature != CROP {
                tracing::debug!(%feature, "ignoring encoder for a non-categorical feature");
                continue;
            }
            enc.validate(&feature)?;
            encoders.insert(feature, Box::new(enc));
        }

        Ok(ArtifactBundle {
            model,
            encoders,
            scaler,
        })
    }
}

fn missing_member(name: &str) -> PipelineError {
    PipelineError::ArtifactMalformed(format!("artifact has no '{name}' member"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn full_document() -> serde_json::Value {
        json!({
            "model": { "kind": "linear", "coefficients": [0.1, 0.2, 0.3, 0.4, 0.5, 0.6], "intercept": 1.0 },
            "encoder": {
                "Soil_Type": { "classes": ["Chalky", "Clay", "Loam"] },
                "Region": { "classes": ["North", "South"] }
            },
            "scaler": { "kind": "standard", "mean": [0.0, 0.0, 0.0, 0.0, 0.0, 0.0], "scale": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0] }
        })
    }

    #[test]
    fn complete_document_builds_bundle() {
        let doc: ArtifactDocument = serde_json::from_value(full_document()).unwrap();
        let bundle = doc.into_bundle().unwrap();
        assert_eq!(bundle.model.n_features(), 6);
        assert_eq!(bundle.scaler.n_features(), 6);
        // The unrelated "Region" encoder is dropped.
        assert_eq!(bundle.encoders.features().collect::<Vec<_>>(), vec!["Soil_Type"]);
    }

    #[test]
    fn missing_member_is_malformed() {
        for key in ["model", "encoder", "scaler"] {
            let mut value = full_document();
            value.as_object_mut().unwrap().remove(key);
            let doc: ArtifactDocument = serde_json::from_value(value).unwrap();
            let err = doc.into_bundle().unwrap_err();
            assert_eq!(
                err,
                PipelineError::ArtifactMalformed(format!("artifact has no '{key}' member"))
            );
        }
    }

    #[test]
    fn null_member_is_malformed() {
        let mut value = full_document();
        value["scaler"] = serde_json::Value::Null;
        let doc: ArtifactDocument = serde_json::from_value(value).unwrap();
        assert!(matches!(doc.into_bundle(), Err(PipelineError::ArtifactMalformed(_))));
    }

    #[test]
    fn empty_encoder_mapping_is_allowed() {
        let mut value = full_document();
        value["encoder"] = json!({});
        let doc: ArtifactDocument = serde_json::from_value(value).unwrap();
        let bundle = doc.into_bundle().unwrap();
        assert!(bundle.encoders.is_empty());
    }

    #[test]
    fn model_width_is_not_checked_at_load() {
        let mut value = full_document();
        value["model"]["coefficients"] = json!([1.0, 2.0]);
        let doc: ArtifactDocument = serde_json::from_value(value).unwrap();
        let bundle = doc.into_bundle().unwrap();
        assert_eq!(bundle.model.n_features(), 2);
    }

    #[test]
    fn empty_model_is_malformed() {
        let mut value = full_document();
        value["model"]["coefficients"] = json!([]);
        let doc: ArtifactDocument = serde_json::from_value(value).unwrap();
        assert_eq!(
            doc.into_bundle().unwrap_err(),
            PipelineError::ArtifactMalformed("linear model has no coefficients".to_string())
        );
    }

    #[test]
    fn unknown_model_kind_fails_to_parse() {
        let mut value = full_document();
        value["model"]["kind"] = json!("svr");
        assert!(serde_json::from_value::<ArtifactDocument>(value).is_err());
    }
}
