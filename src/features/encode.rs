//! Categorical encoding.
//!
//! A label is encoded through the artifact's fitted encoder when one exists
//! for the feature. Otherwise its position in the fixed `CategoricalDomain` is
//! used. The second path can disagree with the code space the model was trained
//! on, so it is reported as `CodeSource::Fallback` and logged as a warning.

use serde::{Deserialize, Serialize};

use crate::artifact::{CategoryEncoder, EncoderBundle};
use crate::domain::{CategoricalDomain, CodeSource, EncodedCategory, EncoderPolicy};
use crate::error::PipelineError;

/// Fitted label encoder: the code of a label is its index in `classes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new<S: Into<String>>(classes: impl IntoIterator<Item = S>) -> Self {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn validate(&self, feature: &str) -> Result<(), PipelineError> {
        if self.classes.is_empty() {
            return Err(PipelineError::ArtifactMalformed(format!(
                "encoder for {feature} has no classes"
            )));
        }
        for (i, class) in self.classes.iter().enumerate() {
            if self.classes[..i].contains(class) {
                return Err(PipelineError::ArtifactMalformed(format!(
                    "encoder for {feature} lists '{class}' more than once"
                )));
            }
        }
        Ok(())
    }
}

impl CategoryEncoder for LabelEncoder {
    fn transform(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// Encode one categorical label.
pub fn encode(
    encoders: &EncoderBundle,
    domain: CategoricalDomain,
    label: &str,
    policy: EncoderPolicy,
) -> Result<EncodedCategory, PipelineError> {
    let unknown = || PipelineError::UnknownCategory {
        feature: domain.feature.to_string(),
        label: label.to_string(),
    };

    if let Some(encoder) = encoders.get(domain.feature) {
        let code = encoder.transform(label).ok_or_else(unknown)?;
        return Ok(EncodedCategory {
            code,
            source: CodeSource::Trained,
        });
    }

    if policy == EncoderPolicy::RequireTrained {
        return Err(PipelineError::ArtifactMalformed(format!(
            "artifact has no trained encoder for {}",
            domain.feature
        )));
    }

    let code = domain.position(label).ok_or_else(unknown)?;
    tracing::warn!(
        feature = domain.feature,
        label,
        code,
        "no trained encoder; using fixed label position"
    );
    Ok(EncodedCategory {
        code,
        source: CodeSource::Fallback,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::{CROPS, SOIL_TYPES};

    fn trained_soil() -> EncoderBundle {
        // Alphabetical, as a fitted label encoder stores its classes.
        let mut sorted = SOIL_TYPES.to_vec();
        sorted.sort_unstable();
        let mut bundle = EncoderBundle::new();
        bundle.insert("Soil_Type", Box::new(LabelEncoder::new(sorted)));
        bundle
    }

    #[rstest]
    #[case("Wheat", 0)]
    #[case("Rice", 1)]
    #[case("Soybean", 2)]
    #[case("Cotton", 3)]
    #[case("Maize", 4)]
    fn fallback_uses_domain_position(#[case] label: &str, #[case] expected: usize) {
        let encoded = encode(
            &EncoderBundle::new(),
            CategoricalDomain::CROP,
            label,
            EncoderPolicy::AllowFallback,
        )
        .unwrap();
        assert_eq!(encoded.code, expected);
        assert_eq!(encoded.source, CodeSource::Fallback);
    }

    #[test]
    fn every_domain_label_has_a_fallback_code() {
        for (i, label) in SOIL_TYPES.iter().enumerate() {
            let e = encode(&EncoderBundle::new(), CategoricalDomain::SOIL, label, EncoderPolicy::default());
            assert_eq!(e.unwrap().code, i);
        }
        for (i, label) in CROPS.iter().enumerate() {
            let e = encode(&EncoderBundle::new(), CategoricalDomain::CROP, label, EncoderPolicy::default());
            assert_eq!(e.unwrap().code, i);
        }
    }

    #[rstest]
    #[case("Chalky", 0)]
    #[case("Clay", 1)]
    #[case("Clay Loam", 2)]
    #[case("Loam", 3)]
    #[case("Peaty", 5)]
    #[case("Silty Clay", 9)]
    fn trained_encoder_wins_over_domain_position(#[case] label: &str, #[case] expected: usize) {
        let encoded = encode(&trained_soil(), CategoricalDomain::SOIL, label, EncoderPolicy::default()).unwrap();
        assert_eq!(encoded.code, expected);
        assert_eq!(encoded.source, CodeSource::Trained);
    }

    #[test]
    fn trained_encoder_rejects_label_it_never_saw() {
        let mut bundle = EncoderBundle::new();
        bundle.insert("Crop", Box::new(LabelEncoder::new(["Rice", "Wheat"])));
        // "Maize" is in the fixed domain but not in the trained vocabulary.
        let err = encode(&bundle, CategoricalDomain::CROP, "Maize", EncoderPolicy::default()).unwrap_err();
        assert_eq!(
            err,
            PipelineError::UnknownCategory {
                feature: "Crop".to_string(),
                label: "Maize".to_string(),
            }
        );
    }

    #[test]
    fn fallback_rejects_label_outside_domain() {
        let err = encode(
            &EncoderBundle::new(),
            CategoricalDomain::SOIL,
            "Basalt",
            EncoderPolicy::AllowFallback,
        )
        .unwrap_err();
        assert_eq!(err.kind(), "unknown_category");
    }

    #[test]
    fn require_trained_refuses_fallback() {
        let err = encode(
            &trained_soil(),
            CategoricalDomain::CROP,
            "Wheat",
            EncoderPolicy::RequireTrained,
        )
        .unwrap_err();
        assert_eq!(
            err,
            PipelineError::ArtifactMalformed("artifact has no trained encoder for Crop".to_string())
        );
    }

    #[test]
    fn duplicate_classes_are_malformed() {
        let enc = LabelEncoder::new(["Rice", "Rice"]);
        assert!(enc.validate("Crop").is_err());
        assert!(LabelEncoder::new(Vec::<String>::new()).validate("Crop").is_err());
    }
}
