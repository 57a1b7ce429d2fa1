//! Shared prediction pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load artifact -> encode categories -> assemble row -> scale -> predict
//!
//! The front-ends only render a `Submission`.

use crate::artifact::{ArtifactBundle, ArtifactSource};
use crate::domain::{
    CategoricalDomain, CodeSource, EncoderPolicy, FeatureVector, RawInput, YieldEstimate,
};
use crate::error::PipelineError;
use crate::features::{assemble, encode};

/// Outcome of one form submission, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Predicted {
        estimate: YieldEstimate,
        lines: [String; 2],
        warnings: Vec<String>,
    },
    Failed {
        error: PipelineError,
        line: String,
    },
}

impl Submission {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Predicted { .. })
    }

    /// All user-visible lines in display order.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Predicted { lines, warnings, .. } => lines.iter().chain(warnings).cloned().collect(),
            Self::Failed { line, .. } => vec![line.clone()],
        }
    }
}

/// Run one submission end to end, converting any failure into an error line.
///
/// Nothing is retried and nothing here is fatal; the caller can submit again.
pub fn submit(source: &dyn ArtifactSource, raw: &RawInput, policy: EncoderPolicy) -> Submission {
    match run_prediction(source, raw, policy) {
        Ok(estimate) => {
            let lines = crate::report::format_estimate(&estimate);
            let warnings = crate::report::format_warnings(&estimate);
            Submission::Predicted {
                estimate,
                lines,
                warnings,
            }
        }
        Err(error) => {
            tracing::error!(kind = error.kind(), %error, "prediction failed");
            let line = crate::report::format_error(&error.to_string());
            Submission::Failed { error, line }
        }
    }
}

/// Load the artifact and produce a yield estimate for `raw`.
pub fn run_prediction(
    source: &dyn ArtifactSource,
    raw: &RawInput,
    policy: EncoderPolicy,
) -> Result<YieldEstimate, PipelineError> {
    let span = tracing::info_span!(
        "yield.predict",
        soil_type = %raw.soil_type,
        crop = %raw.crop,
        land_area = raw.land_area,
    );
    let _enter = span.enter();

    // 1) Fresh artifact per submission.
    let bundle = source.load()?;

    // 2) Encode categoricals.
    let soil = encode(&bundle.encoders, CategoricalDomain::SOIL, &raw.soil_type, policy)?;
    let crop = encode(&bundle.encoders, CategoricalDomain::CROP, &raw.crop, policy)?;

    let mut fallback_features = Vec::new();
    for (domain, encoded) in [(CategoricalDomain::SOIL, soil), (CategoricalDomain::CROP, crop)] {
        if encoded.source == CodeSource::Fallback {
            fallback_features.push(domain.feature);
        }
    }

    // 3) Assemble the row in training column order.
    let vector = assemble(
        soil.code,
        crop.code,
        raw.rainfall_mm,
        raw.temperature_celsius,
        raw.fertiliser_quantity,
        raw.pesticide_quantity,
    );
    tracing::debug!(%vector, "assembled feature vector");

    // 4) Scale and predict.
    let mut estimate = predict(&bundle, &vector, raw.land_area)?;
    estimate.fallback_features = fallback_features;
    tracing::info!(
        unit_yield = estimate.unit_yield,
        total_yield = estimate.total_yield,
        "prediction complete"
    );
    Ok(estimate)
}

/// Scale `vector`, run the model, and derive the total over `land_area`.
pub fn predict(
    bundle: &ArtifactBundle,
    vector: &FeatureVector,
    land_area: f64,
) -> Result<YieldEstimate, PipelineError> {
    let scaled = bundle.scaler.transform(vector.as_slice())?;
    let unit_yield = bundle.model.predict(&scaled)?;
    Ok(YieldEstimate {
        unit_yield,
        total_yield: unit_yield * land_area,
        fallback_features: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::artifact::{ArtifactDocument, ModelSpec, ScalerSpec};
    use crate::features::{LabelEncoder, StandardScaler};
    use crate::models::LinearRegressor;

    fn document(encoders: BTreeMap<String, LabelEncoder>) -> ArtifactDocument {
        ArtifactDocument {
            model: Some(ModelSpec::Linear(LinearRegressor {
                coefficients: vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
                intercept: 0.0,
            })),
            encoder: Some(encoders),
            scaler: Some(ScalerSpec::Standard(StandardScaler {
                mean: None,
                scale: Some(vec![1.0, 1.0, 100.0, 10.0, 100.0, 1.0]),
            })),
        }
    }

    fn raw() -> RawInput {
        RawInput {
            soil_type: "Loam".to_string(),
            crop: "Wheat".to_string(),
            rainfall_mm: 800,
            temperature_celsius: 22.0,
            fertiliser_quantity: 500.0,
            pesticide_quantity: 2.5,
            land_area: 10.0,
        }
    }

    #[test]
    fn fallback_codes_feed_the_model() {
        let doc = document(BTreeMap::new());
        let estimate = run_prediction(&doc, &raw(), EncoderPolicy::AllowFallback).unwrap();
        // 3 + 0 + 8 + 2.2 + 5 + 2.5
        assert!((estimate.unit_yield - 20.7).abs() < 1e-9);
        assert_eq!(estimate.total_yield, estimate.unit_yield * 10.0);
        assert_eq!(estimate.fallback_features, vec!["Soil_Type", "Crop"]);
    }

    #[test]
    fn trained_codes_produce_no_warnings() {
        let mut encoders = BTreeMap::new();
        encoders.insert("Soil_Type".to_string(), LabelEncoder::new(["Clay", "Loam"]));
        encoders.insert("Crop".to_string(), LabelEncoder::new(["Rice", "Wheat"]));
        let doc = document(encoders);
        let sub = submit(&doc, &raw(), EncoderPolicy::AllowFallback);
        match sub {
            Submission::Predicted { estimate, warnings, .. } => {
                // 1 + 1 + 8 + 2.2 + 5 + 2.5
                assert!((estimate.unit_yield - 19.7).abs() < 1e-9);
                assert!(warnings.is_empty());
            }
            other => panic!("expected a prediction, got {other:?}"),
        }
    }

    #[test]
    fn failure_becomes_single_error_line() {
        let doc = ArtifactDocument::default();
        let sub = submit(&doc, &raw(), EncoderPolicy::AllowFallback);
        assert!(!sub.is_success());
        assert_eq!(
            sub.lines(),
            vec!["An Error Occurred: malformed artifact: artifact has no 'model' member".to_string()]
        );
    }

    /// Scaler that drops the last column, so its output no longer fits the model.
    #[derive(Debug)]
    struct TruncatingScaler;

    impl crate::artifact::Scaler for TruncatingScaler {
        fn n_features(&self) -> usize {
            6
        }

        fn transform(&self, row: &[f64]) -> Result<Vec<f64>, PipelineError> {
            Ok(row[..row.len() - 1].to_vec())
        }

        fn describe(&self) -> String {
            "truncating".to_string()
        }
    }

    #[test]
    fn model_width_mismatch_is_prediction_error() {
        let mut bundle = document(BTreeMap::new()).into_bundle().unwrap();
        bundle.scaler = Box::new(TruncatingScaler);
        let err = predict(&bundle, &FeatureVector([0.0; 6]), 1.0).unwrap_err();
        assert_eq!(
            err,
            PipelineError::PredictionError("model expects 6 features, got 5".to_string())
        );
    }
}
