//! Formatted output strings.
//!
//! We keep formatting code in one place so that rounding happens only here and
//! the CLI and TUI print identical text.

use crate::artifact::ArtifactBundle;
use crate::domain::{CategoricalDomain, FEATURE_COLUMNS, YieldEstimate};

/// The two result lines shown after a successful prediction.
pub fn format_estimate(estimate: &YieldEstimate) -> [String; 2] {
    [
        format!("Predicted Crop Yield: {:.2} tonnes per acre", estimate.unit_yield),
        format!("Total Crop Yield : {:.2} tonnes", estimate.total_yield),
    ]
}

/// One warning line per feature encoded by fixed label position.
pub fn format_warnings(estimate: &YieldEstimate) -> Vec<String> {
    estimate
        .fallback_features
        .iter()
        .map(|feature| {
            format!("Warning: {feature} encoded by fixed label position (artifact has no trained encoder)")
        })
        .collect()
}

pub fn format_error(message: &str) -> String {
    format!("An Error Occurred: {message}")
}

/// Multi-line artifact description for `yieldp inspect`.
pub fn format_artifact_summary(source: &str, bundle: &ArtifactBundle) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== yieldp - artifact {source} ===\n"));
    out.push_str(&format!("Model:  {}\n", bundle.model.describe()));
    out.push_str(&format!("Scaler: {}\n", bundle.scaler.describe()));
    out.push_str(&format!("Columns: {}\n", FEATURE_COLUMNS.join(", ")));
    out.push_str("Encoders:\n");

    for domain in [CategoricalDomain::SOIL, CategoricalDomain::CROP] {
        match bundle.encoders.get(domain.feature) {
            Some(enc) => {
                out.push_str(&format!("  {}: trained ({} classes)\n", domain.feature, enc.classes().len()));
                for (code, class) in enc.classes().iter().enumerate() {
                    out.push_str(&format!("    {code:>2}  {class}\n"));
                }
                let unseen: Vec<&str> = domain
                    .labels
                    .iter()
                    .copied()
                    .filter(|l| enc.transform(l).is_none())
                    .collect();
                if !unseen.is_empty() {
                    out.push_str(&format!("    not in vocabulary: {}\n", unseen.join(", ")));
                }
            }
            None => {
                out.push_str(&format!("  {}: none (fixed label positions)\n", domain.feature));
            }
        }
    }

    out
}
