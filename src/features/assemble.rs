//! Feature vector assembly.

use crate::domain::FeatureVector;

/// Build the model input row in `FEATURE_COLUMNS` order.
pub fn assemble(
    soil_code: usize,
    crop_code: usize,
    rainfall_mm: u32,
    temperature_celsius: f64,
    fertiliser_quantity: f64,
    pesticide_quantity: f64,
) -> FeatureVector {
    FeatureVector([
        soil_code as f64,
        crop_code as f64,
        f64::from(rainfall_mm),
        temperature_celsius,
        fertiliser_quantity,
        pesticide_quantity,
    ])
}
