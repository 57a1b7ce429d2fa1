//! Shared domain types.
//!
//! These cover the raw form values, the fixed categorical domains and the
//! encoded feature vector handed to the scaler and model.

use std::fmt;

/// Name of the soil-type feature column.
pub const SOIL_TYPE: &str = "Soil_Type";
/// Name of the crop feature column.
pub const CROP: &str = "Crop";

/// Number of model input columns.
pub const FEATURE_WIDTH: usize = 6;

/// Model input columns in training order.
pub const FEATURE_COLUMNS: [&str; FEATURE_WIDTH] = [
    SOIL_TYPE,
    CROP,
    "Rainfall_mm",
    "Temperature_Celsius",
    "Fertiliser_Quantity",
    "Pesticide_Quantity",
];

/// Fixed soil-type labels. The position of a label is its fallback code.
pub const SOIL_TYPES: [&str; 10] = [
    "Peaty",
    "Clay",
    "Silty Clay",
    "Loam",
    "Sandy Loam",
    "Chalky",
    "Sandy",
    "Loamy Sand",
    "Silt Loam",
    "Clay Loam",
];

/// Fixed crop labels. The position of a label is its fallback code.
pub const CROPS: [&str; 5] = ["Wheat", "Rice", "Soybean", "Cotton", "Maize"];

/// An ordered, hand-authored list of labels for one categorical feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoricalDomain {
    pub feature: &'static str,
    pub labels: &'static [&'static str],
}

impl CategoricalDomain {
    pub const SOIL: Self = Self {
        feature: SOIL_TYPE,
        labels: &SOIL_TYPES,
    };

    pub const CROP: Self = Self {
        feature: CROP,
        labels: &CROPS,
    };

    /// Zero-based position of `label`, if the domain lists it.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| *l == label)
    }
}

/// Inclusive bounds and step of a numeric form field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl FieldBounds {
    pub const RAINFALL: Self = Self {
        name: "Rainfall_mm",
        min: 50.0,
        max: 4000.0,
        step: 1.0,
    };
    pub const TEMPERATURE: Self = Self {
        name: "Temperature_Celsius",
        min: -20.0,
        max: 50.0,
        step: 0.5,
    };
    pub const FERTILISER: Self = Self {
        name: "Fertiliser_Quantity",
        min: 0.0,
        max: 150000.0,
        step: 0.5,
    };
    pub const PESTICIDE: Self = Self {
        name: "Pesticide_Quantity",
        min: 0.0,
        max: 1000.0,
        step: 0.01,
    };
    pub const LAND_AREA: Self = Self {
        name: "Land_Area",
        min: 0.1,
        max: 100.0,
        step: 0.1,
    };

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// Move `value` by `steps` increments, clamped to the bounds.
    ///
    /// The result is snapped to the step grid so repeated stepping does not
    /// accumulate floating-point drift (0.1 + 0.1 + 0.1 ...).
    pub fn step_by(&self, value: f64, steps: i32) -> f64 {
        let raw = value + self.step * f64::from(steps);
        let snapped = ((raw - self.min) / self.step).round() * self.step + self.min;
        self.clamp(snapped)
    }
}

/// Raw values captured from one form submission.
///
/// Numeric bounds are owned by the form; the pipeline does not re-check them.
#[derive(Debug, Clone, PartialEq)]
pub struct RawInput {
    pub soil_type: String,
    pub crop: String,
    pub rainfall_mm: u32,
    pub temperature_celsius: f64,
    pub fertiliser_quantity: f64,
    pub pesticide_quantity: f64,
    /// Post-hoc multiplier; never fed to the model.
    pub land_area: f64,
}

impl Default for RawInput {
    /// First label of each domain and the minimum of each numeric field.
    fn default() -> Self {
        Self {
            soil_type: SOIL_TYPES[0].to_string(),
            crop: CROPS[0].to_string(),
            rainfall_mm: FieldBounds::RAINFALL.min as u32,
            temperature_celsius: FieldBounds::TEMPERATURE.min,
            fertiliser_quantity: FieldBounds::FERTILISER.min,
            pesticide_quantity: FieldBounds::PESTICIDE.min,
            land_area: FieldBounds::LAND_AREA.min,
        }
    }
}

/// Where an encoded categorical code came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSource {
    /// The artifact's fitted encoder.
    Trained,
    /// Position in the fixed `CategoricalDomain` (artifact had no encoder).
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedCategory {
    pub code: usize,
    pub source: CodeSource,
}

/// Model input in `FEATURE_COLUMNS` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_WIDTH]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

/// Result of one successful prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldEstimate {
    /// Tonnes per unit land area.
    pub unit_yield: f64,
    /// `unit_yield * land_area`, unrounded.
    pub total_yield: f64,
    /// Features whose code came from the fixed label position.
    pub fallback_features: Vec<&'static str>,
}

/// Whether the encoder may fall back to fixed label positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncoderPolicy {
    #[default]
    AllowFallback,
    RequireTrained,
}
