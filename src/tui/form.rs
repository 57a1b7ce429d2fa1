//! Form state for the TUI: seven fields plus a submit row.
//!
//! Categorical fields cycle through the fixed label lists. Numeric fields step
//! by their configured increment and are always clamped to their bounds, so a
//! submitted `RawInput` never needs re-validation.

use crate::domain::{CROPS, FieldBounds, RawInput, SOIL_TYPES};

/// Rows of the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    SoilType,
    Crop,
    Rainfall,
    Temperature,
    Fertiliser,
    Pesticide,
    LandArea,
    Submit,
}

impl Field {
    pub const ALL: [Self; 8] = [
        Self::SoilType,
        Self::Crop,
        Self::Rainfall,
        Self::Temperature,
        Self::Fertiliser,
        Self::Pesticide,
        Self::LandArea,
        Self::Submit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SoilType => "Soil_Type",
            Self::Crop => "Crop",
            Self::Submit => "Predict Yield",
            other => other.bounds().map_or("", |b| b.name),
        }
    }

    pub fn bounds(self) -> Option<FieldBounds> {
        match self {
            Self::Rainfall => Some(FieldBounds::RAINFALL),
            Self::Temperature => Some(FieldBounds::TEMPERATURE),
            Self::Fertiliser => Some(FieldBounds::FERTILISER),
            Self::Pesticide => Some(FieldBounds::PESTICIDE),
            Self::LandArea => Some(FieldBounds::LAND_AREA),
            Self::SoilType | Self::Crop | Self::Submit => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        self.bounds().is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    soil_idx: usize,
    crop_idx: usize,
    rainfall: f64,
    temperature: f64,
    fertiliser: f64,
    pesticide: f64,
    land_area: f64,
}

impl Default for FormState {
    fn default() -> Self {
        let raw = RawInput::default();
        Self {
            soil_idx: 0,
            crop_idx: 0,
            rainfall: f64::from(raw.rainfall_mm),
            temperature: raw.temperature_celsius,
            fertiliser: raw.fertiliser_quantity,
            pesticide: raw.pesticide_quantity,
            land_area: raw.land_area,
        }
    }
}

impl FormState {
    /// Move a field by `steps` increments (or labels, for categorical fields).
    pub fn adjust(&mut self, field: Field, steps: i32) {
        match field {
            Field::SoilType => self.soil_idx = cycle(self.soil_idx, SOIL_TYPES.len(), steps),
            Field::Crop => self.crop_idx = cycle(self.crop_idx, CROPS.len(), steps),
            Field::Submit => {}
            numeric => {
                if let (Some(bounds), Some(slot)) = (numeric.bounds(), self.numeric_mut(numeric)) {
                    *slot = bounds.step_by(*slot, steps);
                }
            }
        }
    }

    /// Set a numeric field from typed text.
    ///
    /// Out-of-range values are clamped and fractional rainfall is rounded; the
    /// returned message says which happened.
    pub fn set_from_text(&mut self, field: Field, text: &str) -> Result<Option<String>, String> {
        let (Some(bounds), Some(slot)) = (field.bounds(), self.numeric_mut(field)) else {
            return Err(format!("{} is not a numeric field", field.label()));
        };
        let value: f64 = text
            .trim()
            .parse()
            .map_err(|_| format!("'{}' is not a number", text.trim()))?;
        if !value.is_finite() {
            return Err(format!("'{}' is not a finite number", text.trim()));
        }
        let clamped = bounds.clamp(value);
        let stored = if field == Field::Rainfall { clamped.round() } else { clamped };
        *slot = stored;
        let action = if clamped != value {
            "clamped"
        } else if stored != clamped {
            "rounded"
        } else {
            return Ok(None);
        };
        Ok(Some(format!(
            "{} {action} to {}",
            bounds.name,
            format_value(field, stored)
        )))
    }

    /// Display text for a field's current value.
    pub fn value_text(&self, field: Field) -> String {
        match field {
            Field::SoilType => SOIL_TYPES[self.soil_idx].to_string(),
            Field::Crop => CROPS[self.crop_idx].to_string(),
            Field::Submit => String::new(),
            numeric => format_value(numeric, self.numeric(numeric)),
        }
    }

    pub fn raw_input(&self) -> RawInput {
        RawInput {
            soil_type: SOIL_TYPES[self.soil_idx].to_string(),
            crop: CROPS[self.crop_idx].to_string(),
            rainfall_mm: self.rainfall.round() as u32,
            temperature_celsius: self.temperature,
            fertiliser_quantity: self.fertiliser,
            pesticide_quantity: self.pesticide,
            land_area: self.land_area,
        }
    }

    fn numeric(&self, field: Field) -> f64 {
        match field {
            Field::Rainfall => self.rainfall,
            Field::Temperature => self.temperature,
            Field::Fertiliser => self.fertiliser,
            Field::Pesticide => self.pesticide,
            Field::LandArea => self.land_area,
            Field::SoilType | Field::Crop | Field::Submit => 0.0,
        }
    }

    fn numeric_mut(&mut self, field: Field) -> Option<&mut f64> {
        match field {
            Field::Rainfall => Some(&mut self.rainfall),
            Field::Temperature => Some(&mut self.temperature),
            Field::Fertiliser => Some(&mut self.fertiliser),
            Field::Pesticide => Some(&mut self.pesticide),
            Field::LandArea => Some(&mut self.land_area),
            Field::SoilType | Field::Crop | Field::Submit => None,
        }
    }
}

fn cycle(idx: usize, len: usize, steps: i32) -> usize {
    let len = len as i64;
    (idx as i64 + i64::from(steps)).rem_euclid(len) as usize
}

fn format_value(field: Field, value: f64) -> String {
    match field {
        Field::Rainfall => format!("{value:.0}"),
        Field::Pesticide => format!("{value:.2}"),
        _ => format!("{value:.1}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorical_fields_wrap_around() {
        let mut form = FormState::default();
        form.adjust(Field::Crop, -1);
        assert_eq!(form.value_text(Field::Crop), "Maize");
        form.adjust(Field::Crop, 2);
        assert_eq!(form.value_text(Field::Crop), "Rice");
        form.adjust(Field::SoilType, 3);
        assert_eq!(form.value_text(Field::SoilType), "Loam");
    }

    #[test]
    fn numeric_steps_stay_in_bounds() {
        let mut form = FormState::default();
        form.adjust(Field::Temperature, -1);
        assert_eq!(form.value_text(Field::Temperature), "-20.0");
        form.adjust(Field::Temperature, 3);
        assert_eq!(form.value_text(Field::Temperature), "-18.5");
        form.adjust(Field::Pesticide, 7);
        assert_eq!(form.value_text(Field::Pesticide), "0.07");
    }

    #[test]
    fn typed_values_are_clamped_and_reported() {
        let mut form = FormState::default();
        assert_eq!(form.set_from_text(Field::Rainfall, "800"), Ok(None));
        let msg = form.set_from_text(Field::LandArea, "250").unwrap();
        assert_eq!(msg.as_deref(), Some("Land_Area clamped to 100.0"));
        assert!(form.set_from_text(Field::Fertiliser, "lots").is_err());
        assert!(form.set_from_text(Field::Crop, "1").is_err());
    }

    #[test]
    fn fractional_rainfall_is_rounded_not_clamped() {
        let mut form = FormState::default();
        let msg = form.set_from_text(Field::Rainfall, "800.4").unwrap();
        assert_eq!(msg.as_deref(), Some("Rainfall_mm rounded to 800"));
        assert_eq!(form.raw_input().rainfall_mm, 800);

        let msg = form.set_from_text(Field::Rainfall, "9000.7").unwrap();
        assert_eq!(msg.as_deref(), Some("Rainfall_mm clamped to 4000"));
    }

    #[test]
    fn raw_input_reflects_form() {
        let mut form = FormState::default();
        form.adjust(Field::SoilType, 3);
        form.set_from_text(Field::Rainfall, "800").unwrap();
        form.set_from_text(Field::Temperature, "22").unwrap();
        form.set_from_text(Field::Fertiliser, "500").unwrap();
        form.set_from_text(Field::Pesticide, "2.5").unwrap();
        form.set_from_text(Field::LandArea, "10").unwrap();
        let raw = form.raw_input();
        assert_eq!(
            raw,
            RawInput {
                soil_type: "Loam".to_string(),
                crop: "Wheat".to_string(),
                rainfall_mm: 800,
                temperature_celsius: 22.0,
                fertiliser_quantity: 500.0,
                pesticide_quantity: 2.5,
                land_area: 10.0,
            }
        );
    }
}
