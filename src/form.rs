//! Form input shaping.
//!
//! The input form collects free text for seven soil and weather readings.
//! `normalize_form_input` turns that text into a `FeatureVector` or reports
//! the first field that is not a finite number. Range checking is left to the
//! form itself; `FormField::range_hint` exists only so the form can render
//! min/max hints next to each input.

use crate::model::{CrsError, FeatureVector};

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// Unparsed strings exactly as typed into the form. `None` means the field
/// was never filled in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFormInput {
    pub nitrogen: Option<String>,
    pub phosphorus: Option<String>,
    pub potassium: Option<String>,
    pub ph: Option<String>,
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub rainfall: Option<String>,
}

// ---------------------------------------------------------------------------
// Field metadata
// ---------------------------------------------------------------------------

/// One of the seven form inputs, in the order the form lays them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Nitrogen,
    Phosphorus,
    Potassium,
    Ph,
    Temperature,
    Humidity,
    Rainfall,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Nitrogen,
        FormField::Phosphorus,
        FormField::Potassium,
        FormField::Ph,
        FormField::Temperature,
        FormField::Humidity,
        FormField::Rainfall,
    ];

    /// Field name as it appears in the prediction request body.
    pub fn wire_name(self) -> &'static str {
        match self {
            FormField::Nitrogen => "N",
            FormField::Phosphorus => "P",
            FormField::Potassium => "K",
            FormField::Ph => "ph",
            FormField::Temperature => "temperature",
            FormField::Humidity => "humidity",
            FormField::Rainfall => "rainfall",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Nitrogen => "Nitrogen",
            FormField::Phosphorus => "Phosphorus",
            FormField::Potassium => "Potassium",
            FormField::Ph => "pH",
            FormField::Temperature => "Temperature",
            FormField::Humidity => "Humidity",
            FormField::Rainfall => "Rainfall",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            FormField::Nitrogen | FormField::Phosphorus | FormField::Potassium => "kg/ha",
            FormField::Ph => "",
            FormField::Temperature => "°C",
            FormField::Humidity => "%",
            FormField::Rainfall => "mm",
        }
    }

    /// Inclusive (min, max) shown next to the input. Presentational only.
    pub fn range_hint(self) -> (f64, f64) {
        match self {
            FormField::Nitrogen => (0.0, 300.0),
            FormField::Phosphorus => (0.0, 150.0),
            FormField::Potassium => (0.0, 100.0),
            FormField::Ph => (3.0, 10.0),
            FormField::Temperature => (-10.0, 50.0),
            FormField::Humidity => (0.0, 100.0),
            FormField::Rainfall => (0.0, 500.0),
        }
    }

    fn value_in(self, raw: &RawFormInput) -> Option<&str> {
        let value = match self {
            FormField::Nitrogen => &raw.nitrogen,
            FormField::Phosphorus => &raw.phosphorus,
            FormField::Potassium => &raw.potassium,
            FormField::Ph => &raw.ph,
            FormField::Temperature => &raw.temperature,
            FormField::Humidity => &raw.humidity,
            FormField::Rainfall => &raw.rainfall,
        };
        value.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Parses all seven fields into a `FeatureVector`.
///
/// Fails with `CrsError::Validation` naming the first field (in form order)
/// that is missing, blank, or does not parse to a finite number.
pub fn normalize_form_input(raw: &RawFormInput) -> Result<FeatureVector, CrsError> {
    Ok(FeatureVector {
        nitrogen: parse_field(raw, FormField::Nitrogen)?,
        phosphorus: parse_field(raw, FormField::Phosphorus)?,
        potassium: parse_field(raw, FormField::Potassium)?,
        ph: parse_field(raw, FormField::Ph)?,
        temperature: parse_field(raw, FormField::Temperature)?,
        humidity: parse_field(raw, FormField::Humidity)?,
        rainfall: parse_field(raw, FormField::Rainfall)?,
    })
}

fn parse_field(raw: &RawFormInput, field: FormField) -> Result<f64, CrsError> {
    let text = field.value_in(raw).map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(CrsError::Validation {
            field: field.wire_name(),
            reason: "is required".to_string(),
        });
    }

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CrsError::Validation {
            field: field.wire_name(),
            reason: format!("must be a number, got '{}'", text),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(values: [&str; 7]) -> RawFormInput {
        RawFormInput {
            nitrogen: Some(values[0].to_string()),
            phosphorus: Some(values[1].to_string()),
            potassium: Some(values[2].to_string()),
            ph: Some(values[3].to_string()),
            temperature: Some(values[4].to_string()),
            humidity: Some(values[5].to_string()),
            rainfall: Some(values[6].to_string()),
        }
    }

    fn sample() -> RawFormInput {
        filled(["90", "42", "43", "6.5", "20.88", "82.0", "202.9"])
    }

    #[test]
    fn test_valid_input_parses_all_seven_fields() {
        let vector = normalize_form_input(&sample()).expect("sample input is valid");
        assert_eq!(vector.nitrogen, 90.0);
        assert_eq!(vector.phosphorus, 42.0);
        assert_eq!(vector.potassium, 43.0);
        assert_eq!(vector.ph, 6.5);
        assert_eq!(vector.temperature, 20.88);
        assert_eq!(vector.humidity, 82.0);
        assert_eq!(vector.rainfall, 202.9);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raw = sample();
        let first = normalize_form_input(&raw).unwrap();
        let second = normalize_form_input(&raw).unwrap();
        assert_eq!(first, second);
        assert_eq!(raw, sample(), "input must not be modified");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let raw = filled([" 90 ", "42", "43", "6.5\t", "20.88", "82", "202.9"]);
        let vector = normalize_form_input(&raw).unwrap();
        assert_eq!(vector.nitrogen, 90.0);
        assert_eq!(vector.ph, 6.5);
    }

    #[test]
    fn test_out_of_range_values_are_not_rejected() {
        // Range hints are presentational; the client only checks the numbers parse.
        let raw = filled(["900", "42", "43", "14", "20", "82", "202.9"]);
        let vector = normalize_form_input(&raw).unwrap();
        assert_eq!(vector.nitrogen, 900.0);
        assert_eq!(vector.ph, 14.0);
    }

    #[test]
    fn test_missing_field_is_a_validation_error() {
        let mut raw = sample();
        raw.humidity = None;
        match normalize_form_input(&raw) {
            Err(CrsError::Validation { field, reason }) => {
                assert_eq!(field, "humidity");
                assert_eq!(reason, "is required");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_field_is_a_validation_error() {
        let mut raw = sample();
        raw.potassium = Some("   ".to_string());
        assert!(matches!(
            normalize_form_input(&raw),
            Err(CrsError::Validation { field: "K", .. })
        ));
    }

    #[test]
    fn test_non_numeric_field_is_a_validation_error() {
        let mut raw = sample();
        raw.rainfall = Some("lots".to_string());
        assert!(matches!(
            normalize_form_input(&raw),
            Err(CrsError::Validation { field: "rainfall", .. })
        ));
    }

    #[test]
    fn test_nan_and_infinity_are_rejected() {
        for bad in ["NaN", "inf", "-infinity"] {
            let mut raw = sample();
            raw.ph = Some(bad.to_string());
            assert!(
                matches!(normalize_form_input(&raw), Err(CrsError::Validation { field: "ph", .. })),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_first_failing_field_in_form_order_is_reported() {
        let mut raw = sample();
        raw.nitrogen = Some("x".to_string());
        raw.rainfall = None;
        assert!(matches!(
            normalize_form_input(&raw),
            Err(CrsError::Validation { field: "N", .. })
        ));
    }

    #[test]
    fn test_range_hints_are_ordered() {
        for field in FormField::ALL {
            let (min, max) = field.range_hint();
            assert!(min < max, "{} hint should have min < max", field.label());
        }
    }
}
