//! Braid form parsing and validation.
//!
//! The HTML form posts three text fields. They are parsed into a typed
//! [`CalculationRequest`] using the same range and membership rules as the
//! engine; every offending field gets its own message.

use calc_core::calculations::request::{validate_braid_name, validate_cord_count, validate_wrist_cm};
use calc_core::calculations::CalculationRequest;
use calc_core::{CalcError, Catalog};
use serde::{Deserialize, Serialize};

/// Banner shown above the form when any field is rejected.
pub const FORM_ERROR_MESSAGE: &str = "Please correct the errors in the form.";

const REQUIRED_MESSAGE: &str = "This field is required.";

/// Raw form submission, exactly as posted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BraidForm {
    /// Braid length after deducting the loop (cm)
    #[serde(default)]
    pub wrist: String,
    /// Selected braid pattern name
    #[serde(default)]
    pub knot: String,
    /// Number of cords
    #[serde(default)]
    pub cord_count: String,
}

/// A rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name (`wrist`, `knot` or `cord_count`)
    pub field: &'static str,
    /// Message for the user
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl BraidForm {
    /// Validates the submission against the catalog.
    ///
    /// # Errors
    ///
    /// Returns one [`FieldError`] per invalid field, in form order.
    pub fn validate(&self, catalog: &Catalog) -> Result<CalculationRequest, Vec<FieldError>> {
        let mut errors = Vec::new();

        let wrist_cm = parse_wrist(&self.wrist).map_err(|e| errors.push(e)).ok();
        let braid_name = parse_knot(&self.knot, catalog).map_err(|e| errors.push(e)).ok();
        let cord_count = parse_cord_count(&self.cord_count).map_err(|e| errors.push(e)).ok();

        match (wrist_cm, braid_name, cord_count) {
            (Some(wrist_cm), Some(braid_name), Some(cord_count)) if errors.is_empty() => {
                Ok(CalculationRequest::new(wrist_cm, braid_name, cord_count))
            }
            _ => Err(errors),
        }
    }
}

fn parse_wrist(raw: &str) -> Result<f64, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::new("wrist", REQUIRED_MESSAGE));
    }

    // Accept a decimal comma ("17,5")
    let wrist_cm: f64 = raw
        .replace(',', ".")
        .parse()
        .map_err(|_| FieldError::new("wrist", "Not a valid decimal value."))?;

    validate_wrist_cm(wrist_cm).map_err(|e| FieldError::new("wrist", reason(&e)))?;
    Ok(wrist_cm)
}

fn parse_knot(raw: &str, catalog: &Catalog) -> Result<String, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::new("knot", REQUIRED_MESSAGE));
    }
    validate_braid_name(raw, catalog).map_err(|_| FieldError::new("knot", "Not a valid choice."))?;
    Ok(raw.to_string())
}

fn parse_cord_count(raw: &str) -> Result<u32, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::new("cord_count", REQUIRED_MESSAGE));
    }

    let value: i64 = raw
        .parse()
        .map_err(|_| FieldError::new("cord_count", "Not a valid integer value."))?;

    // Out-of-range negatives get the range message rather than a parse error
    let cord_count = u32::try_from(value).unwrap_or(0);
    validate_cord_count(cord_count).map_err(|e| FieldError::new("cord_count", reason(&e)))?;
    Ok(cord_count)
}

fn reason(error: &CalcError) -> String {
    match error {
        CalcError::InvalidInput { reason, .. } => format!("{reason}."),
        other => other.to_string(),
    }
}
