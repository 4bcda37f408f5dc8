//! # Calculation Request
//!
//! The typed input for one cord-length calculation and the rules it must
//! satisfy before the calculator runs.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::CalculationRequest;
//! use calc_core::catalog::{BraidPattern, Catalog};
//!
//! let catalog = Catalog::from_patterns(vec![BraidPattern::new("Cobra", 12.0)]).unwrap();
//!
//! let request = CalculationRequest::new(17.5, "Cobra", 2);
//! assert!(request.validate(&catalog).is_ok());
//!
//! let too_small = CalculationRequest::new(9.0, "Cobra", 2);
//! assert!(too_small.validate(&catalog).is_err());
//! ```

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::errors::{CalcError, CalcResult};

/// Accepted wrist lengths (cm), inclusive
pub const WRIST_RANGE_CM: RangeInclusive<f64> = 10.0..=30.0;

/// Accepted cord counts, inclusive
pub const CORD_COUNT_RANGE: RangeInclusive<u32> = 1..=5;

/// Input parameters for a cord-length calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "wrist_cm": 17.5,
///   "braid_name": "Cobra",
///   "cord_count": 2
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Braid length after deducting the clasp loop (cm)
    pub wrist_cm: f64,

    /// Exact name of a catalog pattern
    pub braid_name: String,

    /// Number of cords to split a single-color pattern across
    pub cord_count: u32,
}

impl CalculationRequest {
    /// Create a request. Nothing is checked until [`CalculationRequest::validate`].
    pub fn new(wrist_cm: f64, braid_name: impl Into<String>, cord_count: u32) -> Self {
        CalculationRequest {
            wrist_cm,
            braid_name: braid_name.into(),
            cord_count,
        }
    }

    /// Validate input parameters against the range rules and the catalog.
    ///
    /// Returns the first violation found, checking wrist, braid, then cord count.
    pub fn validate(&self, catalog: &Catalog) -> CalcResult<()> {
        validate_wrist_cm(self.wrist_cm)?;
        validate_braid_name(&self.braid_name, catalog)?;
        validate_cord_count(self.cord_count)?;
        Ok(())
    }
}

/// Check a wrist length against [`WRIST_RANGE_CM`].
pub fn validate_wrist_cm(wrist_cm: f64) -> CalcResult<()> {
    if !wrist_cm.is_finite() {
        return Err(CalcError::invalid_input(
            "wrist_cm",
            wrist_cm.to_string(),
            "Wrist length must be a number",
        ));
    }
    if !WRIST_RANGE_CM.contains(&wrist_cm) {
        return Err(CalcError::invalid_input(
            "wrist_cm",
            wrist_cm.to_string(),
            format!(
                "Wrist length must be between {} and {} cm",
                WRIST_RANGE_CM.start(),
                WRIST_RANGE_CM.end()
            ),
        ));
    }
    Ok(())
}

/// Check that a braid name is non-empty and present in the catalog.
pub fn validate_braid_name(braid_name: &str, catalog: &Catalog) -> CalcResult<()> {
    if braid_name.trim().is_empty() {
        return Err(CalcError::missing_field("braid_name"));
    }
    if !catalog.contains(braid_name) {
        return Err(CalcError::pattern_not_found(braid_name));
    }
    Ok(())
}

/// Check a cord count against [`CORD_COUNT_RANGE`].
pub fn validate_cord_count(cord_count: u32) -> CalcResult<()> {
    if !CORD_COUNT_RANGE.contains(&cord_count) {
        return Err(CalcError::invalid_input(
            "cord_count",
            cord_count.to_string(),
            format!(
                "Cord count must be between {} and {}",
                CORD_COUNT_RANGE.start(),
                CORD_COUNT_RANGE.end()
            ),
        ));
    }
    Ok(())
}
