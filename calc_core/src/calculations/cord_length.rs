//! # Cord Length Calculation
//!
//! Maps a wrist length, a braid pattern and a cord count to the cords that
//! need to be cut.
//!
//! ## Method
//!
//! 1. `total = (wrist_cm + LOOP_ALLOWANCE_CM) * cord_per_cm`
//! 2. Patterns with a color layout: every reference length is scaled by
//!    `total / sum(reference lengths)` (or left as-is when that sum is zero).
//!    Order, names and links are kept. The cord count plays no part.
//! 3. Other patterns: `total / cord_count`, repeated `cord_count` times.
//!
//! Every length is rounded to 2 decimal places.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::calculate;
//! use calc_core::catalog::{BraidPattern, Catalog, ColorCord};
//!
//! let catalog = Catalog::from_patterns(vec![
//!     BraidPattern::new("Cobra", 0.5),
//!     BraidPattern::new("Duo", 1.0).with_colors(vec![
//!         ColorCord::new("Core", 10.0),
//!         ColorCord::new("Weave", 20.0),
//!     ]),
//! ])
//! .unwrap();
//!
//! // (20 + 3) * 0.5 = 11.5, split across 2 cords
//! let cords = calculate(&catalog, 20.0, "Cobra", 2);
//! assert_eq!(cords.iter().map(|c| c.length_cm).collect::<Vec<_>>(), vec![5.75, 5.75]);
//!
//! // (15 + 3) * 1.0 = 18, ratio 18 / 30 = 0.6
//! let cords = calculate(&catalog, 15.0, "Duo", 2);
//! assert_eq!(cords.iter().map(|c| c.length_cm).collect::<Vec<_>>(), vec![6.0, 12.0]);
//!
//! // Unknown patterns yield nothing
//! assert!(calculate(&catalog, 20.0, "Sailor", 2).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::request::CalculationRequest;
use crate::catalog::{BraidPattern, Catalog};
use crate::errors::{CalcError, CalcResult};
use crate::units::{Centimeters, Feet};

/// Extra length added to the wrist for the loop and closing knot (cm)
pub const LOOP_ALLOWANCE_CM: f64 = 3.0;

/// One cord to cut.
///
/// ## JSON Example
///
/// ```json
/// { "length_cm": 108.0, "name": "Core" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CordLength {
    /// Length to cut, rounded to 2 decimals (cm)
    pub length_cm: f64,

    /// Color name, for patterns with a color layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Purchase link carried over from the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CordLength {
    /// Length converted to feet, for buying cord
    pub fn length_ft(&self) -> f64 {
        Feet::from(Centimeters(self.length_cm)).value()
    }
}

/// A full calculation outcome, as returned by the JSON API.
///
/// ## JSON Example
///
/// ```json
/// {
///   "braid_name": "Cobra",
///   "wrist_cm": 20.0,
///   "total_length_cm": 276.0,
///   "total_length_ft": 9.06,
///   "cords": [{ "length_cm": 138.0 }, { "length_cm": 138.0 }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationSummary {
    /// Pattern the cords were computed for
    pub braid_name: String,

    /// Wrist length used (cm)
    pub wrist_cm: f64,

    /// Sum of all rounded cord lengths (cm)
    pub total_length_cm: f64,

    /// Sum of all rounded cord lengths (ft)
    pub total_length_ft: f64,

    /// Cords to cut, in display order
    pub cords: Vec<CordLength>,
}

impl CalculationSummary {
    fn new(request: &CalculationRequest, cords: Vec<CordLength>) -> Self {
        let total = cords_total(&cords);
        CalculationSummary {
            braid_name: request.braid_name.clone(),
            wrist_cm: request.wrist_cm,
            total_length_cm: total.value(),
            total_length_ft: Feet::from(total).round_hundredths().value(),
            cords,
        }
    }
}

/// Sum of the cord lengths, rounded to 2 decimals.
pub fn cords_total(cords: &[CordLength]) -> Centimeters {
    let total: Centimeters = cords.iter().map(|c| Centimeters(c.length_cm)).sum();
    total.round_hundredths()
}

/// Total cord needed before splitting: `(wrist_cm + LOOP_ALLOWANCE_CM) * cord_per_cm`.
pub fn total_length_cm(wrist_cm: f64, cord_per_cm: f64) -> f64 {
    (wrist_cm + LOOP_ALLOWANCE_CM) * cord_per_cm
}

/// Calculate the cords to cut for a pattern looked up by name.
///
/// Inputs are not range-checked here; use [`try_calculate`] or
/// [`CalculationRequest::validate`] for that.
///
/// # Returns
///
/// The cords to cut, or an empty vector when `braid_name` is not in the catalog.
pub fn calculate(catalog: &Catalog, wrist_cm: f64, braid_name: &str, cord_count: u32) -> Vec<CordLength> {
    match catalog.get(braid_name) {
        Some(pattern) => calculate_for_pattern(pattern, wrist_cm, cord_count),
        None => Vec::new(),
    }
}

/// Validate a request, then calculate it.
///
/// # Returns
///
/// * `Ok(CalculationSummary)` - Calculation results
/// * `Err(CalcError::PatternNotFound)` - Braid name is not in the catalog
/// * `Err(CalcError::InvalidInput)` / `Err(CalcError::MissingField)` - Input out of range
pub fn try_calculate(catalog: &Catalog, request: &CalculationRequest) -> CalcResult<CalculationSummary> {
    request.validate(catalog)?;

    let pattern = catalog
        .get(&request.braid_name)
        .ok_or_else(|| CalcError::pattern_not_found(&request.braid_name))?;

    let cords = calculate_for_pattern(pattern, request.wrist_cm, request.cord_count);
    Ok(CalculationSummary::new(request, cords))
}

/// Calculate the cords to cut for an already resolved pattern.
pub fn calculate_for_pattern(pattern: &BraidPattern, wrist_cm: f64, cord_count: u32) -> Vec<CordLength> {
    let total = total_length_cm(wrist_cm, pattern.cord_per_cm);

    if let Some(colors) = &pattern.colors {
        let original_total = pattern.original_color_total_cm();
        let ratio = if original_total != 0.0 {
            total / original_total
        } else {
            1.0
        };

        return colors
            .iter()
            .map(|color| CordLength {
                length_cm: (Centimeters(color.length_cm) * ratio).round_hundredths().value(),
                name: Some(color.name.clone()),
                url: color.url.clone(),
            })
            .collect();
    }

    if cord_count == 0 {
        return Vec::new();
    }

    let per_cord = (Centimeters(total) / f64::from(cord_count)).round_hundredths();
    (0..cord_count)
        .map(|_| CordLength {
            length_cm: per_cord.value(),
            name: None,
            url: None,
        })
        .collect()
}
