//! # Cord Calculations
//!
//! Calculations follow the pattern:
//!
//! - `CalculationRequest` - Input parameters (JSON-serializable)
//! - `CordLength` / `CalculationSummary` - Results (JSON-serializable)
//! - `calculate(...)` - Pure calculation function against an explicit catalog
//!
//! ## Available Calculations
//!
//! - [`cord_length`] - Cord lengths for a bracelet of a given wrist size
//! - [`request`] - Input validation rules

pub mod cord_length;
pub mod request;

// Re-export commonly used types
pub use cord_length::{
    calculate, calculate_for_pattern, cords_total, total_length_cm, try_calculate, CalculationSummary, CordLength,
    LOOP_ALLOWANCE_CM,
};
pub use request::{CalculationRequest, CORD_COUNT_RANGE, WRIST_RANGE_CM};
