//! # calc_core - Paracord Braid Calculation Engine
//!
//! `calc_core` computes how much paracord a bracelet needs, given the wrist
//! length, a braid pattern from the catalog, and the number of cords. All
//! inputs and outputs are JSON-serializable so the same engine serves both
//! the HTML form and the JSON API.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: The catalog is built once and passed in explicitly
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::catalog::{BraidPattern, Catalog};
//! use calc_core::calculations::calculate;
//!
//! let catalog = Catalog::from_patterns(vec![BraidPattern::new("Cobra", 0.5)]).unwrap();
//!
//! let cords = calculate(&catalog, 20.0, "Cobra", 2);
//! assert_eq!(cords.len(), 2);
//! assert_eq!(cords[0].length_cm, 5.75);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Braid pattern records and the read-only catalog
//! - [`calculations`] - Request validation and the cord-length calculator
//! - [`units`] - Type-safe length wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Catalog loading (embedded default or file on disk)

pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod file_io;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, try_calculate, CalculationRequest, CalculationSummary, CordLength};
pub use catalog::{BraidPattern, Catalog, ColorCord};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_catalog, load_catalog_from, load_embedded_catalog, CatalogInfo};
