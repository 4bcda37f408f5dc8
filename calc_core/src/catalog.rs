//! # Braid Catalog
//!
//! Braid pattern records and the read-only catalog they live in.
//!
//! A pattern either consumes cord at a fixed rate and is split evenly across
//! however many cords the user wants, or it defines a fixed multi-color
//! layout whose lengths get scaled to the wrist.
//!
//! ## JSON Format
//!
//! ```json
//! [
//!   { "name": "Cobra", "cord_per_cm": 12.0 },
//!   {
//!     "name": "Cobra Two-Tone",
//!     "cord_per_cm": 12.0,
//!     "colors": [
//!       { "name": "Core", "length_cm": 60.0 },
//!       { "name": "Weave", "length_cm": 240.0, "url": "https://shop.test/weave" }
//!     ]
//!   }
//! ]
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::catalog::{BraidPattern, Catalog, ColorCord};
//!
//! let catalog = Catalog::from_patterns(vec![
//!     BraidPattern::new("Cobra", 12.0),
//!     BraidPattern::new("Two-Tone", 12.0).with_colors(vec![
//!         ColorCord::new("Core", 60.0),
//!         ColorCord::new("Weave", 240.0),
//!     ]),
//! ])
//! .unwrap();
//!
//! assert!(catalog.contains("Cobra"));
//! assert_eq!(catalog.names(), vec!["Cobra", "Two-Tone"]);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// One cord of a multi-color layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorCord {
    /// Display name (e.g., "Core", "Weave")
    pub name: String,

    /// Reference length of this cord in the catalog layout (cm)
    pub length_cm: f64,

    /// Optional link to where this cord can be bought
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ColorCord {
    /// Create a color cord without a link
    pub fn new(name: impl Into<String>, length_cm: f64) -> Self {
        ColorCord {
            name: name.into(),
            length_cm,
            url: None,
        }
    }

    /// Attach a link
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A named braid pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BraidPattern {
    /// Unique pattern name, used as the lookup key
    pub name: String,

    /// Cord consumed per centimeter of finished braid
    pub cord_per_cm: f64,

    /// Fixed color layout, in display order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<ColorCord>>,
}

impl BraidPattern {
    /// Create a single-color pattern
    pub fn new(name: impl Into<String>, cord_per_cm: f64) -> Self {
        BraidPattern {
            name: name.into(),
            cord_per_cm,
            colors: None,
        }
    }

    /// Give the pattern a fixed color layout
    pub fn with_colors(mut self, colors: Vec<ColorCord>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Check if this pattern uses a fixed color layout
    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    /// Sum of the reference color lengths (0 when there is no layout)
    pub fn original_color_total_cm(&self) -> f64 {
        self.colors
            .as_deref()
            .map(|colors| colors.iter().map(|c| c.length_cm).sum())
            .unwrap_or(0.0)
    }

    fn validate(&self) -> CalcResult<()> {
        if self.name.trim().is_empty() {
            return Err(CalcError::invalid_catalog("Pattern name must not be empty"));
        }
        if !self.cord_per_cm.is_finite() || self.cord_per_cm <= 0.0 {
            return Err(CalcError::invalid_catalog(format!(
                "Pattern '{}': cord_per_cm must be a positive number, got {}",
                self.name, self.cord_per_cm
            )));
        }
        if let Some(colors) = &self.colors {
            if colors.is_empty() {
                return Err(CalcError::invalid_catalog(format!(
                    "Pattern '{}': colors list must not be empty",
                    self.name
                )));
            }
            for color in colors {
                if !color.length_cm.is_finite() || color.length_cm < 0.0 {
                    return Err(CalcError::invalid_catalog(format!(
                        "Pattern '{}': color '{}' has invalid length_cm {}",
                        self.name, color.name, color.length_cm
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Read-only collection of braid patterns with O(1) lookup by name.
///
/// Built once at startup and shared by reference; there is no way to add or
/// remove patterns after construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Patterns in source order
    patterns: Vec<BraidPattern>,
    /// Fast lookup by exact pattern name
    lookup: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, validating every pattern.
    ///
    /// # Returns
    ///
    /// * `Ok(Catalog)` - All patterns are valid and uniquely named
    /// * `Err(CalcError::InvalidCatalog)` - Empty catalog, duplicate name, or bad pattern
    pub fn from_patterns(patterns: Vec<BraidPattern>) -> CalcResult<Self> {
        if patterns.is_empty() {
            return Err(CalcError::invalid_catalog("Catalog contains no braid patterns"));
        }

        let mut lookup = HashMap::with_capacity(patterns.len());
        for (idx, pattern) in patterns.iter().enumerate() {
            pattern.validate()?;
            if lookup.insert(pattern.name.clone(), idx).is_some() {
                return Err(CalcError::invalid_catalog(format!(
                    "Duplicate pattern name '{}'",
                    pattern.name
                )));
            }
        }

        Ok(Catalog { patterns, lookup })
    }

    /// Parse and validate a catalog from its JSON representation.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let patterns: Vec<BraidPattern> =
            serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
                reason: format!("Invalid catalog JSON: {}", e),
            })?;
        Self::from_patterns(patterns)
    }

    /// Look up a pattern by exact (case-sensitive) name.
    pub fn get(&self, name: &str) -> Option<&BraidPattern> {
        let idx = self.lookup.get(name)?;
        self.patterns.get(*idx)
    }

    /// Check if a pattern with this exact name exists
    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    /// Pattern names in catalog order (form select choices)
    pub fn names(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.name.as_str()).collect()
    }

    /// All patterns in catalog order
    pub fn patterns(&self) -> &[BraidPattern] {
        &self.patterns
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Always false for a successfully built catalog
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
