//! # Catalog Loading
//!
//! Loads the braid catalog once at startup, either from the default catalog
//! embedded in the binary or from a JSON file on disk. A catalog that cannot
//! be read or fails validation is a startup error; there is no reload.
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::file_io::{load_catalog, load_embedded_catalog};
//! use std::path::Path;
//!
//! let (catalog, info) = load_embedded_catalog()?;
//! println!("{} patterns from {}", info.pattern_count, info.source);
//!
//! let (custom, _) = load_catalog(Path::new("data/braids.json"))?;
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::errors::{CalcError, CalcResult};

/// File name of the default catalog inside the embedded data folder
pub const DEFAULT_CATALOG_FILE: &str = "braids.json";

/// Default catalog shipped with the crate.
#[derive(Embed)]
#[folder = "data/"]
struct CatalogAssets;

/// Where a catalog came from and when it was loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogInfo {
    /// "embedded:braids.json" or the file path
    pub source: String,
    /// Number of patterns in the catalog
    pub pattern_count: usize,
    /// When the catalog was loaded
    pub loaded_at: DateTime<Utc>,
}

impl CatalogInfo {
    /// Describe a freshly loaded catalog
    pub fn new(source: impl Into<String>, catalog: &Catalog) -> Self {
        CatalogInfo {
            source: source.into(),
            pattern_count: catalog.len(),
            loaded_at: Utc::now(),
        }
    }
}

/// Load the catalog embedded in the binary.
pub fn load_embedded_catalog() -> CalcResult<(Catalog, CatalogInfo)> {
    let file = CatalogAssets::get(DEFAULT_CATALOG_FILE).ok_or_else(|| {
        CalcError::file_error("open embedded", DEFAULT_CATALOG_FILE, "not embedded in binary")
    })?;

    let contents = std::str::from_utf8(file.data.as_ref()).map_err(|e| {
        CalcError::file_error("read embedded", DEFAULT_CATALOG_FILE, e.to_string())
    })?;

    let catalog = Catalog::from_json(contents)?;
    let info = CatalogInfo::new(format!("embedded:{}", DEFAULT_CATALOG_FILE), &catalog);
    Ok((catalog, info))
}

/// Load a catalog from a JSON file.
///
/// # Returns
///
/// * `Ok((Catalog, CatalogInfo))` - Successfully loaded catalog
/// * `Err(CalcError::FileError)` - I/O error
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::InvalidCatalog)` - JSON is valid but the contents are not
pub fn load_catalog(path: &Path) -> CalcResult<(Catalog, CatalogInfo)> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let catalog = Catalog::from_json(&contents).map_err(|e| match e {
        CalcError::SerializationError { reason } => CalcError::SerializationError {
            reason: format!("{} ({})", reason, path.display()),
        },
        other => other,
    })?;

    let info = CatalogInfo::new(path.display().to_string(), &catalog);
    Ok((catalog, info))
}

/// Load from `path` when given, otherwise the embedded catalog.
pub fn load_catalog_from(path: Option<&Path>) -> CalcResult<(Catalog, CatalogInfo)> {
    match path {
        Some(path) => load_catalog(path),
        None => load_embedded_catalog(),
    }
}
