//! # calc_web - Paracord Braid Calculator Web Frontend
//!
//! Serves the braid form and a small JSON API on top of `calc_core`.
//!
//! ## Modules
//!
//! - [`config`] - TOML configuration with command-line overrides
//! - [`form`] - Form parsing and per-field validation
//! - [`web`] - Router, handlers and server startup

pub mod config;
pub mod form;
pub mod web;

pub use config::Config;
pub use web::{create_router, run_server, AppState};
