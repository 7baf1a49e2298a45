//! # rxcompare-config
//!
//! TOML configuration for the rxcompare comparator.
//!
//! ## Overview
//!
//! A [`ComparatorConfig`] names the questionnaire order, the label of the
//! cash-price row, the known prices without prior authorization, and where
//! the three reference tables live. [`ComparatorConfig::to_settings`] turns
//! it into the plain `Settings` value the comparator runs on.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use rxcompare_config::ComparatorConfig;
//!
//! let config = ComparatorConfig::from_file(Path::new("config/comparator.toml"))?;
//! let files = config.data.resolved(Path::new("data"));
//! let settings = config.to_settings();
//! ```

pub mod loader;
pub mod schema;

pub use schema::{ComparatorConfig, DataFiles, UnauthorizedCostEntry};

// ── Tests ─────────────────────────────────────────────────────────────────────
