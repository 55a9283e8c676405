//! Series definitions for the catalog engine.
//!
//! Each product family lives in its own TOML file under `standards/series/`,
//! pinned by SHA-256 in `standards/manifest.toml`. [`SeriesRegistry`] verifies
//! the pins and builds a validated [`sku_model::SeriesSpec`] per family;
//! [`DoctorReport`] audits the exclusion rules.

#![deny(unsafe_code)]

pub mod definition;
pub mod doctor;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod paths;
pub mod registry;

pub use crate::definition::{RatioSelector, RuleDefinition, SeriesDefinition, Stage};
pub use crate::doctor::{DoctorReport, Finding, FindingKind, SeriesAudit, audit_series};
pub use crate::error::StandardsError;
pub use crate::paths::{STANDARDS_ENV_VAR, resolve_standards_dir, standards_root};
pub use crate::registry::{SeriesEntry, SeriesRegistry};
