//! Catalog export.
//!
//! One CSV file per series: the fixed header row, then one row per record in
//! enumeration order. File writes are atomic.

pub mod error;
mod writer;

pub use crate::error::{OutputError, Result};
pub use crate::writer::{ExportSummary, write_catalog, write_catalog_file};
