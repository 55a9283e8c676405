//! CLI library components for the SKU catalog generator.

pub mod logging;
pub mod pipeline;
pub mod types;
