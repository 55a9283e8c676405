use thiserror::Error;

use crate::record::OptionDimension;

/// Configuration errors raised while assembling a [`crate::SeriesSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("series name must not be empty")]
    EmptySeriesName,
    #[error("{series}: size identifier must not be empty")]
    EmptySize { series: String },
    #[error("{series}: invalid size identifier '{size}' (no whitespace or '-' allowed)")]
    InvalidSize { series: String, size: String },
    #[error("{series}: duplicate size '{size}'")]
    DuplicateSize { series: String, size: String },
    #[error("{series}: ratio must be a positive integer (got {ratio})")]
    InvalidRatio { series: String, ratio: u32 },
    #[error("{series}: {dimension} option code must not be empty")]
    EmptyOption {
        series: String,
        dimension: OptionDimension,
    },
    #[error("{series}: invalid {dimension} option code '{code}' (no whitespace or '-' allowed)")]
    InvalidOption {
        series: String,
        dimension: OptionDimension,
        code: String,
    },
    #[error("{series}: duplicate {dimension} option '{code}'")]
    DuplicateOption {
        series: String,
        dimension: OptionDimension,
        code: String,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
