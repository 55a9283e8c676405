//! Where series definitions are read from.

use std::path::{Path, PathBuf};

/// Overrides the bundled series definitions directory.
pub const STANDARDS_ENV_VAR: &str = "SKU_STANDARDS_DIR";

/// The bundled `standards/` directory, unless `SKU_STANDARDS_DIR` is set.
pub fn standards_root() -> PathBuf {
    std::env::var_os(STANDARDS_ENV_VAR).map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards"),
        PathBuf::from,
    )
}

/// An explicitly requested directory, falling back to [`standards_root`].
pub fn resolve_standards_dir(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(standards_root, Path::to_path_buf)
}
