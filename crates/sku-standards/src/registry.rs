#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use sku_model::{ExclusionRule, SeriesSpec};
use tracing::debug;

use crate::definition::SeriesDefinition;
use crate::error::StandardsError;
use crate::hash::sha256_hex;
use crate::manifest::{
    MANIFEST_FILE, MANIFEST_SCHEMA, MANIFEST_SCHEMA_VERSION, Manifest, ManifestSeries,
};

/// A verified series: its raw definition, resolved rules and engine input.
#[derive(Debug, Clone)]
pub struct SeriesEntry {
    pub code: String,
    pub path: PathBuf,
    pub definition: SeriesDefinition,
    pub rules: Vec<ExclusionRule>,
    pub spec: SeriesSpec,
}

impl SeriesEntry {
    /// Export file name (`<catalog>.csv`).
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.definition.series.catalog)
    }
}

/// All series listed by a standards manifest, in manifest order.
#[derive(Debug, Clone)]
pub struct SeriesRegistry {
    pub standards_dir: PathBuf,
    pub manifest: Manifest,
    entries: Vec<SeriesEntry>,
}

impl SeriesRegistry {
    /// Verify the manifest and every pinned file, then build each series.
    pub fn verify_and_load(standards_dir: &Path) -> Result<Self, StandardsError> {
        let manifest = load_manifest(&standards_dir.join(MANIFEST_FILE))?;

        validate_manifest(&manifest, standards_dir)?;

        let mut entries = Vec::with_capacity(manifest.series.len());
        let mut catalogs: BTreeSet<String> = BTreeSet::new();
        for series in &manifest.series {
            let bytes = verify_file(standards_dir, series)?;
            let entry = load_entry(standards_dir, series, &bytes)?;
            let catalog = &entry.definition.series.catalog;
            if !catalogs.insert(catalog.to_ascii_lowercase()) {
                return Err(StandardsError::DuplicateCatalog {
                    catalog: catalog.clone(),
                    code: entry.code.clone(),
                });
            }
            debug!(
                code = %entry.code,
                sizes = entry.spec.sizes().len(),
                ratios = entry.spec.ratios().len(),
                rules = entry.rules.len(),
                "loaded series definition"
            );
            entries.push(entry);
        }

        Ok(Self {
            standards_dir: standards_dir.to_path_buf(),
            manifest,
            entries,
        })
    }

    pub fn entries(&self) -> &[SeriesEntry] {
        &self.entries
    }

    /// Look up a series by code, ignoring ASCII case.
    pub fn get(&self, code: &str) -> Option<&SeriesEntry> {
        self.entries
            .iter()
            .find(|entry| entry.code.eq_ignore_ascii_case(code))
    }

    pub fn codes(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.code.as_str()).collect()
    }
}

fn load_manifest(path: &Path) -> Result<Manifest, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    toml::from_str(&contents).map_err(|e| StandardsError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_manifest(manifest: &Manifest, standards_dir: &Path) -> Result<(), StandardsError> {
    if manifest.manifest.schema != MANIFEST_SCHEMA {
        return Err(StandardsError::InvalidManifest {
            message: format!("unsupported schema: {}", manifest.manifest.schema),
        });
    }
    if manifest.manifest.schema_version != MANIFEST_SCHEMA_VERSION {
        return Err(StandardsError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                manifest.manifest.schema_version
            ),
        });
    }

    let mut codes: BTreeSet<String> = BTreeSet::new();
    let mut manifest_paths: BTreeSet<PathBuf> = BTreeSet::new();

    for series in &manifest.series {
        if series.code.trim().is_empty() {
            return Err(StandardsError::InvalidManifest {
                message: format!("empty series code for {}", series.path),
            });
        }
        if !codes.insert(series.code.to_ascii_uppercase()) {
            return Err(StandardsError::DuplicateSeries {
                code: series.code.clone(),
            });
        }

        validate_sha(&series.sha256, &series.path)?;

        let path = validate_path(&series.path)?;
        if !manifest_paths.insert(normalize_path(&path)) {
            return Err(StandardsError::InvalidManifest {
                message: format!("path listed twice: {}", series.path),
            });
        }
    }

    for path in list_files_under(standards_dir)? {
        if path == Path::new(MANIFEST_FILE) {
            continue;
        }
        if !manifest_paths.contains(&normalize_path(&path)) {
            return Err(StandardsError::UnexpectedFile {
                path: standards_dir.join(path),
            });
        }
    }

    Ok(())
}

fn validate_sha(sha: &str, path: &str) -> Result<(), StandardsError> {
    if sha.len() != 64 || !sha.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')) {
        return Err(StandardsError::InvalidSha256 {
            path: PathBuf::from(path),
            message: "expected 64 lowercase hex characters".to_string(),
        });
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<PathBuf, StandardsError> {
    let candidate = PathBuf::from(path);
    if candidate.is_absolute() {
        return Err(StandardsError::InvalidPath {
            path: candidate,
            message: "absolute paths are not allowed".to_string(),
        });
    }
    if candidate
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
    {
        return Err(StandardsError::InvalidPath {
            path: candidate,
            message: "parent directory components are not allowed".to_string(),
        });
    }
    Ok(candidate)
}

fn normalize_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn list_files_under(root: &Path) -> Result<Vec<PathBuf>, StandardsError> {
    let mut files = Vec::new();
    let mut pending = vec![PathBuf::new()];
    while let Some(relative) = pending.pop() {
        let dir = root.join(&relative);
        let entries = std::fs::read_dir(&dir).map_err(|e| StandardsError::io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| StandardsError::io(&dir, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| StandardsError::io(entry.path(), e))?;
            let child = relative.join(entry.file_name());
            if file_type.is_dir() {
                pending.push(child);
            } else {
                files.push(child);
            }
        }
    }
    files.sort();
    Ok(files)
}

fn verify_file(standards_dir: &Path, series: &ManifestSeries) -> Result<Vec<u8>, StandardsError> {
    let full_path = standards_dir.join(&series.path);
    let bytes = std::fs::read(&full_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StandardsError::MissingFile {
                path: full_path.clone(),
            }
        } else {
            StandardsError::io(full_path.clone(), e)
        }
    })?;

    let actual = sha256_hex(&bytes);
    if actual != series.sha256 {
        return Err(StandardsError::Sha256Mismatch {
            path: full_path,
            expected: series.sha256.clone(),
            actual,
        });
    }
    Ok(bytes)
}

fn load_entry(
    standards_dir: &Path,
    series: &ManifestSeries,
    bytes: &[u8],
) -> Result<SeriesEntry, StandardsError> {
    let path = standards_dir.join(&series.path);
    let text = std::str::from_utf8(bytes).map_err(|e| StandardsError::InvalidDefinition {
        path: path.clone(),
        message: format!("not valid UTF-8: {e}"),
    })?;
    let definition: SeriesDefinition =
        toml::from_str(text).map_err(|e| StandardsError::Toml {
            path: path.clone(),
            source: e,
        })?;

    if !definition.series.code.eq_ignore_ascii_case(&series.code) {
        return Err(StandardsError::InvalidDefinition {
            path,
            message: format!(
                "series code '{}' does not match manifest code '{}'",
                definition.series.code, series.code
            ),
        });
    }
    let catalog = definition.series.catalog.as_str();
    if catalog.trim().is_empty() || catalog.contains(['/', '\\']) || catalog.starts_with('.') {
        return Err(StandardsError::InvalidDefinition {
            path,
            message: format!("invalid catalog file stem '{catalog}'"),
        });
    }

    let spec = definition.to_spec().map_err(|source| StandardsError::Model {
        code: series.code.clone(),
        source,
    })?;
    let rules = definition.exclusion_rules();
    for (idx, (rule, resolved)) in definition.exclusions.iter().zip(&rules).enumerate() {
        debug!(
            code = %series.code,
            rule = idx + 1,
            kind = resolved.kind(),
            pairs = resolved.pairs().len(),
            note = rule.note().unwrap_or_default(),
            "exclusion rule"
        );
    }

    Ok(SeriesEntry {
        code: definition.series.code.clone(),
        path,
        definition,
        rules,
        spec,
    })
}
