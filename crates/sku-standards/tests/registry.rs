//! Tests for loading and verifying series definitions.

use std::fs;
use std::path::{Path, PathBuf};

use sku_catalog::{expected_count, records};
use sku_standards::hash::sha256_hex;
use sku_standards::{SeriesRegistry, StandardsError};

fn shipped_standards() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

const MINI_SERIES: &str = r#"[series]
code = "MX"
name = "MX Series"
catalog = "mx_skus"
sizes = ["MX042", "MX060"]

[ratios]
one_stage = [3, 5]
two_stage = [15]

[options]
shaft = ["S1"]
backlash = ["P0", "P1"]

[[exclusions]]
kind = "point"
size = "MX060"
ratio = 3
"#;

fn manifest_for(entries: &[(&str, &str, &str)]) -> String {
    let mut out = String::from(
        "[manifest]\nschema = \"sku-catalog.series-manifest\"\nschema_version = 1\n",
    );
    for (code, path, sha) in entries {
        out.push_str(&format!(
            "\n[[series]]\ncode = \"{code}\"\npath = \"{path}\"\nsha256 = \"{sha}\"\n"
        ));
    }
    out
}

fn mini_standards(series_text: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("series/mx.toml"), series_text);
    let sha = sha256_hex(series_text.as_bytes());
    write(
        &dir.path().join("manifest.toml"),
        &manifest_for(&[("MX", "series/mx.toml", &sha)]),
    );
    dir
}

#[test]
fn shipped_series_load_in_manifest_order() {
    let registry = SeriesRegistry::verify_and_load(&shipped_standards()).unwrap();
    assert_eq!(
        registry.codes(),
        vec!["AB", "ABR", "AD", "ADR", "ADS", "AF", "AFR", "AFX", "AFXR"]
    );
}

#[test]
fn shipped_series_row_counts() {
    let registry = SeriesRegistry::verify_and_load(&shipped_standards()).unwrap();
    let expected = [
        ("AB", 2187),
        ("ABR", 2142),
        ("AD", 336),
        ("ADR", 255),
        ("ADS", 378),
        ("AF", 2106),
        ("AFR", 2178),
        ("AFX", 1872),
        ("AFXR", 1908),
    ];
    for (code, rows) in expected {
        let entry = registry.get(code).unwrap();
        assert_eq!(records(&entry.spec).count(), rows, "{code}");
        assert_eq!(expected_count(&entry.spec), rows, "{code}");
    }
}

#[test]
fn shipped_series_shapes() {
    let registry = SeriesRegistry::verify_and_load(&shipped_standards()).unwrap();

    let ad = registry.get("ad").unwrap();
    assert!(!ad.spec.has_shaft());
    assert_eq!(ad.file_name(), "apex_dynamics_ad_skus.csv");
    let first = records(&ad.spec).next().unwrap();
    assert_eq!(first.sku, "AD047-004-P0");
    assert_eq!(first.shaft_option, "N/A");

    let ads = registry.get("ADS").unwrap();
    assert_eq!(ads.spec.shaft_options(), ["S1", "S2"]);

    let abr = registry.get("ABR").unwrap();
    assert_eq!(abr.spec.ratios().len(), 33);
    assert!(abr.spec.is_excluded("ABR060A", 3));
    assert!(abr.spec.is_excluded("ABR042", 120));
    assert!(!abr.spec.is_excluded("ABR180", 120));

    let af = registry.get("AF").unwrap();
    assert!(af.spec.is_excluded("AF075A", 7));
    assert!(!af.spec.is_excluded("AF075A", 6));
}

#[test]
fn loads_minimal_standards_dir() {
    let dir = mini_standards(MINI_SERIES);
    let registry = SeriesRegistry::verify_and_load(dir.path()).unwrap();
    let entry = registry.get("MX").unwrap();
    let skus: Vec<String> = records(&entry.spec).map(|r| r.sku).collect();
    assert_eq!(
        skus,
        vec![
            "MX042-003-S1-P0",
            "MX042-003-S1-P1",
            "MX042-005-S1-P0",
            "MX042-005-S1-P1",
            "MX042-015-S1-P0",
            "MX042-015-S1-P1",
            "MX060-005-S1-P0",
            "MX060-005-S1-P1",
            "MX060-015-S1-P0",
            "MX060-015-S1-P1",
        ]
    );
}

#[test]
fn edited_definition_fails_hash_check() {
    let dir = mini_standards(MINI_SERIES);
    write(
        &dir.path().join("series/mx.toml"),
        &MINI_SERIES.replace("ratio = 3", "ratio = 5"),
    );
    let err = SeriesRegistry::verify_and_load(dir.path()).unwrap_err();
    assert!(matches!(err, StandardsError::Sha256Mismatch { .. }));
}

#[test]
fn stray_file_is_rejected() {
    let dir = mini_standards(MINI_SERIES);
    write(&dir.path().join("series/notes.txt"), "scratch");
    let err = SeriesRegistry::verify_and_load(dir.path()).unwrap_err();
    assert!(matches!(err, StandardsError::UnexpectedFile { .. }));
}

#[test]
fn missing_file_is_reported() {
    let dir = mini_standards(MINI_SERIES);
    fs::remove_file(dir.path().join("series/mx.toml")).unwrap();
    let err = SeriesRegistry::verify_and_load(dir.path()).unwrap_err();
    assert!(matches!(err, StandardsError::MissingFile { .. }));
}

#[test]
fn duplicate_series_code_is_rejected() {
    let dir = mini_standards(MINI_SERIES);
    let sha = sha256_hex(MINI_SERIES.as_bytes());
    write(
        &dir.path().join("manifest.toml"),
        &manifest_for(&[
            ("MX", "series/mx.toml", &sha),
            ("mx", "series/mx.toml", &sha),
        ]),
    );
    let err = SeriesRegistry::verify_and_load(dir.path()).unwrap_err();
    assert!(matches!(err, StandardsError::DuplicateSeries { .. }));
}

#[test]
fn shared_catalog_stem_is_rejected() {
    let dir = mini_standards(MINI_SERIES);
    let other = MINI_SERIES.replace("code = \"MX\"", "code = \"MY\"");
    write(&dir.path().join("series/my.toml"), &other);
    write(
        &dir.path().join("manifest.toml"),
        &manifest_for(&[
            ("MX", "series/mx.toml", &sha256_hex(MINI_SERIES.as_bytes())),
            ("MY", "series/my.toml", &sha256_hex(other.as_bytes())),
        ]),
    );
    let err = SeriesRegistry::verify_and_load(dir.path()).unwrap_err();
    match err {
        StandardsError::DuplicateCatalog { catalog, code } => {
            assert_eq!(catalog, "mx_skus");
            assert_eq!(code, "MY");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn uppercase_pin_is_rejected() {
    let dir = mini_standards(MINI_SERIES);
    let sha = sha256_hex(MINI_SERIES.as_bytes()).to_ascii_uppercase();
    write(
        &dir.path().join("manifest.toml"),
        &manifest_for(&[("MX", "series/mx.toml", &sha)]),
    );
    let err = SeriesRegistry::verify_and_load(dir.path()).unwrap_err();
    assert!(matches!(err, StandardsError::InvalidSha256 { .. }));
}

#[test]
fn shipped_catalog_stems_are_distinct() {
    let registry = SeriesRegistry::verify_and_load(&shipped_standards()).unwrap();
    let names: std::collections::BTreeSet<String> =
        registry.entries().iter().map(|entry| entry.file_name()).collect();
    assert_eq!(names.len(), registry.entries().len());
}

#[test]
fn parent_path_is_rejected() {
    let dir = mini_standards(MINI_SERIES);
    let sha = sha256_hex(MINI_SERIES.as_bytes());
    write(
        &dir.path().join("manifest.toml"),
        &manifest_for(&[("MX", "../mx.toml", &sha)]),
    );
    let err = SeriesRegistry::verify_and_load(dir.path()).unwrap_err();
    assert!(matches!(err, StandardsError::InvalidPath { .. }));
}

#[test]
fn duplicate_size_is_a_configuration_error() {
    let text = MINI_SERIES.replace("\"MX042\", \"MX060\"", "\"MX042\", \"MX042\"");
    let dir = mini_standards(&text);
    let err = SeriesRegistry::verify_and_load(dir.path()).unwrap_err();
    match err {
        StandardsError::Model { code, source } => {
            assert_eq!(code, "MX");
            assert_eq!(source.to_string(), "MX Series: duplicate size 'MX042'");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn code_mismatch_is_rejected() {
    let text = MINI_SERIES.replace("code = \"MX\"", "code = \"MY\"");
    let dir = mini_standards(&text);
    let err = SeriesRegistry::verify_and_load(dir.path()).unwrap_err();
    assert!(matches!(err, StandardsError::InvalidDefinition { .. }));
}

#[test]
fn unsupported_schema_is_rejected() {
    let dir = mini_standards(MINI_SERIES);
    let manifest = fs::read_to_string(dir.path().join("manifest.toml")).unwrap();
    write(
        &dir.path().join("manifest.toml"),
        &manifest.replace("schema_version = 1", "schema_version = 2"),
    );
    let err = SeriesRegistry::verify_and_load(dir.path()).unwrap_err();
    assert!(matches!(err, StandardsError::InvalidManifest { .. }));
}
