//! Tabular catalog export.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use sku_model::{CATALOG_HEADER, CatalogRecord};
use tracing::debug;

use crate::error::{OutputError, Result};

/// Where and how a catalog was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
}

/// Write the header row followed by every record, in iteration order.
///
/// Rows end in CRLF so exports stay byte-compatible with spreadsheet tooling.
/// Returns the number of data rows written.
pub fn write_catalog<W, I>(writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = CatalogRecord>,
{
    let mut csv = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(writer);
    csv.write_record(CATALOG_HEADER)?;
    let mut rows = 0usize;
    for record in records {
        csv.write_record(record.as_row())?;
        rows += 1;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(rows)
}

/// Write a catalog file atomically.
///
/// Records are streamed into a temporary file next to `path`, which is synced
/// and renamed over `path` only after the last row is written. On any failure
/// the temporary file is removed and an existing `path` is left untouched.
pub fn write_catalog_file<I>(path: &Path, records: I) -> Result<ExportSummary>
where
    I: IntoIterator<Item = CatalogRecord>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| OutputError::io(&dir, e))?;

    let mut temp = tempfile::Builder::new()
        .prefix(".catalog-")
        .suffix(".csv.tmp")
        .tempfile_in(&dir)
        .map_err(|e| OutputError::io(&dir, e))?;

    let rows = {
        let mut buffered = BufWriter::new(temp.as_file_mut());
        let rows = write_catalog(&mut buffered, records)?;
        buffered.flush().map_err(|e| OutputError::io(path, e))?;
        rows
    };
    temp.as_file()
        .sync_all()
        .map_err(|e| OutputError::io(path, e))?;
    debug!(path = %path.display(), rows, "persisting catalog");
    temp.persist(path).map_err(|source| OutputError::Persist {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(ExportSummary {
        path: path.to_path_buf(),
        rows,
    })
}
