use std::path::PathBuf;

#[derive(Debug)]
pub struct GenerateResult {
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub series: Vec<SeriesSummary>,
}

impl GenerateResult {
    pub fn total_rows(&self) -> usize {
        self.series.iter().map(|summary| summary.rows).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSummary {
    pub code: String,
    pub name: String,
    pub sizes: usize,
    pub ratios: usize,
    pub excluded_pairs: usize,
    pub rows: usize,
    /// `None` for dry runs.
    pub output: Option<PathBuf>,
}
