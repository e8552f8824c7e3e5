//! One-way dumps of a finished run: CSV time series, JSON snapshot and an SVG chart.

mod csv_export;
mod json_export;
mod svg_export;

pub use csv_export::{write_csv, CsvRecord};
pub use json_export::{write_json, SnapshotExport};
pub use svg_export::write_svg;

use crate::simulator::Sample;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const CSV_FILE: &str = "blood_loss.csv";
pub const JSON_FILE: &str = "blood_loss.json";
pub const SVG_FILE: &str = "blood_loss.svg";

/// Writes all three exports into `dir`, creating it if needed.
pub fn export_all(dir: &Path, history: &[Sample]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;

    let csv_path = dir.join(CSV_FILE);
    write_csv(&csv_path, history)?;
    let json_path = dir.join(JSON_FILE);
    write_json(&json_path, history)?;
    let svg_path = dir.join(SVG_FILE);
    write_svg(&svg_path, history)?;

    tracing::info!(dir = %dir.display(), samples = history.len(), "Exports written");
    Ok(vec![csv_path, json_path, svg_path])
}
