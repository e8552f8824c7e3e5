use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::simulator::Sample;

/// CSV row with fixed-point columns
#[derive(Debug, Clone, Serialize)]
pub struct CsvRecord {
    pub time: String,
    pub without_anh: String,
    pub with_anh: String,
}

impl From<&Sample> for CsvRecord {
    fn from(s: &Sample) -> Self {
        Self {
            time: format!("{:.1}", s.time),
            without_anh: format!("{:.3}", s.without_anh),
            with_anh: format!("{:.3}", s.with_anh),
        }
    }
}

pub fn write_csv(path: &Path, history: &[Sample]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for sample in history {
        writer.serialize(CsvRecord::from(sample))?;
    }
    writer.flush()?;
    tracing::debug!(path = %path.display(), rows = history.len(), "CSV exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_fixed_point_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.csv");
        write_csv(&path, &[Sample::at(0.0), Sample::at(0.1)]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, ["time,without_anh,with_anh", "0.0,2.250,1.863", "0.1,2.228,1.844"]);
    }
}
