use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::simulator::Sample;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotExport {
    #[serde(rename = "type")]
    pub kind: String,
    pub exported_at: String,
    pub samples: Vec<Sample>,
}

pub fn write_json(path: &Path, history: &[Sample]) -> Result<()> {
    let export = SnapshotExport {
        kind: "snapshot".to_string(),
        exported_at: Utc::now().to_rfc3339(),
        samples: history.to_vec(),
    };

    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &export)?;
    tracing::debug!(path = %path.display(), "JSON snapshot exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let history: Vec<Sample> = (0..3).map(|i| Sample::at(i as f64 * 0.1)).collect();
        write_json(&path, &history).unwrap();

        let parsed: SnapshotExport =
            serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(parsed.kind, "snapshot");
        assert_eq!(parsed.samples, history);
        assert!(chrono::DateTime::parse_from_rfc3339(&parsed.exported_at).is_ok());
    }
}
