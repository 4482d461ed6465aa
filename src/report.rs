//! 実行レポート（JSON）

use crate::error::Result;
use crate::uploader::{FailedBatch, RunSummary};
use acta_common::{FileOutcome, RunState};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub generated_at: String,
    pub server: String,
    pub state: RunState,
    pub results: Vec<FileOutcome>,
    pub failed_batches: Vec<FailedBatch>,
}

impl RunReport {
    pub fn new(summary: &RunSummary, server: &str) -> Self {
        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            server: server.to_string(),
            state: summary.state,
            results: summary.outcomes.clone(),
            failed_batches: summary.failed_batches.clone(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
