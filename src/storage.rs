use std::path::PathBuf;

use chrono::{DateTime, Local};
use stopwatch_core::{export_file_name, ExportDocument};

use crate::error::AppError;

/// Writes saved times as text files into one directory.
pub struct ExportStorage {
    dir: PathBuf,
}

impl ExportStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn save(&self, doc: &ExportDocument, saved_at: DateTime<Local>) -> Result<PathBuf, AppError> {
        let epoch_ms = u64::try_from(saved_at.timestamp_millis()).unwrap_or(0);
        let path = self.dir.join(export_file_name(epoch_ms));
        let text = doc.to_text(&saved_at.format("%Y-%m-%d %H:%M:%S").to_string());

        std::fs::create_dir_all(&self.dir).map_err(|e| AppError::Export(path.clone(), e))?;
        std::fs::write(&path, text).map_err(|e| AppError::Export(path.clone(), e))?;
        log::info!("saved time to {}", path.display());
        Ok(path)
    }
}
