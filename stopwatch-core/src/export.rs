use crate::laps::LapRecord;
use crate::{format_elapsed, ElapsedParts};

/// Data handed to the export sink when the user saves.
#[derive(Clone, Debug)]
pub struct ExportDocument {
    time: ElapsedParts,
    laps: Vec<LapRecord>,
}

impl ExportDocument {
    pub fn new(elapsed_ms: u64, laps: &[LapRecord]) -> Self {
        Self {
            time: format_elapsed(elapsed_ms),
            laps: laps.to_vec(),
        }
    }

    pub fn time(&self) -> &ElapsedParts {
        &self.time
    }

    pub fn laps(&self) -> &[LapRecord] {
        &self.laps
    }

    /// Plain-text rendering. `saved_at` is a preformatted local timestamp.
    pub fn to_text(&self, saved_at: &str) -> String {
        let mut out = format!(
            "Stopwatch Time\n\nTime: {}\nSaved: {}\n\nLap Times:\n",
            self.time, saved_at
        );
        let lines: Vec<String> = self
            .laps
            .iter()
            .map(|lap| format!("Lap {}: {}", lap.lap_number(), format_elapsed(lap.elapsed_ms())))
            .collect();
        out.push_str(&lines.join("\n"));
        out
    }
}

/// File name for an export taken at `epoch_ms` (Unix milliseconds).
pub fn export_file_name(epoch_ms: u64) -> String {
    format!("stopwatch-{}.txt", epoch_ms)
}
