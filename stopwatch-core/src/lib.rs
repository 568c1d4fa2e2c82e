//! Pure timekeeping logic for the Stopwatch app.
//! No platform dependencies: the clock and the tick source are supplied by
//! the front end through the [`Clock`] and [`Scheduler`] traits, so the
//! whole engine is testable on host with a manual clock.

mod engine;
mod error;
mod export;
mod laps;
mod session;

pub use engine::{Clock, Scheduler, TickHandle, TimerEngine, DEFAULT_TICK_INTERVAL_MS};
pub use error::StopwatchError;
pub use export::{export_file_name, ExportDocument};
pub use laps::{Badge, LapRecord, LapRecorder, LapRow};
pub use session::{Notification, Stopwatch};

use std::fmt;

/// Elapsed time split into zero-padded display fields.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ElapsedParts {
    pub minutes: String,
    pub seconds: String,
    pub centiseconds: String,
}

impl fmt::Display for ElapsedParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.minutes, self.seconds, self.centiseconds)
    }
}

/// Format milliseconds as minutes, seconds and centiseconds.
/// Minutes are unbounded (no hour rollover).
pub fn format_elapsed(ms: u64) -> ElapsedParts {
    let total_secs = ms / 1000;
    let m = total_secs / 60;
    let s = total_secs % 60;
    let cs = (ms % 1000) / 10;
    ElapsedParts {
        minutes: format!("{:02}", m),
        seconds: format!("{:02}", s),
        centiseconds: format!("{:02}", cs),
    }
}
