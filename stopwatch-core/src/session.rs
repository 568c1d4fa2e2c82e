use crate::engine::{Clock, Scheduler, TickHandle, TimerEngine};
use crate::error::StopwatchError;
use crate::export::ExportDocument;
use crate::laps::{LapRecord, LapRecorder, LapRow};
use crate::{format_elapsed, ElapsedParts};

/// State change reported back to the front end for display and feedback.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Notification {
    Started,
    Paused,
    Reset,
    Lap(LapRecord),
    LapsCleared,
}

/// One stopwatch session: the timer engine plus its lap history.
pub struct Stopwatch<C, S> {
    timer: TimerEngine<C, S>,
    laps: LapRecorder,
}

impl<C: Clock, S: Scheduler> Stopwatch<C, S> {
    pub fn new(clock: C, scheduler: S, interval_ms: u64) -> Self {
        Self {
            timer: TimerEngine::new(clock, scheduler, interval_ms),
            laps: LapRecorder::new(),
        }
    }

    pub fn start(&mut self) -> Option<Notification> {
        self.timer.start().then_some(Notification::Started)
    }

    pub fn pause(&mut self) -> Option<Notification> {
        self.timer.pause().then_some(Notification::Paused)
    }

    /// Space-bar semantics: start when stopped, pause when running.
    pub fn toggle(&mut self) -> Option<Notification> {
        if self.can_start() {
            self.start()
        } else if self.can_pause() {
            self.pause()
        } else {
            None
        }
    }

    /// Always succeeds. Clears the lap history as well as the timer.
    pub fn reset(&mut self) -> Notification {
        self.timer.reset();
        self.laps.clear();
        Notification::Reset
    }

    pub fn lap(&mut self) -> Result<Notification, StopwatchError> {
        self.laps.record_lap(&self.timer).map(Notification::Lap)
    }

    /// Clears laps only; allowed in any run state.
    pub fn clear_laps(&mut self) -> Notification {
        self.laps.clear();
        Notification::LapsCleared
    }

    pub fn on_tick(&mut self, handle: TickHandle) -> Option<u64> {
        self.timer.tick(handle)
    }

    pub fn can_start(&self) -> bool {
        !self.timer.is_running()
    }

    pub fn can_pause(&self) -> bool {
        self.timer.is_running()
    }

    pub fn can_lap(&self) -> bool {
        self.timer.is_running()
    }

    pub fn can_reset(&self) -> bool {
        !self.timer.is_running()
    }

    pub fn can_clear_laps(&self) -> bool {
        true
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.timer.elapsed_ms()
    }

    pub fn display(&self) -> ElapsedParts {
        format_elapsed(self.timer.elapsed_ms())
    }

    pub fn timer(&self) -> &TimerEngine<C, S> {
        &self.timer
    }

    pub fn laps(&self) -> &LapRecorder {
        &self.laps
    }

    pub fn lap_rows(&self) -> Vec<LapRow> {
        self.laps.rows()
    }

    pub fn export(&self) -> ExportDocument {
        ExportDocument::new(self.timer.elapsed_ms(), self.laps.history())
    }
}
