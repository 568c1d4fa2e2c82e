use crate::engine::{Clock, Scheduler, TimerEngine};
use crate::error::StopwatchError;

/// One recorded split. Immutable once created.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LapRecord {
    lap_number: u32,
    elapsed_ms: u64,
}

impl LapRecord {
    pub fn lap_number(&self) -> u32 {
        self.lap_number
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Badge {
    Fastest,
    Slowest,
}

/// A lap as presented in the lap list.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LapRow {
    pub lap: LapRecord,
    pub badge: Option<Badge>,
}

/// Ordered lap history, oldest first.
#[derive(Default)]
pub struct LapRecorder {
    laps: Vec<LapRecord>,
    counter: u32,
}

impl LapRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the engine's current elapsed value as the next lap.
    /// Rejected without touching the history when the timer is not running.
    pub fn record_lap<C: Clock, S: Scheduler>(
        &mut self,
        engine: &TimerEngine<C, S>,
    ) -> Result<LapRecord, StopwatchError> {
        if !engine.is_running() {
            return Err(StopwatchError::InvalidState("lap requested while timer is not running"));
        }
        self.counter += 1;
        let record = LapRecord {
            lap_number: self.counter,
            elapsed_ms: engine.elapsed_ms(),
        };
        self.laps.push(record);
        log::debug!("lap {} recorded at {}ms", record.lap_number, record.elapsed_ms);
        Ok(record)
    }

    pub fn clear(&mut self) {
        self.laps.clear();
        self.counter = 0;
    }

    pub fn history(&self) -> &[LapRecord] {
        &self.laps
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    /// Fastest and slowest laps, ties going to the earlier lap.
    /// A single lap is never ranked against itself.
    pub fn fastest_and_slowest(&self) -> (Option<LapRecord>, Option<LapRecord>) {
        if self.laps.len() < 2 {
            return (None, None);
        }
        let fastest = self.laps.iter().copied().min_by(|a, b| {
            a.elapsed_ms
                .cmp(&b.elapsed_ms)
                .then(a.lap_number.cmp(&b.lap_number))
        });
        let slowest = self.laps.iter().copied().max_by(|a, b| {
            a.elapsed_ms
                .cmp(&b.elapsed_ms)
                .then(b.lap_number.cmp(&a.lap_number))
        });
        (fastest, slowest)
    }

    /// Rows for the lap list, most recent first. When one lap is both
    /// fastest and slowest it is only marked fastest.
    pub fn rows(&self) -> Vec<LapRow> {
        let (fastest, slowest) = self.fastest_and_slowest();
        self.laps
            .iter()
            .rev()
            .map(|lap| {
                let badge = if Some(*lap) == fastest {
                    Some(Badge::Fastest)
                } else if Some(*lap) == slowest {
                    Some(Badge::Slowest)
                } else {
                    None
                };
                LapRow { lap: *lap, badge }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DEFAULT_TICK_INTERVAL_MS;
    use crate::testing::{ManualClock, RecordingScheduler};

    type Engine = TimerEngine<ManualClock, RecordingScheduler>;

    fn running_engine() -> (Engine, ManualClock) {
        let clock = ManualClock::default();
        let mut engine = TimerEngine::new(
            clock.clone(),
            RecordingScheduler::default(),
            DEFAULT_TICK_INTERVAL_MS,
        );
        engine.start();
        (engine, clock)
    }

    fn lap_at(recorder: &mut LapRecorder, engine: &mut Engine, clock: &ManualClock, ms: u64) -> LapRecord {
        clock.set(ms);
        let handle = engine.active_tick().unwrap();
        engine.tick(handle);
        recorder.record_lap(engine).unwrap()
    }

    fn recorder_with(times: &[u64]) -> LapRecorder {
        let (mut engine, clock) = running_engine();
        let mut recorder = LapRecorder::new();
        // Laps are snapshots of a monotonic clock, so feed them through a
        // fresh engine each time to get arbitrary values.
        for &t in times {
            engine.reset();
            clock.set(0);
            engine.start();
            lap_at(&mut recorder, &mut engine, &clock, t);
        }
        recorder
    }

    #[test]
    fn test_record_lap_requires_running() {
        let clock = ManualClock::default();
        let engine = TimerEngine::new(clock, RecordingScheduler::default(), 10);
        let mut recorder = LapRecorder::new();
        assert!(matches!(
            recorder.record_lap(&engine),
            Err(StopwatchError::InvalidState(_))
        ));
        assert!(recorder.is_empty());
        assert_eq!(recorder.counter(), 0);
    }

    #[test]
    fn test_lap_numbers_gapless_across_pauses() {
        let (mut engine, clock) = running_engine();
        let mut recorder = LapRecorder::new();
        lap_at(&mut recorder, &mut engine, &clock, 1000);
        engine.pause();
        assert!(recorder.record_lap(&engine).is_err());
        clock.set(3000);
        engine.start();
        lap_at(&mut recorder, &mut engine, &clock, 4000);
        lap_at(&mut recorder, &mut engine, &clock, 4500);

        let numbers: Vec<u32> = recorder.history().iter().map(|l| l.lap_number()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        let times: Vec<u64> = recorder.history().iter().map(|l| l.elapsed_ms()).collect();
        assert_eq!(times, vec![1000, 2000, 2500]);
    }

    #[test]
    fn test_clear_resets_counter() {
        let recorder_laps = [100, 200];
        let mut recorder = recorder_with(&recorder_laps);
        assert_eq!(recorder.counter(), 2);
        recorder.clear();
        assert!(recorder.is_empty());
        assert_eq!(recorder.counter(), 0);

        let (mut engine, clock) = running_engine();
        let lap = lap_at(&mut recorder, &mut engine, &clock, 50);
        assert_eq!(lap.lap_number(), 1);
    }

    #[test]
    fn test_fastest_and_slowest_needs_two_laps() {
        assert_eq!(LapRecorder::new().fastest_and_slowest(), (None, None));
        assert_eq!(recorder_with(&[300]).fastest_and_slowest(), (None, None));
    }

    #[test]
    fn test_fastest_and_slowest() {
        let recorder = recorder_with(&[100, 50, 200]);
        let (fastest, slowest) = recorder.fastest_and_slowest();
        assert_eq!(fastest.unwrap().elapsed_ms(), 50);
        assert_eq!(fastest.unwrap().lap_number(), 2);
        assert_eq!(slowest.unwrap().elapsed_ms(), 200);
        assert_eq!(slowest.unwrap().lap_number(), 3);
    }

    #[test]
    fn test_ties_go_to_earliest_lap() {
        let recorder = recorder_with(&[70, 40, 70, 40]);
        let (fastest, slowest) = recorder.fastest_and_slowest();
        assert_eq!(fastest.unwrap().lap_number(), 2);
        assert_eq!(slowest.unwrap().lap_number(), 1);
    }

    #[test]
    fn test_rows_most_recent_first_with_badges() {
        let recorder = recorder_with(&[100, 50, 200]);
        let rows = recorder.rows();
        let numbers: Vec<u32> = rows.iter().map(|r| r.lap.lap_number()).collect();
        assert_eq!(numbers, vec![3, 2, 1]);
        assert_eq!(rows[0].badge, Some(Badge::Slowest));
        assert_eq!(rows[1].badge, Some(Badge::Fastest));
        assert_eq!(rows[2].badge, None);
    }

    #[test]
    fn test_single_lap_has_no_badge() {
        let rows = recorder_with(&[100]).rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].badge, None);
    }

    #[test]
    fn test_equal_laps_marked_fastest_once() {
        let rows = recorder_with(&[80, 80]).rows();
        assert_eq!(rows[0].badge, None);
        assert_eq!(rows[1].badge, Some(Badge::Fastest));
    }
}
