/// Sampling cadence used when the front end does not configure one.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 10;

/// Millisecond time source. Must never go backwards.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Identifies one repeating tick source handed out by a [`Scheduler`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Repeating tick source. Ticks are delivered back to the owner of the
/// engine, which forwards them to [`TimerEngine::tick`]; the scheduler never
/// calls into the engine itself.
pub trait Scheduler {
    fn schedule_repeating(&mut self, interval_ms: u64) -> TickHandle;
    fn cancel(&mut self, handle: TickHandle);
}

/// Run/pause/reset state and elapsed-time bookkeeping.
///
/// While running, elapsed time is measured forward from `anchor_ms`, which
/// is recomputed on every start so paused intervals are never counted.
/// `elapsed_ms` only moves on ticks, so readings are cadence-bound.
pub struct TimerEngine<C, S> {
    clock: C,
    scheduler: S,
    interval_ms: u64,
    running: bool,
    elapsed_ms: u64,
    anchor_ms: u64,
    active_tick: Option<TickHandle>,
}

impl<C: Clock, S: Scheduler> TimerEngine<C, S> {
    pub fn new(clock: C, scheduler: S, interval_ms: u64) -> Self {
        Self {
            clock,
            scheduler,
            interval_ms: interval_ms.max(1),
            running: false,
            elapsed_ms: 0,
            anchor_ms: 0,
            active_tick: None,
        }
    }

    /// Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        // At most one tick source may ever be live
        self.cancel_tick();
        self.anchor_ms = self.clock.now_ms().saturating_sub(self.elapsed_ms);
        self.running = true;
        self.active_tick = Some(self.scheduler.schedule_repeating(self.interval_ms));
        log::debug!(
            "timer started: anchor={}ms elapsed={}ms tick={:?}",
            self.anchor_ms,
            self.elapsed_ms,
            self.active_tick
        );
        true
    }

    /// Returns false if not running. Elapsed time keeps its last sampled value.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.cancel_tick();
        self.running = false;
        log::debug!("timer paused at {}ms", self.elapsed_ms);
        true
    }

    pub fn reset(&mut self) {
        self.cancel_tick();
        self.running = false;
        self.elapsed_ms = 0;
        self.anchor_ms = 0;
        log::debug!("timer reset");
    }

    /// Sample the clock for a tick from `handle`.
    ///
    /// Ticks from a cancelled or superseded source are ignored, as are ticks
    /// arriving while paused. Returns the new elapsed value when applied.
    pub fn tick(&mut self, handle: TickHandle) -> Option<u64> {
        if !self.running || self.active_tick != Some(handle) {
            log::trace!("ignoring stale tick {:?}", handle);
            return None;
        }
        let sampled = self.clock.now_ms().saturating_sub(self.anchor_ms);
        self.elapsed_ms = self.elapsed_ms.max(sampled);
        Some(self.elapsed_ms)
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn anchor_ms(&self) -> u64 {
        self.anchor_ms
    }

    pub fn active_tick(&self) -> Option<TickHandle> {
        self.active_tick
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.active_tick.take() {
            self.scheduler.cancel(handle);
        }
    }
}
