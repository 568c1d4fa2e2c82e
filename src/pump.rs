use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::{Duration, Instant};

use stopwatch_core::{Clock, Scheduler, TickHandle};

use crate::AppEvent;

/// Monotonic milliseconds since the app started.
#[derive(Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

#[derive(Debug, PartialEq)]
pub enum PumpControl {
    Start { handle: TickHandle, interval_ms: u64 },
    Stop { handle: TickHandle },
    Quit,
}

/// Scheduler backed by the pump thread. Ticks come back to the main loop
/// as [`AppEvent::Tick`].
pub struct PumpScheduler {
    control: Sender<PumpControl>,
    next_id: u64,
}

impl PumpScheduler {
    pub fn new(control: Sender<PumpControl>) -> Self {
        Self { control, next_id: 0 }
    }

    pub fn quit(&self) {
        self.control.send(PumpControl::Quit).ok();
    }
}

impl Scheduler for PumpScheduler {
    fn schedule_repeating(&mut self, interval_ms: u64) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle::new(self.next_id);
        if self
            .control
            .send(PumpControl::Start { handle, interval_ms })
            .is_err()
        {
            log::error!("pump thread is gone, no ticks for {:?}", handle);
        }
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.control.send(PumpControl::Stop { handle }).ok();
    }
}

/// Sleeps for one interval, posts a tick, repeats. Blocks on the control
/// channel while no tick source is active.
pub fn pump_thread(control: Receiver<PumpControl>, events: Sender<AppEvent>) {
    let mut active: Option<(TickHandle, u64)> = None;

    loop {
        if let Some((handle, interval_ms)) = active {
            std::thread::sleep(Duration::from_millis(interval_ms));
            if events.send(AppEvent::Tick(handle)).is_err() {
                break;
            }
        }

        let message = if active.is_some() {
            match control.try_recv() {
                Ok(msg) => Some(msg),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => break,
            }
        } else {
            match control.recv() {
                Ok(msg) => Some(msg),
                Err(_) => break,
            }
        };

        match message {
            Some(PumpControl::Start { handle, interval_ms }) => {
                active = Some((handle, interval_ms.max(1)));
            }
            Some(PumpControl::Stop { handle }) => {
                if active.map(|(h, _)| h) == Some(handle) {
                    active = None;
                }
            }
            Some(PumpControl::Quit) => break,
            None => {}
        }
    }
    log::debug!("pump thread exiting");
}
