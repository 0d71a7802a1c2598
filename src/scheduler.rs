//! Foreground main loop.
//!
//! The hardware timer ISR raises a [`TickFlag`]; the main loop busy-polls
//! it, clears it and runs exactly one [`TickTask`] per observed tick.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Timer ISR (esp_timer)          Button ISRs (GPIO NEGEDGE)   │
//! │        │                               │                     │
//! │        ▼                               ▼                     │
//! │    TickFlag.raise()        MessageRequest / SetPointCell     │
//! │        │                               │                     │
//! │ ───────┼───────────────────────────────┼──────── ISR / main ─│
//! │        ▼                               │                     │
//! │    MainLoop.poll_once()                │                     │
//! │        │  take() == true               │                     │
//! │        ▼                               ▼                     │
//! │    TickTask.on_tick()  ◀──── reads the shared cell ─────     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ticks raised while the flag is still pending collapse into one; the
//! loop reports how many were lost but never replays them.

use log::{info, warn};

use crate::app::ports::TickTask;
use crate::drivers::watchdog::Watchdog;
use crate::signals::TickFlag;

/// Busy-polling dispatcher for one [`TickTask`].
pub struct MainLoop<'a, T> {
    tick: &'a TickFlag,
    task: T,
    watchdog: Option<Watchdog>,
    serviced: u64,
    last_coalesced: u32,
}

impl<'a, T: TickTask> MainLoop<'a, T> {
    pub fn new(tick: &'a TickFlag, task: T) -> Self {
        Self {
            tick,
            task,
            watchdog: None,
            serviced: 0,
            last_coalesced: tick.coalesced(),
        }
    }

    /// Feed `watchdog` on every loop iteration.
    #[must_use]
    pub fn with_watchdog(mut self, watchdog: Watchdog) -> Self {
        self.watchdog = Some(watchdog);
        self
    }

    /// Check the flag once. Returns `true` if a tick was serviced.
    pub fn poll_once(&mut self) -> bool {
        if let Some(wdt) = &self.watchdog {
            wdt.feed();
        }

        if !self.tick.take() {
            return false;
        }

        self.task.on_tick();
        self.serviced = self.serviced.wrapping_add(1);

        let coalesced = self.tick.coalesced();
        if coalesced != self.last_coalesced {
            warn!(
                "MainLoop: {} tick(s) coalesced (tick action overran the period)",
                coalesced.wrapping_sub(self.last_coalesced)
            );
            self.last_coalesced = coalesced;
        }
        true
    }

    /// Ticks serviced since construction.
    pub fn serviced(&self) -> u64 {
        self.serviced
    }

    pub fn task(&self) -> &T {
        &self.task
    }

    pub fn task_mut(&mut self) -> &mut T {
        &mut self.task
    }

    /// Poll forever.
    pub fn run(mut self) -> ! {
        info!("MainLoop: running");
        loop {
            self.poll_once();
            core::hint::spin_loop();
        }
    }
}
