//! Stall guard for the main loop, backed by the ESP-IDF task watchdog.
//!
//! The budget is counted in ticks rather than wall time: a loop that has
//! not come back to poll the tick flag for [`TICKS_BEFORE_RESET`] periods
//! has lost the beat, and the board resets. A 500 ms beacon therefore gets
//! a shorter leash than a 1 s thermostat.
//!
//! Idle tasks are not watched; the main loop busy-polls and never yields
//! to them. [`MainLoop`](crate::scheduler::MainLoop) calls `feed()` on
//! every poll.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::{info, warn};

use crate::config::SystemConfig;

/// Whole tick periods the main loop may miss before the board resets.
pub const TICKS_BEFORE_RESET: u64 = 5;

/// Reset timeout for `config`, rounded down to whole milliseconds and
/// saturated at `u32::MAX`.
pub fn timeout_ms_for(config: &SystemConfig) -> u32 {
    let ms = config.tick_period_us.saturating_mul(TICKS_BEFORE_RESET) / 1_000;
    u32::try_from(ms).unwrap_or(u32::MAX)
}

pub struct Watchdog {
    timeout_ms: u32,
    armed: bool,
}

impl Watchdog {
    /// Arm the watchdog for the main task with a budget derived from the
    /// configured tick period.
    pub fn for_config(config: &SystemConfig) -> Self {
        let timeout_ms = timeout_ms_for(config);
        let armed = arm(timeout_ms);
        if armed {
            info!("Watchdog: armed, {} ms ({} ticks)", timeout_ms, TICKS_BEFORE_RESET);
        } else {
            warn!("Watchdog: not armed; main loop runs unguarded");
        }
        Self { timeout_ms, armed }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        if self.armed {
            // SAFETY: resets the entry for the calling task, which `arm`
            // subscribed. Main-loop only.
            unsafe {
                esp_task_wdt_reset();
            }
        }
    }
}

#[cfg(target_os = "espidf")]
fn arm(timeout_ms: u32) -> bool {
    let cfg = esp_task_wdt_config_t {
        timeout_ms,
        idle_core_mask: 0,
        trigger_panic: true,
    };
    // SAFETY: init path, before the loop starts; single-threaded.
    let ret = unsafe { esp_task_wdt_reconfigure(&cfg) };
    if ret != ESP_OK as i32 {
        warn!("Watchdog: reconfigure rc={}, keeping the boot timeout", ret);
    }
    // SAFETY: a null handle subscribes the calling task.
    let ret = unsafe { esp_task_wdt_add(core::ptr::null_mut()) };
    if ret != ESP_OK as i32 {
        warn!("Watchdog: subscribe rc={}", ret);
        return false;
    }
    true
}

/// Host builds track the timeout only.
#[cfg(not(target_os = "espidf"))]
fn arm(_timeout_ms: u32) -> bool {
    true
}
