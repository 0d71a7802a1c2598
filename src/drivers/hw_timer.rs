//! Periodic tick timer using ESP-IDF's esp_timer API.
//!
//! One continuous auto-reload timer per image. Its callback does nothing
//! but [`TickFlag::raise`]. On simulation targets a background thread
//! sleeps for the period instead.
//!
//! Timer callbacks execute in the ESP timer task context (not ISR), which
//! is more than enough for a single atomic swap.

use crate::drivers::hw_init::HwInitError;
use crate::signals::TickFlag;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

/// Handle to a running tick timer. Dropping it does not stop the timer;
/// call [`TickTimer::stop`].
pub struct TickTimer {
    period_us: u64,
    #[cfg(target_os = "espidf")]
    handle: esp_timer_handle_t,
    #[cfg(not(target_os = "espidf"))]
    running: std::sync::Arc<core::sync::atomic::AtomicBool>,
}

impl TickTimer {
    pub fn period_us(&self) -> u64 {
        self.period_us
    }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tick_cb(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the `&'static TickFlag` passed to `start_tick_timer`.
    let flag = unsafe { &*(arg as *const TickFlag) };
    flag.raise();
}

/// Start a periodic timer that raises `flag` every `period_us`.
#[cfg(target_os = "espidf")]
pub fn start_tick_timer(period_us: u64, flag: &'static TickFlag) -> Result<TickTimer, HwInitError> {
    let mut handle: esp_timer_handle_t = core::ptr::null_mut();
    let args = esp_timer_create_args_t {
        callback: Some(tick_cb),
        arg: core::ptr::from_ref(flag).cast_mut().cast(),
        dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
        name: c"tick".as_ptr(),
        skip_unhandled_events: false,
    };

    // SAFETY: called once from main(); `flag` outlives the timer.
    unsafe {
        let ret = esp_timer_create(&args, &mut handle);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::TimerCreateFailed(ret));
        }
        let ret = esp_timer_start_periodic(handle, period_us);
        if ret != ESP_OK as i32 {
            esp_timer_delete(handle);
            return Err(HwInitError::TimerStartFailed(ret));
        }
    }

    info!("hw_timer: tick every {} us", period_us);
    Ok(TickTimer { period_us, handle })
}

#[cfg(not(target_os = "espidf"))]
pub fn start_tick_timer(period_us: u64, flag: &'static TickFlag) -> Result<TickTimer, HwInitError> {
    use core::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    let running = Arc::new(AtomicBool::new(true));
    let alive = Arc::clone(&running);
    std::thread::spawn(move || {
        let period = std::time::Duration::from_micros(period_us);
        while alive.load(Ordering::Relaxed) {
            std::thread::sleep(period);
            flag.raise();
        }
    });

    log::info!("hw_timer(sim): tick every {} us (thread)", period_us);
    Ok(TickTimer { period_us, running })
}

impl TickTimer {
    /// Stop raising ticks.
    #[cfg(target_os = "espidf")]
    pub fn stop(self) {
        // SAFETY: `handle` is valid; stop + delete happen exactly once.
        unsafe {
            esp_timer_stop(self.handle);
            esp_timer_delete(self.handle);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn stop(self) {
        self.running.store(false, core::sync::atomic::Ordering::Relaxed);
    }
}
