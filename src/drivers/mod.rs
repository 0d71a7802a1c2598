//! Board drivers: GPIO setup, tick timer, buttons, LEDs and the watchdog.

pub mod button;
pub mod hw_init;
pub mod hw_timer;
pub mod status_led;
pub mod watchdog;
