//! One-shot GPIO initialisation and the GPIO ISR service.
//!
//! Raw ESP-IDF sys calls, run once from `main()` before the main loop
//! starts. Host builds get logging no-ops so the rest of the crate links.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::drivers::button::ButtonBinding;
use crate::error::ActuatorError;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    GpioLevelFailed(i32),
    IsrInstallFailed(i32),
    IsrHandlerAddFailed(i32),
    IntrEnableFailed(i32),
    TimerCreateFailed(i32),
    TimerStartFailed(i32),
    /// `Peripherals::take` refused; the singleton was already claimed.
    PeripheralsTaken(i32),
    I2cInitFailed(i32),
    UartInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc)    => write!(f, "GPIO config failed (rc={})", rc),
            Self::GpioLevelFailed(rc)     => write!(f, "GPIO initial level failed (rc={})", rc),
            Self::IsrInstallFailed(rc)    => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::IsrHandlerAddFailed(rc) => write!(f, "GPIO ISR handler add failed (rc={})", rc),
            Self::IntrEnableFailed(rc)    => write!(f, "GPIO interrupt enable failed (rc={})", rc),
            Self::TimerCreateFailed(rc)   => write!(f, "tick timer create failed (rc={})", rc),
            Self::TimerStartFailed(rc)    => write!(f, "tick timer start failed (rc={})", rc),
            Self::PeripheralsTaken(rc)    => write!(f, "peripherals already taken (rc={})", rc),
            Self::I2cInitFailed(rc)       => write!(f, "I2C driver init failed (rc={})", rc),
            Self::UartInitFailed(rc)      => write!(f, "UART driver init failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

// ── GPIO Outputs ──────────────────────────────────────────────

/// Configure `pins` as push-pull outputs, driven low.
#[cfg(target_os = "espidf")]
pub fn init_outputs(pins: &[i32]) -> Result<(), HwInitError> {
    for &pin in pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        // SAFETY: called once from main() before the loop; single-threaded.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        let ret = unsafe { gpio_set_level(pin as gpio_num_t, 0) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioLevelFailed(ret)); }
    }

    info!("hw_init: {} output(s) configured low", pins.len());
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_outputs(pins: &[i32]) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): {} output(s) skipped", pins.len());
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), ActuatorError> {
    // SAFETY: gpio_set_level writes an already-configured output pin.
    // Main-loop only.
    let ret = unsafe { gpio_set_level(pin as gpio_num_t, u32::from(high)) };
    if ret == ESP_OK as i32 { Ok(()) } else { Err(ActuatorError::GpioWriteFailed) }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) -> Result<(), ActuatorError> {
    Ok(())
}

// ── GPIO Inputs + ISR Service ─────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn button_gpio_isr(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` was produced from a `&'static ButtonBinding` in
    // `register_button`; it is never freed and only read here.
    let binding = unsafe { &*(arg as *const ButtonBinding<'static>) };
    binding.on_edge();
}

/// Install the per-pin GPIO ISR service. Idempotent.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: ESP_ERR_INVALID_STATE means it was already installed.
    let ret = unsafe { gpio_install_isr_service(0) };
    if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
        return Err(HwInitError::IsrInstallFailed(ret));
    }
    info!("hw_init: GPIO ISR service installed");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}

/// Configure `binding.gpio` as a pulled-up input and run
/// [`ButtonBinding::on_edge`] on every falling edge.
#[cfg(target_os = "espidf")]
pub fn register_button(binding: &'static ButtonBinding<'static>) -> Result<(), HwInitError> {
    let pin = binding.gpio;
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
    };
    // SAFETY: init path only. The handler reads `binding` through a
    // 'static pointer and touches nothing but the atomic it names.
    unsafe {
        let ret = gpio_config(&cfg);
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }

        let arg = core::ptr::from_ref(binding).cast_mut().cast::<core::ffi::c_void>();
        let ret = gpio_isr_handler_add(pin as gpio_num_t, Some(button_gpio_isr), arg);
        if ret != ESP_OK as i32 { return Err(HwInitError::IsrHandlerAddFailed(ret)); }
        let ret = gpio_intr_enable(pin as gpio_num_t);
        if ret != ESP_OK as i32 { return Err(HwInitError::IntrEnableFailed(ret)); }
    }

    info!("hw_init: button GPIO{} -> {}", pin, binding.action.name());
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn register_button(binding: &'static ButtonBinding<'static>) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): button GPIO{} -> {} (edges via on_edge())", binding.gpio, binding.action.name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_error_display_carries_rc() {
        let e = HwInitError::TimerStartFailed(259);
        assert_eq!(e.to_string(), "tick timer start failed (rc=259)");
    }

    #[test]
    fn pin_level_and_interrupt_failures_are_distinct() {
        // ESP_ERR_INVALID_ARG
        let level = HwInitError::GpioLevelFailed(0x102);
        let intr = HwInitError::IntrEnableFailed(0x102);
        assert_ne!(level, intr);
        assert_eq!(level.to_string(), "GPIO initial level failed (rc=258)");
        assert_eq!(intr.to_string(), "GPIO interrupt enable failed (rc=258)");
    }

    #[test]
    fn sim_gpio_is_infallible() {
        assert!(init_outputs(&[crate::pins::LED_0_GPIO, crate::pins::LED_1_GPIO]).is_ok());
        assert!(gpio_write(crate::pins::LED_0_GPIO, true).is_ok());
        assert!(init_isr_service().is_ok());
    }
}
