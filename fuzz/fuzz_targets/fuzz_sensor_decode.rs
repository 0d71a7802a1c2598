//! Fuzz target: sensor decode + thermostat cycle
//!
//! Feeds arbitrary result-register bytes (and dropped reads) through the
//! controller and checks the room value stays in the sensor's range and
//! the heater decision matches the strict control law.
//!
//! cargo fuzz run fuzz_sensor_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use tickloop::control::{Thermostat, heater_should_run};
use tickloop::error::SensorError;
use tickloop::sensors::Temperature;

fuzz_target!(|data: &[u8]| {
    let Some((&sp, rest)) = data.split_first() else {
        return;
    };
    let set_point = i16::from(sp as i8);
    let mut thermostat = Thermostat::new(25);

    // Three bytes per cycle: a drop flag and the two register bytes.
    for (i, chunk) in rest.chunks_exact(3).enumerate() {
        let reading = if chunk[0] & 0x0F == 0 {
            Err(SensorError::TransferFailed)
        } else {
            Ok(Temperature::from_be_bytes([chunk[1], chunk[2]]))
        };
        let before = thermostat.room();
        let record = thermostat.cycle(reading, set_point);

        assert!((-256..=255).contains(&record.room));
        if reading.is_err() {
            assert_eq!(record.room, before, "failed read must hold the room value");
        }
        assert_eq!(record.heater_on, heater_should_run(record.room, set_point));
        assert_eq!(record.seconds as usize, i);
    }
});
