//! Fuzz target: `StatusRecord::to_line`
//!
//! Formats records built from arbitrary field values and asserts the line
//! always fits the fixed buffer and parses back to the same fields.
//!
//! cargo fuzz run fuzz_status_record

#![no_main]

use libfuzzer_sys::fuzz_target;
use tickloop::control::StatusRecord;

fuzz_target!(|data: [u8; 9]| {
    let record = StatusRecord {
        room: i16::from_le_bytes([data[0], data[1]]),
        set_point: i16::from_le_bytes([data[2], data[3]]),
        heater_on: data[4] & 1 == 1,
        seconds: u32::from_le_bytes([data[5], data[6], data[7], data[8]]),
    };

    let line = record.to_line().expect("every record fits the line buffer");
    let body = line
        .strip_prefix('<')
        .and_then(|l| l.strip_suffix(">\r\n"))
        .expect("framing");

    let mut fields = body.split(',');
    assert_eq!(fields.next().and_then(|f| f.parse::<i16>().ok()), Some(record.room));
    assert_eq!(fields.next().and_then(|f| f.parse::<i16>().ok()), Some(record.set_point));
    assert_eq!(fields.next(), Some(if record.heater_on { "1" } else { "0" }));
    assert_eq!(fields.next().and_then(|f| f.parse::<u32>().ok()), Some(record.seconds));
    assert!(fields.next().is_none());
});
