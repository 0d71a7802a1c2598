//! Beacon pipeline: button edge → MessageRequest → BeaconService → LEDs.

use tickloop::app::events::AppEvent;
use tickloop::app::service::BeaconService;
use tickloop::config::Variant;
use tickloop::drivers::button::{ButtonAction, ButtonBinding};
use tickloop::scheduler::MainLoop;
use tickloop::sequencer::tables::{OK, SOS};
use tickloop::sequencer::{Message, OutputState};
use tickloop::signals::{MessageRequest, TickFlag};

use crate::mock_hw::{MockLamp, RecordingSink};

fn make_beacon(req: &MessageRequest) -> BeaconService<'_, MockLamp, RecordingSink> {
    let mut svc = BeaconService::new(Message::Sos, req, MockLamp::new(), RecordingSink::new());
    svc.start();
    svc
}

#[test]
fn start_blanks_leds_and_announces() {
    let req = MessageRequest::new(Message::Sos);
    let svc = make_beacon(&req);
    assert_eq!(svc.lamp().shown, vec![OutputState::Off]);
    assert!(matches!(svc.sink().events[0], AppEvent::Started(Variant::Beacon)));
}

#[test]
fn one_full_sos_cycle_drives_the_table() {
    let req = MessageRequest::new(Message::Sos);
    let mut svc = make_beacon(&req);
    for _ in 0..SOS.len() {
        svc.tick();
    }
    assert_eq!(&svc.lamp().shown[1..], &SOS[..]);
    assert_eq!(svc.sequencer().position(), 0);
    assert_eq!(svc.sequencer().cycles(), 1);
}

#[test]
fn press_mid_message_switches_only_at_boundary() {
    let req = MessageRequest::new(Message::Sos);
    let button = ButtonBinding::new(16, ButtonAction::ToggleMessage(&req));
    let mut svc = make_beacon(&req);

    for _ in 0..10 {
        svc.tick();
    }
    button.on_edge();

    // The rest of SOS plays out unchanged.
    for _ in 10..SOS.len() {
        assert_eq!(svc.sequencer().playing(), Message::Sos);
        svc.tick();
    }
    assert_eq!(svc.sequencer().playing(), Message::Ok);

    for _ in 0..OK.len() {
        svc.tick();
    }
    let shown = &svc.lamp().shown[1..];
    assert_eq!(&shown[..SOS.len()], &SOS[..]);
    assert_eq!(&shown[SOS.len()..], &OK[..]);

    let changes = svc.sink().count(|e| matches!(e, AppEvent::MessageChanged { .. }));
    assert_eq!(changes, 1);
}

#[test]
fn double_press_before_boundary_cancels_out() {
    let req = MessageRequest::new(Message::Sos);
    let button = ButtonBinding::new(16, ButtonAction::ToggleMessage(&req));
    let mut svc = make_beacon(&req);

    svc.tick();
    button.on_edge();
    button.on_edge();
    for _ in 1..SOS.len() * 2 {
        svc.tick();
    }
    assert_eq!(svc.sequencer().playing(), Message::Sos);
    assert_eq!(svc.sink().count(|e| matches!(e, AppEvent::MessageChanged { .. })), 0);
}

#[test]
fn press_on_last_tick_still_applies_at_that_boundary() {
    let req = MessageRequest::new(Message::Sos);
    let button = ButtonBinding::new(21, ButtonAction::ToggleMessage(&req));
    let mut svc = make_beacon(&req);

    for _ in 0..SOS.len() - 1 {
        svc.tick();
    }
    button.on_edge();
    let step = svc.tick();
    assert!(step.wrapped);
    assert_eq!(svc.sequencer().playing(), Message::Ok);
    assert_eq!(svc.tick().output, OK[0]);
}

#[test]
fn lamp_failure_is_reported_and_sequence_continues() {
    let req = MessageRequest::new(Message::Sos);
    let mut svc = BeaconService::new(
        Message::Sos,
        &req,
        MockLamp { shown: Vec::new(), fail: true },
        RecordingSink::new(),
    );
    for _ in 0..5 {
        svc.tick();
    }
    assert_eq!(svc.sequencer().position(), 5);
    assert_eq!(svc.sink().count(|e| matches!(e, AppEvent::PeripheralFault(_))), 5);
}

#[test]
fn main_loop_drives_beacon_one_symbol_per_tick() {
    let flag = TickFlag::new();
    let req = MessageRequest::new(Message::Sos);
    let mut ml = MainLoop::new(&flag, make_beacon(&req));

    for _ in 0..7 {
        flag.raise();
        ml.poll_once();
        ml.poll_once();
    }
    assert_eq!(ml.task().sequencer().position(), 7);
    assert_eq!(&ml.task().lamp().shown[1..], &SOS[..7]);
}

#[test]
fn coalesced_ticks_lose_symbols_not_order() {
    let flag = TickFlag::new();
    let req = MessageRequest::new(Message::Sos);
    let mut ml = MainLoop::new(&flag, make_beacon(&req));

    flag.raise();
    flag.raise();
    while ml.poll_once() {}
    assert_eq!(ml.task().sequencer().position(), 1);
    assert_eq!(flag.coalesced(), 1);
}
