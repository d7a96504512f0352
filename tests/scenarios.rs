use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver};

use cab_controller::utilities::direction::Direction;
use cab_controller::{Controller, ElevatorSettings, PanelEvent, RequestError, State};

fn controller(num_floors: u8, door_move_ms: u64) -> (Controller, Receiver<PanelEvent>) {
    let settings = ElevatorSettings::new(
        num_floors,
        Duration::from_millis(5),
        Duration::from_millis(door_move_ms),
        Duration::from_millis(5),
    );
    let (panel_tx, panel_rx) = unbounded();
    (Controller::new(settings, panel_tx), panel_rx)
}

/// Steps until the cab has gone idle with nothing left to do, returning the
/// states entered and the levels where the doors opened. Never steps the
/// idle state itself, which would block with empty request sets.
fn run_until_idle(controller: &mut Controller) -> (Vec<State>, Vec<u8>) {
    let mut states = Vec::new();
    let mut stops = Vec::new();
    for _ in 0..500 {
        let state = controller.step().unwrap();
        states.push(state);
        if state == State::Opening {
            stops.push(controller.current_level());
        }
        if state == State::Idle
            && controller.internal_requests().is_empty()
            && controller.external_requests().is_empty()
        {
            return (states, stops);
        }
    }
    panic!("cab never went idle, entered {:?}", states);
}

#[test]
fn single_internal_request_trace() {
    let (mut controller, panel) = controller(10, 5);
    controller.submit_internal_command("5").unwrap();

    let (states, stops) = run_until_idle(&mut controller);

    assert_eq!(
        states,
        vec![
            State::Idle,
            State::MovingUp,
            State::MovingUp,
            State::MovingUp,
            State::MovingUp,
            State::Opening,
            State::Open,
            State::Closing,
            State::ClosedDeciding,
            State::Idle,
        ]
    );
    assert_eq!(stops, vec![5]);
    assert_eq!(controller.current_level(), 5);
    assert_eq!(controller.direction(), Direction::Stop);
    assert!(controller.internal_requests().is_empty());
    assert!(controller.external_requests().is_empty());

    let events: Vec<PanelEvent> = panel.try_iter().collect();
    assert_eq!(events[0], PanelEvent::Status { level: 0, state: State::Init });
    assert!(events.contains(&PanelEvent::Status { level: 5, state: State::Opening }));
    assert_eq!(
        events.iter().filter(|e| matches!(e, PanelEvent::ClearLevelButtons(5))).count(),
        1
    );
    assert_eq!(
        events.iter().filter(|e| **e == PanelEvent::ResetOpenIndicator).count(),
        states.len()
    );
}

#[test]
fn served_floor_leaves_both_sets_when_doors_open() {
    let (mut controller, _panel) = controller(10, 5);
    for floor in [7u8, 2, 10, 1, 5] {
        controller.submit_internal_command(&floor.to_string()).unwrap();
        controller.submit_external_command(&floor.to_string()).unwrap();
        loop {
            if controller.step().unwrap() == State::Opening {
                break;
            }
        }
        assert_eq!(controller.current_level(), floor);
        assert_eq!(controller.step(), Ok(State::Open));
        assert!(!controller.internal_requests().contains(&floor));
        assert!(!controller.external_requests().contains(&floor));
        run_until_idle(&mut controller);
    }
}

#[test]
fn descending_cab_stops_at_every_requested_floor() {
    let (mut controller, _panel) = controller(10, 5);
    controller.submit_internal_command("10").unwrap();
    let (_, stops) = run_until_idle(&mut controller);
    assert_eq!(stops, vec![10]);

    for floor in 1..=9 {
        controller.submit_internal_command(&floor.to_string()).unwrap();
    }
    let (_, stops) = run_until_idle(&mut controller);
    assert_eq!(stops, (1..=9).rev().collect::<Vec<u8>>());
    assert_eq!(controller.current_level(), 1);
}

#[test]
fn ascending_cab_skips_external_calls_below_the_topmost() {
    let (mut controller, _panel) = controller(10, 5);
    for floor in ["3", "5", "7"] {
        controller.submit_external_command(floor).unwrap();
    }
    controller.step().unwrap();

    let (_, stops) = run_until_idle(&mut controller);
    // straight up to 7, then back down serving every call
    assert_eq!(stops, vec![7, 5, 3]);
}

#[test]
fn internal_call_stops_the_ascent_on_the_way() {
    let (mut controller, _panel) = controller(10, 5);
    controller.submit_external_command("8").unwrap();
    controller.submit_internal_command("4").unwrap();
    controller.step().unwrap();

    let (_, stops) = run_until_idle(&mut controller);
    assert_eq!(stops, vec![4, 8]);
}

#[test]
fn out_of_range_requests_are_rejected() {
    let (controller, _panel) = controller(10, 5);
    assert!(matches!(
        controller.submit_internal_command("11"),
        Err(RequestError::FloorOutOfRange { floor: 11, num_floors: 10 })
    ));
    assert!(matches!(
        controller.submit_external_command("0"),
        Err(RequestError::FloorOutOfRange { floor: 0, num_floors: 10 })
    ));
    assert!(controller.internal_requests().is_empty());
    assert!(controller.external_requests().is_empty());
}

#[test]
fn idle_cab_blocks_until_a_request_arrives() {
    let (controller, panel) = controller(10, 5);
    let elevator = controller.handle();
    thread::spawn(move || controller.run());

    // Init, then the status report of the idle state that is now blocking
    assert_eq!(
        panel.recv_timeout(Duration::from_secs(1)),
        Ok(PanelEvent::Status { level: 0, state: State::Init })
    );
    assert_eq!(panel.recv_timeout(Duration::from_secs(1)), Ok(PanelEvent::ResetOpenIndicator));
    assert_eq!(
        panel.recv_timeout(Duration::from_secs(1)),
        Ok(PanelEvent::Status { level: 1, state: State::Idle })
    );
    assert!(panel.recv_timeout(Duration::from_millis(300)).is_err());
    assert_eq!(elevator.state(), State::Idle);

    elevator.submit_external_command("3").unwrap();
    assert_eq!(panel.recv_timeout(Duration::from_secs(1)), Ok(PanelEvent::ResetOpenIndicator));
    assert_eq!(
        panel.recv_timeout(Duration::from_secs(1)),
        Ok(PanelEvent::Status { level: 1, state: State::MovingUp })
    );

    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if let Ok(PanelEvent::ClearLevelButtons(level)) = panel.recv_timeout(Duration::from_secs(1)) {
            assert_eq!(level, 3);
            return;
        }
    }
    panic!("cab never reached level 3");
}

#[test]
fn interrupted_closing_reopens_in_the_time_spent() {
    let (mut controller, _panel) = controller(10, 1000);
    controller.submit_internal_command("1").unwrap();
    assert_eq!(controller.step(), Ok(State::Idle));
    assert_eq!(controller.step(), Ok(State::Opening));
    assert_eq!(controller.step(), Ok(State::Open));
    assert_eq!(controller.step(), Ok(State::Closing));

    let elevator = controller.handle();
    let presser = thread::spawn(move || {
        thread::sleep(Duration::from_millis(300));
        elevator.submit_internal_command("o")
    });
    assert_eq!(controller.step(), Ok(State::Opening));
    presser.join().unwrap().unwrap();

    let spent = controller.closing_time_spent();
    assert!(spent >= Duration::from_millis(300), "spent {:?}", spent);
    assert!(spent < Duration::from_millis(800), "spent {:?}", spent);
    assert!(!controller.open_button_pressed());

    let started = Instant::now();
    assert_eq!(controller.step(), Ok(State::Open));
    let reopening = started.elapsed();
    assert!(reopening >= spent);
    assert!(reopening < Duration::from_millis(900), "reopening took {:?}", reopening);
    assert_eq!(controller.closing_time_spent(), Duration::ZERO);
}

#[test]
fn open_command_outside_closing_does_nothing() {
    let (mut controller, _panel) = controller(10, 5);
    controller.submit_internal_command("2").unwrap();
    assert_eq!(controller.step(), Ok(State::Idle));
    assert_eq!(controller.step(), Ok(State::MovingUp));
    controller.submit_internal_command("o").unwrap();
    assert!(!controller.open_button_pressed());
    assert_eq!(controller.step(), Ok(State::Opening));
    assert_eq!(controller.step(), Ok(State::Open));
    assert_eq!(controller.step(), Ok(State::Closing));
    assert_eq!(controller.step(), Ok(State::ClosedDeciding));
}
