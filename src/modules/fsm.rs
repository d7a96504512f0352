/// ----- FSM MODULE -----
/// The transition table of the cab. `next_state` runs the behaviour of
/// one state and returns the state to enter next. Only `Idle` and
/// `Closing` can be cut short from other threads; every other wait runs
/// its full duration.

use std::time::{Duration, Instant};

use crate::utilities::context::ElevatorContext;
use crate::utilities::delay::Delay;
use crate::utilities::direction::Direction;
use crate::utilities::error::InvariantViolation;
use crate::utilities::state::State;

pub fn next_state(state: State, elevator: &mut ElevatorContext) -> Result<State, InvariantViolation> {
    match state {
        State::Init => Ok(init(elevator)),
        State::Idle => idle(elevator),
        State::MovingUp => moving_up(elevator),
        State::MovingDown => moving_down(elevator),
        State::Opening => Ok(opening(elevator)),
        State::Open => Ok(open(elevator)),
        State::Closing => Ok(closing(elevator)),
        State::ClosedDeciding => Ok(closed_deciding(elevator)),
    }
}

fn init(elevator: &mut ElevatorContext) -> State {
    elevator.current_level = 1;
    State::Idle
}

fn idle(elevator: &mut ElevatorContext) -> Result<State, InvariantViolation> {
    // armed before looking at the requests, so a button pressed after the
    // check below cancels this very delay
    let idle_wait = Delay::indefinite();
    elevator.shared.arm_idle_wait(idle_wait.clone());

    let requests = elevator.requests();
    if requests.is_empty() {
        idle_wait.wait();
    }

    let level = elevator.current_level;
    if requests.request_at_floor(level) {
        Ok(State::Opening)
    } else if requests.internal.nearest_below_or_equal(level).is_some() {
        Ok(State::MovingDown)
    } else if requests.internal.nearest_above(level).is_some() {
        Ok(State::MovingUp)
    } else if requests.external.nearest_below_or_equal(level).is_some() {
        Ok(State::MovingDown)
    } else if requests.external.nearest_above(level).is_some() {
        Ok(State::MovingUp)
    } else {
        Err(InvariantViolation::new(State::Idle, "woken up without any pending request"))
    }
}

fn closing(elevator: &mut ElevatorContext) -> State {
    let door_move_time = elevator.settings.door_move_time;
    let started = Instant::now();
    let closing_wait = Delay::interruptible(door_move_time);
    elevator.shared.arm_closing_wait(closing_wait.clone());

    let interrupted = elevator.shared.open_button_pressed() || closing_wait.wait();

    elevator.closing_time_spent = if interrupted {
        started.elapsed().min(door_move_time)
    } else {
        Duration::ZERO
    };
    if interrupted {
        State::Opening
    } else {
        State::ClosedDeciding
    }
}

fn open(elevator: &mut ElevatorContext) -> State {
    Delay::uninterruptible(elevator.settings.open_door_delay).wait();
    State::Closing
}

fn opening(elevator: &mut ElevatorContext) -> State {
    elevator.disable_current_level_buttons();
    elevator.requests().serve_floor(elevator.current_level);

    // a half-closed door only has to travel back the distance it covered
    let door_time = if elevator.closing_time_spent.is_zero() {
        elevator.settings.door_move_time
    } else {
        elevator.closing_time_spent
    };
    elevator.closing_time_spent = Duration::ZERO;
    Delay::uninterruptible(door_time).wait();
    State::Open
}

/// Going up, the cab stops for an internal request, but for an external
/// one only when it is the topmost outstanding stop.
fn moving_up(elevator: &mut ElevatorContext) -> Result<State, InvariantViolation> {
    if elevator.current_level >= elevator.settings.num_floors {
        return Err(InvariantViolation::new(State::MovingUp, "already at the top level"));
    }
    elevator.direction = Direction::Up;
    Delay::uninterruptible(elevator.settings.level_passing_time).wait();
    elevator.current_level += 1;

    let level = elevator.current_level;
    let requests = elevator.requests();
    if requests.internal.contains(level)
        || (requests.external.contains(level) && !requests.requests_above(level))
    {
        Ok(State::Opening)
    } else {
        Ok(State::MovingUp)
    }
}

/// Going down, the cab stops at every requested level.
fn moving_down(elevator: &mut ElevatorContext) -> Result<State, InvariantViolation> {
    if elevator.current_level <= 1 {
        return Err(InvariantViolation::new(State::MovingDown, "already at the bottom level"));
    }
    elevator.direction = Direction::Down;
    Delay::uninterruptible(elevator.settings.level_passing_time).wait();
    elevator.current_level -= 1;

    if elevator.requests().request_at_floor(elevator.current_level) {
        Ok(State::Opening)
    } else {
        Ok(State::MovingDown)
    }
}

/// Keep the current direction while requests remain ahead, otherwise go idle.
fn closed_deciding(elevator: &mut ElevatorContext) -> State {
    let level = elevator.current_level;
    let requests = elevator.requests();
    if requests.request_at_floor(level) {
        return State::Opening;
    }
    let next = match elevator.direction {
        Direction::Up if requests.requests_above(level) => State::MovingUp,
        Direction::Down if requests.requests_at_or_below(level) => State::MovingDown,
        _ => State::Idle,
    };
    if next == State::Idle {
        elevator.direction = Direction::Stop;
    }
    next
}
