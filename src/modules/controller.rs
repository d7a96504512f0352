/// ----- CONTROLLER MODULE -----
/// Owns the cab context and runs the perpetual control loop. Button
/// threads talk to it through a `CommandHandle`, which only ever touches
/// the shared part of the context.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;

use crate::modules::fsm;
use crate::utilities::config::ElevatorSettings;
use crate::utilities::context::{ElevatorContext, SharedContext};
use crate::utilities::direction::Direction;
use crate::utilities::error::{InvariantViolation, RequestError};
use crate::utilities::panel_event::{Button, PanelEvent};
use crate::utilities::state::State;

/// The service button token, accepted in either case.
pub const OPEN_COMMAND: &str = "o";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Open,
    Floor(u8),
}

fn parse_command(command: &str, num_floors: u8) -> Result<Command, RequestError> {
    let command = command.trim();
    if command.eq_ignore_ascii_case(OPEN_COMMAND) {
        return Ok(Command::Open);
    }
    let floor: i64 = command
        .parse()
        .map_err(|_| RequestError::NotAFloor(command.to_string()))?;
    match u8::try_from(floor) {
        Ok(floor) if (1..=num_floors).contains(&floor) => Ok(Command::Floor(floor)),
        _ => Err(RequestError::FloorOutOfRange { floor, num_floors }),
    }
}

/// Command-ingestion side of the elevator. Cheap to clone, one per
/// button thread.
#[derive(Debug, Clone)]
pub struct CommandHandle {
    shared: Arc<SharedContext>,
}

impl CommandHandle {
    /// Accepts a floor number or the open command from inside the cab.
    /// Returns the button that was pressed.
    pub fn submit_internal_command(&self, command: &str) -> Result<Button, RequestError> {
        match parse_command(command, self.shared.num_floors)? {
            Command::Open => {
                if self.shared.state() == State::Closing {
                    self.shared.press_open_button();
                    self.shared.cancel_closing_wait();
                }
                Ok(Button::Open)
            },
            Command::Floor(floor) => {
                self.shared.requests.internal.add(floor);
                self.wake_idle();
                Ok(Button::Internal(floor))
            },
        }
    }

    /// Accepts a floor number from a hall panel.
    pub fn submit_external_command(&self, command: &str) -> Result<Button, RequestError> {
        match parse_command(command, self.shared.num_floors)? {
            Command::Open => Err(RequestError::OpenNotAllowed),
            Command::Floor(floor) => {
                self.shared.requests.external.add(floor);
                self.wake_idle();
                Ok(Button::External(floor))
            },
        }
    }

    pub fn state(&self) -> State {
        self.shared.state()
    }

    pub fn open_button_pressed(&self) -> bool {
        self.shared.open_button_pressed()
    }

    pub fn internal_requests(&self) -> Vec<u8> {
        self.shared.requests.internal.snapshot()
    }

    pub fn external_requests(&self) -> Vec<u8> {
        self.shared.requests.external.snapshot()
    }

    fn wake_idle(&self) {
        // the request is already in its set, so a cancel lost to a freshly
        // armed idle wait is harmless: the cab sees the request before waiting
        if self.shared.state() == State::Idle {
            self.shared.cancel_idle_wait();
        }
    }
}

#[derive(Debug)]
pub struct Controller {
    elevator: ElevatorContext,
}

impl Controller {
    pub fn new(settings: ElevatorSettings, panel_tx: Sender<PanelEvent>) -> Self {
        Controller {
            elevator: ElevatorContext::new(settings, panel_tx),
        }
    }

    pub fn handle(&self) -> CommandHandle {
        CommandHandle {
            shared: self.elevator.shared.clone(),
        }
    }

    pub fn submit_internal_command(&self, command: &str) -> Result<Button, RequestError> {
        self.handle().submit_internal_command(command)
    }

    pub fn submit_external_command(&self, command: &str) -> Result<Button, RequestError> {
        self.handle().submit_external_command(command)
    }

    /// One turn of the control loop: report the state about to run, run
    /// it, then reset the service button. Returns the state entered.
    pub fn step(&mut self) -> Result<State, InvariantViolation> {
        let state = self.elevator.shared.state();
        self.elevator.notify(PanelEvent::Status {
            level: self.elevator.current_level,
            state,
        });

        let next = fsm::next_state(state, &mut self.elevator)?;
        log::debug!(
            "level {} heading {}: {} -> {}",
            self.elevator.current_level,
            self.elevator.direction,
            state,
            next
        );

        self.elevator.shared.reset_open_button();
        self.elevator.shared.set_state(next);
        self.elevator.notify(PanelEvent::ResetOpenIndicator);
        Ok(next)
    }

    /// Runs the cab until the transition table breaks down.
    pub fn run(mut self) -> Result<(), InvariantViolation> {
        loop {
            self.step()?;
        }
    }

    pub fn state(&self) -> State {
        self.elevator.shared.state()
    }

    pub fn current_level(&self) -> u8 {
        self.elevator.current_level
    }

    pub fn direction(&self) -> Direction {
        self.elevator.direction
    }

    pub fn closing_time_spent(&self) -> Duration {
        self.elevator.closing_time_spent
    }

    pub fn open_button_pressed(&self) -> bool {
        self.elevator.shared.open_button_pressed()
    }

    pub fn internal_requests(&self) -> Vec<u8> {
        self.elevator.requests().internal.snapshot()
    }

    pub fn external_requests(&self) -> Vec<u8> {
        self.elevator.requests().external.snapshot()
    }
}
