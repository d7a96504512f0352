use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use parking_lot::Mutex;

use super::config::ElevatorSettings;
use super::delay::Delay;
use super::direction::Direction;
use super::panel_event::PanelEvent;
use super::requests::Requests;
use super::state::State;

/// The part of the elevator that button threads touch. Each field is
/// synchronized on its own; no lock is ever held across a wait.
#[derive(Debug)]
pub struct SharedContext {
    pub num_floors: u8,
    pub requests: Requests,
    state: Mutex<State>,
    open_button_pressed: AtomicBool,
    idle_wait: Mutex<Delay>,
    closing_wait: Mutex<Delay>,
}

impl SharedContext {
    pub fn new(num_floors: u8) -> Self {
        SharedContext {
            num_floors,
            requests: Requests::new(),
            state: Mutex::new(State::Init),
            open_button_pressed: AtomicBool::new(false),
            idle_wait: Mutex::new(Delay::default()),
            closing_wait: Mutex::new(Delay::default()),
        }
    }

    pub fn state(&self) -> State {
        *self.state.lock()
    }

    pub(crate) fn set_state(&self, state: State) {
        *self.state.lock() = state;
    }

    pub fn open_button_pressed(&self) -> bool {
        self.open_button_pressed.load(Ordering::SeqCst)
    }

    pub(crate) fn press_open_button(&self) {
        self.open_button_pressed.store(true, Ordering::SeqCst);
    }

    pub(crate) fn reset_open_button(&self) {
        self.open_button_pressed.store(false, Ordering::SeqCst);
    }

    /// Installs `delay` as the live idle wait. The previous one is dropped
    /// uncanceled.
    pub(crate) fn arm_idle_wait(&self, delay: Delay) {
        *self.idle_wait.lock() = delay;
    }

    pub(crate) fn cancel_idle_wait(&self) -> bool {
        self.idle_wait.lock().cancel()
    }

    pub(crate) fn arm_closing_wait(&self, delay: Delay) {
        *self.closing_wait.lock() = delay;
    }

    pub(crate) fn cancel_closing_wait(&self) -> bool {
        self.closing_wait.lock().cancel()
    }
}

/// Everything the cab thread owns, plus a reference to the shared part.
#[derive(Debug)]
pub struct ElevatorContext {
    pub settings: ElevatorSettings,
    pub current_level: u8,
    pub direction: Direction,
    /// Time spent in the last interrupted closing, zero otherwise.
    pub closing_time_spent: Duration,
    pub shared: Arc<SharedContext>,
    panel_tx: Sender<PanelEvent>,
}

impl ElevatorContext {
    pub fn new(settings: ElevatorSettings, panel_tx: Sender<PanelEvent>) -> Self {
        let shared = Arc::new(SharedContext::new(settings.num_floors));
        ElevatorContext {
            settings,
            current_level: 0,
            direction: Direction::Stop,
            closing_time_spent: Duration::ZERO,
            shared,
            panel_tx,
        }
    }

    pub fn requests(&self) -> &Requests {
        &self.shared.requests
    }

    pub fn disable_current_level_buttons(&self) {
        self.notify(PanelEvent::ClearLevelButtons(self.current_level));
    }

    /// A panel that went away is not the cab's problem.
    pub(crate) fn notify(&self, event: PanelEvent) {
        if self.panel_tx.send(event).is_err() {
            log::trace!("front panel disconnected, dropping event");
        }
    }
}
