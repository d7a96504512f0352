use std::fmt;

/// Control states of the cab. `Init` is entered once at startup; there is
/// no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Init,
    Idle,
    MovingUp,
    MovingDown,
    Opening,
    Open,
    Closing,
    /// Doors just finished closing, next direction not yet decided.
    ClosedDeciding,
}

impl State {
    pub fn as_str(self) -> &'static str {
        match self {
            State::Init => "Init",
            State::Idle => "Idle",
            State::MovingUp => "Moving up",
            State::MovingDown => "Moving down",
            State::Opening => "Opening",
            State::Open => "Open",
            State::Closing => "Closing",
            State::ClosedDeciding => "Closed",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
