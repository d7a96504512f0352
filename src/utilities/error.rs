use std::io;

use thiserror::Error;

use super::state::State;

/// A button command that cannot be turned into a request. Reported to the
/// caller only; the cab thread never sees it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("wrong floor number {floor}, should be between 1 and {num_floors}")]
    FloorOutOfRange { floor: i64, num_floors: u8 },
    #[error("unexpected format of command {0:?}")]
    NotAFloor(String),
    #[error("the open command is only available inside the cab")]
    OpenNotAllowed,
}

/// The state machine reached a point with no legal transition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invariant violated in state {state}: {reason}")]
pub struct InvariantViolation {
    pub state: State,
    pub reason: &'static str,
}

impl InvariantViolation {
    pub fn new(state: State, reason: &'static str) -> Self {
        InvariantViolation { state, reason }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration file {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("malformed configuration file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("--{field} {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error(transparent)]
    Io(#[from] io::Error),
}
