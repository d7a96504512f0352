use std::fmt;

use super::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Internal(u8),
    External(u8),
    Open,
}

/// Everything the front panel is told, by the cab thread and by the
/// button input thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// Reported before each transition, so `state` is the one about to run.
    Status { level: u8, state: State },
    /// Both the internal and the external button of this level are served.
    ClearLevelButtons(u8),
    ResetOpenIndicator,
    ButtonPressed(Button),
}

impl fmt::Display for PanelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelEvent::Status { level, state } => write!(f, "Level: {} State: {}", level, state),
            PanelEvent::ClearLevelButtons(level) => write!(f, "Clear buttons at level {}", level),
            PanelEvent::ResetOpenIndicator => f.write_str("Reset open indicator"),
            PanelEvent::ButtonPressed(button) => write!(f, "Pressed {:?}", button),
        }
    }
}
