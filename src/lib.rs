pub mod modules;
pub mod utilities;

pub use modules::controller::{CommandHandle, Controller};
pub use utilities::config::ElevatorSettings;
pub use utilities::error::{InvariantViolation, RequestError};
pub use utilities::panel_event::{Button, PanelEvent};
pub use utilities::state::State;
