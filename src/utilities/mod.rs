pub mod config;
pub mod context;
pub mod debug;
pub mod delay;
pub mod direction;
pub mod error;
pub mod panel_event;
pub mod requests;
pub mod state;
