/// ----- I/O MODULE -----
/// Reads button presses from stdin and forwards them to the elevator.
/// One line per press: `i<floor>` for a cab button, `e<floor>` for a hall
/// button, `o` or `io` for the service button and `q` to quit.

use std::io::{self, BufRead};
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::modules::controller::{CommandHandle, OPEN_COMMAND};
use crate::utilities::panel_event::PanelEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    Internal(&'a str),
    External(&'a str),
    Quit,
}

pub fn parse_line(line: &str) -> Option<Input<'_>> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        return Some(Input::Quit);
    }
    if line.eq_ignore_ascii_case(OPEN_COMMAND) {
        return Some(Input::Internal(line));
    }
    let (panel, command) = line.split_at(line.char_indices().nth(1)?.0);
    match panel {
        "i" | "I" => Some(Input::Internal(command)),
        "e" | "E" => Some(Input::External(command)),
        _ => None,
    }
}

/// Handles one line of input. Returns `false` once the user asked to quit.
pub fn handle_line(line: &str, elevator: &CommandHandle, panel_tx: &Sender<PanelEvent>) -> bool {
    let result = match parse_line(line) {
        Some(Input::Quit) => return false,
        Some(Input::Internal(command)) => elevator.submit_internal_command(command),
        Some(Input::External(command)) => elevator.submit_external_command(command),
        None => {
            if !line.trim().is_empty() {
                log::warn!("unrecognized input {:?}, expected i<floor>, e<floor>, o or q", line.trim());
            }
            return true;
        },
    };
    match result {
        Ok(button) => {
            let _ = panel_tx.send(PanelEvent::ButtonPressed(button));
        },
        Err(e) => log::warn!("rejected {:?}: {}", line.trim(), e),
    }
    true
}

/// Spawns the input thread. The returned channel fires when input ends.
pub fn init(elevator: CommandHandle, panel_tx: Sender<PanelEvent>) -> io::Result<Receiver<()>> {
    let (quit_tx, quit_rx) = bounded(1);
    thread::Builder::new().name("buttons".to_string()).spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if !handle_line(&line, &elevator, &panel_tx) {
                        break;
                    }
                },
                Err(e) => {
                    log::error!("failed to read input: {}", e);
                    break;
                },
            }
        }
        let _ = quit_tx.send(());
    })?;
    Ok(quit_rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crossbeam_channel::unbounded;

    use crate::modules::controller::Controller;
    use crate::utilities::config::ElevatorSettings;
    use crate::utilities::panel_event::Button;

    #[test]
    fn parses_panel_prefixes() {
        assert_eq!(parse_line("i5"), Some(Input::Internal("5")));
        assert_eq!(parse_line(" E12 "), Some(Input::External("12")));
        assert_eq!(parse_line("io"), Some(Input::Internal("o")));
        assert_eq!(parse_line("o"), Some(Input::Internal("o")));
        assert_eq!(parse_line("Q"), Some(Input::Quit));
        assert_eq!(parse_line("x3"), None);
        assert_eq!(parse_line("i"), None);
        assert_eq!(parse_line(""), None);
    }

    #[test]
    fn accepted_presses_light_their_button() {
        let settings = ElevatorSettings::new(10, Duration::from_millis(1), Duration::from_millis(1), Duration::from_millis(1));
        let (cab_tx, _cab_rx) = unbounded();
        let controller = Controller::new(settings, cab_tx);
        let (panel_tx, panel_rx) = unbounded();

        assert!(handle_line("i4", &controller.handle(), &panel_tx));
        assert!(handle_line("e11", &controller.handle(), &panel_tx));
        assert!(handle_line("eo", &controller.handle(), &panel_tx));
        assert!(!handle_line("q", &controller.handle(), &panel_tx));

        assert_eq!(panel_rx.try_recv(), Ok(PanelEvent::ButtonPressed(Button::Internal(4))));
        assert!(panel_rx.try_recv().is_err());
        assert_eq!(controller.internal_requests(), vec![4]);
        assert!(controller.external_requests().is_empty());
    }
}
