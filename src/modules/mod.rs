use std::thread;

use crossbeam_channel::{bounded, select, unbounded};

use crate::utilities::config::Config;
use crate::utilities::debug::Debug;
use crate::utilities::error::Error;

pub mod controller;
pub mod fsm;
pub mod io;

pub fn run(config: Config) -> Result<(), Error> {
    let settings = config.elevator;
    log::info!(
        "starting cab: {} levels, {:?} per level, doors move in {:?} and stay open {:?}",
        settings.num_floors,
        settings.level_passing_time,
        settings.door_move_time,
        settings.open_door_delay,
    );

    // INITIALIZE CHANNELS
    let (panel_tx, panel_rx) = unbounded();
    let (fsm_exit_tx, fsm_exit_rx) = bounded(1);

    // INITIALIZE THREAD FOR STATE MACHINE
    let controller = controller::Controller::new(settings.clone(), panel_tx.clone());
    let elevator = controller.handle();
    thread::Builder::new().name("fsm".to_string()).spawn(move || {
        let _ = fsm_exit_tx.send(controller.run());
    })?;

    // INITIALIZE BUTTON INPUT
    let quit_rx = io::init(elevator, panel_tx)?;

    let mut debug = Debug::new(settings.num_floors);
    debug.printstatus()?;

    loop {
        select! {
            recv(panel_rx) -> msg => {
                if let Ok(event) = msg {
                    debug.update(&event)?;
                }
            },
            recv(fsm_exit_rx) -> msg => {
                return match msg {
                    Ok(Err(violation)) => Err(violation.into()),
                    _ => Ok(()),
                };
            },
            recv(quit_rx) -> _ => {
                log::info!("STOPPING PROGRAM...");
                return Ok(());
            },
        }
    }
}
