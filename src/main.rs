use std::process;

use clap::Parser;

use cab_controller::modules;
use cab_controller::utilities::config::{Args, Config};
use cab_controller::utilities::error::Error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let result = Config::get(&args).map_err(Error::from).and_then(modules::run);
    if let Err(e) = result {
        log::error!("{}", e);
        process::exit(1);
    }
}
