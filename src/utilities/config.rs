use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use super::error::ConfigError;

const CONFIG_FILE_PATH: &str = "config.json";
const FALLBACK_CONFIG_FILE_PATH: &str = "_config.json";

pub const MIN_LEVELS: u8 = 5;
pub const MAX_LEVELS: u8 = 20;

/// Simulates a single elevator cab driven from the terminal.
#[derive(Parser, Debug, Clone, Default)]
#[command(version, about)]
pub struct Args {
    /// Configuration file, defaults to config.json
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Number of levels
    #[arg(short, long)]
    pub levels: Option<u8>,
    /// Level height in meters
    #[arg(long)]
    pub height: Option<f32>,
    /// Speed in meters per second
    #[arg(short, long)]
    pub speed: Option<f32>,
    /// The time (in seconds) of the doors opening or closing
    #[arg(long)]
    pub door_move_time: Option<u64>,
    /// The delay (in seconds) between when the door was open and will be closed
    #[arg(long)]
    pub open_door_delay_time: Option<u64>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct ConfigFile {
    pub elevator: ElevatorFile,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorFile {
    pub levels: u8,
    pub height: f32,
    pub speed: f32,
    pub door_move_time: u64,
    pub open_door_delay_time: u64,
}

impl ElevatorFile {
    fn apply(&mut self, args: &Args) {
        if let Some(levels) = args.levels { self.levels = levels; }
        if let Some(height) = args.height { self.height = height; }
        if let Some(speed) = args.speed { self.speed = speed; }
        if let Some(door_move_time) = args.door_move_time { self.door_move_time = door_move_time; }
        if let Some(open_door_delay_time) = args.open_door_delay_time { self.open_door_delay_time = open_door_delay_time; }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.levels < MIN_LEVELS || self.levels > MAX_LEVELS {
            return Err(ConfigError::Invalid { field: "levels", reason: "value should be between 5 and 20 (including)" });
        }
        if !(self.height > 0.0) {
            return Err(ConfigError::Invalid { field: "height", reason: "value should be more than zero" });
        }
        if !(self.speed > 0.0) {
            return Err(ConfigError::Invalid { field: "speed", reason: "value should be more than zero" });
        }
        if self.door_move_time == 0 {
            return Err(ConfigError::Invalid { field: "door-move-time", reason: "value should be more than zero" });
        }
        if self.open_door_delay_time == 0 {
            return Err(ConfigError::Invalid { field: "open-door-delay-time", reason: "value should be more than zero" });
        }
        Ok(())
    }
}

/// Physical parameters of the cab, already converted to wait durations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevatorSettings {
    pub num_floors: u8,
    pub level_passing_time: Duration,
    pub door_move_time: Duration,
    pub open_door_delay: Duration,
}

impl ElevatorSettings {
    pub fn new(
        num_floors: u8,
        level_passing_time: Duration,
        door_move_time: Duration,
        open_door_delay: Duration,
    ) -> Self {
        ElevatorSettings { num_floors, level_passing_time, door_move_time, open_door_delay }
    }

    /// Travel time per level is `height * 1000 / speed` whole milliseconds.
    pub fn from_physical(
        num_floors: u8,
        level_height_m: f32,
        speed_mps: f32,
        door_move_time: Duration,
        open_door_delay: Duration,
    ) -> Self {
        let level_passing_ms = (level_height_m * 1000.0 / speed_mps) as u64;
        ElevatorSettings::new(num_floors, Duration::from_millis(level_passing_ms), door_move_time, open_door_delay)
    }
}

impl TryFrom<ElevatorFile> for ElevatorSettings {
    type Error = ConfigError;

    fn try_from(file: ElevatorFile) -> Result<Self, Self::Error> {
        file.validate()?;
        Ok(ElevatorSettings::from_physical(
            file.levels,
            file.height,
            file.speed,
            Duration::from_secs(file.door_move_time),
            Duration::from_secs(file.open_door_delay_time),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub elevator: ElevatorSettings,
}

impl Config {
    pub fn get(args: &Args) -> Result<Self, ConfigError> {
        let mut config_file = read_config_file(args)?;
        config_file.elevator.apply(args);
        Ok(Config {
            elevator: ElevatorSettings::try_from(config_file.elevator)?,
        })
    }
}

fn read_config_file(args: &Args) -> Result<ConfigFile, ConfigError> {
    let config_contents = match &args.config {
        Some(path) => fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?,
        None => match fs::read_to_string(CONFIG_FILE_PATH) {
            Ok(content) => content,
            Err(_) => {
                log::info!("No configuration file provided, using default settings...");
                fs::read_to_string(FALLBACK_CONFIG_FILE_PATH).map_err(|source| ConfigError::Io {
                    path: FALLBACK_CONFIG_FILE_PATH.to_string(),
                    source,
                })?
            },
        },
    };
    parse_config(&config_contents)
}

pub fn parse_config(config_contents: &str) -> Result<ConfigFile, ConfigError> {
    Ok(serde_json::from_str(config_contents)?)
}
