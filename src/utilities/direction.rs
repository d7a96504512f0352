use std::fmt;

/// Travel direction of the cab. `Stop` means no direction is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Stop,
    Up,
}

impl Direction {
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Direction::Down => Some("down"),
            Direction::Up => Some("up"),
            Direction::Stop => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("none"))
    }
}
