use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

use parking_lot::RwLock;

/// Ordered set of pending floors. Every method takes `&self` and locks
/// internally, so button threads can insert while the cab thread reads.
#[derive(Debug, Default)]
pub struct RequestSet {
    floors: RwLock<BTreeSet<u8>>,
}

impl RequestSet {
    pub fn new() -> Self {
        RequestSet::default()
    }

    /// Returns `false` if the floor was already pending.
    pub fn add(&self, floor: u8) -> bool {
        self.floors.write().insert(floor)
    }

    pub fn contains(&self, floor: u8) -> bool {
        self.floors.read().contains(&floor)
    }

    /// Lowest pending floor strictly above `floor`.
    pub fn nearest_above(&self, floor: u8) -> Option<u8> {
        self.floors.read().range((Excluded(floor), Unbounded)).next().copied()
    }

    /// Highest pending floor at or below `floor`.
    pub fn nearest_below_or_equal(&self, floor: u8) -> Option<u8> {
        self.floors.read().range(..=floor).next_back().copied()
    }

    pub fn remove(&self, floor: u8) -> bool {
        self.floors.write().remove(&floor)
    }

    pub fn is_empty(&self) -> bool {
        self.floors.read().is_empty()
    }

    pub fn snapshot(&self) -> Vec<u8> {
        self.floors.read().iter().copied().collect()
    }
}

/// The two request pools of the cab. Internal requests come from inside
/// the cab and take priority, external ones from the hall panels.
#[derive(Debug, Default)]
pub struct Requests {
    pub internal: RequestSet,
    pub external: RequestSet,
}

impl Requests {
    pub fn new() -> Self {
        Requests::default()
    }

    pub fn is_empty(&self) -> bool {
        self.internal.is_empty() && self.external.is_empty()
    }

    pub fn request_at_floor(&self, floor: u8) -> bool {
        self.internal.contains(floor) || self.external.contains(floor)
    }

    pub fn requests_above(&self, floor: u8) -> bool {
        self.internal.nearest_above(floor).is_some() || self.external.nearest_above(floor).is_some()
    }

    pub fn requests_at_or_below(&self, floor: u8) -> bool {
        self.internal.nearest_below_or_equal(floor).is_some()
            || self.external.nearest_below_or_equal(floor).is_some()
    }

    pub fn serve_floor(&self, floor: u8) {
        self.external.remove(floor);
        self.internal.remove(floor);
    }
}
