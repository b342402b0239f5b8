//! Fixed-cycle signal control
//!
//! The phase is a pure function of the global tick. There is no amber phase;
//! the switch happens on the cycle boundary.

use super::types::Direction;

/// Which pair of approaches currently has a green light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NorthSouth,
    EastWest,
}

impl Phase {
    /// The directions of travel that may proceed in this phase
    pub fn green_directions(self) -> [Direction; 2] {
        match self {
            Phase::NorthSouth => [Direction::North, Direction::South],
            Phase::EastWest => [Direction::East, Direction::West],
        }
    }

    pub fn is_green(self, direction: Direction) -> bool {
        self.green_directions().contains(&direction)
    }
}

/// Green durations for the two phases, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalPlan {
    pub ns_green: u64,
    pub ew_green: u64,
}

impl SignalPlan {
    pub fn new(ns_green: u64, ew_green: u64) -> Self {
        Self { ns_green, ew_green }
    }

    /// Full cycle length, saturating at `u64::MAX`
    pub fn cycle_total(&self) -> u64 {
        self.ns_green.saturating_add(self.ew_green)
    }

    /// Full cycle length, or `None` if it does not fit in a `u64`
    pub fn checked_cycle_total(&self) -> Option<u64> {
        self.ns_green.checked_add(self.ew_green)
    }

    /// Phase active at `tick`
    ///
    /// A zero-length cycle is rejected by config validation; it is treated as
    /// permanently north-south here.
    pub fn phase(&self, tick: u64) -> Phase {
        let cycle = self.cycle_total();
        if cycle == 0 || tick % cycle < self.ns_green {
            Phase::NorthSouth
        } else {
            Phase::EastWest
        }
    }
}
