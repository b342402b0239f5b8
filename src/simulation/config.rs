//! Simulation configuration
//!
//! All inputs to the engine are plain numbers. Defaults reproduce the
//! reference 4×4 scenario.

use anyhow::{bail, ensure, Context, Result};

use super::signal::SignalPlan;
use super::types::Turn;

/// Default grid dimension (N×N intersections)
pub const DEFAULT_GRID_SIZE: usize = 4;
pub const DEFAULT_TOTAL_TICKS: u64 = 1000;
pub const DEFAULT_NS_GREEN: u64 = 20;
pub const DEFAULT_EW_GREEN: u64 = 20;
/// Cars allowed through per green approach per tick
pub const DEFAULT_FLOW_PER_TICK: usize = 1;
pub const DEFAULT_LINK_CAPACITY: usize = 50;
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;
/// Ticks a car needs to traverse a link
pub const DEFAULT_BASE_TRAVEL_TIME: u32 = 6;
/// Probability of a new car per boundary link per tick
pub const DEFAULT_ARRIVAL_RATE: f64 = 0.33;
pub const DEFAULT_SEED: u32 = 42;

const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Probabilities of each turn kind at an intersection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnProbabilities {
    pub left: f64,
    pub straight: f64,
    pub right: f64,
}

impl Default for TurnProbabilities {
    fn default() -> Self {
        Self {
            left: 0.25,
            straight: 0.50,
            right: 0.25,
        }
    }
}

impl TurnProbabilities {
    /// Map a uniform sample in [0, 1) onto a turn using the partition
    /// `[0, left)`, `[left, left + straight)`, `[left + straight, 1)`.
    pub fn choose(&self, sample: f64) -> Turn {
        if sample < self.left {
            Turn::Left
        } else if sample < self.left + self.straight {
            Turn::Straight
        } else {
            Turn::Right
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, p) in [
            ("left", self.left),
            ("straight", self.straight),
            ("right", self.right),
        ] {
            ensure!(
                p.is_finite() && p >= 0.0,
                "turn probability '{}' must be a non-negative number, got {}",
                name,
                p
            );
        }
        let total = self.left + self.straight + self.right;
        ensure!(
            (total - 1.0).abs() <= PROBABILITY_TOLERANCE,
            "turn probabilities must sum to 1, got {}",
            total
        );
        Ok(())
    }
}

/// Complete numeric configuration of one simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub grid_size: usize,
    pub total_ticks: u64,
    pub signal: SignalPlan,
    pub flow_per_tick: usize,
    /// Max cars in transit on a single link
    pub link_capacity: usize,
    /// Max cars waiting at a single stop-line
    pub queue_capacity: usize,
    pub base_travel_time: u32,
    pub arrival_rate: f64,
    pub turn_probabilities: TurnProbabilities,
    pub seed: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            total_ticks: DEFAULT_TOTAL_TICKS,
            signal: SignalPlan::new(DEFAULT_NS_GREEN, DEFAULT_EW_GREEN),
            flow_per_tick: DEFAULT_FLOW_PER_TICK,
            link_capacity: DEFAULT_LINK_CAPACITY,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            base_travel_time: DEFAULT_BASE_TRAVEL_TIME,
            arrival_rate: DEFAULT_ARRIVAL_RATE,
            turn_probabilities: TurnProbabilities::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl SimConfig {
    /// Check the configuration for values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            bail!("grid size must be at least 1");
        }
        let cycle = self.signal.checked_cycle_total().with_context(|| {
            format!(
                "signal cycle length overflows (ns_green={}, ew_green={})",
                self.signal.ns_green, self.signal.ew_green
            )
        })?;
        ensure!(
            cycle > 0,
            "signal cycle must be at least one tick long (ns_green={}, ew_green={})",
            self.signal.ns_green,
            self.signal.ew_green
        );
        ensure!(
            self.arrival_rate.is_finite() && (0.0..=1.0).contains(&self.arrival_rate),
            "arrival rate must be within [0, 1], got {}",
            self.arrival_rate
        );
        self.turn_probabilities.validate()?;
        Ok(())
    }

    /// Travel time assigned to a car entering any link
    pub fn travel_time(&self) -> u32 {
        self.base_travel_time
    }
}
