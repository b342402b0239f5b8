//! Metric accumulation and the end-of-run report

use super::config::SimConfig;
use super::types::Car;

/// Running totals collected while the simulation advances
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metrics {
    /// Cars that left the grid
    pub completed: u64,
    /// Sum of exit tick minus entry tick over completed cars
    pub travel_time_sum: u64,
    /// Sum of per-tick vehicles-in-system samples
    pub occupancy_sum: u64,
    pub samples: u64,
    /// Cars created at the boundary, including dropped ones
    pub spawned: u64,
    /// Arrivals lost because their entry link was full
    pub dropped: u64,
}

impl Metrics {
    pub fn record_completion(&mut self, car: &Car, tick: u64) {
        self.completed += 1;
        self.travel_time_sum += car.travel_time(tick);
    }

    pub fn record_spawn(&mut self) {
        self.spawned += 1;
    }

    pub fn record_drop(&mut self) {
        self.dropped += 1;
    }

    pub fn sample_occupancy(&mut self, vehicles: usize) {
        self.occupancy_sum += vehicles as u64;
        self.samples += 1;
    }

    /// Completed trips per tick over `ticks`
    pub fn throughput(&self, ticks: u64) -> f64 {
        if ticks == 0 {
            0.0
        } else {
            self.completed as f64 / ticks as f64
        }
    }

    pub fn mean_travel_time(&self) -> f64 {
        if self.completed == 0 {
            0.0
        } else {
            self.travel_time_sum as f64 / self.completed as f64
        }
    }

    pub fn mean_vehicles_in_system(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.occupancy_sum as f64 / self.samples as f64
        }
    }
}

/// Result of a finished run, with the configuration it was produced from
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub config: SimConfig,
    /// Ticks actually simulated
    pub ticks: u64,
    pub metrics: Metrics,
    pub throughput: f64,
    pub mean_travel_time: f64,
    pub mean_vehicles_in_system: f64,
}

impl SimulationReport {
    pub fn new(config: SimConfig, ticks: u64, metrics: Metrics) -> Self {
        Self {
            throughput: metrics.throughput(ticks),
            mean_travel_time: metrics.mean_travel_time(),
            mean_vehicles_in_system: metrics.mean_vehicles_in_system(),
            config,
            ticks,
            metrics,
        }
    }

    pub fn completed(&self) -> u64 {
        self.metrics.completed
    }
}
