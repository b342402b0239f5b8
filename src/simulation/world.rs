//! Main simulation world that ties everything together
//!
//! The world owns the grid, every link's vehicles, the random source and the
//! metric accumulators. One call to [`SimWorld::tick`] performs, in order:
//! link advancement, intersection service, boundary arrivals and the
//! occupancy sample.

use anyhow::{Context, Result};
use log::{debug, info, trace};
use rand::SeedableRng;

use super::config::SimConfig;
use super::grid::RoadGrid;
use super::intersection::SimIntersection;
use super::link::Link;
use super::rng::Lcg;
use super::stats::{Metrics, SimulationReport};
use super::types::{Car, CarId, LinkId};

/// What happened during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick: u64,
    /// Cars that moved from a link into its stop-line queue
    pub moved_to_queue: usize,
    /// Cars released by intersections
    pub served: usize,
    /// Cars that left the grid
    pub exited: usize,
    /// Cars created at the boundary
    pub spawned: usize,
    /// Of those, cars lost because the entry link was full
    pub dropped: usize,
    /// Vehicles in the system after the tick
    pub occupancy: usize,
}

/// The main simulation world
pub struct SimWorld {
    config: SimConfig,
    grid: RoadGrid,
    /// Indexed by `LinkId`
    links: Vec<Link>,
    /// Row-major
    intersections: Vec<SimIntersection>,
    /// Links that receive arrivals, in link order
    entry_links: Vec<LinkId>,
    rng: Lcg,
    metrics: Metrics,
    next_car_id: u64,
    tick: u64,
}

impl SimWorld {
    /// Build a world from a validated configuration
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate().context("Invalid simulation configuration")?;

        let grid = RoadGrid::new(config.grid_size)?;
        let links = grid
            .links()
            .map(|_| Link::new(config.link_capacity, config.queue_capacity))
            .collect();
        let intersections = grid
            .positions()
            .map(|pos| SimIntersection::new(pos, &grid))
            .collect();
        let entry_links = grid.boundary_incoming_links();

        debug!(
            "Built {}x{} grid: {} links, {} entry links",
            grid.size(),
            grid.size(),
            grid.link_count(),
            entry_links.len()
        );

        Ok(Self {
            rng: Lcg::from_seed(config.seed.to_le_bytes()),
            config,
            grid,
            links,
            intersections,
            entry_links,
            metrics: Metrics::default(),
            next_car_id: 0,
            tick: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &RoadGrid {
        &self.grid
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Index of the next tick to run
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.0)
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn intersections(&self) -> &[SimIntersection] {
        &self.intersections
    }

    pub fn entry_links(&self) -> &[LinkId] {
        &self.entry_links
    }

    pub fn in_transit_count(&self) -> usize {
        self.links.iter().map(Link::in_transit_len).sum()
    }

    pub fn queued_count(&self) -> usize {
        self.links.iter().map(Link::queue_len).sum()
    }

    /// Every car currently on the grid
    pub fn vehicles_in_system(&self) -> usize {
        self.in_transit_count() + self.queued_count()
    }

    fn next_car(&mut self) -> Car {
        let id = CarId(self.next_car_id);
        self.next_car_id += 1;
        Car::new(id, self.tick)
    }

    fn advance_links(&mut self) -> usize {
        self.links.iter_mut().map(Link::advance).sum()
    }

    fn serve_intersections(&mut self, summary: &mut TickSummary) {
        let phase = self.config.signal.phase(self.tick);
        for intersection in &self.intersections {
            let result = intersection.serve(
                self.tick,
                phase,
                &mut self.links,
                &mut self.rng,
                &self.config,
                &mut self.metrics,
            );
            summary.served += result.served;
            summary.exited += result.exited;
        }
    }

    /// One Bernoulli draw per entry link; a car that finds its link full is
    /// dropped rather than displacing traffic already on it
    fn generate_arrivals(&mut self, summary: &mut TickSummary) {
        for i in 0..self.entry_links.len() {
            let link = self.entry_links[i];
            if self.rng.next_f64() >= self.config.arrival_rate {
                continue;
            }

            let car = self.next_car();
            self.metrics.record_spawn();
            summary.spawned += 1;

            let travel_time = self.config.travel_time();
            if let Err(car) = self.links[link.0].try_enter(car, travel_time) {
                debug!(
                    "Dropped arrival {:?} at tick {}: entry link {:?} is full",
                    car.id, self.tick, link
                );
                self.metrics.record_drop();
                summary.dropped += 1;
            }
        }
    }

    /// Run one tick
    pub fn tick(&mut self) -> TickSummary {
        let mut summary = TickSummary {
            tick: self.tick,
            ..TickSummary::default()
        };

        summary.moved_to_queue = self.advance_links();
        self.serve_intersections(&mut summary);
        self.generate_arrivals(&mut summary);

        summary.occupancy = self.vehicles_in_system();
        self.metrics.sample_occupancy(summary.occupancy);

        trace!("{:?}", summary);
        self.tick += 1;
        summary
    }

    /// Run the remaining configured ticks and report the results
    pub fn run(&mut self) -> SimulationReport {
        info!(
            "Running {}x{} grid for {} ticks (seed {})",
            self.config.grid_size, self.config.grid_size, self.config.total_ticks, self.config.seed
        );

        while self.tick < self.config.total_ticks {
            self.tick();
        }

        let report = self.report();
        info!(
            "Simulation complete: {} trips completed, {} spawned, {} dropped",
            report.metrics.completed, report.metrics.spawned, report.metrics.dropped
        );
        report
    }

    /// Report for the ticks run so far
    pub fn report(&self) -> SimulationReport {
        SimulationReport::new(self.config.clone(), self.tick, self.metrics.clone())
    }
}

/// Build a world from `config` and run it to completion
pub fn run_simulation(config: SimConfig) -> Result<SimulationReport> {
    let mut world = SimWorld::new(config)?;
    Ok(world.run())
}
