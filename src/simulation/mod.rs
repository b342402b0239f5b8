//! Grid traffic simulation engine
//!
//! Everything needed to run a simulation lives here: topology, signal
//! control, link transport, intersection service and metric aggregation.
//! Nothing in this module prints; callers format the returned report.

mod config;
mod grid;
mod intersection;
mod link;
mod rng;
mod signal;
mod stats;
mod types;
mod world;

pub use config::{
    SimConfig, TurnProbabilities, DEFAULT_ARRIVAL_RATE, DEFAULT_BASE_TRAVEL_TIME,
    DEFAULT_EW_GREEN, DEFAULT_FLOW_PER_TICK, DEFAULT_GRID_SIZE, DEFAULT_LINK_CAPACITY,
    DEFAULT_NS_GREEN, DEFAULT_QUEUE_CAPACITY, DEFAULT_SEED, DEFAULT_TOTAL_TICKS,
};
pub use grid::{LinkEnds, RoadGrid};
pub use intersection::{Approach, ServiceResult, SimIntersection};
pub use link::{Link, Travelling};
pub use rng::Lcg;
pub use signal::{Phase, SignalPlan};
pub use stats::{Metrics, SimulationReport};
pub use types::{Car, CarId, Direction, GridPos, LinkId, Turn};
pub use world::{run_simulation, SimWorld, TickSummary};
