//! Intersection service
//!
//! Each tick an intersection releases cars from the stop-lines of its green
//! approaches. A released car picks a turn, then either leaves the grid or
//! moves onto the outgoing link in its new direction.

use log::trace;

use super::config::SimConfig;
use super::grid::RoadGrid;
use super::link::Link;
use super::rng::Lcg;
use super::signal::Phase;
use super::stats::Metrics;
use super::types::{Direction, GridPos, LinkId};

/// An incoming link and the direction cars on it travel into the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Approach {
    pub link: LinkId,
    pub heading: Direction,
}

/// Outcome of serving one intersection for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceResult {
    /// Cars that left a stop-line, whether onto a link or out of the grid
    pub served: usize,
    /// Subset of `served` that left the grid
    pub exited: usize,
}

/// An intersection with its approaches and departures resolved to links
#[derive(Debug, Clone)]
pub struct SimIntersection {
    pub position: GridPos,
    /// Incoming links in fixed service order
    pub approaches: Vec<Approach>,
    /// Outgoing link per direction (clockwise order); `None` leaves the grid
    departures: [Option<LinkId>; 4],
}

impl SimIntersection {
    pub fn new(position: GridPos, grid: &RoadGrid) -> Self {
        let approaches = grid
            .incoming(position)
            .into_iter()
            .filter_map(|(from, heading)| {
                grid.link_between(from, position)
                    .map(|link| Approach { link, heading })
            })
            .collect();

        let departures = Direction::CLOCKWISE.map(|d| {
            position
                .neighbor(d, grid.size())
                .and_then(|to| grid.link_between(position, to))
        });

        Self {
            position,
            approaches,
            departures,
        }
    }

    /// Link a car leaving in `direction` enters, or `None` if it exits the grid
    pub fn departure(&self, direction: Direction) -> Option<LinkId> {
        self.departures[direction.clockwise_index()]
    }

    /// Serve every green approach for this tick
    ///
    /// Approaches are handled in their fixed order and each releases at most
    /// `flow_per_tick` cars, head first. When the head car's departure link
    /// is full the approach stops for the tick and the car stays at the head;
    /// other approaches are unaffected.
    pub fn serve(
        &self,
        tick: u64,
        phase: Phase,
        links: &mut [Link],
        rng: &mut Lcg,
        config: &SimConfig,
        metrics: &mut Metrics,
    ) -> ServiceResult {
        let mut result = ServiceResult::default();

        for approach in self.approaches.iter().filter(|a| phase.is_green(a.heading)) {
            let mut released = 0;
            while released < config.flow_per_tick {
                let Some(car) = links[approach.link.0].pop_queue_head() else {
                    break;
                };

                let turn = config.turn_probabilities.choose(rng.next_f64());
                let direction = approach.heading.apply(turn);

                match self.departure(direction) {
                    None => {
                        metrics.record_completion(&car, tick);
                        result.exited += 1;
                    }
                    Some(next) => {
                        if let Err(car) = links[next.0].try_enter(car, config.travel_time()) {
                            trace!(
                                "Car {:?} blocked at {:?} heading {:?}: link full",
                                car.id,
                                self.position,
                                direction
                            );
                            links[approach.link.0].restore_queue_head(car);
                            break;
                        }
                    }
                }
                released += 1;
                result.served += 1;
            }
        }

        result
    }
}
