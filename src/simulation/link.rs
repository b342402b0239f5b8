//! Per-link vehicle transport and stop-line queueing
//!
//! A link owns every car on it. Cars travel in the in-transit buffer until
//! their remaining time runs out, then move into the bounded stop-line queue
//! to wait for a green light. Cars that finish travelling while the queue is
//! full are parked on a retry list and are offered queue space before any
//! newly finished car on the following ticks.

use std::collections::VecDeque;

use super::types::Car;

/// A car in transit together with its remaining travel ticks
#[derive(Debug, PartialEq, Eq)]
pub struct Travelling {
    pub car: Car,
    pub remaining: u32,
}

/// Vehicle state of one directed link
#[derive(Debug)]
pub struct Link {
    /// Cars that finished travelling but found the queue full, in retry order
    retry: VecDeque<Car>,
    /// Cars still travelling, in order of entry
    in_transit: VecDeque<Travelling>,
    /// Cars at the stop-line, FIFO
    queue: VecDeque<Car>,
    transit_capacity: usize,
    queue_capacity: usize,
}

impl Link {
    pub fn new(transit_capacity: usize, queue_capacity: usize) -> Self {
        Self {
            retry: VecDeque::new(),
            in_transit: VecDeque::new(),
            queue: VecDeque::new(),
            transit_capacity,
            queue_capacity,
        }
    }

    /// Cars on the link that are not yet at the stop-line, blocked ones included
    pub fn in_transit_len(&self) -> usize {
        self.retry.len() + self.in_transit.len()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Every car owned by the link
    pub fn occupancy(&self) -> usize {
        self.in_transit_len() + self.queue_len()
    }

    pub fn has_transit_room(&self) -> bool {
        self.in_transit_len() < self.transit_capacity
    }

    /// Cars blocked behind a full queue, in retry order
    pub fn blocked(&self) -> impl Iterator<Item = &Car> {
        self.retry.iter()
    }

    /// Cars still travelling, in entry order
    pub fn travelling(&self) -> impl Iterator<Item = &Travelling> {
        self.in_transit.iter()
    }

    /// Cars at the stop-line, head first
    pub fn queued(&self) -> impl Iterator<Item = &Car> {
        self.queue.iter()
    }

    /// Put a car onto the link with `travel_time` ticks to go
    ///
    /// Fails without modifying the link when the in-transit buffer is full;
    /// the car is handed back to the caller.
    pub fn try_enter(&mut self, car: Car, travel_time: u32) -> Result<(), Car> {
        if !self.has_transit_room() {
            return Err(car);
        }
        self.in_transit.push_back(Travelling {
            car,
            remaining: travel_time,
        });
        Ok(())
    }

    /// Advance every travelling car by one tick and move finished cars to the
    /// stop-line queue while it has room
    ///
    /// Blocked cars from earlier ticks are offered queue space first, then
    /// cars that finished this tick in entry order. Each car that does not
    /// fit is pushed onto the front of the retry list, so a group that stays
    /// blocked is retried in reverse order on the next tick. Returns the
    /// number of cars admitted to the queue.
    pub fn advance(&mut self) -> usize {
        let mut moved = 0;
        let mut blocked = VecDeque::with_capacity(self.retry.len());

        for car in self.retry.drain(..) {
            if self.queue.len() < self.queue_capacity {
                self.queue.push_back(car);
                moved += 1;
            } else {
                blocked.push_front(car);
            }
        }

        let mut still_travelling = VecDeque::with_capacity(self.in_transit.len());
        for mut entry in self.in_transit.drain(..) {
            entry.remaining = entry.remaining.saturating_sub(1);
            if entry.remaining > 0 {
                still_travelling.push_back(entry);
            } else if self.queue.len() < self.queue_capacity {
                self.queue.push_back(entry.car);
                moved += 1;
            } else {
                blocked.push_front(entry.car);
            }
        }

        self.retry = blocked;
        self.in_transit = still_travelling;
        moved
    }

    /// The car at the head of the stop-line queue
    pub fn queue_head(&self) -> Option<&Car> {
        self.queue.front()
    }

    pub fn pop_queue_head(&mut self) -> Option<Car> {
        self.queue.pop_front()
    }

    /// Return a car to the head of the queue after a failed departure
    pub(crate) fn restore_queue_head(&mut self, car: Car) {
        self.queue.push_front(car);
    }
}
