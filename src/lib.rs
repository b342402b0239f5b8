//! Grid Traffic Simulation Library
//!
//! A discrete-time, fixed-cycle signal traffic simulator over an N×N grid of
//! intersections. The engine returns numeric results; presentation is left to
//! the caller.

pub mod simulation;
