//! Deterministic random source
//!
//! A 32-bit linear congruential generator. Every random decision in the
//! engine (arrivals and turns) is drawn from a single `Lcg` owned by the
//! world, so a seed fully determines a run.

use rand::{RngCore, SeedableRng};

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;
const MODULUS: f64 = 4_294_967_296.0;

/// `state = (A * state + C) mod 2^32`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current state, usable to resume the sequence with `Lcg::new`
    pub fn state(&self) -> u32 {
        self.state
    }

    fn step(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
        self.state
    }

    /// Next uniform value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / MODULUS
    }
}

impl RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.step() as u64;
        let lo = self.step() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Lcg {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_values_from_seed_42() {
        let mut rng = Lcg::new(42);
        // (1664525 * 42 + 1013904223) mod 2^32
        assert_eq!(rng.next_u32(), 1_083_814_273);
        let expected = ((1_083_814_273u64 * 1_664_525 + 1_013_904_223) % 4_294_967_296) as f64
            / 4_294_967_296.0;
        assert_eq!(rng.next_f64(), expected);
    }

    #[test]
    fn values_stay_in_unit_interval() {
        let mut rng = Lcg::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Lcg::new(123);
        let mut b = Lcg::from_seed(123u32.to_le_bytes());
        for _ in 0..100 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn state_resumes_sequence() {
        let mut rng = Lcg::new(99);
        rng.next_u32();
        let mut resumed = Lcg::new(rng.state());
        assert_eq!(rng.next_u32(), resumed.next_u32());
    }
}
