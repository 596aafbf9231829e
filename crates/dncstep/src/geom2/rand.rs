//! Seeded random point sets for demos, tests, and benches.
//!
//! Purpose
//! - Keep all randomness outside the steppers. A run is reproducible from the
//!   point set alone; the point set is reproducible from a `ReplayToken`.
//!
//! Model
//! - `count` points drawn uniformly in `[margin, 1 - margin]²` (unit square, y-up).
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG,
//!   so several independent sets can be drawn from one seed.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::{Point, PointSet};

/// Error type for point generation.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorError {
    InvalidParams { reason: String },
}

impl GeneratorError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid generator params: {reason}"),
        }
    }
}

impl std::error::Error for GeneratorError {}

/// Point generator configuration.
#[derive(Clone, Copy, Debug)]
pub struct PointGenCfg {
    pub count: usize,
    /// Distance kept free along every side of the unit square. Must lie in `[0, 0.5)`.
    pub margin: f64,
}

impl Default for PointGenCfg {
    fn default() -> Self {
        Self {
            count: 25,
            margin: 0.06,
        }
    }
}

impl PointGenCfg {
    fn validate(&self) -> Result<(), GeneratorError> {
        if !self.margin.is_finite() || !(0.0..0.5).contains(&self.margin) {
            return Err(GeneratorError::invalid("margin must lie in [0, 0.5)"));
        }
        Ok(())
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { seed, index: 0 }
    }

    /// Token for the next draw in the same stream.
    #[inline]
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw `cfg.count` points with ids `0..count`.
pub fn random_points(cfg: PointGenCfg, tok: ReplayToken) -> Result<PointSet, GeneratorError> {
    cfg.validate()?;
    let mut rng = tok.to_std_rng();
    let span = 1.0 - 2.0 * cfg.margin;
    let points = (0..cfg.count)
        .map(|k| {
            let x = cfg.margin + span * rng.gen::<f64>();
            let y = cfg.margin + span * rng.gen::<f64>();
            Point::new(k, x, y)
        })
        .collect();
    // Coordinates are finite and ids unique by construction.
    PointSet::new(points).map_err(|e| GeneratorError::invalid(e.to_string()))
}
