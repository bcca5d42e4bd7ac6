//! Uniform random sources.
//!
//! # Determinism strategy
//!
//! Every random quantity in a run is derived from a single stream of uniform
//! draws in `[0, 1)`.  The stream is abstracted by [`UniformSource`] so tests
//! can inject scripted values ([`SequenceSource`]) or count how many draws a
//! piece of logic consumed ([`CountingSource`]).  Production runs use
//! [`SimRng`], a seeded `SmallRng`: the same seed always yields the same
//! state vector.
//!
//! A run owns its source exclusively; nothing here is `Sync`-shared.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{CoreError, CoreResult};

/// A stream of uniform draws in `[0, 1)`.
///
/// Implementors must never return a value outside `[0, 1)`.  A draw of
/// exactly `0.0` is allowed; generators that feed a logarithm guard against it.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Seeded simulation-level RNG.
///
/// Used only in single-threaded contexts.  Independent replications must each
/// hold their own `SimRng`.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }
}

impl UniformSource for SimRng {
    /// `Standard` for `f64` samples the half-open interval `[0, 1)`.
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

// ── SequenceSource ────────────────────────────────────────────────────────────

/// Replays a fixed list of uniforms, cycling back to the start when exhausted.
///
/// `SequenceSource::constant(0.5)` yields `0.5` forever, which pins every
/// uniform service time to the midpoint of its range.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// Build from `values`; every value must lie in `[0, 1)`.
    pub fn new(values: Vec<f64>) -> CoreResult<Self> {
        if values.is_empty() {
            return Err(CoreError::EmptySequence);
        }
        if let Some(&bad) = values.iter().find(|v| !(0.0..1.0).contains(*v)) {
            return Err(CoreError::UniformOutOfRange(bad));
        }
        Ok(Self { values, cursor: 0 })
    }

    /// A source that always returns `value`.
    pub fn constant(value: f64) -> CoreResult<Self> {
        Self::new(vec![value])
    }
}

impl UniformSource for SequenceSource {
    fn next_uniform(&mut self) -> f64 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

// ── CountingSource ────────────────────────────────────────────────────────────

/// Wraps another source and counts the draws taken from it.
#[derive(Debug, Clone)]
pub struct CountingSource<S> {
    inner: S,
    draws: u64,
}

impl<S: UniformSource> CountingSource<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, draws: 0 }
    }

    /// Number of uniforms drawn so far.
    #[inline]
    pub fn draws(&self) -> u64 {
        self.draws
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: UniformSource> UniformSource for CountingSource<S> {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.draws += 1;
        self.inner.next_uniform()
    }
}
