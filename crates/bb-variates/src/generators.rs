//! Inverse-transform and Box–Muller generators.
//!
//! All three functions are pure given the source: feeding two sources that
//! replay the same uniforms produces identical variates.  Parameter validity
//! (positive means, `min <= max`) is checked once by `SimConfig::validate`,
//! not on every draw.

use std::f64::consts::PI;

use bb_core::UniformSource;

/// One uniform draw and the sample derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variate {
    pub rnd:   f64,
    pub value: f64,
}

/// Two uniforms and the two independent normal samples they produce.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalPair {
    pub rnd1:   f64,
    pub rnd2:   f64,
    /// `mean + stdev·√(−2 ln u1)·cos(2π u2)`
    pub first:  f64,
    /// `mean + stdev·√(−2 ln u1)·sin(2π u2)`
    pub second: f64,
}

/// Exponential sample with the given `mean`: `−mean · ln(1 − u)`.
///
/// `u` lies in `[0, 1)`, so `1 − u` is never zero.
pub fn exponential<S: UniformSource>(source: &mut S, mean: f64) -> Variate {
    let rnd = source.next_uniform();
    Variate { rnd, value: -mean * (1.0 - rnd).ln() }
}

/// Uniform sample in `[min, max)`: `min + u · (max − min)`.
pub fn uniform<S: UniformSource>(source: &mut S, min: f64, max: f64) -> Variate {
    let rnd = source.next_uniform();
    Variate { rnd, value: min + rnd * (max - min) }
}

/// Box–Muller pair from exactly two uniforms.
///
/// `u1` feeds `ln`, so a draw of exactly `0` is clamped to the smallest
/// positive `f64` rather than resampled; the pair always costs two draws.
/// The reported `rnd1` is the raw draw.
pub fn normal<S: UniformSource>(source: &mut S, mean: f64, stdev: f64) -> NormalPair {
    let rnd1 = source.next_uniform();
    let rnd2 = source.next_uniform();

    let radius = (-2.0 * rnd1.max(f64::MIN_POSITIVE).ln()).sqrt();
    let angle = 2.0 * PI * rnd2;

    NormalPair {
        rnd1,
        rnd2,
        first:  mean + stdev * radius * angle.cos(),
        second: mean + stdev * radius * angle.sin(),
    }
}
