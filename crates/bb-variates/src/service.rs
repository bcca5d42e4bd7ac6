//! Per-stage service-time samplers.
//!
//! # Paired normal draws
//!
//! The report desk samples from a normal distribution.  Box–Muller yields two
//! independent samples per pair of uniforms, so the second sample is parked in
//! a [`NormalPairCache`] and becomes the duration of the *next* report-desk
//! service, whichever customer that is.  The cache holds at most one sample
//! and is always emptied before a new pair is drawn, which means two
//! consecutive report-desk services consume exactly two uniforms.

use bb_core::{SimConfig, Stage, UniformSource};
use tracing::warn;

use crate::generators::{exponential, normal, uniform, NormalPair, Variate};

/// The second half of a normal pair, waiting for the next service.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CachedNormal {
    /// Uniforms that produced the pair (kept for display).
    pub rnd1:  f64,
    pub rnd2:  f64,
    pub value: f64,
}

/// Holds at most one deferred normal sample.
#[derive(Debug, Clone, Default)]
pub struct NormalPairCache {
    pending: Option<CachedNormal>,
}

impl NormalPairCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sample waiting to be used, if any.
    pub fn pending(&self) -> Option<&CachedNormal> {
        self.pending.as_ref()
    }

    /// Consume the cached sample, or draw a fresh pair and cache its second
    /// half.
    pub fn next<S: UniformSource>(&mut self, source: &mut S, mean: f64, stdev: f64) -> ServiceDraw {
        match self.pending.take() {
            Some(cached) => ServiceDraw::CachedNormal(cached),
            None => {
                let pair = normal(source, mean, stdev);
                self.pending = Some(CachedNormal {
                    rnd1:  pair.rnd1,
                    rnd2:  pair.rnd2,
                    value: pair.second,
                });
                ServiceDraw::FreshNormal(pair)
            }
        }
    }
}

/// What a sampler produced for one service.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ServiceDraw {
    /// One uniform, one sample (uniform or exponential distribution).
    Single(Variate),
    /// A freshly drawn normal pair; `first` is this service's sample.
    FreshNormal(NormalPair),
    /// The cached second sample of an earlier pair; no uniforms consumed.
    CachedNormal(CachedNormal),
}

impl ServiceDraw {
    /// The sample as drawn, possibly negative for the normal distribution.
    pub fn raw(&self) -> f64 {
        match self {
            ServiceDraw::Single(v)       => v.value,
            ServiceDraw::FreshNormal(p)  => p.first,
            ServiceDraw::CachedNormal(c) => c.value,
        }
    }

    /// The service duration to schedule.  Never negative.
    pub fn duration(&self) -> f64 {
        self.raw().max(0.0)
    }
}

/// Service-time distribution of one stage.
#[derive(Debug, Clone)]
pub enum ServiceTime {
    Uniform { min: f64, max: f64 },
    Exponential { mean: f64 },
    PairedNormal { mean: f64, stdev: f64, cache: NormalPairCache },
}

impl ServiceTime {
    /// The sampler `config` prescribes for `stage`.
    pub fn for_stage(stage: Stage, config: &SimConfig) -> Self {
        match stage {
            Stage::Counter => ServiceTime::Uniform {
                min: config.counter_service_min,
                max: config.counter_service_max,
            },
            Stage::UpdateDesk => ServiceTime::Exponential {
                mean: config.update_service_mean,
            },
            Stage::ReportDesk => ServiceTime::PairedNormal {
                mean:  config.report_service_mean,
                stdev: config.report_service_stdev,
                cache: NormalPairCache::new(),
            },
        }
    }

    /// Draw the duration of one service.
    pub fn sample<S: UniformSource>(&mut self, source: &mut S) -> ServiceDraw {
        let draw = match self {
            ServiceTime::Uniform { min, max } => ServiceDraw::Single(uniform(source, *min, *max)),
            ServiceTime::Exponential { mean } => ServiceDraw::Single(exponential(source, *mean)),
            ServiceTime::PairedNormal { mean, stdev, cache } => cache.next(source, *mean, *stdev),
        };
        if draw.raw() < 0.0 {
            warn!(sample = draw.raw(), "negative service time clamped to zero");
        }
        draw
    }
}
