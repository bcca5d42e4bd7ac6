//! Fluent builder for constructing a [`Sim`].

use bb_core::{SimConfig, SimRng, UniformSource};

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim<S>`].
///
/// # Inputs
///
/// | Method        | Default                          |
/// |---------------|----------------------------------|
/// | `new(config)` | required                         |
/// | `.source(s)`  | `SimRng::new(config.seed)`       |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .source(SequenceSource::constant(0.5)?)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<S: UniformSource = SimRng> {
    config: SimConfig,
    source: S,
}

impl SimBuilder<SimRng> {
    /// A builder drawing from a `SimRng` seeded with `config.seed`.
    pub fn new(config: SimConfig) -> Self {
        let source = SimRng::new(config.seed);
        Self { config, source }
    }
}

impl<S: UniformSource> SimBuilder<S> {
    /// Replace the uniform source, e.g. with a scripted or counting one.
    pub fn source<T: UniformSource>(self, source: T) -> SimBuilder<T> {
        SimBuilder { config: self.config, source }
    }

    /// Validate the configuration and return a ready-to-run [`Sim`].
    ///
    /// Configuration errors surface here, before any event is processed.
    pub fn build(self) -> SimResult<Sim<S>> {
        self.config.validate()?;
        Ok(Sim::new(self.config, self.source))
    }
}
