use bb_core::{ConfigError, CoreError, SimTime};
use bb_events::EventError;
use bb_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("entity invariant violated: {0}")]
    Model(#[from] ModelError),

    #[error("event queue: {0}")]
    Event(#[from] EventError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("event at {event} dispatched after the clock reached {clock}")]
    TimeWentBackwards { clock: SimTime, event: SimTime },

    #[error("event scheduled at {at} but the clock is already at {clock}")]
    ScheduledInPast { clock: SimTime, at: SimTime },

    #[error("the init event was dispatched twice")]
    DuplicateInit,

    #[error("a {0} event was dispatched before the init event")]
    NotStarted(&'static str),

    #[error("the simulation has already finished")]
    AlreadyFinished,

    #[error("a customer left but none were counted in the system")]
    EmptySystem,
}

pub type SimResult<T> = Result<T, SimError>;
