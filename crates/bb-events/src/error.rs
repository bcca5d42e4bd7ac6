use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("the event queue is empty")]
    Empty,
}

pub type EventResult<T> = Result<T, EventError>;
