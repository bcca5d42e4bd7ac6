use bb_core::{CustomerId, Stage};
use thiserror::Error;

use crate::ServerId;

/// Entity invariant violations.  Any of these means the scheduling logic is
/// wrong; callers treat them as fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("server {server} does not exist")]
    UnknownServer { server: ServerId },

    #[error("server {server} is already serving {serving}")]
    ServerBusy { server: ServerId, serving: CustomerId },

    #[error("server {server} is idle but a completion was reported for it")]
    ServerIdle { server: ServerId },

    #[error("server {server} is serving {expected}, not {found}")]
    WrongCustomer {
        server:   ServerId,
        expected: CustomerId,
        found:    CustomerId,
    },

    #[error("{customer} belongs to stage {found}, not {expected}")]
    StageMismatch {
        customer: CustomerId,
        expected: Stage,
        found:    Stage,
    },
}

pub type ModelResult<T> = Result<T, ModelError>;
