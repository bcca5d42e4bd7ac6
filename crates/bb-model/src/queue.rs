//! FIFO waiting line of one stage.

use std::collections::VecDeque;

use bb_core::Stage;

use crate::{Customer, ModelError, ModelResult};

#[derive(Debug, Clone)]
pub struct StationQueue {
    stage: Stage,
    inner: VecDeque<Customer>,
}

impl StationQueue {
    pub fn new(stage: Stage) -> Self {
        Self { stage, inner: VecDeque::new() }
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Append `customer` to the back of the line and mark it waiting.
    pub fn push(&mut self, mut customer: Customer) -> ModelResult<()> {
        if customer.stage != self.stage {
            return Err(ModelError::StageMismatch {
                customer: customer.id,
                expected: self.stage,
                found:    customer.stage,
            });
        }
        customer.waiting = true;
        self.inner.push_back(customer);
        Ok(())
    }

    /// Remove the customer at the front and mark it in service.
    pub fn pop(&mut self) -> Option<Customer> {
        let mut customer = self.inner.pop_front()?;
        customer.waiting = false;
        Some(customer)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Waiting customers, front first.
    pub fn iter(&self) -> impl Iterator<Item = &Customer> + '_ {
        self.inner.iter()
    }
}
