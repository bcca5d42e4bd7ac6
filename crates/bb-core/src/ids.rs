//! Strongly typed customer identifiers.
//!
//! Customer ids are assigned sequentially starting at 1 and are never reused
//! within a run.  `IdAllocator` is the only place new ids come from.

use std::fmt;

/// Sequential identity of one customer.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomerId(pub u32);

impl CustomerId {
    #[inline(always)]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "customer {}", self.0)
    }
}

impl From<CustomerId> for u32 {
    #[inline(always)]
    fn from(id: CustomerId) -> u32 {
        id.0
    }
}

/// Hands out monotonically increasing `CustomerId`s, starting at 1.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    issued: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id.
    #[inline]
    pub fn next_id(&mut self) -> CustomerId {
        self.issued += 1;
        CustomerId(self.issued)
    }

    /// How many ids have been issued so far.
    #[inline]
    pub fn issued(&self) -> u32 {
        self.issued
    }
}
