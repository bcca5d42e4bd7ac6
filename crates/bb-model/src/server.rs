//! Servers and the per-stage server pool.

use std::fmt;

use bb_core::{CustomerId, SimTime, Stage};

use crate::{ModelError, ModelResult};

/// Stage plus 1-based slot number.  Stable for the whole run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerId {
    pub stage: Stage,
    pub slot:  u32,
}

impl ServerId {
    #[inline]
    pub fn new(stage: Stage, slot: u32) -> Self {
        Self { stage, slot }
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.stage, self.slot)
    }
}

/// The state of one server.
///
/// A server is **idle** (`serving == None`) or **busy** with exactly one
/// customer whose completion is scheduled at `busy_until`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Server {
    pub id:         ServerId,
    pub serving:    Option<CustomerId>,
    pub busy_until: Option<SimTime>,
}

impl Server {
    #[inline]
    pub fn idle(id: ServerId) -> Self {
        Self { id, serving: None, busy_until: None }
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.serving.is_some()
    }
}

/// All servers of one stage, created once per configured capacity.
#[derive(Debug, Clone)]
pub struct ServerPool {
    stage:   Stage,
    servers: Vec<Server>,
}

impl ServerPool {
    /// `count` idle servers numbered `1..=count`.
    pub fn new(stage: Stage, count: u32) -> Self {
        let servers = (1..=count)
            .map(|slot| Server::idle(ServerId::new(stage, slot)))
            .collect();
        Self { stage, servers }
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Lowest-numbered idle server, if any.
    pub fn first_idle(&self) -> Option<ServerId> {
        self.servers.iter().find(|s| !s.is_busy()).map(|s| s.id)
    }

    /// Mark `server` busy with `customer` until `until`.
    pub fn occupy(&mut self, server: ServerId, customer: CustomerId, until: SimTime) -> ModelResult<()> {
        let slot = self.slot_mut(server)?;
        if let Some(serving) = slot.serving {
            return Err(ModelError::ServerBusy { server, serving });
        }
        slot.serving = Some(customer);
        slot.busy_until = Some(until);
        Ok(())
    }

    /// Free `server`, which must currently be serving `customer`.
    pub fn release(&mut self, server: ServerId, customer: CustomerId) -> ModelResult<()> {
        let slot = self.slot_mut(server)?;
        match slot.serving {
            None => Err(ModelError::ServerIdle { server }),
            Some(expected) if expected != customer => Err(ModelError::WrongCustomer {
                server,
                expected,
                found: customer,
            }),
            Some(_) => {
                slot.serving = None;
                slot.busy_until = None;
                Ok(())
            }
        }
    }

    pub fn get(&self, server: ServerId) -> Option<&Server> {
        if server.stage != self.stage || server.slot == 0 {
            return None;
        }
        self.servers.get(server.slot as usize - 1)
    }

    pub fn busy_count(&self) -> usize {
        self.servers.iter().filter(|s| s.is_busy()).count()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Servers in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Server> + '_ {
        self.servers.iter()
    }

    fn slot_mut(&mut self, server: ServerId) -> ModelResult<&mut Server> {
        if server.stage != self.stage || server.slot == 0 {
            return Err(ModelError::UnknownServer { server });
        }
        self.servers
            .get_mut(server.slot as usize - 1)
            .ok_or(ModelError::UnknownServer { server })
    }
}
