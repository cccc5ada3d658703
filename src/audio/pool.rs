//! Pooling manager for fire-and-forget playback instances

use tracing::debug;

use crate::error::Error;

use super::instance::{Ownership, SampleInstance};

/// Handle to a pool-owned instance, valid until the pool reclaims it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(u64);

/// Owns fire-and-forget playback instances and reclaims them once they
/// pause, either by finishing naturally or being paused explicitly.
///
/// Caller-owned instances (from `create_instance`) never enter the pool.
pub struct InstancePool {
    instances: Vec<(InstanceId, SampleInstance)>,
    capacity: usize,
    next_id: u64,
}

impl InstancePool {
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Bounds the number of simultaneously live pooled instances.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::new(),
            capacity,
            next_id: 0,
        }
    }

    /// Takes ownership of a pooled instance, reclaiming finished ones first
    /// if the pool is full.
    pub(crate) fn adopt(&mut self, instance: SampleInstance) -> Result<InstanceId, Error> {
        debug_assert_eq!(instance.ownership(), Ownership::Pooled);
        if self.instances.len() >= self.capacity {
            self.reclaim();
        }
        if self.instances.len() >= self.capacity {
            return Err(Error::PoolExhausted {
                capacity: self.capacity,
            });
        }
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        self.instances.push((id, instance));
        Ok(id)
    }

    /// Queries a live pooled instance. `None` once reclaimed.
    pub fn get(&self, id: InstanceId) -> Option<&SampleInstance> {
        self.instances
            .iter()
            .find(|(i, _)| *i == id)
            .map(|(_, inst)| inst)
    }

    /// Mutable access to a live pooled instance.
    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut SampleInstance> {
        self.instances
            .iter_mut()
            .find(|(i, _)| *i == id)
            .map(|(_, inst)| inst)
    }

    /// Advances every playing instance, as the consuming mixer would.
    pub fn advance_frames(&mut self, frames: usize) {
        for (_, instance) in &mut self.instances {
            instance.advance_frames(frames);
        }
    }

    /// Releases every paused instance, returning how many were reclaimed.
    pub fn reclaim(&mut self) -> usize {
        let before = self.instances.len();
        self.instances.retain(|(_, inst)| inst.is_playing());
        let reclaimed = before - self.instances.len();
        if reclaimed > 0 {
            debug!(reclaimed, live = self.instances.len(), "reclaimed audio instances");
        }
        reclaimed
    }

    /// Number of live pooled instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns true if no pooled instances are live.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl Default for InstancePool {
    fn default() -> Self {
        Self::new()
    }
}
