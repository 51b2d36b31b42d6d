//! Arena-pooled cyclist storage (`spec.md` §9 "Object pooling of cyclists").
//!
//! Cyclists live in a dense `Vec`; active ones are referenced by index
//! (`CyclistId`). A completed cyclist's slot is only returned to the free
//! list once the caller explicitly calls [`CyclistPool::release`] — the
//! simulation does this after an optional retention window so `snapshot()`
//! can still see recently-completed cyclists, not on completion itself.

use cyclenet_core::CyclistId;

use crate::cyclist::{Cyclist, CyclistState};
use crate::error::{AgentError, AgentResult};

pub struct CyclistPool {
    slots: Vec<Cyclist>,
    free_mask: Vec<bool>,
    free_list: Vec<u32>,
}

impl CyclistPool {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_mask: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Number of slots ever allocated, including freed ones still holding
    /// stale data.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Insert `cyclist`, reusing a freed slot if one exists. Returns the
    /// assigned id (also written into `cyclist.id`).
    pub fn spawn(&mut self, mut cyclist: Cyclist) -> CyclistId {
        if let Some(idx) = self.free_list.pop() {
            cyclist.id = CyclistId(idx);
            self.free_mask[idx as usize] = false;
            self.slots[idx as usize] = cyclist;
            CyclistId(idx)
        } else {
            let id = CyclistId(self.slots.len() as u32);
            cyclist.id = id;
            self.slots.push(cyclist);
            self.free_mask.push(false);
            id
        }
    }

    /// Return a slot to the free list for reuse. The cyclist's data remains
    /// readable (but is considered stale) until the next `spawn` overwrites
    /// it.
    pub fn release(&mut self, id: CyclistId) {
        self.free_mask[id.index()] = true;
        self.free_list.push(id.0);
    }

    pub fn get(&self, id: CyclistId) -> &Cyclist {
        &self.slots[id.index()]
    }

    pub fn get_mut(&mut self, id: CyclistId) -> &mut Cyclist {
        &mut self.slots[id.index()]
    }

    pub fn try_get(&self, id: CyclistId) -> AgentResult<&Cyclist> {
        match self.slots.get(id.index()) {
            Some(c) if !self.free_mask[id.index()] => Ok(c),
            _ => Err(AgentError::NotFound(id)),
        }
    }

    /// All non-freed slots, in index order.
    pub fn iter_occupied(&self) -> impl Iterator<Item = &Cyclist> + '_ {
        self.slots
            .iter()
            .zip(self.free_mask.iter())
            .filter_map(|(c, &freed)| if freed { None } else { Some(c) })
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Cyclist> + '_ {
        self.iter_occupied().filter(|c| c.state == CyclistState::Active)
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }
}

impl Default for CyclistPool {
    fn default() -> Self {
        Self::new()
    }
}
