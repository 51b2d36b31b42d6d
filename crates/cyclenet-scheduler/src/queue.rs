//! `EventQueue<P>` — continuous-time priority queue of scheduled payloads.
//!
//! This is the event-time scheduler of `spec.md` §4.1: a min-heap keyed on
//! `SimTime`, FIFO among ties, supporting cancellation of not-yet-fired
//! events. The queue is payload-agnostic — it knows nothing about cyclists,
//! arrival generators, or micro-steps. The simulation driver (`cyclenet-sim`)
//! owns the dispatch loop that pops an event, inspects its payload, and
//! reacts — including rescheduling the same continuation for a later time.
//!
//! Cancellation uses lazy deletion: [`EventQueue::cancel`] tombstones the id
//! rather than searching the heap, and [`EventQueue::step`]/[`EventQueue::peek_time`]
//! skip tombstoned entries as they're popped. This keeps `cancel` O(1)
//! at the cost of a few wasted heap pops for cancelled events — cheap
//! relative to a full heap rebuild or linear scan.

use std::collections::{BinaryHeap, HashSet};

use cyclenet_core::SimTime;

use crate::error::{SchedulerError, SchedulerResult};
use crate::event::{Event, EventId};

pub struct EventQueue<P> {
    heap: BinaryHeap<Event<P>>,
    cancelled: HashSet<EventId>,
    live: HashSet<EventId>,
    next_seq: u64,
    next_id: u64,
    now: SimTime,
}

impl<P> EventQueue<P> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            cancelled: HashSet::new(),
            live: HashSet::new(),
            next_seq: 0,
            next_id: 0,
            now: SimTime::ZERO,
        }
    }

    /// The time of the most recently dispatched event (`spec.md` §8 P3:
    /// monotonically non-decreasing).
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Number of live (not yet fired, not cancelled) scheduled events.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Schedule `payload` to fire at `at`.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::TimeInPast`] if `at` precedes the clock's
    /// current position — a caller bug, since nothing in this model ever
    /// needs to schedule into the past.
    pub fn schedule(&mut self, at: SimTime, payload: P) -> SchedulerResult<EventId> {
        if at < self.now {
            return Err(SchedulerError::TimeInPast {
                requested: at,
                now: self.now,
            });
        }
        let id = EventId(self.next_id);
        self.next_id += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Event {
            id,
            time: at,
            seq,
            payload,
        });
        self.live.insert(id);
        Ok(id)
    }

    /// Cancel a not-yet-fired event. Returns `true` if `id` was live.
    ///
    /// Safe to call with an id that already fired or was already cancelled
    /// — it's simply a no-op returning `false`.
    pub fn cancel(&mut self, id: EventId) -> bool {
        if self.live.remove(&id) {
            self.cancelled.insert(id);
            true
        } else {
            false
        }
    }

    /// The time of the next live event without dispatching it, or `None` if
    /// the queue is drained of live events.
    pub fn peek_time(&mut self) -> Option<SimTime> {
        self.drop_cancelled_head();
        self.heap.peek().map(|e| e.time)
    }

    /// Pop and dispatch the next live event. Advances `now` to its time.
    ///
    /// Returns `None` once no live events remain.
    pub fn step(&mut self) -> Option<(SimTime, P)> {
        self.drop_cancelled_head();
        let event = self.heap.pop()?;
        self.live.remove(&event.id);
        self.now = event.time;
        Some((event.time, event.payload))
    }

    fn drop_cancelled_head(&mut self) {
        while let Some(top) = self.heap.peek() {
            if self.cancelled.remove(&top.id) {
                self.heap.pop();
            } else {
                break;
            }
        }
    }
}

impl<P> Default for EventQueue<P> {
    fn default() -> Self {
        Self::new()
    }
}
