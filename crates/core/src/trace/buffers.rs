//! Stage Buffers for not-yet-claimed trace events.
//!
//! Fetch and decode are in-order stages, so their events are held in FIFO queues
//! whose heads always belong to the oldest unretired instruction. Issue and
//! writeback fire out of order, so their events are held in pools keyed by fetch
//! sequence number. Store completions get their own FIFO, filled by a pre-scan.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};

use crate::trace::event::{Stage, TraceEvent};

/// FIFO of events from an in-order stage.
#[derive(Debug, Clone)]
pub struct InOrderQueue<'a> {
    stage: Stage,
    events: VecDeque<TraceEvent<'a>>,
}

impl<'a> InOrderQueue<'a> {
    /// Creates an empty queue for `stage`.
    pub const fn new(stage: Stage) -> Self {
        Self {
            stage,
            events: VecDeque::new(),
        }
    }

    /// Returns the stage this queue buffers.
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Appends an event at the tail.
    pub fn push(&mut self, event: TraceEvent<'a>) {
        self.events.push_back(event);
    }

    /// Returns the oldest buffered event.
    pub fn front(&self) -> Option<&TraceEvent<'a>> {
        self.events.front()
    }

    /// Returns the fetch sequence number at the head of the queue.
    pub fn front_fseq(&self) -> Option<u64> {
        self.events.front().map(|e| e.fseq)
    }

    /// Removes and returns the oldest event.
    pub fn pop_front(&mut self) -> Option<TraceEvent<'a>> {
        self.events.pop_front()
    }

    /// Removes the head only if it belongs to `fseq`.
    pub fn pop_if(&mut self, fseq: u64) -> Option<TraceEvent<'a>> {
        if self.front_fseq() == Some(fseq) {
            self.events.pop_front()
        } else {
            None
        }
    }

    /// Removes the head if it belongs to `fseq` or to an older instruction.
    pub fn pop_through(&mut self, fseq: u64) -> Option<TraceEvent<'a>> {
        if self.front_fseq().is_some_and(|head| head <= fseq) {
            self.events.pop_front()
        } else {
            None
        }
    }

    /// Returns the number of buffered events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Unordered pool of events from an out-of-order stage, keyed by fetch sequence number.
///
/// At most one event per sequence number is live: a second event for an id that
/// has not been claimed yet is rejected and the earlier one kept.
#[derive(Debug, Clone)]
pub struct EventPool<'a> {
    stage: Stage,
    events: HashMap<u64, TraceEvent<'a>>,
}

impl<'a> EventPool<'a> {
    /// Creates an empty pool for `stage`.
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            events: HashMap::new(),
        }
    }

    /// Returns the stage this pool buffers.
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Inserts an event. Returns false if an event for the same id is already live.
    pub fn insert(&mut self, event: TraceEvent<'a>) -> bool {
        match self.events.entry(event.fseq) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                let _ = slot.insert(event);
                true
            }
        }
    }

    /// Removes and returns the event for `fseq`, if one is live.
    pub fn take(&mut self, fseq: u64) -> Option<TraceEvent<'a>> {
        self.events.remove(&fseq)
    }

    /// Returns true if an event for `fseq` is live.
    pub fn contains(&self, fseq: u64) -> bool {
        self.events.contains_key(&fseq)
    }

    /// Returns the number of live events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// A store-completion event paired with its extracted timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCompletion<'a> {
    /// The classified store-completion line.
    pub event: TraceEvent<'a>,
    /// Timestamp spliced into the owning store's retire line.
    pub timestamp: &'a str,
}

/// FIFO of store completions, in the program order of the stores' retirements.
#[derive(Debug, Clone, Default)]
pub struct StoreQueue<'a> {
    entries: VecDeque<StoreCompletion<'a>>,
}

impl<'a> StoreQueue<'a> {
    /// Appends a store completion at the tail.
    pub fn push(&mut self, completion: StoreCompletion<'a>) {
        self.entries.push_back(completion);
    }

    /// Removes and returns the oldest store completion.
    pub fn pop_front(&mut self) -> Option<StoreCompletion<'a>> {
        self.entries.pop_front()
    }

    /// Returns the number of queued completions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no completions are queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
