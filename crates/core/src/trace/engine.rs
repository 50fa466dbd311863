//! Reconciliation Engine.
//!
//! The engine owns every stage buffer for the duration of one run. Events are
//! buffered as they are observed; nothing is emitted until a retire event
//! arrives. On retire of instruction `r` the engine drains the fetch queue up to
//! and including `r`:
//! 1. **Squash:** Every older fetch that never retired is terminated with zeroed
//!    fields, along with whatever decode/issue/complete events it did log.
//! 2. **Retire:** The record for `r` is assembled from the queue heads and pool
//!    lookups, pairing stores with the next queued store completion.
//!
//! Fetches younger than `r` are never touched, so output order depends only on
//! fetch-sequence order and never on timestamps.

use std::io::Write;

use crate::common::error::{ConvertError, Result};
use crate::config::Config;
use crate::stats::ConvertStats;
use crate::trace::buffers::{EventPool, InOrderQueue, StoreQueue};
use crate::trace::emit::{DISPATCH, RENAME, RecordEmitter};
use crate::trace::event::{Stage, TraceEvent};

/// Retire-driven state machine that rebuilds per-instruction records.
#[derive(Debug)]
pub struct Reconciler<'a, 'c, W: Write> {
    config: &'c Config,
    fetch: InOrderQueue<'a>,
    decode: InOrderQueue<'a>,
    issue: EventPool<'a>,
    complete: EventPool<'a>,
    stores: StoreQueue<'a>,
    emitter: RecordEmitter<W>,
    stats: ConvertStats,
}

impl<'a, 'c, W: Write> Reconciler<'a, 'c, W> {
    /// Creates an engine with empty stage buffers and a pre-scanned store queue.
    pub fn new(config: &'c Config, stores: StoreQueue<'a>, out: W) -> Self {
        Self {
            config,
            fetch: InOrderQueue::new(Stage::Fetch),
            decode: InOrderQueue::new(Stage::Decode),
            issue: EventPool::new(Stage::Issue),
            complete: EventPool::new(Stage::Complete),
            stores,
            emitter: RecordEmitter::new(out),
            stats: ConvertStats::default(),
        }
    }

    /// Returns the statistics collected so far.
    pub const fn stats(&self) -> &ConvertStats {
        &self.stats
    }

    /// Buffers one classified event, reconciling on retire events.
    ///
    /// # Errors
    ///
    /// Returns the fatal consistency errors of [`ConvertError`] raised while
    /// draining for a retire event, or [`ConvertError::Output`] on write failure.
    pub fn observe(&mut self, event: TraceEvent<'a>) -> Result<()> {
        match event.stage {
            Stage::Fetch => self.fetch.push(event),
            Stage::Decode => self.decode.push(event),
            Stage::Issue => Self::pool_insert(&mut self.issue, &mut self.stats, event),
            Stage::Complete => Self::pool_insert(&mut self.complete, &mut self.stats, event),
            Stage::Retire => self.retire(&event)?,
            // Paired from the pre-scanned queue instead.
            Stage::StoreComp => {}
        }
        Ok(())
    }

    /// Drains the fetch queue up to and including the retiring instruction.
    ///
    /// # Errors
    ///
    /// See [`Reconciler::observe`].
    pub fn retire(&mut self, retire: &TraceEvent<'a>) -> Result<()> {
        let r = retire.fseq;
        while let Some(fetch) = self.fetch.pop_through(r) {
            if fetch.fseq == r {
                return self.emit_retired(&fetch, retire);
            }
            self.emit_squashed(&fetch)?;
            self.stats.squashed += 1;
        }

        self.stats.orphan_retires += 1;
        tracing::warn!(
            fseq = r,
            line = retire.line_no,
            "retire event with no buffered fetch; ignored"
        );
        Ok(())
    }

    /// Terminates instructions still in flight, then reports leftovers.
    ///
    /// Pending fetches are emitted as squashed records only when
    /// `reconcile.flush_pending` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::DecodeSkip`] if a flushed instruction issued
    /// without decoding, or [`ConvertError::Output`] on write failure.
    pub fn finish(mut self) -> Result<(ConvertStats, W)> {
        if self.config.reconcile.flush_pending {
            while let Some(fetch) = self.fetch.pop_front() {
                self.emit_squashed(&fetch)?;
                self.stats.flushed += 1;
            }
        } else if !self.fetch.is_empty() {
            tracing::info!(
                pending = self.fetch.len(),
                "dropping unretired instructions at end of input"
            );
        }

        self.stats.unclaimed_events = (self.issue.len() + self.complete.len()) as u64;
        self.stats.stores_unclaimed = self.stores.len() as u64;
        if self.stats.unclaimed_events > 0 {
            tracing::warn!(
                issue = self.issue.len(),
                complete = self.complete.len(),
                "out-of-order events never claimed by any instruction"
            );
        }
        if self.stats.stores_unclaimed > 0 {
            tracing::warn!(
                stores = self.stats.stores_unclaimed,
                "store completions never claimed by a retiring store"
            );
        }

        self.emitter.flush()?;
        self.stats.lines_written = self.emitter.lines_written();
        Ok((self.stats, self.emitter.into_inner()))
    }

    fn pool_insert(pool: &mut EventPool<'a>, stats: &mut ConvertStats, event: TraceEvent<'a>) {
        if !pool.insert(event) {
            stats.duplicate_events += 1;
            tracing::warn!(
                fseq = event.fseq,
                line = event.line_no,
                stage = %pool.stage(),
                "duplicate event for an unclaimed instruction; keeping the first"
            );
        }
    }

    /// Emits the full record of the just-dequeued `fetch`, which `retire` belongs to.
    fn emit_retired(&mut self, fetch: &TraceEvent<'a>, retire: &TraceEvent<'a>) -> Result<()> {
        let r = retire.fseq;

        if self.decode.front_fseq() != Some(r) {
            return Err(ConvertError::DecodeMismatch {
                fseq: r,
                decode: self.decode.front().map(|e| e.line.to_string()),
            });
        }
        let store = if self.config.trace.is_store(fetch.line) {
            let store = self
                .stores
                .pop_front()
                .ok_or_else(|| ConvertError::MissingStoreCompletion {
                    fseq: r,
                    retire: retire.line.to_string(),
                })?;
            if store.event.fseq != r {
                return Err(ConvertError::StoreMismatch {
                    fseq: r,
                    retire: retire.line.to_string(),
                    store: store.event.line.to_string(),
                });
            }
            Some(store)
        } else {
            None
        };

        self.emitter.stage(fetch)?;
        if let Some(decode) = self.decode.pop_if(r) {
            self.emitter.stage(&decode)?;
        }
        self.emit_backend(r)?;
        match store {
            Some(store) => {
                self.emitter.store_retire(retire, store.timestamp)?;
                self.stats.stores_matched += 1;
            }
            None => self.emitter.stage(retire)?,
        }

        self.stats.retired += 1;
        self.stats.records_emitted += 1;
        tracing::trace!(fseq = r, store = store.is_some(), "retired");
        Ok(())
    }

    /// Emits a terminated record for the just-dequeued `fetch`, which will never retire.
    fn emit_squashed(&mut self, fetch: &TraceEvent<'a>) -> Result<()> {
        let id = fetch.fseq;
        let decoded = self.decode.front_fseq() == Some(id);

        if !decoded {
            // An instruction cannot issue or complete without having decoded.
            for pool in [&self.issue, &self.complete] {
                if pool.contains(id) {
                    return Err(ConvertError::DecodeSkip {
                        fseq: id,
                        stage: pool.stage(),
                    });
                }
            }
        }

        self.emitter.stage(fetch)?;
        match self.decode.pop_if(id) {
            Some(decode) => {
                self.emitter.stage(&decode)?;
                self.emit_backend(id)?;
            }
            None => {
                self.emitter.placeholder(Stage::Decode.name())?;
                self.emitter.placeholder(RENAME)?;
                self.emitter.placeholder(DISPATCH)?;
                self.emitter.placeholder(Stage::Issue.name())?;
                self.emitter.placeholder(Stage::Complete.name())?;
                self.stats.issue_placeholders += 1;
                self.stats.complete_placeholders += 1;
            }
        }
        self.emitter.squashed_retire()?;

        self.stats.records_emitted += 1;
        tracing::trace!(fseq = id, decoded, "squashed");
        Ok(())
    }

    /// Emits rename, dispatch, issue, and complete for a decoded instruction.
    fn emit_backend(&mut self, fseq: u64) -> Result<()> {
        self.emitter.placeholder(RENAME)?;
        self.emitter.placeholder(DISPATCH)?;

        match self.issue.take(fseq) {
            Some(issue) => self.emitter.stage(&issue)?,
            None => {
                self.emitter.placeholder(Stage::Issue.name())?;
                self.stats.issue_placeholders += 1;
            }
        }
        match self.complete.take(fseq) {
            Some(complete) => self.emitter.stage(&complete)?,
            None => {
                self.emitter.placeholder(Stage::Complete.name())?;
                self.stats.complete_placeholders += 1;
            }
        }
        Ok(())
    }
}
