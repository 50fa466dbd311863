//! Conversion statistics collection and reporting.
//!
//! This module tracks what one conversion run did with the input. It provides:
//! 1. **Records:** Emitted records split into retired, squashed, and flushed at end of input.
//! 2. **Stores:** Store completions paired with retiring stores, and leftovers.
//! 3. **Placeholders:** Issue/complete stages reported as zero for lack of an event.
//! 4. **Anomalies:** Tolerated oddities such as orphan retires or duplicate pool events.

use std::time::Instant;

/// Counters collected over one conversion run.
#[derive(Clone, Debug)]
pub struct ConvertStats {
    start_time: Instant,
    /// Input lines scanned by the forward pass.
    pub lines_scanned: u64,
    /// Output lines written.
    pub lines_written: u64,
    /// Instruction records emitted (retired + squashed + flushed).
    pub records_emitted: u64,

    /// Records terminated by their own retire event.
    pub retired: u64,
    /// Records terminated because a younger instruction retired first.
    pub squashed: u64,
    /// Records terminated because the input ended before they retired.
    pub flushed: u64,

    /// Retiring stores paired with a store-completion event.
    pub stores_matched: u64,
    /// Store-completion events never claimed by a retiring store.
    pub stores_unclaimed: u64,

    /// Issue stages written as zero placeholders.
    pub issue_placeholders: u64,
    /// Complete stages written as zero placeholders.
    pub complete_placeholders: u64,

    /// Retire events with no buffered fetch at or below their id.
    pub orphan_retires: u64,
    /// Issue/complete events rejected because their id was already live in the pool.
    pub duplicate_events: u64,
    /// Issue/complete events still pooled when the run finished.
    pub unclaimed_events: u64,
}

impl Default for ConvertStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            lines_scanned: 0,
            lines_written: 0,
            records_emitted: 0,
            retired: 0,
            squashed: 0,
            flushed: 0,
            stores_matched: 0,
            stores_unclaimed: 0,
            issue_placeholders: 0,
            complete_placeholders: 0,
            orphan_retires: 0,
            duplicate_events: 0,
            unclaimed_events: 0,
        }
    }
}

impl ConvertStats {
    /// Returns true if the run hit any tolerated anomaly worth a second look.
    pub const fn has_anomalies(&self) -> bool {
        self.orphan_retires > 0
            || self.duplicate_events > 0
            || self.unclaimed_events > 0
            || self.stores_unclaimed > 0
    }

    /// Prints the statistics report to stderr, keeping stdout free for the trace.
    #[allow(clippy::cast_precision_loss)]
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let records = self.records_emitted.max(1) as f64;
        let pct = |n: u64| (n as f64 / records) * 100.0;

        eprintln!("\n==========================================================");
        eprintln!("O3PIPEVIEW CONVERSION STATISTICS");
        eprintln!("==========================================================");
        eprintln!("host_seconds             {seconds:.4} s");
        eprintln!("lines_scanned            {}", self.lines_scanned);
        eprintln!("lines_written            {}", self.lines_written);
        eprintln!("records                  {}", self.records_emitted);
        eprintln!("----------------------------------------------------------");
        eprintln!("RECORDS");
        eprintln!("  records.retired        {} ({:.2}%)", self.retired, pct(self.retired));
        eprintln!("  records.squashed       {} ({:.2}%)", self.squashed, pct(self.squashed));
        eprintln!("  records.flushed        {} ({:.2}%)", self.flushed, pct(self.flushed));
        eprintln!("  stage.issue_zero       {}", self.issue_placeholders);
        eprintln!("  stage.complete_zero    {}", self.complete_placeholders);
        eprintln!("----------------------------------------------------------");
        eprintln!("STORES");
        eprintln!("  stores.matched         {}", self.stores_matched);
        eprintln!("  stores.unclaimed       {}", self.stores_unclaimed);
        eprintln!("----------------------------------------------------------");
        eprintln!("ANOMALIES");
        eprintln!("  retire.orphan          {}", self.orphan_retires);
        eprintln!("  pool.duplicate         {}", self.duplicate_events);
        eprintln!("  pool.unclaimed         {}", self.unclaimed_events);
        eprintln!("==========================================================");
    }
}
