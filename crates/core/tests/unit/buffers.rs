//! # Stage Buffer Tests
//!
//! Verifies FIFO ordering of the in-order queues and keyed matching in the
//! out-of-order pools.

use pipeview_core::trace::{EventPool, InOrderQueue, Stage, StoreCompletion, StoreQueue, TraceEvent};

fn event(fseq: u64, stage: Stage, line: &'static str) -> TraceEvent<'static> {
    TraceEvent {
        fseq,
        stage,
        line_no: 1,
        line,
        suffix: line,
    }
}

// ══════════════════════════════════════════════════════════
// 1. In-order queues
// ══════════════════════════════════════════════════════════

#[test]
fn queue_pops_in_push_order() {
    let mut q = InOrderQueue::new(Stage::Fetch);
    q.push(event(1, Stage::Fetch, "a"));
    q.push(event(2, Stage::Fetch, "b"));
    assert_eq!(q.stage(), Stage::Fetch);
    assert_eq!(q.len(), 2);
    assert_eq!(q.front_fseq(), Some(1));
    assert_eq!(q.pop_front().map(|e| e.line), Some("a"));
    assert_eq!(q.pop_front().map(|e| e.line), Some("b"));
    assert!(q.is_empty());
    assert_eq!(q.pop_front(), None);
}

#[test]
fn queue_pop_if_only_matches_head() {
    let mut q = InOrderQueue::new(Stage::Decode);
    q.push(event(3, Stage::Decode, "d3"));
    q.push(event(5, Stage::Decode, "d5"));
    assert_eq!(q.pop_if(5), None);
    assert_eq!(q.len(), 2);
    assert_eq!(q.pop_if(3).map(|e| e.fseq), Some(3));
    assert_eq!(q.front().map(|e| e.fseq), Some(5));
}

#[test]
fn queue_pop_through_stops_at_younger_head() {
    let mut q = InOrderQueue::new(Stage::Fetch);
    q.push(event(1, Stage::Fetch, "f1"));
    q.push(event(2, Stage::Fetch, "f2"));
    q.push(event(4, Stage::Fetch, "f4"));
    assert_eq!(q.pop_through(3).map(|e| e.fseq), Some(1));
    assert_eq!(q.pop_through(3).map(|e| e.fseq), Some(2));
    assert_eq!(q.pop_through(3), None);
    assert_eq!(q.len(), 1);
}

// ══════════════════════════════════════════════════════════
// 2. Out-of-order pools
// ══════════════════════════════════════════════════════════

#[test]
fn pool_take_matches_by_id_regardless_of_insert_order() {
    let mut pool = EventPool::new(Stage::Issue);
    assert!(pool.insert(event(9, Stage::Issue, "i9")));
    assert!(pool.insert(event(4, Stage::Issue, "i4")));
    assert!(pool.contains(4));
    assert_eq!(pool.take(4).map(|e| e.line), Some("i4"));
    assert!(!pool.contains(4));
    assert_eq!(pool.take(4), None);
    assert_eq!(pool.len(), 1);
}

#[test]
fn pool_keeps_first_event_for_live_id() {
    let mut pool = EventPool::new(Stage::Complete);
    assert!(pool.insert(event(7, Stage::Complete, "first")));
    assert!(!pool.insert(event(7, Stage::Complete, "second")));
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.take(7).map(|e| e.line), Some("first"));
    assert!(pool.is_empty());
    assert_eq!(pool.stage(), Stage::Complete);
}

#[test]
fn pool_accepts_id_again_after_take() {
    let mut pool = EventPool::new(Stage::Issue);
    assert!(pool.insert(event(1, Stage::Issue, "x")));
    assert!(pool.take(1).is_some());
    assert!(pool.insert(event(1, Stage::Issue, "y")));
}

// ══════════════════════════════════════════════════════════
// 3. Store-completion queue
// ══════════════════════════════════════════════════════════

#[test]
fn store_queue_is_fifo() {
    let mut q = StoreQueue::default();
    q.push(StoreCompletion {
        event: event(2, Stage::StoreComp, "s2"),
        timestamp: "40",
    });
    q.push(StoreCompletion {
        event: event(1, Stage::StoreComp, "s1"),
        timestamp: "41",
    });
    assert_eq!(q.len(), 2);
    assert_eq!(q.pop_front().map(|s| s.timestamp), Some("40"));
    assert_eq!(q.pop_front().map(|s| s.event.fseq), Some(1));
    assert!(q.is_empty());
}
