//! # Line Classifier Tests
//!
//! Verifies separator detection from the first line, stage keyword matching,
//! sequence number parsing, and the store-completion pre-scan.

use pipeview_core::ConvertError;
use pipeview_core::config::TraceFormatConfig;
use pipeview_core::trace::{LineClassifier, Stage};
use rstest::rstest;

use crate::common::annotated;

#[test]
fn detect_caches_separator_position() {
    let format = TraceFormatConfig::default();
    let c = LineClassifier::detect("  17; O3PipeView:fetch:1", &format).unwrap();
    assert_eq!(c.separator_pos(), 4);
}

#[test]
fn detect_fails_without_separator() {
    let format = TraceFormatConfig::default();
    let err = LineClassifier::detect("O3PipeView:fetch:1", &format).unwrap_err();
    assert!(matches!(err, ConvertError::MissingSeparator { separator: ';', .. }));
}

#[test]
fn detect_honours_configured_separator() {
    let format = TraceFormatConfig {
        separator: '|',
        ..TraceFormatConfig::default()
    };
    let c = LineClassifier::detect("3| O3PipeView:decode:9", &format).unwrap();
    let event = c.classify(1, "3| O3PipeView:decode:9").unwrap().unwrap();
    assert_eq!(event.fseq, 3);
    assert_eq!(event.suffix, "O3PipeView:decode:9");
}

#[rstest]
#[case("O3PipeView:fetch:5:0x80000000:0:1:add x1, x2, x3", Stage::Fetch)]
#[case("O3PipeView:decode:6", Stage::Decode)]
#[case("O3PipeView:issue:7", Stage::Issue)]
#[case("O3PipeView:complete:8", Stage::Complete)]
#[case("O3PipeView:retire:9:store: 0", Stage::Retire)]
#[case("store-comp: 10", Stage::StoreComp)]
fn classify_tags_each_stage(#[case] body: &str, #[case] stage: Stage) {
    let format = TraceFormatConfig::default();
    let line = annotated(42, body);
    let c = LineClassifier::detect(&line, &format).unwrap();
    let event = c.classify(3, &line).unwrap().unwrap();
    assert_eq!(event.stage, stage);
    assert_eq!(event.fseq, 42);
    assert_eq!(event.line_no, 3);
    assert_eq!(event.suffix, body);
    assert_eq!(event.line, line);
}

#[test]
fn classify_ignores_unannotated_chatter() {
    let format = TraceFormatConfig::default();
    let c = LineClassifier::detect(&annotated(1, "O3PipeView:fetch:1"), &format).unwrap();
    assert_eq!(c.classify(2, "[ UART ] hello world").unwrap(), None);
    assert_eq!(c.classify(3, "").unwrap(), None);
}

#[test]
fn classify_rejects_stage_line_without_number() {
    let format = TraceFormatConfig::default();
    let c = LineClassifier::detect(&annotated(1, "O3PipeView:fetch:1"), &format).unwrap();
    let err = c.classify(8, "Core: retire width 2").unwrap_err();
    match err {
        ConvertError::BadSequenceNumber { line_no, line } => {
            assert_eq!(line_no, 8);
            assert_eq!(line, "Core: retire width 2");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn fseq_tolerates_padding() {
    let format = TraceFormatConfig::default();
    let c = LineClassifier::detect("   9; x", &format).unwrap();
    assert_eq!(c.fseq(1, "1234; x").unwrap(), 1234);
    assert_eq!(c.fseq(1, "  12; x").unwrap(), 12);
}

#[test]
fn store_prescan_collects_in_log_order_with_timestamps() {
    let format = TraceFormatConfig::default();
    let lines = vec![
        annotated(1, "O3PipeView:fetch:1:0x80000004:0:1:sw x1, 0(x2)"),
        annotated(2, "store-comp: 130"),
        annotated(1, "store-comp: 120"),
        annotated(3, "O3PipeView:decode:4"),
    ];
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let c = LineClassifier::detect(refs[0], &format).unwrap();
    let mut stores = c.store_completions(&refs).unwrap();
    assert_eq!(stores.len(), 2);

    let first = stores.pop_front().unwrap();
    assert_eq!(first.event.fseq, 2);
    assert_eq!(first.event.line_no, 2);
    assert_eq!(first.timestamp, "130");

    let second = stores.pop_front().unwrap();
    assert_eq!(second.event.fseq, 1);
    assert_eq!(second.timestamp, "120");
}

#[test]
fn store_prescan_on_log_without_stores_is_empty() {
    let format = TraceFormatConfig::default();
    let lines = ["1; O3PipeView:fetch:1", "1; O3PipeView:retire:2:store: 0"];
    let c = LineClassifier::detect(lines[0], &format).unwrap();
    assert!(c.store_completions(&lines).unwrap().is_empty());
}
