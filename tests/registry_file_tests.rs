//! Registry parsing against a realistic `emoji-test.txt` excerpt
//!
//! The unit tests in `registry.rs` cover the grammar line by line; this
//! file runs the parser over a fixture with the real file's shape: the
//! Unicode header block, group and subgroup comments, padded columns,
//! and a mix of qualification statuses.

use std::fs;

use glyphsnap::registry::{parse_registry, ParseOutcome, QualifiedStatus};

fn parse_sample() -> ParseOutcome {
    let text = fs::read_to_string("tests/fixtures/emoji-test-sample.txt")
        .expect("Failed to read sample registry fixture");
    parse_registry(&text).expect("Sample registry should parse")
}

#[test]
fn test_sample_counts() {
    let outcome = parse_sample();

    assert_eq!(outcome.records.len(), 7);
    assert_eq!(outcome.skipped.len(), 3);
    assert_eq!(outcome.unmatched, 0);
}

#[test]
fn test_sample_names_in_input_order() {
    let outcome = parse_sample();

    let names: Vec<&str> = outcome.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "grinning_face",
            "grinning_face_with_big_eyes",
            "smiling_face",
            "face_in_clouds",
            "smiling_face_with_hearts",
            "couple_with_heart__man__man",
            "flag__England",
        ]
    );
}

#[test]
fn test_sample_records_are_fully_qualified() {
    let outcome = parse_sample();

    assert!(outcome.records.iter().all(|r| r.status == QualifiedStatus::FullyQualified));
}

#[test]
fn test_sample_sequences_decode() {
    let outcome = parse_sample();

    assert_eq!(outcome.records[0].sequence, "\u{1F600}");
    // Variation selector kept alongside the base scalar
    assert_eq!(outcome.records[2].sequence, "\u{263A}\u{FE0F}");
    // ZWJ sequence: one char per hex group
    assert_eq!(outcome.records[3].sequence, "\u{1F636}\u{200D}\u{1F32B}\u{FE0F}");
    // Subdivision flag built from five-digit tag characters
    assert_eq!(outcome.records[6].sequence.chars().count(), 7);
    assert_eq!(outcome.records[6].sequence.chars().next(), Some('\u{1F3F4}'));
}

#[test]
fn test_sample_scalars_kept_verbatim() {
    let outcome = parse_sample();

    assert_eq!(outcome.records[0].scalar, "😀");
    assert_eq!(outcome.records[4].scalar, "🥰");
}

#[test]
fn test_sample_skipped_statuses_and_names() {
    let outcome = parse_sample();

    let statuses: Vec<QualifiedStatus> = outcome.skipped.iter().map(|s| s.status).collect();
    assert_eq!(
        statuses,
        vec![
            QualifiedStatus::Unqualified,
            QualifiedStatus::MinimallyQualified,
            QualifiedStatus::Component,
        ]
    );

    // Skipped names go through the same sanitizer as rendered ones
    assert_eq!(outcome.skipped[0].name, "smiling_face");
    assert_eq!(outcome.skipped[1].name, "face_in_clouds");
    assert_eq!(outcome.skipped[2].name, "red_hair");

    // Line numbers point into the fixture in order
    assert!(outcome.skipped.windows(2).all(|pair| pair[0].line < pair[1].line));
}

#[test]
fn test_sample_skin_tone_line_leaves_no_trace() {
    let outcome = parse_sample();

    // Neither rendered, nor skipped, nor counted as unmatched
    assert!(outcome.records.iter().all(|r| !r.name.contains("waving")));
    assert!(outcome.skipped.iter().all(|s| !s.name.contains("waving")));
    assert_eq!(outcome.unmatched, 0);
}

#[test]
fn test_sample_parse_is_deterministic() {
    let first = parse_sample();
    let second = parse_sample();

    assert_eq!(first.records, second.records);
    assert_eq!(first.skipped, second.skipped);
}
