/*!
 * Tests for caption cue parsing and formatting
 */

use std::fmt::Write;
use capalign::{parse_srt_cues, Cue};
use crate::common;

/// Test timestamp parsing and formatting
#[test]
fn test_timestamp_parsing_withValidTimestamp_shouldParseAndFormat() {
    let ts = "01:23:45,678";
    let ms = Cue::parse_timestamp(ts).unwrap();
    assert_eq!(ms, 5025678);

    let formatted = Cue::format_timestamp(ms);
    assert_eq!(formatted, ts);
}

/// Test timestamp parsing with a dot fraction separator
#[test]
fn test_timestamp_parsing_withDotSeparator_shouldParse() {
    let ms = Cue::parse_timestamp("00:00:01.500").unwrap();
    assert_eq!(ms, 1500);
}

/// Test timestamp parsing with invalid input
#[test]
fn test_timestamp_parsing_withInvalidComponents_shouldReturnError() {
    assert!(Cue::parse_timestamp("00:61:00,000").is_err());
    assert!(Cue::parse_timestamp("00:00:61,000").is_err());
    assert!(Cue::parse_timestamp("garbage").is_err());
}

/// Test that parse then format preserves the exact millisecond value
#[test]
fn test_timestamp_round_trip_withVariousValues_shouldBeExact() {
    for ms in [0u64, 1, 499, 500, 59_999, 3_599_999, 86_399_999] {
        let formatted = Cue::format_timestamp(ms);
        assert_eq!(Cue::parse_timestamp(&formatted).unwrap(), ms);
    }
}

/// Test cue display formatting
#[test]
fn test_cue_display_withValidCue_shouldFormatFourLineBlock() {
    let cue = Cue::new(3, 1000, 2500, "Some text".to_string());
    let mut output = String::new();
    write!(output, "{}", cue).unwrap();

    assert_eq!(output, "3\n00:00:01,000 --> 00:00:02,500\nSome text\n\n");
}

/// Test parsing a well formed SRT document
#[test]
fn test_parse_srt_cues_withValidContent_shouldReturnAllCues() {
    let cues = parse_srt_cues(common::sample_srt());

    assert_eq!(cues.len(), 3);
    assert_eq!(cues[0].id, 1);
    assert_eq!(cues[0].start_ms, 1000);
    assert_eq!(cues[0].end_ms, 4000);
    assert_eq!(cues[0].text, "Hello world");
    assert_eq!(cues[1].start_ms, 5500);
    assert_eq!(cues[1].end_ms, 9250);
    assert_eq!(cues[2].start_ms, 62750);
}

/// Test that cue ids are assigned densely regardless of source index numbers
#[test]
fn test_parse_srt_cues_withSparseSourceIndices_shouldAssignDenseIds() {
    let content = "10\n00:00:01,000 --> 00:00:02,000\nfirst\n\n\
                   42\n00:00:03,000 --> 00:00:04,000\nsecond\n\n";
    let cues = parse_srt_cues(content);

    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0].id, 1);
    assert_eq!(cues[1].id, 2);
}

/// Test that multi-line cue text is flattened to a single line
#[test]
fn test_parse_srt_cues_withMultiLineText_shouldFlattenToSingleLine() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nfirst line\nsecond   line\n\n";
    let cues = parse_srt_cues(content);

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "first line second line");
}

/// Test that blocks with an unparseable timing line are skipped
#[test]
fn test_parse_srt_cues_withMalformedTimingLine_shouldSkipBlock() {
    let content = "1\nnot a timing line\nbroken\n\n\
                   2\n00:00:03,000 --> 00:00:04,000\nkept\n\n";
    let cues = parse_srt_cues(content);

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].id, 1);
    assert_eq!(cues[0].text, "kept");
}

/// Test that empty input yields an empty cue list rather than an error
#[test]
fn test_parse_srt_cues_withEmptyContent_shouldReturnEmptyList() {
    assert!(parse_srt_cues("").is_empty());
    assert!(parse_srt_cues("\n\n\n").is_empty());
}

/// Test that CRLF line endings parse the same as LF
#[test]
fn test_parse_srt_cues_withCrlfLineEndings_shouldParseNormally() {
    let content = "1\r\n00:00:01,000 --> 00:00:02,000\r\nwindows text\r\n\r\n";
    let cues = parse_srt_cues(content);

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "windows text");
}
