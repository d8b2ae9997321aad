use std::fmt::Write as _;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

// @module: Rolling caption dedup and plain-text extraction

static TIMING_LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{2}:\d{2}:\d{2}[,.]\d{3}\s*-->\s*\d{2}:\d{2}:\d{2}[,.]\d{3}").unwrap()
});

static MARKUP_TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Counters reported by a cleaning pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanStats {
    /// Cues surviving the pass
    pub kept: usize,
    /// Cues dropped because their text repeated the previous kept cue
    pub dropped_repeats: usize,
    /// Cues dropped because no non-blank text line remained
    pub dropped_empty: usize,
}

/// Deduplicate auto-generated "rolling" caption text.
///
/// Auto captions repeat the previous cue's text as the leading lines of the
/// next cue while new words scroll in. Only the last non-blank text line of
/// each block carries new content, so that line becomes the cue's text and
/// cues whose extracted text exactly repeats the previous kept cue are
/// dropped. Survivors are renumbered densely from 1 with their original
/// timing line emitted untouched. Malformed blocks are skipped, never fatal.
pub fn dedupe_cue_text(raw: &str) -> String {
    dedupe_cue_text_with_stats(raw).0
}

/// Same as [`dedupe_cue_text`] but also reports what was kept and dropped
pub fn dedupe_cue_text_with_stats(raw: &str) -> (String, CleanStats) {
    let mut out = String::with_capacity(raw.len());
    let mut stats = CleanStats::default();

    let mut current_timing: Option<&str> = None;
    let mut current_text_lines: Vec<&str> = Vec::new();
    let mut next_index = 1usize;
    let mut previous_text: Option<String> = None;

    let flush = |timing: Option<&str>,
                 text_lines: &[&str],
                 out: &mut String,
                 next_index: &mut usize,
                 previous_text: &mut Option<String>,
                 stats: &mut CleanStats| {
        let timing = match timing {
            Some(t) => t,
            None => return,
        };
        // Only the last non-blank line carries new content
        let last_line = text_lines
            .iter()
            .rev()
            .find(|l| !l.trim().is_empty())
            .map(|l| l.trim());
        let text = match last_line {
            Some(t) => t,
            None => {
                stats.dropped_empty += 1;
                return;
            }
        };
        if previous_text.as_deref() == Some(text) {
            stats.dropped_repeats += 1;
            return;
        }
        let _ = writeln!(out, "{}", next_index);
        let _ = writeln!(out, "{}", timing);
        let _ = writeln!(out, "{}", text);
        let _ = writeln!(out);
        *next_index += 1;
        stats.kept += 1;
        *previous_text = Some(text.to_string());
    };

    for line in raw.lines() {
        if TIMING_LINE_PATTERN.is_match(line) {
            flush(
                current_timing,
                &current_text_lines,
                &mut out,
                &mut next_index,
                &mut previous_text,
                &mut stats,
            );
            current_timing = Some(line.trim());
            current_text_lines.clear();
        } else if !line.trim().is_empty() && line.trim().parse::<u64>().is_err() {
            // Text content; bare numeric lines are index markers, not text
            current_text_lines.push(line);
        }
    }
    flush(
        current_timing,
        &current_text_lines,
        &mut out,
        &mut next_index,
        &mut previous_text,
        &mut stats,
    );

    debug!(
        "Cleaned rolling captions: {} kept, {} repeats dropped, {} empty dropped",
        stats.kept, stats.dropped_repeats, stats.dropped_empty
    );

    (out, stats)
}

/// Strip caption text down to the plain prose handed to the grouping service.
///
/// Removes timing lines, bare index markers, markup tags and `>>>` speaker
/// arrows, then collapses horizontal whitespace and stacked blank lines.
pub fn strip_to_plain_text(raw: &str) -> String {
    let without_timing = TIMING_LINE_PATTERN.replace_all(raw, "");
    let without_tags = MARKUP_TAG_PATTERN.replace_all(&without_timing, "");

    let mut lines: Vec<String> = Vec::new();
    for line in without_tags.lines() {
        let line = line.replace(">>>", "");
        let trimmed = line.trim();
        if trimmed.parse::<u64>().is_ok() {
            // Leftover index markers become bare numbers once timing is gone
            lines.push(String::new());
            continue;
        }
        let mut collapsed = String::with_capacity(trimmed.len());
        let mut last_was_space = false;
        for c in trimmed.chars() {
            if c == ' ' || c == '\t' {
                if !last_was_space {
                    collapsed.push(' ');
                }
                last_was_space = true;
            } else {
                collapsed.push(c);
                last_was_space = false;
            }
        }
        lines.push(collapsed);
    }

    // Collapse runs of blank lines to a single separator
    let mut out = String::new();
    let mut pending_blank = false;
    for line in lines {
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if pending_blank {
            out.push_str("\n\n");
            pending_blank = false;
        } else if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&line);
    }
    out
}
