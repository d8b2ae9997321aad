use std::fmt;
use once_cell::sync::Lazy;
use regex::Regex;
use anyhow::{Result, anyhow, Context};

// @module: Caption cue model and SRT parsing

// @const: SRT timing line regex, accepts both comma and dot fraction separators
static TIMING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}:\d{2}:\d{2}[,.]\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2}[,.]\d{3})").unwrap()
});

// @struct: Single caption cue as originally timed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: Dense 1-based id assigned in parse order
    pub id: usize,

    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Flattened single-line cue text
    pub text: String,
}

impl Cue {
    /// Creates a new cue - used by tests and external consumers
    pub fn new(id: usize, start_ms: u64, end_ms: u64, text: String) -> Self {
        Cue {
            id,
            start_ms,
            end_ms,
            text,
        }
    }

    /// Parse an SRT timestamp (HH:MM:SS,fff or HH:MM:SS.fff) to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
        let parts: Vec<&str> = timestamp.split(&[':', ',', '.'][..]).collect();

        if parts.len() != 4 {
            return Err(anyhow!("Invalid timestamp format: {}", timestamp));
        }

        let hours: u64 = parts[0].trim().parse().context("Failed to parse hours")?;
        let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
        let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
        let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(anyhow!("Invalid time components in timestamp: {}", timestamp));
        }

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,fff)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.id)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Parse SRT text into an ordered cue list.
///
/// Cue ids are assigned densely starting at 1 in parse order, independent of
/// whatever index numbers the source file carries. Blocks whose timing line
/// does not match the SRT timestamp pattern are skipped; parsing is
/// best-effort and never fails, so empty or unusable input yields an empty
/// list.
pub fn parse_srt_cues(content: &str) -> Vec<Cue> {
    let normalized = content.replace('\r', "");
    let lines: Vec<&str> = normalized.split('\n').collect();
    let mut cues: Vec<Cue> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let index_line = lines[i].trim();
        if index_line.is_empty() {
            i += 1;
            continue;
        }
        // Blocks must open with a bare index marker
        if !index_line.chars().all(|c| c.is_ascii_digit()) {
            i += 1;
            continue;
        }
        i += 1;
        if i >= lines.len() {
            break;
        }

        let timing_line = lines[i].trim();
        let captures = match TIMING_LINE_REGEX.captures(timing_line) {
            Some(c) => c,
            None => {
                i += 1;
                continue;
            }
        };
        i += 1;

        let mut text_lines: Vec<&str> = Vec::new();
        while i < lines.len() && !lines[i].trim().is_empty() {
            text_lines.push(lines[i].trim());
            i += 1;
        }
        while i < lines.len() && lines[i].trim().is_empty() {
            i += 1;
        }

        let text = flatten_text(&text_lines);
        let start_ms = match Cue::parse_timestamp(&captures[1]) {
            Ok(ms) => ms,
            Err(_) => continue,
        };
        let end_ms = match Cue::parse_timestamp(&captures[2]) {
            Ok(ms) => ms,
            Err(_) => continue,
        };

        cues.push(Cue {
            id: cues.len() + 1,
            start_ms,
            end_ms,
            text,
        });
    }

    cues
}

/// Join cue text lines into one line with runs of whitespace collapsed
fn flatten_text(lines: &[&str]) -> String {
    let joined = lines.join(" ");
    let mut out = String::with_capacity(joined.len());
    let mut last_was_space = false;
    for c in joined.chars() {
        if c.is_whitespace() {
            if !last_was_space && !out.is_empty() {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(c);
            last_was_space = false;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}
