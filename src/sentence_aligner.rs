use std::collections::HashSet;
use std::fmt::Write as _;
use serde::Deserialize;

use crate::subtitle_cues::Cue;

// @module: Sentence-level realignment of grouped caption cues

/// Tunables for timing synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignOptions {
    /// Minimum span forced onto a sentence whose resolved end does not come
    /// strictly after its start
    pub min_span_ms: u64,
    /// Span and spacing used when synthesizing timing for sentences with no
    /// timing source at all
    pub synthetic_span_ms: u64,
}

impl Default for AlignOptions {
    fn default() -> Self {
        AlignOptions {
            min_span_ms: 500,
            synthetic_span_ms: 2000,
        }
    }
}

/// A proposed sentence as returned by the external grouping service.
///
/// The service is untrusted: ids may be missing, unknown, or overlapping,
/// and the aligner treats all of that as partial input, never as an error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceProposal {
    /// 1-based position in the proposed sentence list
    pub index: usize,
    /// Merged sentence text
    pub text: String,
    /// Cue ids the service attributed to this sentence; may be empty
    #[serde(default)]
    pub segment_ids: Vec<usize>,
}

/// A merged semantic unit spanning one or more cues, with derived timing.
///
/// Sentences are plain data owned by the caller. Edits to the list (text
/// changes, inserts, removals) never recompute `segment_ids` or timing;
/// only a fresh [`align`] pass does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// 1-based position in the list; reassigned on every mutation, never a
    /// stable key
    pub index: usize,
    /// Editable display text
    pub text: String,
    /// Cue ids that actually contributed timing; empty when no source exists
    pub segment_ids: Vec<usize>,
    /// Derived start, absent only when no timing source was found
    pub start_ms: Option<u64>,
    /// Derived end, absent only when no timing source was found
    pub end_ms: Option<u64>,
}

impl Sentence {
    /// Start timestamp in display format, if timing was resolved
    pub fn start_time(&self) -> Option<String> {
        self.start_ms.map(Cue::format_timestamp)
    }

    /// End timestamp in display format, if timing was resolved
    pub fn end_time(&self) -> Option<String> {
        self.end_ms.map(Cue::format_timestamp)
    }
}

/// Forward cursor for the sequential-consumption fallback.
///
/// One cursor is threaded through a single align pass so that proposals with
/// no usable ids consume cues in order, one each, deterministically.
#[derive(Debug, Default, Clone, Copy)]
struct FallbackCursor {
    next: usize,
}

impl FallbackCursor {
    /// Hand out the next cue not yet claimed in this pass, if any remain
    fn consume<'a>(&mut self, cues: &'a [Cue], claimed: &HashSet<usize>) -> Option<&'a Cue> {
        while self.next < cues.len() {
            let cue = &cues[self.next];
            self.next += 1;
            if !claimed.contains(&cue.id) {
                return Some(cue);
            }
        }
        None
    }
}

/// Align grouped sentence proposals against parsed cues, computing each
/// sentence's timing with graceful degradation when the grouping is partial.
pub fn align(cues: &[Cue], proposals: &[SentenceProposal]) -> Vec<Sentence> {
    align_with(cues, proposals, AlignOptions::default())
}

/// [`align`] with explicit tunables.
///
/// For each proposal, in supplied order:
/// 1. Non-empty `segment_ids` are resolved against the cues; unknown ids,
///    ids repeated within the proposal, and ids already claimed by an earlier
///    sentence in this pass are discarded (first claim wins).
/// 2. If nothing resolved, the sequential fallback cursor assigns the next
///    unconsumed cue as the sole timing source.
/// 3. If cues are exhausted, the cue at the proposal's own ordinal position
///    is used as a last resort.
/// 4. `start_ms`/`end_ms` are the min/max over the resolved cues, clamped so
///    the end comes strictly after the start.
///
/// The operation is total: it never fails, and with no cues at all every
/// proposal comes back as an untimed sentence.
pub fn align_with(cues: &[Cue], proposals: &[SentenceProposal], opts: AlignOptions) -> Vec<Sentence> {
    let mut cursor = FallbackCursor::default();
    let mut claimed: HashSet<usize> = HashSet::new();
    let mut sentences = Vec::with_capacity(proposals.len());

    for proposal in proposals {
        // An id repeated within one proposal counts once
        let mut seen: HashSet<usize> = HashSet::new();
        let mut resolved: Vec<&Cue> = proposal
            .segment_ids
            .iter()
            .filter(|id| !claimed.contains(id) && seen.insert(**id))
            .filter_map(|id| cues.iter().find(|cue| cue.id == *id))
            .collect();

        if resolved.is_empty() {
            if let Some(cue) = cursor.consume(cues, &claimed) {
                resolved.push(cue);
            }
        }

        if resolved.is_empty() {
            // Last resort: the cue sitting at the same ordinal position
            if let Some(cue) = proposal.index.checked_sub(1).and_then(|i| cues.get(i)) {
                resolved.push(cue);
            }
        }

        for cue in &resolved {
            claimed.insert(cue.id);
        }

        let start_ms = resolved.iter().map(|c| c.start_ms).min();
        let mut end_ms = resolved.iter().map(|c| c.end_ms).max();

        if let Some(start) = start_ms {
            // Degenerate spans collapse to a point; force a visible window
            if end_ms.is_none_or(|end| end <= start) {
                end_ms = Some(start + opts.min_span_ms);
            }
        }

        sentences.push(Sentence {
            index: proposal.index,
            text: proposal.text.clone(),
            segment_ids: resolved.iter().map(|c| c.id).collect(),
            start_ms,
            end_ms,
        });
    }

    sentences
}

/// Serialize a sentence list back into SRT text.
pub fn serialize(sentences: &[Sentence]) -> String {
    serialize_with(sentences, AlignOptions::default())
}

/// [`serialize`] with explicit tunables.
///
/// Sentences are renumbered 1-based in list order. A sentence without real
/// timing gets a synthetic start at `position * synthetic_span_ms`, which
/// keeps synthetic starts strictly increasing, and an end one synthetic span
/// later; any end not strictly after its start is clamped to
/// `start + min_span_ms`. Output round-trips through [`crate::subtitle_cues::parse_srt_cues`]
/// without timing loss for every sentence that had a resolved source.
pub fn serialize_with(sentences: &[Sentence], opts: AlignOptions) -> String {
    let mut out = String::new();

    for (position, sentence) in sentences.iter().enumerate() {
        let position = position + 1;
        let start_ms = sentence
            .start_ms
            .unwrap_or(position as u64 * opts.synthetic_span_ms);
        let mut end_ms = sentence
            .end_ms
            .unwrap_or(start_ms + opts.synthetic_span_ms);
        if end_ms <= start_ms {
            end_ms = start_ms + opts.min_span_ms;
        }

        let _ = writeln!(out, "{}", position);
        let _ = writeln!(
            out,
            "{} --> {}",
            Cue::format_timestamp(start_ms),
            Cue::format_timestamp(end_ms)
        );
        let _ = writeln!(out, "{}", sentence.text.trim());
        let _ = writeln!(out);
    }

    out
}

/// Insert an empty sentence after the given index (or append when `None`),
/// reindexing the list densely from 1. Timing is left unset; it is synthesized
/// at serialization time if never aligned.
pub fn insert_sentence(sentences: &mut Vec<Sentence>, after_index: Option<usize>, text: String) {
    let new_sentence = Sentence {
        index: 0,
        text,
        segment_ids: Vec::new(),
        start_ms: None,
        end_ms: None,
    };

    match after_index.and_then(|idx| sentences.iter().position(|s| s.index == idx)) {
        Some(pos) => sentences.insert(pos + 1, new_sentence),
        None => sentences.push(new_sentence),
    }
    reindex(sentences);
}

/// Remove the sentence with the given index, reindexing the remainder densely
/// from 1. Unknown indices are ignored.
pub fn remove_sentence(sentences: &mut Vec<Sentence>, index: usize) {
    sentences.retain(|s| s.index != index);
    reindex(sentences);
}

fn reindex(sentences: &mut [Sentence]) {
    for (i, sentence) in sentences.iter_mut().enumerate() {
        sentence.index = i + 1;
    }
}
