//! Segmenter: splits a raw transcript into ordered speaker turns
//!
//! Single linear scan. A marker line closes the open turn and opens a new one;
//! every other line is buffered, except the noise token which is dropped.
//! Content before the first marker becomes an implicit user turn.

use lazy_static::lazy_static;
use regex::Regex;
use crate::{ASSISTANT_MARKERS, NOISE_TOKEN, USER_MARKERS};
use crate::types::{Conversation, Speaker, Turn};

lazy_static! {
    // Whole trimmed line, exact literal, case-sensitive
    static ref RE_USER_MARKER: Regex = marker_regex(&USER_MARKERS);
    static ref RE_ASSISTANT_MARKER: Regex = marker_regex(&ASSISTANT_MARKERS);
}

fn marker_regex(markers: &[&str]) -> Regex {
    let alternatives: Vec<String> = markers.iter().map(|m| regex::escape(m)).collect();
    Regex::new(&format!("^(?:{})$", alternatives.join("|"))).unwrap()
}

/// Speaker opened by a marker line, None for ordinary content
pub fn marker_speaker(line: &str) -> Option<Speaker> {
    let line = line.trim();
    if RE_USER_MARKER.is_match(line) {
        Some(Speaker::User)
    } else if RE_ASSISTANT_MARKER.is_match(line) {
        Some(Speaker::Assistant)
    } else {
        None
    }
}

/// Transcript segmenter
#[derive(Debug, Default)]
pub struct Segmenter;

impl Segmenter {
    /// Create new segmenter
    pub fn new() -> Self {
        Self
    }

    /// Segment raw text into turns
    ///
    /// Never fails: malformed input just produces fewer (or zero) turns.
    pub fn segment(&self, text: &str) -> Vec<Turn> {
        let mut turns = Vec::new();
        // None until the first marker; the buffer then holds leading content
        let mut current: Option<Speaker> = None;
        let mut buffer: Vec<&str> = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim();

            if let Some(speaker) = marker_speaker(trimmed) {
                if current.is_none() && !joined(&buffer).is_empty() {
                    current = Some(Speaker::User);
                }
                if let Some(open) = current {
                    emit(&mut turns, open, &buffer);
                }
                buffer.clear();
                current = Some(speaker);
            } else if trimmed != NOISE_TOKEN {
                buffer.push(line);
            }
        }

        // Content with no marker anywhere is not a turn
        if let Some(open) = current {
            emit(&mut turns, open, &buffer);
        }

        turns
    }

    /// Segment and wrap into a conversation keyed by the source identifier
    pub fn segment_conversation(&self, thread_id: &str, text: &str) -> Conversation {
        Conversation::new(thread_id, self.segment(text))
    }
}

/// Buffer joined with newlines and trimmed
fn joined(buffer: &[&str]) -> String {
    buffer.join("\n").trim().to_string()
}

/// Push a turn if the buffer holds anything but whitespace
fn emit(turns: &mut Vec<Turn>, speaker: Speaker, buffer: &[&str]) {
    let text = joined(buffer);
    if text.is_empty() {
        return;
    }
    let turn_index = turns.len();
    turns.push(Turn::new(speaker, text, turn_index));
}

// =============================================================================
// TESTS
// =============================================================================
