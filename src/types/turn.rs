//! Turn model for segmented transcripts
//!
//! - Turn = one speaker's contribution, immutable once emitted
//! - Exchange = user turn + the assistant turn directly after it
//! - Conversation = one thread, owned turns in emission order

use serde::{Deserialize, Serialize};
use crate::{CONTAMINATED_PREFIX, CONTROL_PREFIX};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Speaker::User => "user",
            Speaker::Assistant => "assistant",
        };
        write!(f, "{}", name)
    }
}

/// Experimental arm of a thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Baseline threads
    Control,
    /// Threads exposed to the trigger earlier on
    Contaminated,
    /// Source identifier matched neither prefix
    Unknown,
}

impl Condition {
    /// Derive the condition from a thread id prefix
    pub fn from_thread_id(thread_id: &str) -> Self {
        if thread_id.starts_with(CONTROL_PREFIX) {
            Condition::Control
        } else if thread_id.starts_with(CONTAMINATED_PREFIX) {
            Condition::Contaminated
        } else {
            Condition::Unknown
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Condition::Control => "control",
            Condition::Contaminated => "contaminated",
            Condition::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// A single segmented turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    /// Trimmed, never empty
    pub text: String,
    /// Strictly increasing within a conversation, shared across speakers
    pub turn_index: usize,
}

impl Turn {
    pub fn new(speaker: Speaker, text: impl Into<String>, turn_index: usize) -> Self {
        Self {
            speaker,
            text: text.into(),
            turn_index,
        }
    }
}

/// A user request and the reply that immediately follows it
#[derive(Debug, Clone, Copy)]
pub struct Exchange<'a> {
    pub user: &'a Turn,
    pub assistant: &'a Turn,
}

/// One thread: identity, arm and its turns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub thread_id: String,
    pub condition: Condition,
    pub turns: Vec<Turn>,
}

impl Conversation {
    /// Create a conversation, deriving the condition from the thread id
    pub fn new(thread_id: impl Into<String>, turns: Vec<Turn>) -> Self {
        let thread_id = thread_id.into();
        Self {
            condition: Condition::from_thread_id(&thread_id),
            thread_id,
            turns,
        }
    }

    /// Get turn count
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Adjacent user → assistant pairs, in turn order
    pub fn exchanges(&self) -> Vec<Exchange<'_>> {
        self.turns
            .windows(2)
            .filter(|w| w[0].speaker == Speaker::User && w[1].speaker == Speaker::Assistant)
            .map(|w| Exchange {
                user: &w[0],
                assistant: &w[1],
            })
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
