//! vstate: analysis core for the Violation State study
//!
//! transcript → turns → exchanges → (prompt, outcome) records → resolved
//! outcome per thread and prompt → contingency statistics

pub mod core;
pub mod types;

use crate::types::PromptId;

// =============================================================================
// TRANSCRIPT MARKERS - must occupy a whole trimmed line, case-sensitive
// =============================================================================

/// Literal lines that open a user turn
pub const USER_MARKERS: [&str; 2] = ["You said:", "You:"];

/// Literal lines that open an assistant turn
pub const ASSISTANT_MARKERS: [&str; 2] = ["ChatGPT said:", "ChatGPT:"];

/// UI artifact copied along with the transcript, dropped wherever it appears
pub const NOISE_TOKEN: &str = "Share";

// =============================================================================
// CONDITIONS - derived from the thread id prefix
// =============================================================================

pub const CONTROL_PREFIX: &str = "control";
pub const CONTAMINATED_PREFIX: &str = "contaminated";

// =============================================================================
// PROMPTS
// =============================================================================

/// Image prompts in report order
pub const IMAGE_PROMPTS: [PromptId; 4] = [
    PromptId::I1Kitchen,
    PromptId::I2Bedroom,
    PromptId::I3Abstract,
    PromptId::I4Coffee,
];

// =============================================================================
// CORPUS LAYOUT
// =============================================================================

/// Sub-directory of the data dir holding one folder per condition
pub const TRANSCRIPTS_DIR: &str = "transcripts";
pub const CONTROL_DIR: &str = "control";
pub const CONTAMINATED_DIR: &str = "contaminated";
pub const TRANSCRIPT_EXTENSION: &str = "txt";

/// Default output folder, relative to the data dir
pub const PROCESSED_DIR: &str = "processed";

pub const PARSED_TURNS_FILE: &str = "parsed_turns.json";
pub const THREAD_SUMMARY_FILE: &str = "thread_summary.json";
pub const RESOLVED_OUTCOMES_FILE: &str = "resolved_outcomes.json";
pub const SUMMARY_STATS_FILE: &str = "summary_stats.txt";
pub const MANIFEST_FILE: &str = "manifest.json";

// =============================================================================
// EFFECT SIZE - Cohen's h interpretation bands
// =============================================================================

pub const COHEN_H_SMALL: f64 = 0.2;
pub const COHEN_H_MEDIUM: f64 = 0.5;

/// Relative tolerance when comparing table probabilities in Fisher's test
pub const FISHER_RELATIVE_TOLERANCE: f64 = 1e-7;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
