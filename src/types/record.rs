//! Flat output records derived from the conversation set

use serde::{Deserialize, Serialize};
use crate::types::{Condition, PromptId, ResponseClass};

/// One classified user → assistant exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRecord {
    pub thread_id: String,
    pub condition: Condition,
    pub user_turn_index: usize,
    pub assistant_turn_index: usize,
    /// None when no prompt rule matched
    pub prompt_id: Option<PromptId>,
    pub user_text: String,
    pub assistant_text: String,
    pub response_class: ResponseClass,
}

impl ExchangeRecord {
    /// Prompt id with the unrecognized state made explicit
    pub fn prompt(&self) -> PromptId {
        self.prompt_id.unwrap_or(PromptId::Unrecognized)
    }

    pub fn is_image(&self) -> bool {
        self.prompt().is_image()
    }

    pub fn is_text(&self) -> bool {
        self.prompt().is_text()
    }
}

/// Per-thread outcome counts across every attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub thread_id: String,
    pub condition: Condition,
    pub n_image_prompts: usize,
    pub n_image_policy_refusals: usize,
    pub n_image_capability_refusals: usize,
    pub n_image_success: usize,
    /// Rate limits on image exchanges
    pub n_rate_limit: usize,
    pub n_t1_prompts: usize,
    /// Policy or capability refusals on the text prompt
    pub n_t1_refusals: usize,
}

/// Single final outcome for a (thread, image prompt) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedOutcome {
    pub thread_id: String,
    pub condition: Condition,
    pub prompt_id: PromptId,
    pub response_class: ResponseClass,
    /// Exchanges that addressed this prompt
    pub attempts: usize,
}

/// Manifest entry for one loaded transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub thread_id: String,
    pub path: String,
    /// Hex SHA-256 of the raw file bytes
    pub sha256: String,
    pub turn_count: usize,
}
