//! Pipeline: conversations → exchange records → summaries → resolved outcomes
//!
//! Every stage is a pure transform over the full conversation set, passed
//! in explicitly. No file system involved.

use serde::{Deserialize, Serialize};
use crate::core::{AttemptResolver, PromptClassifier, ResponseClassifier};
use crate::core::stats::{compare_attempts, compare_resolved};
use crate::types::{
    Condition, ConditionComparison, Conversation, ExchangeRecord, PromptId, ResolvedOutcome,
    ResponseClass, ThreadSummary,
};

/// Classify every exchange of every conversation, in input order
pub fn classify_conversations(conversations: &[Conversation]) -> Vec<ExchangeRecord> {
    let prompts = PromptClassifier::new();
    let responses = ResponseClassifier::new();
    let mut records = Vec::new();

    for conv in conversations {
        for exchange in conv.exchanges() {
            let prompt = prompts.classify(&exchange.user.text);
            let response_class = responses.classify(prompt, &exchange.assistant.text);

            records.push(ExchangeRecord {
                thread_id: conv.thread_id.clone(),
                condition: conv.condition,
                user_turn_index: exchange.user.turn_index,
                assistant_turn_index: exchange.assistant.turn_index,
                prompt_id: prompt.is_recognized().then_some(prompt),
                user_text: exchange.user.text.clone(),
                assistant_text: exchange.assistant.text.clone(),
                response_class,
            });
        }
    }

    records
}

/// One summary row per conversation, including threads with no exchanges
pub fn summarize_threads(
    conversations: &[Conversation],
    records: &[ExchangeRecord],
) -> Vec<ThreadSummary> {
    conversations
        .iter()
        .map(|conv| summarize_thread(conv, records))
        .collect()
}

fn summarize_thread(conv: &Conversation, records: &[ExchangeRecord]) -> ThreadSummary {
    let mut summary = ThreadSummary {
        thread_id: conv.thread_id.clone(),
        condition: conv.condition,
        n_image_prompts: 0,
        n_image_policy_refusals: 0,
        n_image_capability_refusals: 0,
        n_image_success: 0,
        n_rate_limit: 0,
        n_t1_prompts: 0,
        n_t1_refusals: 0,
    };

    for record in records.iter().filter(|r| r.thread_id == conv.thread_id) {
        if record.is_image() {
            summary.n_image_prompts += 1;
            match record.response_class {
                ResponseClass::PolicyRefusal => summary.n_image_policy_refusals += 1,
                ResponseClass::CapabilityRefusal => summary.n_image_capability_refusals += 1,
                ResponseClass::ImageSuccess => summary.n_image_success += 1,
                ResponseClass::RateLimit => summary.n_rate_limit += 1,
                ResponseClass::Other => {}
            }
        } else if record.is_text() {
            summary.n_t1_prompts += 1;
            if record.response_class.is_refusal() {
                summary.n_t1_refusals += 1;
            }
        }
    }

    summary
}

/// Everything derived from one conversation set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub conversation_count: usize,
    pub control_threads: usize,
    pub contaminated_threads: usize,
    pub records: Vec<ExchangeRecord>,
    pub summaries: Vec<ThreadSummary>,
    pub resolved: Vec<ResolvedOutcome>,
    /// Primary analysis, one outcome per (thread, prompt)
    pub resolved_comparison: ConditionComparison,
    /// Secondary analysis, every attempt
    pub attempts_comparison: ConditionComparison,
}

impl Analysis {
    /// Exchanges whose user turn matched no prompt rule
    pub fn unrecognized_count(&self) -> usize {
        self.records.iter().filter(|r| r.prompt() == PromptId::Unrecognized).count()
    }
}

/// Run every stage over the conversation set
pub fn analyze(conversations: &[Conversation]) -> Analysis {
    let records = classify_conversations(conversations);
    let summaries = summarize_threads(conversations, &records);
    let resolved = AttemptResolver::new().resolve_records(&records);

    let count = |condition: Condition| conversations.iter().filter(|c| c.condition == condition).count();

    Analysis {
        conversation_count: conversations.len(),
        control_threads: count(Condition::Control),
        contaminated_threads: count(Condition::Contaminated),
        resolved_comparison: compare_resolved(&resolved),
        attempts_comparison: compare_attempts(&summaries),
        records,
        summaries,
        resolved,
    }
}

// =============================================================================
// TESTS
// =============================================================================
