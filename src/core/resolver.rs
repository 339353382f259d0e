//! Attempt resolver: one final outcome per (thread, image prompt)
//!
//! Policy: success on any attempt wins; otherwise the last attempt in
//! turn order decides. The whole attempt set is scanned for success before
//! falling back.

use std::collections::HashMap;
use crate::IMAGE_PROMPTS;
use crate::types::{Condition, ExchangeRecord, ResolvedOutcome, ResponseClass};

/// Attempt resolver
#[derive(Debug, Default)]
pub struct AttemptResolver;

impl AttemptResolver {
    /// Create new resolver
    pub fn new() -> Self {
        Self
    }

    /// Collapse attempts (in turn order) into one outcome, None if there are none
    pub fn resolve(&self, attempts: &[ResponseClass]) -> Option<ResponseClass> {
        if attempts.contains(&ResponseClass::ImageSuccess) {
            return Some(ResponseClass::ImageSuccess);
        }
        attempts.last().copied()
    }

    /// Resolve every (thread, image prompt) pair that has at least one attempt
    ///
    /// Threads come out in first-appearance order, prompts in report order.
    pub fn resolve_records(&self, records: &[ExchangeRecord]) -> Vec<ResolvedOutcome> {
        let mut threads: Vec<(&str, Condition, Vec<&ExchangeRecord>)> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();

        for record in records {
            let slot = *slots.entry(record.thread_id.as_str()).or_insert_with(|| {
                threads.push((record.thread_id.as_str(), record.condition, Vec::new()));
                threads.len() - 1
            });
            threads[slot].2.push(record);
        }

        let mut outcomes = Vec::new();
        for (thread_id, condition, thread_records) in threads {
            for prompt in IMAGE_PROMPTS {
                let mut attempts: Vec<&ExchangeRecord> = thread_records
                    .iter()
                    .copied()
                    .filter(|r| r.prompt_id == Some(prompt))
                    .collect();
                attempts.sort_by_key(|r| r.user_turn_index);

                let classes: Vec<ResponseClass> = attempts.iter().map(|r| r.response_class).collect();
                if let Some(response_class) = self.resolve(&classes) {
                    outcomes.push(ResolvedOutcome {
                        thread_id: thread_id.to_string(),
                        condition,
                        prompt_id: prompt,
                        response_class,
                        attempts: classes.len(),
                    });
                }
            }
        }

        outcomes
    }
}

/// Resolve with the default policy
pub fn resolve_outcomes(records: &[ExchangeRecord]) -> Vec<ResolvedOutcome> {
    AttemptResolver::new().resolve_records(records)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PromptId;
    use ResponseClass::*;

    fn record(thread: &str, index: usize, prompt: PromptId, class: ResponseClass) -> ExchangeRecord {
        ExchangeRecord {
            thread_id: thread.to_string(),
            condition: Condition::from_thread_id(thread),
            user_turn_index: index,
            assistant_turn_index: index + 1,
            prompt_id: Some(prompt),
            user_text: String::new(),
            assistant_text: String::new(),
            response_class: class,
        }
    }

    #[test]
    fn test_any_success_wins() {
        let resolver = AttemptResolver::new();
        assert_eq!(resolver.resolve(&[PolicyRefusal, RateLimit, ImageSuccess]), Some(ImageSuccess));
        assert_eq!(resolver.resolve(&[ImageSuccess, PolicyRefusal]), Some(ImageSuccess));
    }

    #[test]
    fn test_last_attempt_otherwise() {
        let resolver = AttemptResolver::new();
        assert_eq!(resolver.resolve(&[RateLimit, PolicyRefusal]), Some(PolicyRefusal));
        assert_eq!(resolver.resolve(&[PolicyRefusal, RateLimit]), Some(RateLimit));
        assert_eq!(resolver.resolve(&[Other]), Some(Other));
    }

    #[test]
    fn test_no_attempts() {
        assert_eq!(AttemptResolver::new().resolve(&[]), None);
    }

    #[test]
    fn test_records_sorted_by_turn_index() {
        // Out of order on purpose: the attempt at turn 8 is the last one
        let records = vec![
            record("control_01", 8, PromptId::I4Coffee, PolicyRefusal),
            record("control_01", 2, PromptId::I4Coffee, RateLimit),
        ];
        let outcomes = resolve_outcomes(&records);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].response_class, PolicyRefusal);
        assert_eq!(outcomes[0].attempts, 2);
    }

    #[test]
    fn test_missing_prompts_produce_no_outcome() {
        let records = vec![
            record("control_01", 0, PromptId::I2Bedroom, ImageSuccess),
            record("control_01", 2, PromptId::T1Mortgage, Other),
            record("control_01", 4, PromptId::Trigger, PolicyRefusal),
        ];
        let outcomes = resolve_outcomes(&records);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].prompt_id, PromptId::I2Bedroom);
    }

    #[test]
    fn test_threads_kept_apart_in_order() {
        let records = vec![
            record("contaminated_02", 0, PromptId::I3Abstract, PolicyRefusal),
            record("control_01", 0, PromptId::I1Kitchen, ImageSuccess),
            record("contaminated_02", 2, PromptId::I1Kitchen, CapabilityRefusal),
        ];
        let outcomes = resolve_outcomes(&records);
        let keys: Vec<(&str, PromptId)> = outcomes
            .iter()
            .map(|o| (o.thread_id.as_str(), o.prompt_id))
            .collect();
        assert_eq!(keys, vec![
            ("contaminated_02", PromptId::I1Kitchen),
            ("contaminated_02", PromptId::I3Abstract),
            ("control_01", PromptId::I1Kitchen),
        ]);
        assert_eq!(outcomes[0].condition, Condition::Contaminated);
    }
}
