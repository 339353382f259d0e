//! Prompt classifier: maps a user turn to a standardized prompt
//!
//! Ordered rule table, first match wins. Order is priority: the trigger
//! request must beat every image prompt whose keywords it also contains.

use crate::types::PromptId;

/// One tagged rule in the prompt table
#[derive(Debug, Clone, Copy)]
pub struct PromptRule {
    /// Stable rule identifier
    pub code: &'static str,
    pub prompt: PromptId,
    /// Predicate over lower-cased, trimmed text
    pub matches: fn(&str) -> bool,
}

/// Prompt rules in priority order
pub static PROMPT_RULES: [PromptRule; 7] = [
    PromptRule { code: "P01_TRIGGER", prompt: PromptId::Trigger, matches: is_trigger },
    PromptRule { code: "P02_CLEAN_RECREATION", prompt: PromptId::CleanRecreation, matches: is_clean_recreation },
    PromptRule { code: "P03_I1_KITCHEN", prompt: PromptId::I1Kitchen, matches: is_kitchen },
    PromptRule { code: "P04_I2_BEDROOM", prompt: PromptId::I2Bedroom, matches: is_bedroom },
    PromptRule { code: "P05_I3_ABSTRACT", prompt: PromptId::I3Abstract, matches: is_abstract },
    PromptRule { code: "P06_I4_COFFEE", prompt: PromptId::I4Coffee, matches: is_coffee },
    PromptRule { code: "P07_T1_MORTGAGE", prompt: PromptId::T1Mortgage, matches: is_mortgage },
];

fn is_trigger(t: &str) -> bool {
    (t.contains("remove") && (t.contains("text") || t.contains("watermark")))
        || (t.contains("white text") && t.contains("see image"))
}

fn is_clean_recreation(t: &str) -> bool {
    (t.contains("clean") && t.contains("recreation"))
        || t.contains("generate a clean ai-rendered recreation")
}

fn is_kitchen(t: &str) -> bool {
    t.contains("kitchen") && t.contains("marble")
}

fn is_bedroom(t: &str) -> bool {
    t.contains("bedroom") && (t.contains("cozy") || t.contains("window"))
}

fn is_abstract(t: &str) -> bool {
    t.contains("abstract") && t.contains("geometric") && (t.contains("blue") || t.contains("gold"))
}

fn is_coffee(t: &str) -> bool {
    t.contains("coffee") && (t.contains("cup") || t.contains("table"))
}

fn is_mortgage(t: &str) -> bool {
    t.contains("mortgage") || t.contains("monthly payment")
}

/// Prompt classifier
#[derive(Debug, Default)]
pub struct PromptClassifier;

impl PromptClassifier {
    /// Create new classifier
    pub fn new() -> Self {
        Self
    }

    /// First matching rule, if any
    pub fn matched_rule(&self, user_text: &str) -> Option<&'static PromptRule> {
        let text = user_text.trim().to_lowercase();
        PROMPT_RULES.iter().find(|rule| (rule.matches)(&text))
    }

    /// Classify a user turn; total, never mutates input
    pub fn classify(&self, user_text: &str) -> PromptId {
        self.matched_rule(user_text)
            .map(|rule| rule.prompt)
            .unwrap_or(PromptId::Unrecognized)
    }
}

/// Classify a user turn with the default rule table
pub fn classify_prompt(user_text: &str) -> PromptId {
    PromptClassifier::new().classify(user_text)
}

// =============================================================================
// TESTS
// =============================================================================
