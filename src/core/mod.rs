//! Core modules for vstate

pub mod segmenter;
pub mod prompt_classifier;
pub mod response_classifier;
pub mod resolver;
pub mod pipeline;
pub mod stats;
pub mod corpus;
pub mod report;

pub use segmenter::{Segmenter, marker_speaker};
pub use prompt_classifier::{PromptClassifier, PromptRule, PROMPT_RULES, classify_prompt};
pub use response_classifier::{ResponseClassifier, ResponseRule, RESPONSE_RULES, classify_response};
pub use resolver::{AttemptResolver, resolve_outcomes};
pub use pipeline::{Analysis, analyze, classify_conversations, summarize_threads};
pub use stats::{fisher_exact, cohen_h, compare_resolved, compare_attempts};
pub use corpus::{Corpus, load_corpus, parse_transcript, parse_transcript_file};
pub use report::{AnalysisConfig, write_outputs, render_summary};
