//! Core types for vstate

mod turn;
mod prompt;
mod response;
mod record;
mod stats;
mod error;

pub use turn::{Speaker, Turn, Exchange, Condition, Conversation};
pub use prompt::PromptId;
pub use response::ResponseClass;
pub use record::{ExchangeRecord, ThreadSummary, ResolvedOutcome, SourceEntry};
pub use stats::{
    RateLimitPolicy, ConditionTally, ContingencyTable, FisherResult,
    EffectMagnitude, EffectSize, ConditionComparison,
};
pub use error::CorpusError;
