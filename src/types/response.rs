//! Outcome categories for assistant replies

use serde::{Deserialize, Serialize};

/// Classification of one assistant reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseClass {
    /// Image produced (image prompts only)
    ImageSuccess,
    /// Refused citing content policy
    PolicyRefusal,
    /// Claimed inability without citing policy
    CapabilityRefusal,
    /// Throttled
    RateLimit,
    /// Nothing matched, left for manual review
    Other,
}

impl ResponseClass {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ImageSuccess => "image_success",
            Self::PolicyRefusal => "policy_refusal",
            Self::CapabilityRefusal => "capability_refusal",
            Self::RateLimit => "rate_limit",
            Self::Other => "other",
        }
    }

    /// Counts as a failed attempt in the resolved analysis
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::PolicyRefusal | Self::CapabilityRefusal | Self::RateLimit)
    }

    /// Policy or capability refusal (rate limits excluded)
    pub fn is_refusal(&self) -> bool {
        matches!(self, Self::PolicyRefusal | Self::CapabilityRefusal)
    }
}

impl std::fmt::Display for ResponseClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
