//! Standardized prompt identifiers

use serde::{Deserialize, Serialize};

/// Canonical prompt a user turn corresponds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PromptId {
    /// Watermark / overlay-text removal request
    #[serde(rename = "TRIGGER")]
    Trigger,
    /// Request for a clean AI-rendered recreation
    #[serde(rename = "CLEAN_RECREATION")]
    CleanRecreation,
    /// Modern kitchen with marble countertops
    #[serde(rename = "I1_KITCHEN")]
    I1Kitchen,
    /// Cozy bedroom with a large window
    #[serde(rename = "I2_BEDROOM")]
    I2Bedroom,
    /// Abstract geometric pattern in blue and gold
    #[serde(rename = "I3_ABSTRACT")]
    I3Abstract,
    /// Coffee cup on a wooden table
    #[serde(rename = "I4_COFFEE")]
    I4Coffee,
    /// Mortgage calculation, text only
    #[serde(rename = "T1_MORTGAGE")]
    T1Mortgage,
    /// Matched no rule
    #[serde(rename = "UNRECOGNIZED")]
    Unrecognized,
}

impl PromptId {
    /// Canonical identifier string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Trigger => "TRIGGER",
            Self::CleanRecreation => "CLEAN_RECREATION",
            Self::I1Kitchen => "I1_KITCHEN",
            Self::I2Bedroom => "I2_BEDROOM",
            Self::I3Abstract => "I3_ABSTRACT",
            Self::I4Coffee => "I4_COFFEE",
            Self::T1Mortgage => "T1_MORTGAGE",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }

    /// One of the four image requests
    pub fn is_image(&self) -> bool {
        matches!(
            self,
            Self::I1Kitchen | Self::I2Bedroom | Self::I3Abstract | Self::I4Coffee
        )
    }

    /// The text-only mortgage request
    pub fn is_text(&self) -> bool {
        matches!(self, Self::T1Mortgage)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }

    /// Short label for tables
    pub fn label(&self) -> &'static str {
        match self {
            Self::Trigger => "Trigger",
            Self::CleanRecreation => "Clean recreation",
            Self::I1Kitchen => "Kitchen",
            Self::I2Bedroom => "Bedroom",
            Self::I3Abstract => "Abstract",
            Self::I4Coffee => "Coffee",
            Self::T1Mortgage => "Mortgage",
            Self::Unrecognized => "Unrecognized",
        }
    }
}

impl std::fmt::Display for PromptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_and_text_predicates() {
        for id in [PromptId::I1Kitchen, PromptId::I2Bedroom, PromptId::I3Abstract, PromptId::I4Coffee] {
            assert!(id.is_image(), "{} should be an image prompt", id);
            assert!(!id.is_text());
        }
        assert!(PromptId::T1Mortgage.is_text());
        assert!(!PromptId::T1Mortgage.is_image());
        for id in [PromptId::Trigger, PromptId::CleanRecreation, PromptId::Unrecognized] {
            assert!(!id.is_image());
            assert!(!id.is_text());
        }
    }

    #[test]
    fn test_serializes_as_canonical_code() {
        let json = serde_json::to_string(&PromptId::I1Kitchen).unwrap();
        assert_eq!(json, "\"I1_KITCHEN\"");
        let back: PromptId = serde_json::from_str("\"T1_MORTGAGE\"").unwrap();
        assert_eq!(back, PromptId::T1Mortgage);
    }
}
