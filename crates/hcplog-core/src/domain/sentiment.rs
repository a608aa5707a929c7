use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Resolves model-written prose ("quite positive") by substring, checked
    /// in the order positive, negative, neutral.
    pub fn from_loose(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if lower.contains("positive") {
            Self::Positive
        } else if lower.contains("negative") {
            Self::Negative
        } else if lower.contains("neutral") {
            Self::Neutral
        } else {
            Self::Unspecified
        }
    }

    pub fn from_label(raw: &str) -> Result<Self, CoreError> {
        match raw.trim() {
            "" | "N/A" => Ok(Self::Unspecified),
            "Positive" => Ok(Self::Positive),
            "Neutral" => Ok(Self::Neutral),
            "Negative" => Ok(Self::Negative),
            other => Err(CoreError::InvalidSentiment(other.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Unspecified => "",
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, Sentiment::Unspecified)
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
