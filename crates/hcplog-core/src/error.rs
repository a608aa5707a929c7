use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("hcp name is required")]
    EmptyHcpName,
    #[error("hcp name exceeds {max} characters")]
    HcpNameTooLong { max: usize },
    #[error("topics discussed is required")]
    EmptyTopics,
    #[error("{field} exceeds {max} characters")]
    FieldTooLong { field: &'static str, max: usize },
    #[error("invalid date for interactionDate: '{value}', expected {expected}")]
    InvalidDate {
        value: String,
        expected: &'static str,
    },
    #[error("invalid time for interactionTime: '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("invalid hcp sentiment: '{0}', expected Positive, Neutral, Negative, or empty")]
    InvalidSentiment(String),
}
