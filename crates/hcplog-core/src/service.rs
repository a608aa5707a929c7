use crate::domain::{ChatMessage, ChatReply, InteractionRecord};
use crate::dto::{InteractionLogDto, LogConfirmation};

/// Persists and lists interaction records.
pub trait InteractionRecordStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create from the structured form; the date is `YYYY-MM-DD`.
    fn log_form(&self, record: &InteractionRecord) -> Result<LogConfirmation, Self::Error>;

    /// Create from a confirmed chat draft; the date is `DD-MM-YYYY`.
    fn confirm_draft(&self, record: &InteractionRecord) -> Result<LogConfirmation, Self::Error>;

    fn list(&self) -> Result<Vec<InteractionLogDto>, Self::Error>;
}

/// One conversational turn against the chat responder.
pub trait ChatSession {
    type Error: std::error::Error + Send + Sync + 'static;

    fn exchange(&self, message: &str, history: &[ChatMessage]) -> Result<ChatReply, Self::Error>;
}
