pub mod chat;
pub mod ids;
pub mod kind;
pub mod record;
pub mod sentiment;

pub use chat::{ChatMessage, ChatReply, MessageKind, Sender};
pub use ids::ChatMessageId;
pub use kind::InteractionType;
pub use record::{DraftRecord, InteractionRecord, NewInteraction};
pub use sentiment::Sentiment;
