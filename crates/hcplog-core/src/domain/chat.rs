use crate::domain::ids::ChatMessageId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    Draft,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub id: ChatMessageId,
    pub text: String,
    pub sender: Sender,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: ChatMessageId::new(),
            text: text.into(),
            sender: Sender::User,
            kind: MessageKind::Text,
        }
    }

    pub fn ai(text: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            id: ChatMessageId::new(),
            text: text.into(),
            sender: Sender::Ai,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub id: ChatMessageId,
    pub reply: String,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
}

impl From<ChatReply> for ChatMessage {
    fn from(reply: ChatReply) -> Self {
        Self {
            id: reply.id,
            text: reply.reply,
            sender: Sender::Ai,
            kind: reply.kind,
        }
    }
}
