mod key;
mod parser;
mod render;

pub use key::DraftKey;
pub use parser::parse_draft;
pub use render::{is_draft_reply, render_draft};

/// Emphasis marker the chat agent wraps around labels.
pub(crate) const EMPHASIS: &str = "**";
