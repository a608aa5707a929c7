pub mod domain;
pub mod draft;
pub mod dto;
pub mod error;
pub mod rules;
pub mod service;
pub mod session;
pub mod time;

pub use domain::*;
pub use draft::{is_draft_reply, parse_draft, render_draft, DraftKey};
pub use dto::*;
pub use error::CoreError;
pub use rules::*;
pub use service::{ChatSession, InteractionRecordStore};
pub use session::{ChatCommand, ChatLog, FieldUpdate, FormCommand, FormState};
