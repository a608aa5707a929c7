use crate::domain::{
    ChatMessage, ChatReply, DraftRecord, InteractionRecord, InteractionType, MessageKind, Sender,
    Sentiment,
};
use crate::rules::load_for_form;
use crate::time::local_now_time;
use chrono::NaiveTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    HcpName(String),
    Date(String),
    Time(String),
    Type(InteractionType),
    Attendees(Vec<String>),
    Topics(String),
    MaterialsShared(Vec<String>),
    SamplesDistributed(Vec<String>),
    Sentiment(Sentiment),
    Outcomes(String),
    FollowUp(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Set(FieldUpdate),
    /// Merge a parsed draft over the current form, converting its date and
    /// time into form representation.
    LoadDraft(DraftRecord),
    Reset,
}

/// Editable interaction form. Mutated only through [`FormState::dispatch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    record: InteractionRecord,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> &InteractionRecord {
        &self.record
    }

    pub fn dispatch(&mut self, command: FormCommand) {
        self.dispatch_at(command, local_now_time());
    }

    pub fn dispatch_at(&mut self, command: FormCommand, now: NaiveTime) {
        match command {
            FormCommand::Set(update) => self.apply(update),
            FormCommand::LoadDraft(draft) => load_for_form(&draft, now).apply_to(&mut self.record),
            FormCommand::Reset => self.record = InteractionRecord::default(),
        }
    }

    fn apply(&mut self, update: FieldUpdate) {
        let record = &mut self.record;
        match update {
            FieldUpdate::HcpName(value) => record.hcp_name = value,
            FieldUpdate::Date(value) => record.interaction_date = value,
            FieldUpdate::Time(value) => record.interaction_time = value,
            FieldUpdate::Type(value) => record.interaction_type = value,
            FieldUpdate::Attendees(value) => record.attendees = value,
            FieldUpdate::Topics(value) => record.topics_discussed = value,
            FieldUpdate::MaterialsShared(value) => record.materials_shared = value,
            FieldUpdate::SamplesDistributed(value) => record.samples_distributed = value,
            FieldUpdate::Sentiment(value) => record.hcp_sentiment = value,
            FieldUpdate::Outcomes(value) => record.outcomes = value,
            FieldUpdate::FollowUp(value) => record.follow_up_actions = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    User(String),
    Reply(ChatReply),
    Failure(String),
    Reset,
}

/// Ordered chat history for one logging session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn dispatch(&mut self, command: ChatCommand) {
        match command {
            ChatCommand::User(text) => self.messages.push(ChatMessage::user(text)),
            ChatCommand::Reply(reply) => self.messages.push(reply.into()),
            ChatCommand::Failure(text) => {
                self.messages.push(ChatMessage::ai(text, MessageKind::Error))
            }
            ChatCommand::Reset => self.messages.clear(),
        }
    }

    pub fn latest_draft(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.sender == Sender::Ai && message.kind == MessageKind::Draft)
            .map(|message| message.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatCommand, ChatLog, FieldUpdate, FormCommand, FormState};
    use crate::domain::{ChatMessageId, ChatReply, InteractionType, MessageKind, Sender};
    use crate::draft::parse_draft;
    use chrono::NaiveTime;

    fn clock() -> NaiveTime {
        NaiveTime::from_hms_opt(10, 0, 0).unwrap()
    }

    #[test]
    fn set_updates_a_single_field() {
        let mut form = FormState::new();
        form.dispatch(FormCommand::Set(FieldUpdate::HcpName("Dr. Lee".to_string())));
        form.dispatch(FormCommand::Set(FieldUpdate::Type(InteractionType::Call)));
        assert_eq!(form.record().hcp_name, "Dr. Lee");
        assert_eq!(form.record().interaction_type, InteractionType::Call);
        assert!(form.record().topics_discussed.is_empty());
    }

    #[test]
    fn load_draft_merges_over_existing_fields() {
        let mut form = FormState::new();
        form.dispatch(FormCommand::Set(FieldUpdate::Topics("Pricing".to_string())));
        let draft = parse_draft("**HCP:** Dr. Lee\n**Date:** 21-05-2025\n**Time:** 7pm");
        form.dispatch_at(FormCommand::LoadDraft(draft), clock());

        let record = form.record();
        assert_eq!(record.hcp_name, "Dr. Lee");
        assert_eq!(record.interaction_date, "2025-05-21");
        assert_eq!(record.interaction_time, "19:00");
        assert_eq!(record.topics_discussed, "Pricing");
    }

    #[test]
    fn reset_restores_defaults() {
        let mut form = FormState::new();
        form.dispatch(FormCommand::Set(FieldUpdate::Outcomes("Agreed".to_string())));
        form.dispatch(FormCommand::Reset);
        assert_eq!(form, FormState::new());
    }

    #[test]
    fn chat_log_tracks_latest_draft() {
        let mut log = ChatLog::new();
        log.dispatch(ChatCommand::User("Met Dr. Lee today".to_string()));
        log.dispatch(ChatCommand::Reply(ChatReply {
            id: ChatMessageId::new(),
            reply: "**HCP:** Dr. A".to_string(),
            kind: MessageKind::Draft,
        }));
        log.dispatch(ChatCommand::Reply(ChatReply {
            id: ChatMessageId::new(),
            reply: "**HCP:** Dr. B".to_string(),
            kind: MessageKind::Draft,
        }));
        log.dispatch(ChatCommand::Failure("network down".to_string()));

        assert_eq!(log.history().len(), 4);
        assert_eq!(log.history()[0].sender, Sender::User);
        assert_eq!(log.history()[3].kind, MessageKind::Error);
        assert_eq!(log.latest_draft(), Some("**HCP:** Dr. B"));

        log.dispatch(ChatCommand::Reset);
        assert!(log.history().is_empty());
        assert_eq!(log.latest_draft(), None);
    }
}
