use crate::domain::InteractionRecord;
use crate::draft::key::DraftKey;
use crate::draft::EMPHASIS;
use crate::time::NOT_AVAILABLE;

/// Renders a record in the draft format the chat agent produces, one
/// emphasised `Label:` per line with `N/A` for empty values.
pub fn render_draft(record: &InteractionRecord) -> String {
    DraftKey::ALL
        .iter()
        .map(|key| {
            let value = field_text(record, *key);
            let value = if value.trim().is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                value
            };
            format!("{EMPHASIS}{}:{EMPHASIS} {value}", key.label())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Heuristic used when a chat reply arrives without an explicit kind.
pub fn is_draft_reply(text: &str) -> bool {
    [DraftKey::Hcp, DraftKey::Date, DraftKey::Topics]
        .iter()
        .all(|key| text.contains(&format!("{EMPHASIS}{}:{EMPHASIS}", key.label())))
}

fn field_text(record: &InteractionRecord, key: DraftKey) -> String {
    match key {
        DraftKey::Hcp => record.hcp_name.clone(),
        DraftKey::Date => record.interaction_date.clone(),
        DraftKey::Time => record.interaction_time.clone(),
        DraftKey::Type => record.interaction_type.label().to_string(),
        DraftKey::Attendees => record.attendees.join(", "),
        DraftKey::Topics => record.topics_discussed.clone(),
        DraftKey::MaterialsShared => record.materials_shared.join(", "),
        DraftKey::SamplesDistributed => record.samples_distributed.join(", "),
        DraftKey::Sentiment => record.hcp_sentiment.label().to_string(),
        DraftKey::Outcomes => record.outcomes.clone(),
        DraftKey::FollowUp => record.follow_up_actions.clone(),
    }
}
