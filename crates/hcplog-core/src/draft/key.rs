use crate::domain::{DraftRecord, InteractionType, Sentiment};

/// Labels recognised in draft text, in the order the chat agent writes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftKey {
    Hcp,
    Date,
    Time,
    Type,
    Attendees,
    Topics,
    MaterialsShared,
    SamplesDistributed,
    Sentiment,
    Outcomes,
    FollowUp,
}

impl DraftKey {
    pub const ALL: [DraftKey; 11] = [
        DraftKey::Hcp,
        DraftKey::Date,
        DraftKey::Time,
        DraftKey::Type,
        DraftKey::Attendees,
        DraftKey::Topics,
        DraftKey::MaterialsShared,
        DraftKey::SamplesDistributed,
        DraftKey::Sentiment,
        DraftKey::Outcomes,
        DraftKey::FollowUp,
    ];

    /// Exact, case-sensitive lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.label() == label)
    }

    pub fn label(self) -> &'static str {
        match self {
            DraftKey::Hcp => "HCP",
            DraftKey::Date => "Date",
            DraftKey::Time => "Time",
            DraftKey::Type => "Type",
            DraftKey::Attendees => "Attendees",
            DraftKey::Topics => "Topics",
            DraftKey::MaterialsShared => "Materials Shared",
            DraftKey::SamplesDistributed => "Samples Distributed",
            DraftKey::Sentiment => "Sentiment",
            DraftKey::Outcomes => "Outcomes",
            DraftKey::FollowUp => "Follow-up",
        }
    }

    /// Writes an already-cleaned value into the matching field of `draft`.
    pub(crate) fn assign(self, draft: &mut DraftRecord, value: &str) {
        match self {
            DraftKey::Hcp => draft.hcp_name = Some(value.to_string()),
            DraftKey::Date => draft.interaction_date = Some(value.to_string()),
            DraftKey::Time => draft.interaction_time = Some(value.to_string()),
            DraftKey::Type => draft.interaction_type = Some(InteractionType::from_label(value)),
            DraftKey::Attendees => draft.attendees = Some(split_list(value)),
            DraftKey::Topics => draft.topics_discussed = Some(value.to_string()),
            DraftKey::MaterialsShared => draft.materials_shared = Some(split_list(value)),
            DraftKey::SamplesDistributed => draft.samples_distributed = Some(split_list(value)),
            DraftKey::Sentiment => draft.hcp_sentiment = Some(Sentiment::from_loose(value)),
            DraftKey::Outcomes => draft.outcomes = Some(value.to_string()),
            DraftKey::FollowUp => draft.follow_up_actions = Some(value.to_string()),
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
