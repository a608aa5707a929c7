use crate::domain::kind::InteractionType;
use crate::domain::sentiment::Sentiment;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// The canonical interaction shape shared by the form, drafts, and the
/// record store. Dates are `YYYY-MM-DD` while editing and `DD-MM-YYYY` on
/// the confirm wire; see [`crate::rules::dates`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InteractionRecord {
    pub hcp_name: String,
    pub interaction_date: String,
    pub interaction_time: String,
    pub interaction_type: InteractionType,
    pub attendees: Vec<String>,
    pub topics_discussed: String,
    pub materials_shared: Vec<String>,
    pub samples_distributed: Vec<String>,
    pub hcp_sentiment: Sentiment,
    pub outcomes: String,
    pub follow_up_actions: String,
}

/// A partial record produced by the draft parser. Only keys present in the
/// draft text are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hcp_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_type: Option<InteractionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics_discussed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials_shared: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples_distributed: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hcp_sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcomes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_actions: Option<String>,
}

impl DraftRecord {
    pub fn is_empty(&self) -> bool {
        self == &DraftRecord::default()
    }

    /// Overwrites the fields of `record` that this draft carries.
    pub fn apply_to(&self, record: &mut InteractionRecord) {
        if let Some(value) = &self.hcp_name {
            record.hcp_name = value.clone();
        }
        if let Some(value) = &self.interaction_date {
            record.interaction_date = value.clone();
        }
        if let Some(value) = &self.interaction_time {
            record.interaction_time = value.clone();
        }
        if let Some(value) = self.interaction_type {
            record.interaction_type = value;
        }
        if let Some(value) = &self.attendees {
            record.attendees = value.clone();
        }
        if let Some(value) = &self.topics_discussed {
            record.topics_discussed = value.clone();
        }
        if let Some(value) = &self.materials_shared {
            record.materials_shared = value.clone();
        }
        if let Some(value) = &self.samples_distributed {
            record.samples_distributed = value.clone();
        }
        if let Some(value) = self.hcp_sentiment {
            record.hcp_sentiment = value;
        }
        if let Some(value) = &self.outcomes {
            record.outcomes = value.clone();
        }
        if let Some(value) = &self.follow_up_actions {
            record.follow_up_actions = value.clone();
        }
    }

    pub fn into_record(self) -> InteractionRecord {
        let mut record = InteractionRecord::default();
        self.apply_to(&mut record);
        record
    }
}

/// A record that passed strict validation and is ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInteraction {
    pub hcp_name: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub interaction_type: InteractionType,
    pub attendees: Vec<String>,
    pub topics_discussed: String,
    pub materials_shared: Vec<String>,
    pub samples_distributed: Vec<String>,
    pub hcp_sentiment: Sentiment,
    pub outcomes: String,
    pub follow_up_actions: String,
}

#[cfg(test)]
mod tests {
    use super::{DraftRecord, InteractionRecord};
    use crate::domain::{InteractionType, Sentiment};

    #[test]
    fn default_record_is_a_meeting() {
        let record = InteractionRecord::default();
        assert_eq!(record.interaction_type, InteractionType::Meeting);
        assert_eq!(record.hcp_sentiment, Sentiment::Unspecified);
        assert!(record.attendees.is_empty());
    }

    #[test]
    fn apply_to_keeps_fields_the_draft_lacks() {
        let mut record = InteractionRecord {
            hcp_name: "Dr. Smith".to_string(),
            topics_discussed: "Dosage".to_string(),
            ..InteractionRecord::default()
        };
        let draft = DraftRecord {
            hcp_name: Some("Dr. Lee".to_string()),
            attendees: Some(vec!["Alex".to_string()]),
            ..DraftRecord::default()
        };
        draft.apply_to(&mut record);
        assert_eq!(record.hcp_name, "Dr. Lee");
        assert_eq!(record.topics_discussed, "Dosage");
        assert_eq!(record.attendees, vec!["Alex".to_string()]);
    }

    #[test]
    fn record_uses_camel_case_on_the_wire() {
        let record = InteractionRecord {
            hcp_name: "Dr. Lee".to_string(),
            follow_up_actions: "Send study".to_string(),
            ..InteractionRecord::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["hcpName"], "Dr. Lee");
        assert_eq!(value["followUpActions"], "Send study");
        assert_eq!(value["interactionType"], "Meeting");
        assert_eq!(value["hcpSentiment"], "");
    }

    #[test]
    fn draft_serializes_only_present_fields() {
        let draft = DraftRecord {
            hcp_name: Some("Dr. Lee".to_string()),
            ..DraftRecord::default()
        };
        let value = serde_json::to_value(&draft).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["hcpName"], "Dr. Lee");
    }
}
