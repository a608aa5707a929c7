use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfirmation {
    pub message: String,
    pub log_id: i64,
}

/// A persisted interaction as listed by the record store. Dates are
/// `DD-MM-YYYY`, times `HH:MM`, timestamps ISO 8601.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionLogDto {
    pub id: i64,
    pub hcp_name: String,
    pub interaction_date: String,
    #[serde(default)]
    pub interaction_time: Option<String>,
    pub interaction_type: String,
    #[serde(default)]
    pub attendees: Vec<String>,
    pub topics_discussed: String,
    #[serde(default)]
    pub materials_shared: Vec<String>,
    #[serde(default)]
    pub samples_distributed: Vec<String>,
    #[serde(default)]
    pub hcp_sentiment: Option<String>,
    #[serde(default)]
    pub outcomes: Option<String>,
    #[serde(default)]
    pub follow_up_actions: Option<String>,
    pub timestamp: String,
}
