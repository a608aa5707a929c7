use crate::error::{Result, StoreError};
use crate::repo::StoredInteraction;
use crate::Store;
use chrono::{DateTime, SecondsFormat, Utc};
use hcplog_core::domain::{InteractionRecord, NewInteraction};
use hcplog_core::dto::{InteractionLogDto, LogConfirmation};
use hcplog_core::rules::{validate_confirmed, validate_form};
use hcplog_core::service::InteractionRecordStore;
use hcplog_core::time::{now_utc, CLOCK_FORMAT, FORM_DATE_FORMAT, WIRE_DATE_FORMAT};
use tracing::info;

pub const CONFIRMED_MESSAGE: &str = "Log confirmed and saved successfully!";

impl Store {
    fn insert_validated(&self, validated: NewInteraction) -> Result<StoredInteraction> {
        self.interactions().add(now_utc(), validated)
    }
}

impl InteractionRecordStore for Store {
    type Error = StoreError;

    fn log_form(&self, record: &InteractionRecord) -> Result<LogConfirmation> {
        let validated = validate_form(record)?;
        let stored = self.insert_validated(validated)?;
        let interaction = &stored.interaction;
        info!(id = stored.id, "interaction logged via form");
        Ok(LogConfirmation {
            message: format!(
                "Interaction with {} on {} logged successfully via form.",
                interaction.hcp_name,
                interaction.date.format(FORM_DATE_FORMAT)
            ),
            log_id: stored.id,
        })
    }

    fn confirm_draft(&self, record: &InteractionRecord) -> Result<LogConfirmation> {
        let validated = validate_confirmed(record)?;
        let stored = self.insert_validated(validated)?;
        info!(id = stored.id, "chat draft confirmed");
        Ok(LogConfirmation {
            message: CONFIRMED_MESSAGE.to_string(),
            log_id: stored.id,
        })
    }

    fn list(&self) -> Result<Vec<InteractionLogDto>> {
        let items = self.interactions().list_all()?;
        Ok(items.iter().map(to_dto).collect())
    }
}

pub fn to_dto(stored: &StoredInteraction) -> InteractionLogDto {
    let interaction = &stored.interaction;
    InteractionLogDto {
        id: stored.id,
        hcp_name: interaction.hcp_name.clone(),
        interaction_date: interaction.date.format(WIRE_DATE_FORMAT).to_string(),
        interaction_time: interaction
            .time
            .map(|time| time.format(CLOCK_FORMAT).to_string()),
        interaction_type: interaction.interaction_type.label().to_string(),
        attendees: interaction.attendees.clone(),
        topics_discussed: interaction.topics_discussed.clone(),
        materials_shared: interaction.materials_shared.clone(),
        samples_distributed: interaction.samples_distributed.clone(),
        hcp_sentiment: (!interaction.hcp_sentiment.is_unspecified())
            .then(|| interaction.hcp_sentiment.label().to_string()),
        outcomes: non_empty(&interaction.outcomes),
        follow_up_actions: non_empty(&interaction.follow_up_actions),
        timestamp: DateTime::<Utc>::from_timestamp(stored.created_at, 0)
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
