use crate::domain::{InteractionRecord, NewInteraction};
use crate::error::CoreError;
use crate::time::{parse_clock_time, parse_form_date, parse_wire_date, NOT_AVAILABLE};
use chrono::{NaiveDate, NaiveTime};

pub const MAX_HCP_NAME_LEN: usize = 100;
pub const MAX_NOTE_LEN: usize = 500;

/// Strict check for create-from-form submissions (`YYYY-MM-DD` dates).
pub fn validate_form(record: &InteractionRecord) -> Result<NewInteraction, CoreError> {
    validate_with(record, |raw| {
        parse_form_date(raw).map_err(|_| CoreError::InvalidDate {
            value: raw.to_string(),
            expected: "YYYY-MM-DD",
        })
    })
}

/// Strict check for confirmed chat drafts (`DD-MM-YYYY` dates).
pub fn validate_confirmed(record: &InteractionRecord) -> Result<NewInteraction, CoreError> {
    validate_with(record, |raw| {
        parse_wire_date(raw).map_err(|_| CoreError::InvalidDate {
            value: raw.to_string(),
            expected: "DD-MM-YYYY",
        })
    })
}

pub fn clean_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_with<F>(record: &InteractionRecord, parse_date: F) -> Result<NewInteraction, CoreError>
where
    F: Fn(&str) -> Result<NaiveDate, CoreError>,
{
    let hcp_name = record.hcp_name.trim();
    if hcp_name.is_empty() {
        return Err(CoreError::EmptyHcpName);
    }
    if hcp_name.chars().count() > MAX_HCP_NAME_LEN {
        return Err(CoreError::HcpNameTooLong {
            max: MAX_HCP_NAME_LEN,
        });
    }

    let topics = record.topics_discussed.trim();
    if topics.is_empty() {
        return Err(CoreError::EmptyTopics);
    }

    check_note_len("outcomes", &record.outcomes)?;
    check_note_len("followUpActions", &record.follow_up_actions)?;

    let date = parse_date(&record.interaction_date)?;
    let time = parse_optional_time(&record.interaction_time)?;

    Ok(NewInteraction {
        hcp_name: hcp_name.to_string(),
        date,
        time,
        interaction_type: record.interaction_type,
        attendees: clean_list(&record.attendees),
        topics_discussed: topics.to_string(),
        materials_shared: clean_list(&record.materials_shared),
        samples_distributed: clean_list(&record.samples_distributed),
        hcp_sentiment: record.hcp_sentiment,
        outcomes: record.outcomes.trim().to_string(),
        follow_up_actions: record.follow_up_actions.trim().to_string(),
    })
}

fn check_note_len(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().chars().count() > MAX_NOTE_LEN {
        return Err(CoreError::FieldTooLong {
            field,
            max: MAX_NOTE_LEN,
        });
    }
    Ok(())
}

fn parse_optional_time(raw: &str) -> Result<Option<NaiveTime>, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        return Ok(None);
    }
    parse_clock_time(trimmed)
        .map(Some)
        .map_err(|_| CoreError::InvalidTime(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{clean_list, validate_confirmed, validate_form, MAX_NOTE_LEN};
    use crate::domain::InteractionRecord;
    use crate::error::CoreError;
    use chrono::{NaiveDate, NaiveTime};

    fn form_record() -> InteractionRecord {
        InteractionRecord {
            hcp_name: " Dr. Lee ".to_string(),
            interaction_date: "2025-05-21".to_string(),
            interaction_time: "19:05".to_string(),
            attendees: vec!["Alex".to_string(), " ".to_string()],
            topics_discussed: "Efficacy data".to_string(),
            ..InteractionRecord::default()
        }
    }

    #[test]
    fn form_record_validates() {
        let validated = validate_form(&form_record()).expect("valid");
        assert_eq!(validated.hcp_name, "Dr. Lee");
        assert_eq!(validated.date, NaiveDate::from_ymd_opt(2025, 5, 21).unwrap());
        assert_eq!(validated.time, NaiveTime::from_hms_opt(19, 5, 0));
        assert_eq!(validated.attendees, vec!["Alex".to_string()]);
    }

    #[test]
    fn confirmed_record_expects_wire_dates() {
        let mut record = form_record();
        assert!(matches!(
            validate_confirmed(&record),
            Err(CoreError::InvalidDate { .. })
        ));
        record.interaction_date = "21-05-2025".to_string();
        let validated = validate_confirmed(&record).expect("valid");
        assert_eq!(validated.date, NaiveDate::from_ymd_opt(2025, 5, 21).unwrap());
    }

    #[test]
    fn required_fields_are_enforced() {
        let mut record = form_record();
        record.hcp_name = "  ".to_string();
        assert_eq!(validate_form(&record), Err(CoreError::EmptyHcpName));

        let mut record = form_record();
        record.topics_discussed.clear();
        assert_eq!(validate_form(&record), Err(CoreError::EmptyTopics));
    }

    #[test]
    fn long_notes_are_rejected() {
        let mut record = form_record();
        record.outcomes = "x".repeat(MAX_NOTE_LEN + 1);
        assert_eq!(
            validate_form(&record),
            Err(CoreError::FieldTooLong {
                field: "outcomes",
                max: MAX_NOTE_LEN
            })
        );
    }

    #[test]
    fn time_is_optional_but_strict() {
        let mut record = form_record();
        record.interaction_time = "N/A".to_string();
        assert_eq!(validate_form(&record).expect("valid").time, None);

        record.interaction_time = "after lunch".to_string();
        assert_eq!(
            validate_form(&record),
            Err(CoreError::InvalidTime("after lunch".to_string()))
        );
    }

    #[test]
    fn clean_list_drops_blank_entries() {
        let items = vec![" a ".to_string(), String::new(), "b".to_string()];
        assert_eq!(clean_list(&items), vec!["a".to_string(), "b".to_string()]);
    }
}
