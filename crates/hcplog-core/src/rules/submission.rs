use crate::domain::{DraftRecord, InteractionRecord};
use crate::rules::dates::{is_iso_shaped, to_iso_display, to_wire_format};
use crate::rules::validation::clean_list;
use crate::time::normalize_time_at;
use chrono::NaiveTime;

/// Converts a parsed draft into form representation: `YYYY-MM-DD` dates and
/// `HH:MM` times. Fields the draft lacks stay unset.
pub fn load_for_form(draft: &DraftRecord, now: NaiveTime) -> DraftRecord {
    let mut converted = draft.clone();
    if let Some(date) = &draft.interaction_date {
        if !is_iso_shaped(date) {
            converted.interaction_date = Some(to_iso_display(date));
        }
    }
    if let Some(time) = &draft.interaction_time {
        converted.interaction_time = Some(normalize_time_at(time, now));
    }
    converted
}

/// Payload for the create-from-form operation. The date stays in form
/// representation.
pub fn form_payload(record: &InteractionRecord, now: NaiveTime) -> InteractionRecord {
    let mut payload = record.clone();
    payload.interaction_time = normalize_time_at(&record.interaction_time, now);
    tidy_lists(&mut payload);
    payload
}

/// Payload for the create-from-confirmed-draft operation: wire date and a
/// normalized time, with defaults for everything the draft omitted.
pub fn confirm_payload(draft: &DraftRecord, now: NaiveTime) -> InteractionRecord {
    let mut payload = draft.clone().into_record();
    if is_iso_shaped(&payload.interaction_date) {
        payload.interaction_date = to_wire_format(payload.interaction_date.trim());
    }
    payload.interaction_time = normalize_time_at(&payload.interaction_time, now);
    tidy_lists(&mut payload);
    payload
}

fn tidy_lists(record: &mut InteractionRecord) {
    record.attendees = clean_list(&record.attendees);
    record.materials_shared = clean_list(&record.materials_shared);
    record.samples_distributed = clean_list(&record.samples_distributed);
}

#[cfg(test)]
mod tests {
    use super::{confirm_payload, form_payload, load_for_form};
    use crate::domain::{DraftRecord, InteractionRecord, InteractionType};
    use crate::draft::parse_draft;
    use chrono::NaiveTime;

    fn clock() -> NaiveTime {
        NaiveTime::from_hms_opt(8, 15, 0).unwrap()
    }

    #[test]
    fn load_for_form_converts_date_and_time() {
        let draft = parse_draft("Date: 21-05-2025\nTime: 7pm\n");
        let loaded = load_for_form(&draft, clock());
        assert_eq!(loaded.interaction_date.as_deref(), Some("2025-05-21"));
        assert_eq!(loaded.interaction_time.as_deref(), Some("19:00"));
    }

    #[test]
    fn load_for_form_leaves_absent_fields_unset() {
        let draft = parse_draft("HCP: Dr. Lee\n");
        let loaded = load_for_form(&draft, clock());
        assert_eq!(loaded.interaction_date, None);
        assert_eq!(loaded.interaction_time, None);
        assert_eq!(loaded.hcp_name.as_deref(), Some("Dr. Lee"));
    }

    #[test]
    fn load_for_form_keeps_dates_already_in_form_order() {
        let draft = DraftRecord {
            interaction_date: Some("2025-05-21".to_string()),
            ..DraftRecord::default()
        };
        let loaded = load_for_form(&draft, clock());
        assert_eq!(loaded.interaction_date.as_deref(), Some("2025-05-21"));
    }

    #[test]
    fn confirm_payload_keeps_wire_date_and_normalizes_time() {
        let draft = parse_draft("**HCP:** Dr. Lee\n**Date:** 21-05-2025\n**Time:** 9am\n");
        let payload = confirm_payload(&draft, clock());
        assert_eq!(payload.interaction_date, "21-05-2025");
        assert_eq!(payload.interaction_time, "09:00");
        assert_eq!(payload.interaction_type, InteractionType::Meeting);
    }

    #[test]
    fn confirm_payload_converts_form_dates_to_wire() {
        let draft = DraftRecord {
            interaction_date: Some("2025-05-21".to_string()),
            ..DraftRecord::default()
        };
        assert_eq!(confirm_payload(&draft, clock()).interaction_date, "21-05-2025");
    }

    #[test]
    fn confirm_payload_fills_missing_time_from_clock() {
        let payload = confirm_payload(&DraftRecord::default(), clock());
        assert_eq!(payload.interaction_time, "08:15");
    }

    #[test]
    fn form_payload_normalizes_time_only() {
        let record = InteractionRecord {
            interaction_date: "2025-05-21".to_string(),
            interaction_time: "7".to_string(),
            attendees: vec!["Alex".to_string(), "".to_string()],
            ..InteractionRecord::default()
        };
        let payload = form_payload(&record, clock());
        assert_eq!(payload.interaction_date, "2025-05-21");
        assert_eq!(payload.interaction_time, "07:00");
        assert_eq!(payload.attendees, vec!["Alex".to_string()]);
    }
}
