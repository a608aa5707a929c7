use chrono::{NaiveDate, NaiveTime};
use hcplog_core::domain::{InteractionType, NewInteraction, Sentiment};
use hcplog_store::error::StoreError;
use hcplog_store::Store;
use rusqlite::Connection;
use tempfile::TempDir;

fn sample(name: &str) -> NewInteraction {
    NewInteraction {
        hcp_name: name.to_string(),
        date: NaiveDate::from_ymd_opt(2025, 5, 21).unwrap(),
        time: NaiveTime::from_hms_opt(19, 0, 0),
        interaction_type: InteractionType::Call,
        attendees: vec!["Alex".to_string(), "Nurse Emily".to_string()],
        topics_discussed: "Trial results".to_string(),
        materials_shared: vec!["Brochure".to_string()],
        samples_distributed: Vec::new(),
        hcp_sentiment: Sentiment::Positive,
        outcomes: "Will prescribe".to_string(),
        follow_up_actions: String::new(),
    }
}

#[test]
fn interactions_add_and_list() {
    let store = Store::open_in_memory().expect("open in memory");

    let now = 1_700_000_000;
    let first = store
        .interactions()
        .add(now, sample("Dr. Lee"))
        .expect("add interaction");
    let second = store
        .interactions()
        .add(now + 10, sample("Dr. Patel"))
        .expect("add interaction");
    assert!(second.id > first.id);

    let list = store.interactions().list_all().expect("list interactions");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].interaction.hcp_name, "Dr. Lee");
    assert_eq!(list[1].interaction.hcp_name, "Dr. Patel");
    assert_eq!(list[0].interaction, sample("Dr. Lee"));
    assert_eq!(list[1].created_at, now + 10);
}

#[test]
fn interactions_get_round_trips_optional_fields() {
    let store = Store::open_in_memory().expect("open in memory");

    let mut input = sample("Dr. Lee");
    input.time = None;
    input.hcp_sentiment = Sentiment::Unspecified;
    let stored = store
        .interactions()
        .add(1_700_000_000, input.clone())
        .expect("add interaction");

    let fetched = store.interactions().get(stored.id).expect("get");
    assert_eq!(fetched.interaction, input);
}

#[test]
fn interactions_get_missing_is_not_found() {
    let store = Store::open_in_memory().expect("open in memory");

    let err = store.interactions().get(42).expect_err("missing");
    assert!(matches!(err, StoreError::LogNotFound(42)));
}

#[test]
fn interactions_list_skips_corrupt_rows() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("hcplog.sqlite3");
    {
        let store = Store::open(&db_path).expect("open store");
        store
            .interactions()
            .add(1_700_000_000, sample("Dr. Lee"))
            .expect("add interaction");
    }
    Connection::open(&db_path)
        .expect("raw connection")
        .execute(
            "INSERT INTO interaction_logs (hcp_name, interaction_date, topics_discussed, created_at)
             VALUES ('Dr. Broken', 'yesterday', 'x', 0);",
            [],
        )
        .expect("insert corrupt row");

    let store = Store::open(&db_path).expect("reopen store");
    let list = store.interactions().list_all().expect("list");
    assert_eq!(list.len(), 1);
    assert_eq!(store.interactions().count().expect("count"), 2);
}
