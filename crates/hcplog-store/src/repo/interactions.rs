use crate::error::{Result, StoreError};
use chrono::{NaiveDate, NaiveTime};
use hcplog_core::domain::{InteractionType, NewInteraction, Sentiment};
use hcplog_core::time::{CLOCK_FORMAT, FORM_DATE_FORMAT};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

const SELECT_COLUMNS: &str = "SELECT id, hcp_name, interaction_date, interaction_time, interaction_type,
        attendees, topics_discussed, materials_shared, samples_distributed,
        hcp_sentiment, outcomes, follow_up_actions, created_at
 FROM interaction_logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredInteraction {
    pub id: i64,
    pub created_at: i64,
    pub interaction: NewInteraction,
}

pub struct InteractionsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> InteractionsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn add(&self, now_utc: i64, input: NewInteraction) -> Result<StoredInteraction> {
        let sentiment =
            (!input.hcp_sentiment.is_unspecified()).then(|| input.hcp_sentiment.label());

        self.conn.execute(
            "INSERT INTO interaction_logs (
                hcp_name, interaction_date, interaction_time, interaction_type,
                attendees, topics_discussed, materials_shared, samples_distributed,
                hcp_sentiment, outcomes, follow_up_actions, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
            params![
                input.hcp_name,
                input.date.format(FORM_DATE_FORMAT).to_string(),
                input.time.map(|t| t.format(CLOCK_FORMAT).to_string()),
                input.interaction_type.label(),
                encode_list(&input.attendees)?,
                input.topics_discussed,
                encode_list(&input.materials_shared)?,
                encode_list(&input.samples_distributed)?,
                sentiment,
                input.outcomes,
                input.follow_up_actions,
                now_utc,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(id, hcp = %input.hcp_name, "interaction stored");
        Ok(StoredInteraction {
            id,
            created_at: now_utc,
            interaction: input,
        })
    }

    pub fn get(&self, id: i64) -> Result<StoredInteraction> {
        let row = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1;"),
                [id],
                RawRow::from_row,
            )
            .optional()?;
        match row {
            Some(raw) => raw.decode(),
            None => Err(StoreError::LogNotFound(id)),
        }
    }

    /// All interactions in insertion order. Rows whose stored values no
    /// longer decode are skipped with a warning.
    pub fn list_all(&self) -> Result<Vec<StoredInteraction>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            let raw = RawRow::from_row(row)?;
            let id = raw.id;
            match raw.decode() {
                Ok(item) => items.push(item),
                Err(err) => warn!(id, error = %err, "skipping unreadable interaction"),
            }
        }
        Ok(items)
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM interaction_logs;", [], |row| row.get(0))?;
        Ok(count)
    }
}

struct RawRow {
    id: i64,
    hcp_name: String,
    date: String,
    time: Option<String>,
    kind: String,
    attendees: String,
    topics: String,
    materials: String,
    samples: String,
    sentiment: Option<String>,
    outcomes: String,
    follow_up: String,
    created_at: i64,
}

impl RawRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            hcp_name: row.get(1)?,
            date: row.get(2)?,
            time: row.get(3)?,
            kind: row.get(4)?,
            attendees: row.get(5)?,
            topics: row.get(6)?,
            materials: row.get(7)?,
            samples: row.get(8)?,
            sentiment: row.get(9)?,
            outcomes: row.get(10)?,
            follow_up: row.get(11)?,
            created_at: row.get(12)?,
        })
    }

    fn decode(self) -> Result<StoredInteraction> {
        let date = NaiveDate::parse_from_str(&self.date, FORM_DATE_FORMAT).map_err(|err| {
            StoreError::CorruptValue {
                column: "interaction_date",
                detail: err.to_string(),
            }
        })?;
        let time = match self.time.as_deref() {
            Some(raw) if !raw.is_empty() => Some(
                NaiveTime::parse_from_str(raw, CLOCK_FORMAT).map_err(|err| {
                    StoreError::CorruptValue {
                        column: "interaction_time",
                        detail: err.to_string(),
                    }
                })?,
            ),
            _ => None,
        };
        let hcp_sentiment = Sentiment::from_label(self.sentiment.as_deref().unwrap_or(""))
            .map_err(|err| StoreError::CorruptValue {
                column: "hcp_sentiment",
                detail: err.to_string(),
            })?;

        Ok(StoredInteraction {
            id: self.id,
            created_at: self.created_at,
            interaction: NewInteraction {
                hcp_name: self.hcp_name,
                date,
                time,
                interaction_type: InteractionType::from_label(&self.kind),
                attendees: decode_list("attendees", &self.attendees)?,
                topics_discussed: self.topics,
                materials_shared: decode_list("materials_shared", &self.materials)?,
                samples_distributed: decode_list("samples_distributed", &self.samples)?,
                hcp_sentiment,
                outcomes: self.outcomes,
                follow_up_actions: self.follow_up,
            },
        })
    }
}

fn encode_list(items: &[String]) -> Result<String> {
    serde_json::to_string(items).map_err(|err| StoreError::CorruptValue {
        column: "list",
        detail: err.to_string(),
    })
}

fn decode_list(column: &'static str, raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw).map_err(|err| StoreError::CorruptValue {
        column,
        detail: err.to_string(),
    })
}
