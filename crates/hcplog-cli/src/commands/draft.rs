use crate::commands::print_json;
use crate::util::read_input;
use anyhow::Result;
use clap::{Args, Subcommand};
use hcplog_core::domain::{DraftRecord, InteractionType, Sentiment};
use hcplog_core::session::{FieldUpdate, FormCommand, FormState};
use hcplog_core::{parse_draft, render_draft, DraftKey};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
pub enum DraftCommand {
    /// Parse draft text from a file or stdin
    Parse(ParseArgs),
    /// Render record fields as draft text
    Render(RecordArgs),
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// File containing the draft; stdin when omitted
    pub file: Option<PathBuf>,
    /// Load the draft into a fresh form (date as YYYY-MM-DD, time as HH:MM)
    #[arg(long)]
    pub form: bool,
}

/// Interaction fields accepted as flags by `draft render` and `log`.
#[derive(Debug, Default, Args)]
pub struct RecordArgs {
    #[arg(long)]
    pub hcp: Option<String>,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub time: Option<String>,
    /// Meeting, Call, Email, Conference or Other
    #[arg(long = "type")]
    pub kind: Option<String>,
    #[arg(long = "attendee")]
    pub attendees: Vec<String>,
    #[arg(long)]
    pub topics: Option<String>,
    #[arg(long = "material")]
    pub materials: Vec<String>,
    #[arg(long = "sample")]
    pub samples: Vec<String>,
    /// Positive, Neutral or Negative
    #[arg(long)]
    pub sentiment: Option<String>,
    #[arg(long)]
    pub outcomes: Option<String>,
    #[arg(long)]
    pub follow_up: Option<String>,
}

impl RecordArgs {
    pub fn updates(self) -> Result<Vec<FieldUpdate>> {
        let mut updates = Vec::new();
        if let Some(value) = self.hcp {
            updates.push(FieldUpdate::HcpName(value));
        }
        if let Some(value) = self.date {
            updates.push(FieldUpdate::Date(value));
        }
        if let Some(value) = self.time {
            updates.push(FieldUpdate::Time(value));
        }
        if let Some(value) = self.kind {
            updates.push(FieldUpdate::Type(InteractionType::from_label(&value)));
        }
        if !self.attendees.is_empty() {
            updates.push(FieldUpdate::Attendees(self.attendees));
        }
        if let Some(value) = self.topics {
            updates.push(FieldUpdate::Topics(value));
        }
        if !self.materials.is_empty() {
            updates.push(FieldUpdate::MaterialsShared(self.materials));
        }
        if !self.samples.is_empty() {
            updates.push(FieldUpdate::SamplesDistributed(self.samples));
        }
        if let Some(value) = self.sentiment {
            updates.push(FieldUpdate::Sentiment(Sentiment::from_label(&value)?));
        }
        if let Some(value) = self.outcomes {
            updates.push(FieldUpdate::Outcomes(value));
        }
        if let Some(value) = self.follow_up {
            updates.push(FieldUpdate::FollowUp(value));
        }
        Ok(updates)
    }

    /// Applies every given flag to `form`, leaving other fields untouched.
    pub fn apply(self, form: &mut FormState) -> Result<()> {
        for update in self.updates()? {
            form.dispatch(FormCommand::Set(update));
        }
        Ok(())
    }
}

pub fn run(command: DraftCommand, json: bool) -> Result<()> {
    match command {
        DraftCommand::Parse(args) => parse(args, json),
        DraftCommand::Render(args) => render(args, json),
    }
}

fn parse(args: ParseArgs, json: bool) -> Result<()> {
    let text = read_input(args.file.as_deref())?;
    let draft = parse_draft(&text);

    if args.form {
        let mut form = FormState::new();
        form.dispatch(FormCommand::LoadDraft(draft));
        if json {
            return print_json(form.record());
        }
        println!("{}", render_draft(form.record()));
        return Ok(());
    }

    if json {
        return print_json(&draft);
    }
    if draft.is_empty() {
        println!("no draft fields found");
        return Ok(());
    }
    for (key, value) in draft_fields(&draft) {
        println!("{}: {}", key.label(), value);
    }
    Ok(())
}

fn render(args: RecordArgs, json: bool) -> Result<()> {
    let mut form = FormState::new();
    args.apply(&mut form)?;
    let text = render_draft(form.record());
    if json {
        return print_json(&serde_json::json!({ "draft": text }));
    }
    println!("{text}");
    Ok(())
}

/// The fields a draft carries, in label order.
pub fn draft_fields(draft: &DraftRecord) -> Vec<(DraftKey, String)> {
    DraftKey::ALL
        .into_iter()
        .filter_map(|key| {
            let value = match key {
                DraftKey::Hcp => draft.hcp_name.clone(),
                DraftKey::Date => draft.interaction_date.clone(),
                DraftKey::Time => draft.interaction_time.clone(),
                DraftKey::Type => draft.interaction_type.map(|kind| kind.label().to_string()),
                DraftKey::Attendees => draft.attendees.as_ref().map(|items| items.join(", ")),
                DraftKey::Topics => draft.topics_discussed.clone(),
                DraftKey::MaterialsShared => {
                    draft.materials_shared.as_ref().map(|items| items.join(", "))
                }
                DraftKey::SamplesDistributed => {
                    draft.samples_distributed.as_ref().map(|items| items.join(", "))
                }
                DraftKey::Sentiment => draft.hcp_sentiment.map(|value| value.label().to_string()),
                DraftKey::Outcomes => draft.outcomes.clone(),
                DraftKey::FollowUp => draft.follow_up_actions.clone(),
            };
            value.map(|value| (key, value))
        })
        .collect()
}
