use crate::commands::draft::RecordArgs;
use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{display_or_na, read_input, today_form_date};
use anyhow::{Context as _, Result};
use clap::Args;
use hcplog_core::dto::{InteractionLogDto, LogConfirmation};
use hcplog_core::parse_draft;
use hcplog_core::rules::{confirm_payload, form_payload};
use hcplog_core::session::{FieldUpdate, FormCommand, FormState};
use hcplog_core::time::local_now_time;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct LogArgs {
    #[command(flatten)]
    pub fields: RecordArgs,
}

#[derive(Debug, Args)]
pub struct ConfirmArgs {
    /// File containing the draft; stdin when omitted
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show logs whose HCP name contains this text
    #[arg(long)]
    pub hcp: Option<String>,
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: i64,
}

pub fn log(ctx: &Context<'_>, args: LogArgs) -> Result<()> {
    let mut form = FormState::new();
    form.dispatch(FormCommand::Set(FieldUpdate::Date(today_form_date())));
    args.fields.apply(&mut form)?;

    let payload = form_payload(form.record(), local_now_time());
    debug!(hcp = %payload.hcp_name, date = %payload.interaction_date, "submitting form");
    let confirmation = ctx
        .backend
        .log_form(&payload)
        .with_context(|| "log interaction")?;
    report(ctx, &confirmation)
}

pub fn confirm(ctx: &Context<'_>, args: ConfirmArgs) -> Result<()> {
    let text = read_input(args.file.as_deref())?;
    let draft = parse_draft(&text);
    if draft.is_empty() {
        return Err(invalid_input("no draft fields found in input"));
    }

    let payload = confirm_payload(&draft, local_now_time());
    let confirmation = ctx
        .backend
        .confirm_draft(&payload)
        .with_context(|| "confirm draft")?;
    report(ctx, &confirmation)
}

pub fn list(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let mut logs = ctx.backend.list().with_context(|| "list interactions")?;
    if let Some(needle) = args.hcp.as_deref() {
        let needle = needle.to_lowercase();
        logs.retain(|log| log.hcp_name.to_lowercase().contains(&needle));
    }
    if let Some(limit) = args.limit {
        logs.truncate(limit);
    }

    if ctx.json {
        return print_json(&logs);
    }
    if logs.is_empty() {
        println!("no interactions logged");
        return Ok(());
    }
    for log in &logs {
        println!("{}", format_row(log));
    }
    Ok(())
}

pub fn show(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let log = ctx
        .backend
        .show(args.id)
        .with_context(|| format!("show interaction {}", args.id))?;
    if ctx.json {
        return print_json(&log);
    }
    for (label, value) in detail_lines(&log) {
        println!("{label:<12} {value}");
    }
    Ok(())
}

fn detail_lines(log: &InteractionLogDto) -> Vec<(&'static str, String)> {
    let joined = |items: &[String]| display_or_na(&items.join(", ")).to_string();
    let optional =
        |value: &Option<String>| display_or_na(value.as_deref().unwrap_or_default()).to_string();
    vec![
        ("Log", log.id.to_string()),
        ("HCP", log.hcp_name.clone()),
        ("Date", log.interaction_date.clone()),
        ("Time", optional(&log.interaction_time)),
        ("Type", log.interaction_type.clone()),
        ("Attendees", joined(&log.attendees)),
        ("Topics", log.topics_discussed.clone()),
        ("Materials", joined(&log.materials_shared)),
        ("Samples", joined(&log.samples_distributed)),
        ("Sentiment", optional(&log.hcp_sentiment)),
        ("Outcomes", optional(&log.outcomes)),
        ("Follow-up", optional(&log.follow_up_actions)),
        ("Logged at", log.timestamp.clone()),
    ]
}

fn report(ctx: &Context<'_>, confirmation: &LogConfirmation) -> Result<()> {
    if ctx.json {
        return print_json(confirmation);
    }
    println!("{} (log {})", confirmation.message, confirmation.log_id);
    Ok(())
}

fn format_row(log: &InteractionLogDto) -> String {
    format!(
        "{:>4}  {} {:<5}  {:<10}  {}  [{}]  {}",
        log.id,
        log.interaction_date,
        log.interaction_time.as_deref().unwrap_or("--:--"),
        log.interaction_type,
        log.hcp_name,
        display_or_na(log.hcp_sentiment.as_deref().unwrap_or_default()),
        log.topics_discussed,
    )
}
