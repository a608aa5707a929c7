use crate::commands::print_json;
use anyhow::Result;
use clap::Args;
use hcplog_core::rules::{to_iso_display, to_wire_format};
use hcplog_core::time::{normalize_time, normalize_time_at, parse_clock_time};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct TimeArgs {
    /// Loose time expression, e.g. "7pm", "9:30", "N/A"
    pub raw: String,
    /// Clock time (HH:MM) to use instead of now for empty input
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Debug, Args)]
pub struct DateArgs {
    pub raw: String,
    /// Convert YYYY-MM-DD to DD-MM-YYYY instead
    #[arg(long)]
    pub wire: bool,
}

#[derive(Debug, Serialize)]
struct Conversion<'a> {
    input: &'a str,
    output: String,
}

pub fn time(args: TimeArgs, json: bool) -> Result<()> {
    let output = match args.now.as_deref() {
        Some(now) => normalize_time_at(&args.raw, parse_clock_time(now)?),
        None => normalize_time(&args.raw),
    };
    emit(&args.raw, output, json)
}

pub fn date(args: DateArgs, json: bool) -> Result<()> {
    let output = if args.wire {
        to_wire_format(&args.raw)
    } else {
        to_iso_display(&args.raw)
    };
    emit(&args.raw, output, json)
}

fn emit(input: &str, output: String, json: bool) -> Result<()> {
    if json {
        return print_json(&Conversion { input, output });
    }
    println!("{output}");
    Ok(())
}
