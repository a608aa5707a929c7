mod backend;
mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::backend::Backend;
use crate::commands::{backup, chat, convert, draft, records, Context};
use crate::error::{exit_status_for, report_error};
use hcplog_config as config;

#[derive(Debug, Parser)]
#[command(name = "hcplog", version, about = "Log HCP interactions from AI-drafted summaries")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Use the remote API instead of the local database
    #[arg(long, global = true)]
    remote: bool,
    /// Base URL of the remote API (implies --remote)
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse or render draft text
    #[command(subcommand)]
    Draft(draft::DraftCommand),
    /// Normalize a loose time expression to HH:MM
    Time(convert::TimeArgs),
    /// Convert between DD-MM-YYYY and YYYY-MM-DD
    Date(convert::DateArgs),
    /// Log an interaction from form fields
    Log(records::LogArgs),
    /// Confirm and store a chat draft
    Confirm(records::ConfirmArgs),
    /// List logged interactions
    List(records::ListArgs),
    /// Show one logged interaction by id
    Show(records::ShowArgs),
    /// Chat with the logging assistant
    Chat(chat::ChatArgs),
    /// Copy the local database to a backup file
    Backup(backup::BackupArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_status_for(&err).into()
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        remote,
        api_url,
        command,
    } = cli;

    match command {
        Command::Draft(cmd) => draft::run(cmd, json),
        Command::Time(args) => convert::time(args, json),
        Command::Date(args) => convert::date(args, json),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }

            let backend = Backend::open(&app_config, db_path, remote, api_url.as_deref())?;
            debug!(backend = backend.label(), "backend ready");

            let ctx = Context {
                backend: &backend,
                json,
                config: &app_config,
            };

            match command {
                Command::Log(args) => records::log(&ctx, args),
                Command::Confirm(args) => records::confirm(&ctx, args),
                Command::List(args) => records::list(&ctx, args),
                Command::Show(args) => records::show(&ctx, args),
                Command::Chat(args) => chat::chat(&ctx, args, api_url.as_deref()),
                Command::Backup(args) => backup::backup(&ctx, args),
                Command::Draft(_) | Command::Time(_) | Command::Date(_) => {
                    unreachable!("offline commands handled before backend initialization")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
