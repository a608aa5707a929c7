use crate::backend::{remote_client, Backend};
use crate::commands::Context;
use anyhow::Result;
use clap::Args;
use hcplog_core::domain::{ChatMessage, MessageKind};
use hcplog_core::rules::{confirm_payload, form_payload};
use hcplog_core::service::ChatSession;
use hcplog_core::session::{ChatCommand, ChatLog, FormCommand, FormState};
use hcplog_core::time::local_now_time;
use hcplog_core::{parse_draft, render_draft};
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::{debug, warn};

const HELP: &str = "\
commands:
  /fill            load the latest draft into the form
  /set Label: val  edit a form field using draft syntax, e.g. /set Time: 4pm
  /show            print the form
  /submit          log the form
  /confirm         save the latest draft as-is
  /reset           clear chat and form
  /quit            leave";

#[derive(Debug, Args)]
pub struct ChatArgs {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ChatInput<'a> {
    Message(&'a str),
    Fill,
    Set(&'a str),
    Show,
    Submit,
    Confirm,
    Reset,
    Help,
    Quit,
}

impl<'a> ChatInput<'a> {
    fn parse(line: &'a str) -> Self {
        let Some(command) = line.strip_prefix('/') else {
            return ChatInput::Message(line);
        };
        let (name, rest) = command
            .split_once(char::is_whitespace)
            .map(|(name, rest)| (name, rest.trim()))
            .unwrap_or((command, ""));
        match name {
            "fill" => ChatInput::Fill,
            "set" => ChatInput::Set(rest),
            "show" => ChatInput::Show,
            "submit" => ChatInput::Submit,
            "confirm" => ChatInput::Confirm,
            "reset" => ChatInput::Reset,
            "quit" | "exit" => ChatInput::Quit,
            _ => ChatInput::Help,
        }
    }
}

pub fn chat(ctx: &Context<'_>, _args: ChatArgs, api_url: Option<&str>) -> Result<()> {
    let owned;
    let session = match ctx.backend.client() {
        Some(client) => client,
        None => {
            owned = remote_client(ctx.config, api_url)?;
            &owned
        }
    };

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut out = io::stdout().lock();
    if interactive {
        writeln!(out, "{HELP}")?;
    }
    run_session(session, ctx.backend, stdin.lock(), &mut out, interactive)
}

/// Drives one chat session until `/quit` or end of input.
fn run_session<S, R, W>(
    session: &S,
    backend: &Backend,
    input: R,
    out: &mut W,
    prompt: bool,
) -> Result<()>
where
    S: ChatSession,
    R: BufRead,
    W: Write,
{
    let mut log = ChatLog::new();
    let mut form = FormState::new();
    let mut lines = input.lines();

    loop {
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match ChatInput::parse(trimmed) {
            ChatInput::Quit => break,
            ChatInput::Help => writeln!(out, "{HELP}")?,
            ChatInput::Reset => {
                log.dispatch(ChatCommand::Reset);
                form.dispatch(FormCommand::Reset);
                writeln!(out, "session cleared")?;
            }
            ChatInput::Message(text) => {
                let history: Vec<ChatMessage> = log.history().to_vec();
                log.dispatch(ChatCommand::User(text.to_string()));
                match session.exchange(text, &history) {
                    Ok(reply) => {
                        let kind = reply.kind;
                        writeln!(out, "{}", reply.reply)?;
                        log.dispatch(ChatCommand::Reply(reply));
                        if kind == MessageKind::Draft {
                            writeln!(out, "(draft ready: /fill to edit, /confirm to save)")?;
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "chat exchange failed");
                        let text = format!("Error: {err}");
                        writeln!(out, "{text}")?;
                        log.dispatch(ChatCommand::Failure(text));
                    }
                }
            }
            ChatInput::Fill => match log.latest_draft() {
                Some(text) => {
                    form.dispatch(FormCommand::LoadDraft(parse_draft(text)));
                    writeln!(out, "{}", render_draft(form.record()))?;
                }
                None => writeln!(out, "no draft yet")?,
            },
            ChatInput::Set(text) => {
                let draft = parse_draft(text);
                if draft.is_empty() {
                    writeln!(out, "expected `Label: value`, e.g. /set Topics: Pricing")?;
                } else {
                    form.dispatch(FormCommand::LoadDraft(draft));
                    writeln!(out, "{}", render_draft(form.record()))?;
                }
            }
            ChatInput::Show => writeln!(out, "{}", render_draft(form.record()))?,
            ChatInput::Submit => {
                let payload = form_payload(form.record(), local_now_time());
                match backend.log_form(&payload) {
                    Ok(confirmation) => {
                        debug!(log_id = confirmation.log_id, "form submitted from chat");
                        writeln!(out, "{}", confirmation.message)?;
                        log.dispatch(ChatCommand::Reset);
                        form.dispatch(FormCommand::Reset);
                    }
                    Err(err) => writeln!(out, "error: {err:#}")?,
                }
            }
            ChatInput::Confirm => {
                let Some(text) = log.latest_draft() else {
                    writeln!(out, "no draft to confirm")?;
                    continue;
                };
                let payload = confirm_payload(&parse_draft(text), local_now_time());
                match backend.confirm_draft(&payload) {
                    Ok(confirmation) => {
                        debug!(log_id = confirmation.log_id, "draft confirmed from chat");
                        writeln!(out, "{}", confirmation.message)?;
                        log.dispatch(ChatCommand::Reset);
                        form.dispatch(FormCommand::Reset);
                    }
                    Err(err) => writeln!(out, "error: {err:#}")?,
                }
            }
        }
    }
    Ok(())
}
