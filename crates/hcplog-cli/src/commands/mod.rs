use anyhow::Result;
use hcplog_config::AppConfig;
use serde::Serialize;
use std::io::{self, Write};

use crate::backend::Backend;

pub mod backup;
pub mod chat;
pub mod convert;
pub mod draft;
pub mod records;

pub struct Context<'a> {
    pub backend: &'a Backend,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
