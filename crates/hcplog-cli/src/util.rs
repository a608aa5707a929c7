use anyhow::{Context as _, Result};
use chrono::Local;
use hcplog_core::time::{FORM_DATE_FORMAT, NOT_AVAILABLE};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::error::not_found;

/// Reads draft text from `path`, or from stdin when no path (or `-`) is
/// given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            if !path.exists() {
                return Err(not_found(format!("input file {}", path.display())));
            }
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .with_context(|| "read stdin")?;
            Ok(buf)
        }
    }
}

pub fn today_form_date() -> String {
    Local::now().date_naive().format(FORM_DATE_FORMAT).to_string()
}

pub fn display_or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}
