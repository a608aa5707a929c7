use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use clap::Args;
use hcplog_store::error::StoreError;
use hcplog_store::paths;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct BackupArgs {
    /// Destination file (defaults to a timestamped file under the data dir)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupReport {
    source: String,
    output: String,
    size_bytes: u64,
}

pub fn backup(ctx: &Context<'_>, args: BackupArgs) -> Result<()> {
    let Some(store) = ctx.backend.local() else {
        return Err(invalid_input("backup is only available for the local store"));
    };

    let out = match args.out {
        Some(path) => path,
        None => paths::backup_path()?,
    };

    if let Err(err) = store.backup_to(&out) {
        if matches!(err, StoreError::BackupTarget { .. }) {
            return Err(err).with_context(|| "refusing backup");
        }
        return Err(err).with_context(|| format!("backup database to {}", out.display()));
    }

    let size = fs::metadata(&out)
        .with_context(|| format!("stat backup file {}", out.display()))?
        .len();

    if ctx.json {
        let report = BackupReport {
            source: store
                .path()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            output: out.display().to_string(),
            size_bytes: size,
        };
        return print_json(&report);
    }

    println!("Backup written to {}", out.display());
    Ok(())
}
