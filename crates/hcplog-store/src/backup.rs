use crate::error::{Result, StoreError};
use crate::paths;
use rusqlite::backup::Backup;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

const PAGES_PER_STEP: i32 = 200;
const PAUSE_BETWEEN_STEPS: Duration = Duration::from_millis(25);

/// Copies the live database to `path` with SQLite's online backup API.
///
/// Refuses targets that alias the live database: the file itself, its WAL
/// and shared-memory sidecars, or a hard link to it.
pub fn backup_to(conn: &Connection, path: &Path) -> Result<()> {
    paths::ensure_parent_dir(path)?;
    let target = absolute_target(path)?;
    if let Some(live) = live_db_path(conn)? {
        let live = absolute_target(&live)?;
        if aliases_live_db(&target, &live)? {
            return Err(StoreError::BackupTarget {
                path: path.to_path_buf(),
                reason: "it is the live database or one of its files",
            });
        }
    }

    let mut dest = Connection::open(&target)?;
    let backup = Backup::new(conn, &mut dest)?;
    backup.run_to_completion(PAGES_PER_STEP, PAUSE_BETWEEN_STEPS, None)?;
    paths::restrict_file_permissions(&target)?;
    info!(path = %target.display(), "database backup written");
    Ok(())
}

fn aliases_live_db(target: &Path, live: &Path) -> Result<bool> {
    if target == live {
        return Ok(true);
    }
    for suffix in ["-wal", "-shm"] {
        let mut sidecar = live.as_os_str().to_owned();
        sidecar.push(suffix);
        if target == Path::new(&sidecar) {
            return Ok(true);
        }
    }
    same_inode(target, live)
}

fn absolute_target(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(fs::canonicalize(path)?);
    }
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let parent = fs::canonicalize(parent)?;
    let file_name = path
        .file_name()
        .ok_or_else(|| StoreError::BackupTarget {
            path: path.to_path_buf(),
            reason: "it does not name a file",
        })?;
    Ok(parent.join(file_name))
}

fn live_db_path(conn: &Connection) -> Result<Option<PathBuf>> {
    let mut stmt = conn.prepare("PRAGMA database_list;")?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        let file: String = row.get(2)?;
        if name == "main" && !file.is_empty() {
            return Ok(Some(PathBuf::from(file)));
        }
    }
    Ok(None)
}

#[cfg(unix)]
fn same_inode(target: &Path, live: &Path) -> Result<bool> {
    use std::os::unix::fs::MetadataExt;
    if !target.exists() || !live.exists() {
        return Ok(false);
    }
    let target_meta = fs::metadata(target)?;
    let live_meta = fs::metadata(live)?;
    Ok(target_meta.dev() == live_meta.dev() && target_meta.ino() == live_meta.ino())
}

#[cfg(not(unix))]
fn same_inode(_target: &Path, _live: &Path) -> Result<bool> {
    Ok(false)
}
