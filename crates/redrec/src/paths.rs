use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use time::macros::format_description;
use time::OffsetDateTime;

pub const DEFAULT_WORKSPACE_DIR: &str = "workspace";

pub fn default_workspace(home: &Path) -> PathBuf {
    home.join(DEFAULT_WORKSPACE_DIR)
}

/// Directory holding every recording of `operation`.
pub fn operation_dir(workspace: &Path, operation: &str) -> PathBuf {
    workspace.join(operation)
}

/// `session_<YYYYMMDD>_<HHMMSS>.cast` for the given instant.
pub fn recording_file_name(at: OffsetDateTime) -> Result<String> {
    let stamp = at
        .format(format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .context("formatting recording timestamp")?;
    Ok(format!("session_{stamp}.cast"))
}

/// Local wall-clock time, or UTC when the local offset cannot be determined.
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|err| {
        tracing::debug!(error = %err, "local offset unavailable, using UTC");
        OffsetDateTime::now_utc()
    })
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("creating directory {}", path.display()))
}
