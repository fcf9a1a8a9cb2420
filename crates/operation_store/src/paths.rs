use std::path::{Path, PathBuf};

pub const REGISTRY_FILE_NAME: &str = "operations";

#[must_use]
pub fn registry_path(workspace: &Path) -> PathBuf {
    workspace.join(REGISTRY_FILE_NAME)
}
