use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::OperationStoreError;
use crate::lock::{FileLock, LockMode};
use crate::paths::registry_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended,
    AlreadyPresent,
}

/// Handle on a registry file. Holds no open descriptor or lock between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationStore {
    path: PathBuf,
}

impl OperationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Registry stored as `<workspace>/operations`.
    pub fn in_workspace(workspace: &Path) -> Self {
        Self::new(registry_path(workspace))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All names in insertion order. A missing file is an empty registry.
    ///
    /// Holds a shared lock for the read, so a concurrent append is seen
    /// either completely or not at all.
    pub fn read_all(&self) -> Result<Vec<String>, OperationStoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(OperationStoreError::io(
                    "opening registry",
                    &self.path,
                    source,
                ))
            }
        };

        let mut content = String::new();
        {
            let _lock = FileLock::acquire(&file, LockMode::Shared, &self.path)?;
            (&file)
                .read_to_string(&mut content)
                .map_err(|source| OperationStoreError::io("reading registry", &self.path, source))?;
        }

        Ok(parse_names(&content))
    }

    /// Most recently registered name.
    pub fn last(&self) -> Result<Option<String>, OperationStoreError> {
        Ok(self.read_all()?.pop())
    }

    pub fn contains(&self, name: &str) -> Result<bool, OperationStoreError> {
        Ok(self.read_all()?.iter().any(|existing| existing == name))
    }

    /// Append `name` unless it is already registered.
    ///
    /// The membership check and the write are separate lock scopes. Two
    /// processes appending the same new name at the same moment can both
    /// pass the check and leave a duplicate line; readers tolerate that.
    pub fn append(&self, name: &str) -> Result<AppendOutcome, OperationStoreError> {
        self.append_with_hook(name, || {})
    }

    fn append_with_hook<F>(
        &self,
        name: &str,
        between_check_and_write: F,
    ) -> Result<AppendOutcome, OperationStoreError>
    where
        F: FnOnce(),
    {
        validate_name(name)?;

        if self.contains(name)? {
            tracing::debug!(name, path = %self.path.display(), "operation already registered");
            return Ok(AppendOutcome::AlreadyPresent);
        }

        between_check_and_write();

        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| {
                OperationStoreError::io("creating registry directory", parent, source)
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| {
                OperationStoreError::io("opening registry for append", &self.path, source)
            })?;

        let mut record = String::with_capacity(name.len() + 1);
        record.push_str(name);
        record.push('\n');

        {
            let _lock = FileLock::acquire(&file, LockMode::Exclusive, &self.path)?;
            (&file).write_all(record.as_bytes()).map_err(|source| {
                OperationStoreError::io("appending to registry", &self.path, source)
            })?;
        }

        tracing::debug!(name, path = %self.path.display(), "operation registered");
        Ok(AppendOutcome::Appended)
    }
}

fn parse_names(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_name(name: &str) -> Result<(), OperationStoreError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains(['\n', '\r']) {
        "name contains a line break"
    } else {
        return Ok(());
    };
    Err(OperationStoreError::InvalidName {
        name: name.to_string(),
        reason,
    })
}
