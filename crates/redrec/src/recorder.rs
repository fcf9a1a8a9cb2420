//! External terminal recorder invocation.

use std::env;
use std::ffi::OsStr;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("{program} is not installed.")]
    NotInstalled { program: String },

    #[error("failed to start {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Recording failed with exit code {code}")]
    Failed { code: i32 },

    #[error("Recording terminated by signal {signal}")]
    Signaled { signal: i32 },
}

/// A recorder program resolved to an executable path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorder {
    program: String,
    executable: PathBuf,
}

impl Recorder {
    /// Resolve `program` against the process `PATH`.
    pub fn locate(program: &str) -> Result<Self, RecorderError> {
        Self::locate_in(program, env::var_os("PATH").as_deref())
    }

    /// Names containing `/` are taken as paths and are not searched.
    pub fn locate_in(program: &str, search_path: Option<&OsStr>) -> Result<Self, RecorderError> {
        let executable = find_executable(program, search_path).ok_or_else(|| {
            RecorderError::NotInstalled {
                program: program.to_string(),
            }
        })?;
        tracing::debug!(program, executable = %executable.display(), "recorder located");
        Ok(Self {
            program: program.to_string(),
            executable,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// `<recorder> rec -c <shell_command> <output>`, stdio inherited.
    pub fn command(&self, shell_command: &str, output: &Path) -> Command {
        let mut command = Command::new(&self.executable);
        command.arg("rec").arg("-c").arg(shell_command).arg(output);
        command
    }

    /// Run a capture to completion.
    pub fn record(&self, shell_command: &str, output: &Path) -> Result<(), RecorderError> {
        tracing::debug!(
            recorder = self.program(),
            executable = %self.executable.display(),
            command = shell_command,
            output = %output.display(),
            "starting recording"
        );
        let status = self
            .command(shell_command, output)
            .status()
            .map_err(|source| RecorderError::Spawn {
                program: self.executable.clone(),
                source,
            })?;
        check_status(status)
    }
}

fn check_status(status: ExitStatus) -> Result<(), RecorderError> {
    if status.success() {
        return Ok(());
    }
    match (status.code(), status.signal()) {
        (Some(code), _) => Err(RecorderError::Failed { code }),
        (None, Some(signal)) => Err(RecorderError::Signaled { signal }),
        (None, None) => Err(RecorderError::Failed { code: -1 }),
    }
}

fn find_executable(program: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    if program.contains('/') {
        let candidate = PathBuf::from(program);
        return is_executable(&candidate).then_some(candidate);
    }
    env::split_paths(search_path?)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
