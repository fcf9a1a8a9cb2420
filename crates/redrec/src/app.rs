//! One invocation: resolve the operation, register it, run the recorder.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use operation_store::{AppendOutcome, OperationStore};
use redrec_tui::{
    install_signal_handlers, ProcessTerminal, SelectError, SelectList, Selection,
    TermiosSnapshot,
};

use crate::cli::Cli;
use crate::config::{EnvConfig, Settings};
use crate::paths;
use crate::recorder::Recorder;

/// Operation used when nothing was named and nothing has been recorded yet.
pub const DEFAULT_OPERATION: &str = "currentoperation";
pub const SELECT_HEADING: &str = "Select an operation:";
pub const NO_OPERATIONS_MESSAGE: &str = "No previous operations found.";

/// How the operation for this invocation is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationRequest {
    Named(String),
    Select,
    Last,
}

impl OperationRequest {
    pub fn from_cli(cli: &Cli) -> Self {
        match (&cli.operation, cli.select) {
            (_, true) => Self::Select,
            (Some(name), false) => Self::Named(name.clone()),
            (None, false) => Self::Last,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Recorded { operation: String, path: PathBuf },
    Cancelled,
}

/// Chooses one of the registered operations.
pub trait OperationPicker {
    fn pick(&mut self, operations: Vec<String>) -> Result<Selection, SelectError>;
}

/// Interactive picker on the controlling terminal.
///
/// SIGTERM and SIGHUP while the menu is open restore the terminal and exit
/// with `128 + signal`.
#[derive(Debug, Default)]
pub struct TerminalPicker;

impl OperationPicker for TerminalPicker {
    fn pick(&mut self, operations: Vec<String>) -> Result<Selection, SelectError> {
        let list = SelectList::new(operations)?.with_heading(SELECT_HEADING);

        let snapshot = TermiosSnapshot::capture(libc::STDIN_FILENO)
            .map_err(|source| SelectError::terminal("capturing terminal mode", source))?;
        let _signals = install_signal_handlers(move |signal| {
            let _ = snapshot.restore();
            let _ = io::stdout().write_all(b"\x1b[?25h\r\n");
            let _ = io::stdout().flush();
            std::process::exit(128 + signal);
        })
        .map_err(|source| SelectError::terminal("installing signal handlers", source))?;

        list.run(ProcessTerminal::new())
    }
}

/// `None` means the user backed out of the selector.
pub fn resolve_operation(
    request: &OperationRequest,
    store: &OperationStore,
    picker: &mut dyn OperationPicker,
) -> Result<Option<String>> {
    match request {
        OperationRequest::Named(name) => Ok(Some(name.clone())),
        OperationRequest::Last => {
            let last = store.last().context("reading operation registry")?;
            Ok(Some(last.unwrap_or_else(|| DEFAULT_OPERATION.to_string())))
        }
        OperationRequest::Select => {
            let operations = store.read_all().context("reading operation registry")?;
            if operations.is_empty() {
                bail!(NO_OPERATIONS_MESSAGE);
            }
            let selection = picker
                .pick(operations)
                .context("selecting an operation")?;
            Ok(selection.into_confirmed())
        }
    }
}

pub fn run(cli: &Cli, env: &EnvConfig, picker: &mut dyn OperationPicker) -> Result<Outcome> {
    let settings = Settings::resolve(cli, env)?;
    let recorder = Recorder::locate(&settings.recorder)?;

    paths::ensure_dir(&settings.workspace)?;
    let store = OperationStore::in_workspace(&settings.workspace);

    let request = OperationRequest::from_cli(cli);
    let Some(operation) = resolve_operation(&request, &store, picker)? else {
        tracing::debug!("selection cancelled");
        return Ok(Outcome::Cancelled);
    };

    let target_dir = paths::operation_dir(&settings.workspace, &operation);
    paths::ensure_dir(&target_dir)?;
    let path = target_dir.join(paths::recording_file_name(paths::local_now())?);

    match store
        .append(&operation)
        .with_context(|| format!("registering operation {operation:?}"))?
    {
        AppendOutcome::Appended => tracing::debug!(operation, "new operation"),
        AppendOutcome::AlreadyPresent => {}
    }

    recorder.record(&cli.command, &path)?;
    Ok(Outcome::Recorded { operation, path })
}
