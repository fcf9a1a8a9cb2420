//! SelectList widget: an inline arrow-key menu drawn below the cursor.
//!
//! The list is redrawn in place. Every frame first erases exactly the rows the
//! previous frame drew, so the menu never scrolls the terminal and leaves no
//! residue once it closes.

use thiserror::Error;

use crate::core::input::{read_key, Key};
use crate::core::output::{OutputGate, TerminalCmd};
use crate::core::terminal::{RawModeGuard, Terminal};
use crate::core::text::utils::{expand_tabs, truncate_to_width};
use crate::core::text::width::visible_width;

const ELLIPSIS: &str = "…";
const SELECTED_PREFIX: &str = "> ";
const UNSELECTED_PREFIX: &str = "  ";

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("nothing to select from: the candidate list is empty")]
    EmptyCandidates,

    #[error("terminal I/O error while {operation}: {source}")]
    Terminal {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl SelectError {
    #[must_use]
    pub fn terminal(operation: &'static str, source: std::io::Error) -> Self {
        Self::Terminal { operation, source }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Navigating,
    Confirmed,
    Cancelled,
}

/// Outcome of an interactive selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Confirmed(String),
    Cancelled,
}

impl Selection {
    pub fn into_confirmed(self) -> Option<String> {
        match self {
            Self::Confirmed(value) => Some(value),
            Self::Cancelled => None,
        }
    }
}

pub struct SelectList {
    items: Vec<String>,
    selected_index: usize,
    state: SelectionState,
    heading: Option<String>,
    drawn_lines: usize,
    heading_drawn: bool,
}

impl SelectList {
    /// Fails fast on an empty list; the caller must not enter raw mode for nothing.
    pub fn new(items: Vec<String>) -> Result<Self, SelectError> {
        if items.is_empty() {
            return Err(SelectError::EmptyCandidates);
        }
        Ok(Self {
            items,
            selected_index: 0,
            state: SelectionState::Navigating,
            heading: None,
            drawn_lines: 0,
            heading_drawn: false,
        })
    }

    /// Line printed once above the menu and erased together with it.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn get_selected_item(&self) -> &str {
        &self.items[self.selected_index]
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Apply one decoded key. Returns whether anything visible changed.
    ///
    /// Keys arriving after the list left `Navigating` are ignored.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if self.state != SelectionState::Navigating {
            return false;
        }

        let len = self.items.len();
        match key {
            Key::Up => {
                self.selected_index = (self.selected_index + len - 1) % len;
                true
            }
            Key::Down => {
                self.selected_index = (self.selected_index + 1) % len;
                true
            }
            Key::Enter => {
                self.state = SelectionState::Confirmed;
                true
            }
            Key::Cancel => {
                self.state = SelectionState::Cancelled;
                true
            }
            Key::Ignored => false,
        }
    }

    /// One row per item, each fitting in `width` columns.
    pub fn render(&self, width: usize) -> Vec<String> {
        self.items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let prefix = if idx == self.selected_index {
                    SELECTED_PREFIX
                } else {
                    UNSELECTED_PREFIX
                };
                render_row(prefix, item, width)
            })
            .collect()
    }

    fn queue_frame(&mut self, gate: &mut OutputGate, width: usize) {
        gate.erase_lines(self.drawn_lines);
        let lines = self.render(width);
        self.drawn_lines = lines.len();
        gate.extend(lines.into_iter().map(TerminalCmd::Line));
    }

    fn queue_teardown(&mut self, gate: &mut OutputGate) {
        let heading_lines = usize::from(self.heading_drawn);
        gate.erase_lines(self.drawn_lines + heading_lines);
        self.drawn_lines = 0;
        self.heading_drawn = false;
    }

    fn outcome(&self) -> Option<Selection> {
        match self.state {
            SelectionState::Navigating => None,
            SelectionState::Confirmed => {
                Some(Selection::Confirmed(self.get_selected_item().to_string()))
            }
            SelectionState::Cancelled => Some(Selection::Cancelled),
        }
    }

    /// Run the menu until the user confirms or cancels.
    ///
    /// Raw mode is held for the whole loop and restored on every exit path.
    pub fn run<T: Terminal>(mut self, terminal: T) -> Result<Selection, SelectError> {
        let mut guard = RawModeGuard::enter(terminal)
            .map_err(|source| SelectError::terminal("entering raw mode", source))?;

        let outcome = self.drive(guard.terminal_mut());
        if outcome.is_err() {
            let mut gate = OutputGate::new();
            gate.push(TerminalCmd::ShowCursor);
            let _ = gate.flush(guard.terminal_mut());
        }

        let restored = guard.restore();
        let selection = outcome?;
        restored.map_err(|source| SelectError::terminal("restoring terminal mode", source))?;

        tracing::debug!(?selection, "selection finished");
        Ok(selection)
    }

    fn drive<T: Terminal>(&mut self, terminal: &mut T) -> Result<Selection, SelectError> {
        let width = usize::from(terminal.columns());
        let mut gate = OutputGate::new();

        gate.push(TerminalCmd::HideCursor);
        if let Some(heading) = self.heading.as_deref() {
            let budget = width.saturating_sub(1);
            let heading = expand_tabs(heading, 0);
            gate.push(TerminalCmd::line(truncate_to_width(&heading, budget, ELLIPSIS)));
            self.heading_drawn = true;
        }
        self.queue_frame(&mut gate, width);
        gate.flush(terminal)
            .map_err(|source| SelectError::terminal("drawing menu", source))?;

        loop {
            let key = read_key(terminal)
                .map_err(|source| SelectError::terminal("reading key", source))?;
            if !self.handle_key(key) {
                continue;
            }

            if let Some(selection) = self.outcome() {
                self.queue_teardown(&mut gate);
                gate.push(TerminalCmd::ShowCursor);
                gate.flush(terminal)
                    .map_err(|source| SelectError::terminal("erasing menu", source))?;
                return Ok(selection);
            }

            self.queue_frame(&mut gate, width);
            gate.flush(terminal)
                .map_err(|source| SelectError::terminal("redrawing menu", source))?;
        }
    }
}

/// Tabs are expanded against the real tab stops first, so the measured width
/// is the width the terminal will draw.
fn render_row(prefix: &str, item: &str, width: usize) -> String {
    let prefix_width = visible_width(prefix);
    let text = expand_tabs(item, prefix_width);
    let truncated = truncate_to_width(&text, row_budget(width, prefix_width), ELLIPSIS);
    format!("{prefix}{truncated}")
}

/// Columns left for the item text; one column is kept free so a full row never auto-wraps.
fn row_budget(width: usize, prefix_width: usize) -> usize {
    width.saturating_sub(prefix_width).saturating_sub(1).max(1)
}
