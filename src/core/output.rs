//! Typed terminal output commands and a single output gate.
//!
//! Invariant: all selector writes flow through `OutputGate::flush(..)`.

use std::io;

use crate::core::terminal::Terminal;

/// Move the cursor to the start of the previous line.
pub const CURSOR_PREV_LINE: &str = "\x1b[F";
/// Erase from the cursor to the end of the line.
pub const ERASE_TO_EOL: &str = "\x1b[K";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCmd {
    /// One full row of text, terminated so the cursor lands on column 0 of the next row.
    Line(String),
    /// Move up one row and clear it.
    EraseLineAbove,

    /// Cursor visibility.
    HideCursor,
    ShowCursor,
}

impl TerminalCmd {
    pub fn line(text: impl Into<String>) -> Self {
        Self::Line(text.into())
    }
}

#[derive(Debug, Default)]
pub struct OutputGate {
    cmds: Vec<TerminalCmd>,
}

impl OutputGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: TerminalCmd) {
        self.cmds.push(cmd);
    }

    pub fn extend<I>(&mut self, cmds: I)
    where
        I: IntoIterator<Item = TerminalCmd>,
    {
        self.cmds.extend(cmds);
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Queue `count` erase-previous-line commands.
    pub fn erase_lines(&mut self, count: usize) {
        self.cmds
            .extend((0..count).map(|_| TerminalCmd::EraseLineAbove));
    }

    /// Encode the buffered commands without writing them.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for cmd in &self.cmds {
            encode_cmd(cmd, &mut out);
        }
        out
    }

    /// Flush buffered commands to the terminal as a single write.
    ///
    /// This is the single write gate: `Terminal::write(..)` must not be called
    /// from anywhere else in the selector.
    pub fn flush<T: Terminal>(&mut self, term: &mut T) -> io::Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        let data = self.encode();
        self.cmds.clear();
        term.write(&data)
    }
}

fn encode_cmd(cmd: &TerminalCmd, out: &mut String) {
    match cmd {
        // Raw mode disables output post-processing, so `\n` alone would not return the carriage.
        TerminalCmd::Line(text) => {
            out.push_str(text);
            out.push_str("\r\n");
        }
        TerminalCmd::EraseLineAbove => {
            out.push_str(CURSOR_PREV_LINE);
            out.push_str(ERASE_TO_EOL);
        }
        TerminalCmd::HideCursor => out.push_str("\x1b[?25l"),
        TerminalCmd::ShowCursor => out.push_str("\x1b[?25h"),
    }
}
