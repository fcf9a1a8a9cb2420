//! Raw-mode terminal primitives and an inline arrow-key selector.
//!
//! Invariant: the selector writes to the terminal only through
//! `core::output::OutputGate::flush(..)`, and raw mode is only ever held by a
//! [`RawModeGuard`].
//!
//! # Public API Overview
//! - [`SelectList`] renders a list of strings and returns the chosen one as a [`Selection`].
//! - [`Terminal`] abstracts the tty; [`ProcessTerminal`] is the termios-backed implementation.
//! - [`KeyDecoder`] and [`read_key`] turn the raw byte stream into [`Key`] events.

pub mod core;
#[cfg(unix)]
pub mod platform;
pub mod widgets;

/// Key decoding.
pub use crate::core::input::{decode_keys, read_key, Key, KeyDecoder};

/// Terminal interfaces and process-backed implementation.
pub use crate::core::output::{OutputGate, TerminalCmd};
pub use crate::core::terminal::{RawModeGuard, Terminal};
#[cfg(unix)]
pub use crate::platform::process_terminal::{
    install_signal_handlers, ProcessTerminal, SignalHookGuard, TermiosSnapshot,
};

/// Built-in widgets.
pub use crate::widgets::{SelectError, SelectList, Selection, SelectionState};

/// Width helpers used to keep each menu row on a single terminal line.
pub use crate::core::text::utils::truncate_to_width;
pub use crate::core::text::width::visible_width;
