#![allow(unused_imports)]

use redrec_tui::{
    decode_keys, install_signal_handlers, read_key, truncate_to_width, visible_width, Key,
    KeyDecoder, OutputGate, ProcessTerminal, RawModeGuard, SelectError, SelectList,
    Selection, SelectionState, SignalHookGuard, Terminal, TerminalCmd,
    TermiosSnapshot,
};

#[test]
fn public_api_exports_compile() {}
