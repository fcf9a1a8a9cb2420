//! Raw byte stream to logical key decoding.
//!
//! Plain keys are exactly one byte. `ESC` always starts a three byte sequence:
//! the decoder swallows the next two bytes before resolving, whatever they are.

use std::io;

use crate::core::terminal::Terminal;

const ESC: u8 = 0x1b;
const ETX: u8 = 0x03;
const CSI_BRACKET: u8 = b'[';

/// Length of every escape-prefixed key, `ESC` included.
pub const ESCAPE_SEQUENCE_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    /// Ctrl-C. Raw mode delivers it as a byte instead of raising SIGINT.
    Cancel,
    /// Any other byte, or a completed escape sequence that is not an arrow key.
    Ignored,
}

impl Key {
    /// Decode a complete escape sequence.
    fn from_escape(sequence: [u8; ESCAPE_SEQUENCE_LEN]) -> Self {
        match sequence {
            [ESC, CSI_BRACKET, b'A'] => Self::Up,
            [ESC, CSI_BRACKET, b'B'] => Self::Down,
            _ => Self::Ignored,
        }
    }

    fn from_plain(byte: u8) -> Self {
        match byte {
            b'\n' | b'\r' => Self::Enter,
            ETX => Self::Cancel,
            _ => Self::Ignored,
        }
    }
}

/// Incremental decoder: feed one byte at a time, get a key once it is complete.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    pending: [u8; ESCAPE_SEQUENCE_LEN],
    pending_len: usize,
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte. Returns `None` while an escape sequence is still incomplete.
    pub fn feed(&mut self, byte: u8) -> Option<Key> {
        if self.pending_len == 0 {
            if byte == ESC {
                self.pending[0] = byte;
                self.pending_len = 1;
                return None;
            }
            return Some(Key::from_plain(byte));
        }

        self.pending[self.pending_len] = byte;
        self.pending_len += 1;
        if self.pending_len < ESCAPE_SEQUENCE_LEN {
            return None;
        }

        self.pending_len = 0;
        Some(Key::from_escape(self.pending))
    }

    /// Whether an escape sequence has been started but not finished.
    pub fn is_pending(&self) -> bool {
        self.pending_len > 0
    }

    /// Bytes of the unfinished escape sequence.
    pub fn pending(&self) -> &[u8] {
        &self.pending[..self.pending_len]
    }
}

/// Block until one complete key has been read.
///
/// Consumes exactly one byte for a plain key and exactly three for an
/// escape-prefixed key; never returns mid-sequence.
pub fn read_key<T: Terminal + ?Sized>(terminal: &mut T) -> io::Result<Key> {
    let mut decoder = KeyDecoder::new();
    loop {
        let byte = terminal.read_byte().inspect_err(|err| {
            if decoder.is_pending() {
                tracing::debug!(pending = ?decoder.pending(), error = %err, "input failed inside an escape sequence");
            }
        })?;
        if let Some(key) = decoder.feed(byte) {
            return Ok(key);
        }
    }
}

/// Decode a whole byte buffer. A trailing incomplete escape sequence is dropped.
pub fn decode_keys(bytes: &[u8]) -> Vec<Key> {
    let mut decoder = KeyDecoder::new();
    bytes.iter().filter_map(|&byte| decoder.feed(byte)).collect()
}
