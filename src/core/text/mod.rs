//! Text helpers (width calculations, truncation).
//!
//! These helpers are pure (string in/string out) so the selector can size rows without touching
//! the terminal.

pub mod utils;
pub mod width;
