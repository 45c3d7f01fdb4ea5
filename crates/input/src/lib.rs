//! Score entry module (engine-facing).
//!
//! Turns what a scorekeeper types into pin counts the engine can check. Entries use
//! score sheet notation (`0`-`9`, `10`, `X`, `/`, `-`) and are resolved against the
//! rack the ball is bowled at, so `/` always means "the rest of the pins".
//! [`map`] maps `crossterm` key events onto the same entries.

pub mod entry;
pub mod map;

pub use bowling_types as types;

pub use entry::{parse_entry, Entry, InputError};
pub use map::{handle_key_event, should_quit, KeyCommand};
