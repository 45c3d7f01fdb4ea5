//! Score sheet entries and how they resolve to pin counts.

use thiserror::Error;

use crate::types::{Mark, Rack, MAX_PINS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("nothing entered")]
    Empty,
    #[error("unrecognised entry {0:?}; use 0-10, X, / or -")]
    Unrecognised(String),
    #[error("a strike needs a full rack ({0} pins standing)")]
    StrikeUnavailable(u8),
    #[error("a spare needs a first ball in the frame")]
    SpareUnavailable,
}

/// One ball as the scorekeeper wrote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entry {
    Pins(u8),
    Strike,
    Spare,
    Gutter,
}

impl Entry {
    /// Pins this entry knocks down at `rack`.
    ///
    /// Plain counts are passed through unchecked; the engine decides whether they fit.
    pub fn resolve(self, rack: Rack) -> Result<u8, InputError> {
        match self {
            Entry::Pins(n) => Ok(n),
            Entry::Gutter => Ok(0),
            Entry::Strike if rack.fresh => Ok(rack.standing),
            Entry::Strike => Err(InputError::StrikeUnavailable(rack.standing)),
            Entry::Spare if rack.fresh => Err(InputError::SpareUnavailable),
            Entry::Spare => Ok(rack.standing),
        }
    }
}

impl From<Mark> for Entry {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::Strike => Entry::Strike,
            Mark::Spare => Entry::Spare,
            Mark::Skip | Mark::Pins(0) => Entry::Gutter,
            Mark::Pins(n) => Entry::Pins(n),
        }
    }
}

/// Parse a typed entry (case-insensitive, surrounding whitespace ignored).
///
/// # Examples
///
/// ```
/// use bowling_input::{parse_entry, Entry};
///
/// assert_eq!(parse_entry("7"), Ok(Entry::Pins(7)));
/// assert_eq!(parse_entry(" 10 "), Ok(Entry::Pins(10)));
/// assert_eq!(parse_entry("x"), Ok(Entry::Strike));
/// assert_eq!(parse_entry("/"), Ok(Entry::Spare));
/// assert!(parse_entry("11").is_err());
/// ```
pub fn parse_entry(s: &str) -> Result<Entry, InputError> {
    let s = s.trim();
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return Err(InputError::Empty);
    };

    if chars.next().is_none() {
        return Mark::from_char(first)
            .map(Entry::from)
            .ok_or_else(|| InputError::Unrecognised(s.to_string()));
    }

    match s.parse::<u8>() {
        Ok(n) if n <= MAX_PINS => Ok(Entry::Pins(n)),
        _ => Err(InputError::Unrecognised(s.to_string())),
    }
}
