//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (scoring engine, terminal rendering, sink records).
//!
//! # Lane Rules
//!
//! Standard ten-pin dimensions:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MAX_PINS` | 10 | Pins in a full rack |
//! | `FRAME_COUNT` | 10 | Frames per player per game |
//! | `LAST_FRAME_INDEX` | 9 | 0-based index of the tenth frame |
//! | `MAX_THROWS_PER_FRAME` | 3 | Only reachable in the tenth frame |
//! | `MAX_PLAYERS` | 5 | Largest roster a game accepts |
//! | `PERFECT_GAME` | 300 | Twelve consecutive strikes |
//!
//! # Examples
//!
//! ```
//! use bowling_types::{Mark, PlayerId, Rack, Turn, FRAME_COUNT, MAX_PINS};
//!
//! // A strike is written as X on a score sheet
//! assert_eq!(Mark::from_char('x'), Some(Mark::Strike));
//! assert_eq!(Mark::Strike.as_char(), 'X');
//!
//! // Six down leaves four; clearing them is a spare
//! let rack = Rack::FULL.after(6);
//! assert_eq!(rack.standing, 4);
//! assert_eq!(rack.mark_for(4), Mark::Spare);
//!
//! // Turns carry a 0-based frame index but report 1-based frame numbers
//! let turn = Turn::new(PlayerId(1), 9, 2);
//! assert_eq!(turn.frame_number(), 10);
//! assert!(turn.is_last_frame());
//!
//! assert_eq!(FRAME_COUNT, 10);
//! assert_eq!(MAX_PINS, 10);
//! ```

use std::fmt;

/// Pins standing in a fresh rack
pub const MAX_PINS: u8 = 10;

/// Frames per player per game
pub const FRAME_COUNT: usize = 10;

/// 0-based index of the tenth frame
pub const LAST_FRAME_INDEX: usize = FRAME_COUNT - 1;

/// Throws a frame may hold (only the tenth frame reaches three)
pub const MAX_THROWS_PER_FRAME: usize = 3;

/// Largest roster a game accepts
pub const MAX_PLAYERS: usize = 5;

/// Score of twelve consecutive strikes
pub const PERFECT_GAME: u16 = 300;


/// Position of a player in the roster (0-based)
///
/// Ids are assigned in roster order when a game is created and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shown 1-based, the way score sheets number bowlers.
        write!(f, "{}", self.0 as u16 + 1)
    }
}

/// Turn cursor: whose throw is expected, in which frame, and which ball
///
/// - `frame_index` is 0-based (0..=9)
/// - `throw_index` is 0-based (0..=2, 2 only in the tenth frame)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Turn {
    pub player: PlayerId,
    pub frame_index: u8,
    pub throw_index: u8,
}

impl Turn {
    pub fn new(player: PlayerId, frame_index: u8, throw_index: u8) -> Self {
        Self {
            player,
            frame_index,
            throw_index,
        }
    }

    /// 1-based frame number (1..=10)
    pub fn frame_number(&self) -> u8 {
        self.frame_index.saturating_add(1)
    }

    pub fn is_last_frame(&self) -> bool {
        self.frame_index as usize == LAST_FRAME_INDEX
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "player {}, frame {}, throw {}",
            self.player,
            self.frame_number(),
            self.throw_index + 1
        )
    }
}

/// Score sheet mark for a single throw slot
///
/// - **Strike**: cleared a fresh rack (`X`)
/// - **Spare**: cleared the pins left by the previous ball (`/`)
/// - **Pins**: open count (`0`-`9`)
/// - **Skip**: placeholder after a strike in frames 1-9 (`-`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Strike,
    Spare,
    Pins(u8),
    Skip,
}

impl Mark {
    /// Parse a score sheet character (case-insensitive)
    ///
    /// `-` parses as [`Mark::Skip`]; callers entering a throw treat it as a gutter ball.
    ///
    /// # Examples
    ///
    /// ```
    /// use bowling_types::Mark;
    ///
    /// assert_eq!(Mark::from_char('X'), Some(Mark::Strike));
    /// assert_eq!(Mark::from_char('/'), Some(Mark::Spare));
    /// assert_eq!(Mark::from_char('7'), Some(Mark::Pins(7)));
    /// assert_eq!(Mark::from_char('-'), Some(Mark::Skip));
    /// assert_eq!(Mark::from_char('q'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'x' | 'X' => Some(Mark::Strike),
            '/' => Some(Mark::Spare),
            '-' => Some(Mark::Skip),
            d => d.to_digit(10).map(|n| Mark::Pins(n as u8)),
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Mark::Strike => 'X',
            Mark::Spare => '/',
            Mark::Skip => '-',
            Mark::Pins(n) => char::from_digit(*n as u32, 10).unwrap_or('?'),
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Pins standing for the next ball
///
/// `fresh` is true when the rack was just set (first ball of a frame, or after the
/// tenth frame resets a cleared deck). Knocking down a fresh rack is a strike;
/// clearing a partial one is a spare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rack {
    pub standing: u8,
    pub fresh: bool,
}

impl Rack {
    pub const FULL: Rack = Rack {
        standing: MAX_PINS,
        fresh: true,
    };

    /// Rack left after a ball knocks down `pins`; a cleared deck is reset.
    pub fn after(self, pins: u8) -> Rack {
        match self.standing.saturating_sub(pins) {
            0 => Rack::FULL,
            standing => Rack {
                standing,
                fresh: false,
            },
        }
    }

    /// Mark a ball knocking down `pins` from this rack earns.
    pub fn mark_for(self, pins: u8) -> Mark {
        if pins == self.standing {
            if self.fresh {
                Mark::Strike
            } else {
                Mark::Spare
            }
        } else {
            Mark::Pins(pins)
        }
    }
}

/// Running total shown under a frame
///
/// - **Resolved**: cumulative score through this frame, bonuses included
/// - **Pending**: frame is in progress, or complete but still waiting on bonus throws
/// - **Unplayed**: no throws recorded in the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameTotal {
    Resolved(u16),
    Pending,
    Unplayed,
}

impl FrameTotal {
    pub fn value(&self) -> Option<u16> {
        match self {
            FrameTotal::Resolved(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FrameTotal::Pending)
    }
}
