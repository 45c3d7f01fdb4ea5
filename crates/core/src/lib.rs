//! Core scoring module - pure, deterministic, and testable
//!
//! This module contains the ten-pin rules, the turn cursor, and game lifecycle.
//! It has **zero dependencies** on terminal, networking, or storage code, making it:
//!
//! - **Deterministic**: the same balls always produce the same sheet
//! - **Testable**: every rule is checked from the throw table alone
//! - **Portable**: any host (terminal, HTTP service, UI) can drive it
//!
//! # Module Structure
//!
//! - [`roster`]: validated, ordered list of 1-5 bowlers
//! - [`frame`]: throws of one frame, pin-reset rules, score sheet marks
//! - [`scoring`]: cumulative totals with strike/spare look-ahead
//! - [`game_state`]: turn cursor, throw validation, winners
//! - [`sink`]: reporting accepted throws to an outside collaborator
//! - [`snapshot`]: host-facing copy of the score sheet
//!
//! # Game Rules
//!
//! - **Turn order**: round-robin, each player finishes frame N before frame N + 1 starts
//! - **Frames 1-9**: a strike ends the frame; otherwise two balls totalling at most 10
//! - **Tenth frame**: a strike or spare earns a third ball; cleared decks are reset
//! - **Bonuses**: strike adds the next two balls, spare the next one
//! - **Winner**: highest total once the last player finishes; ties share the win
//!
//! # Example
//!
//! ```
//! use bowling_core::GameState;
//! use bowling_types::{Mark, PlayerId};
//!
//! let mut game = GameState::new(["Alice", "Bob"]).unwrap();
//!
//! game.apply_throw(10).unwrap(); // Alice strikes
//! game.apply_throw(7).unwrap(); // Bob leaves three
//! assert!(game.apply_throw(4).is_err()); // only three standing
//! game.apply_throw(3).unwrap(); // spare
//!
//! let marks = game.frame_display(PlayerId(1), 1).unwrap();
//! assert_eq!(marks.as_slice(), &[Mark::Pins(7), Mark::Spare]);
//! ```

pub mod error;
pub mod frame;
pub mod game_state;
pub mod roster;
pub mod scoring;
pub mod sink;
pub mod snapshot;

pub use bowling_types as types;

// Re-export commonly used types for convenience
pub use error::{RosterError, ScoreError, SinkError, TurnError};
pub use frame::{Frame, FrameMarks};
pub use game_state::{submit_throw, GameState, Outcome, ThrowOutcome};
pub use roster::Roster;
pub use scoring::{cumulative_total, frame_totals, resolved_frame_score};
pub use sink::{GameRecord, ScoreKeeper, ScoreSink, ThrowRecord};
pub use snapshot::{PlayerRow, Scoreboard};
