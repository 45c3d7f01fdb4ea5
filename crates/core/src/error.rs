//! Error types for the scoring engine.
//!
//! Rejected throws leave the game untouched; the caller re-prompts for a legal value.

use thiserror::Error;

use crate::types::{PlayerId, Turn};

/// Why a proposed throw was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// Pins outside 0..=10, or more pins than are standing in the current slot.
    #[error("invalid score: {pins} pins knocked down with {standing} standing")]
    InvalidScore { pins: u8, standing: u8 },
    #[error("illegal turn state: {0}")]
    IllegalTurnState(#[from] TurnError),
    #[error(transparent)]
    Roster(#[from] RosterError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("the game is already over")]
    GameOver,
    #[error("expected a throw for {expected}, got {requested}")]
    Mismatch { expected: Turn, requested: Turn },
    #[error("throw index {0} is out of range")]
    ThrowIndexOutOfRange(u8),
    #[error("frame number {0} is out of range")]
    FrameOutOfRange(u8),
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
}

/// Roster validation failures, raised before a game starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("a game needs at least one player")]
    Empty,
    #[error("a game allows at most {max} players, got {count}")]
    TooManyPlayers { count: usize, max: usize },
    #[error("player {position} has an empty name")]
    EmptyName { position: usize },
    #[error("player name {0:?} is used more than once")]
    DuplicateName(String),
}

/// Reporting failures from a score sink.
///
/// Never fatal: the throw that triggered the report stays accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("score sink is disconnected")]
    Disconnected,
    #[error("score sink queue is full")]
    QueueFull,
    #[error("score sink I/O failed: {0}")]
    Io(String),
    #[error("score sink timed out after {0} ms")]
    Timeout(u64),
    #[error("score record could not be encoded: {0}")]
    Encode(String),
}
