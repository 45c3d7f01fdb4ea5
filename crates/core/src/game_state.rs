//! Game state module - turn cursor, throw validation and game lifecycle
//!
//! A `GameState` is created from a validated roster and only ever changes through
//! [`GameState::apply_throw`]. Play is round-robin: every player bowls frame N before
//! anyone starts frame N + 1. The game becomes terminal when the last player completes
//! the tenth frame; the winners are computed at that point and never change again.

use std::array;
use std::slice;

use crate::error::{RosterError, ScoreError, TurnError};
use crate::frame::{Frame, FrameMarks};
use crate::roster::Roster;
use crate::scoring;
use crate::types::*;

/// How a finished game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Winner { player: PlayerId, score: u16 },
    Tie { players: Vec<PlayerId>, score: u16 },
}

impl Outcome {
    pub fn winners(&self) -> &[PlayerId] {
        match self {
            Outcome::Winner { player, .. } => slice::from_ref(player),
            Outcome::Tie { players, .. } => players,
        }
    }

    pub fn score(&self) -> u16 {
        match self {
            Outcome::Winner { score, .. } | Outcome::Tie { score, .. } => *score,
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, Outcome::Tie { .. })
    }
}

/// What an accepted throw did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrowOutcome {
    /// The turn the throw was bowled on.
    pub turn: Turn,
    pub pins: u8,
    pub mark: Mark,
    pub frame_complete: bool,
    /// Cursor after the throw; `None` once the game is over.
    pub next: Option<Turn>,
}

impl ThrowOutcome {
    pub fn game_over(&self) -> bool {
        self.next.is_none()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    roster: Roster,
    frames: Vec<[Frame; FRAME_COUNT]>,
    turn: Turn,
    throws_accepted: u32,
    outcome: Option<Outcome>,
}

impl GameState {
    /// Create a new game with the given player names, in turn order
    pub fn new<I, S>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::with_roster(Roster::new(names)?))
    }

    pub fn with_roster(roster: Roster) -> Self {
        let frames = roster
            .ids()
            .map(|_| array::from_fn(|i| Frame::new(i == LAST_FRAME_INDEX)))
            .collect();

        Self {
            roster,
            frames,
            turn: Turn::new(PlayerId(0), 0, 0),
            throws_accepted: 0,
            outcome: None,
        }
    }

    /// Rebuild a game from its balls in the order they were bowled.
    ///
    /// Stops at the first illegal ball and returns its error.
    pub fn replay<I, S>(names: I, balls: &[u8]) -> Result<Self, ScoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = Self::new(names)?;
        for &pins in balls {
            state.apply_throw(pins)?;
        }
        Ok(state)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn player_count(&self) -> usize {
        self.roster.len()
    }

    /// Whose throw is expected next; `None` once the game is over.
    pub fn current_turn(&self) -> Option<Turn> {
        if self.is_terminal() {
            None
        } else {
            Some(self.turn)
        }
    }

    /// Rack the next throw is bowled at; `None` once the game is over.
    pub fn rack(&self) -> Option<Rack> {
        self.current_turn().map(|t| self.cursor_frame(t).rack())
    }

    /// Most pins the next throw may knock down; `None` once the game is over.
    pub fn pins_standing(&self) -> Option<u8> {
        self.rack().map(|r| r.standing)
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Winning players; empty until the game is over.
    pub fn winners(&self) -> &[PlayerId] {
        self.outcome.as_ref().map(Outcome::winners).unwrap_or(&[])
    }

    pub fn throws_accepted(&self) -> u32 {
        self.throws_accepted
    }

    pub fn frames(&self, player: PlayerId) -> Option<&[Frame; FRAME_COUNT]> {
        self.frames.get(player.index())
    }

    /// Frame by 1-based frame number.
    pub fn frame(&self, player: PlayerId, frame_number: u8) -> Option<&Frame> {
        let index = (frame_number as usize).checked_sub(1)?;
        self.frames(player)?.get(index)
    }

    /// Score sheet marks for one frame (1-based frame number).
    pub fn frame_display(&self, player: PlayerId, frame_number: u8) -> Option<FrameMarks> {
        self.frame(player, frame_number).map(Frame::marks)
    }

    pub fn frame_totals(&self, player: PlayerId) -> Option<[FrameTotal; FRAME_COUNT]> {
        self.frames(player).map(|f| scoring::frame_totals(f))
    }

    /// Total through the player's latest fully resolved frame.
    pub fn cumulative_total(&self, player: PlayerId) -> Option<u16> {
        self.frames(player).map(|f| scoring::cumulative_total(f))
    }

    /// Check `pins` against the cursor without changing anything.
    pub fn validate_throw(&self, pins: u8) -> Result<(), ScoreError> {
        let turn = self.current_turn().ok_or(TurnError::GameOver)?;
        self.cursor_frame(turn).check(pins)
    }

    /// Record the next throw at the cursor and advance.
    ///
    /// On error the state is left exactly as it was.
    pub fn apply_throw(&mut self, pins: u8) -> Result<ThrowOutcome, ScoreError> {
        self.validate_throw(pins)?;

        let turn = self.turn;
        let frame = &mut self.frames[turn.player.index()][turn.frame_index as usize];
        let mark = frame.rack().mark_for(pins);
        frame.push(pins)?;
        let frame_complete = frame.is_complete();

        self.throws_accepted += 1;
        log::debug!("{}: {} pins ({})", turn, pins, mark);

        if frame_complete {
            self.advance_player();
        } else {
            self.turn.throw_index += 1;
        }

        Ok(ThrowOutcome {
            turn,
            pins,
            mark,
            frame_complete,
            next: self.current_turn(),
        })
    }

    /// Like [`apply_throw`](Self::apply_throw), but only if `turn` is the turn the
    /// game is waiting for.
    pub fn apply_throw_at(&mut self, turn: Turn, pins: u8) -> Result<ThrowOutcome, ScoreError> {
        if turn.throw_index as usize >= MAX_THROWS_PER_FRAME {
            return Err(TurnError::ThrowIndexOutOfRange(turn.throw_index).into());
        }
        if turn.frame_index as usize >= FRAME_COUNT {
            return Err(TurnError::FrameOutOfRange(turn.frame_index.saturating_add(1)).into());
        }
        if !self.roster.contains(turn.player) {
            return Err(TurnError::UnknownPlayer(turn.player).into());
        }

        let expected = self.current_turn().ok_or(TurnError::GameOver)?;
        if expected != turn {
            return Err(TurnError::Mismatch {
                expected,
                requested: turn,
            }
            .into());
        }
        self.apply_throw(pins)
    }

    fn cursor_frame(&self, turn: Turn) -> &Frame {
        &self.frames[turn.player.index()][turn.frame_index as usize]
    }

    fn advance_player(&mut self) {
        let next_player = self.turn.player.index() + 1;
        if next_player < self.roster.len() {
            self.turn = Turn::new(PlayerId(next_player as u8), self.turn.frame_index, 0);
            return;
        }

        if (self.turn.frame_index as usize) < LAST_FRAME_INDEX {
            self.turn = Turn::new(PlayerId(0), self.turn.frame_index + 1, 0);
            return;
        }

        self.finish();
    }

    fn finish(&mut self) {
        let totals: Vec<u16> = self
            .frames
            .iter()
            .map(|f| scoring::cumulative_total(f))
            .collect();
        let best = totals.iter().copied().max().unwrap_or(0);
        let leaders: Vec<PlayerId> = self
            .roster
            .ids()
            .zip(&totals)
            .filter(|(_, t)| **t == best)
            .map(|(id, _)| id)
            .collect();

        let outcome = match leaders.as_slice() {
            [player] => Outcome::Winner {
                player: *player,
                score: best,
            },
            _ => Outcome::Tie {
                players: leaders,
                score: best,
            },
        };

        log::info!(
            "game over after {} throws: {:?} with {}",
            self.throws_accepted,
            outcome
                .winners()
                .iter()
                .filter_map(|&p| self.roster.name(p))
                .collect::<Vec<_>>(),
            best
        );
        self.outcome = Some(outcome);
    }
}

/// Functional form of [`GameState::apply_throw`]: returns the next state and leaves
/// `state` untouched.
pub fn submit_throw(state: &GameState, pins: u8) -> Result<GameState, ScoreError> {
    let mut next = state.clone();
    next.apply_throw(pins)?;
    Ok(next)
}
