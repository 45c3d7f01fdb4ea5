//! Score sink module - reporting accepted throws to an outside collaborator
//!
//! The engine never waits on a sink. [`ScoreKeeper`] applies the throw first, then
//! hands the sink a [`ThrowRecord`]; a failed report is logged and counted, never
//! undone and never returned to the caller. Each throw is reported at most once.

use crate::error::{ScoreError, SinkError};
use crate::game_state::{GameState, ThrowOutcome};
use crate::scoring::resolved_frame_score;
use crate::types::{FrameTotal, PlayerId, FRAME_COUNT, MAX_THROWS_PER_FRAME};

/// Everything needed to persist one accepted throw.
///
/// `rolls` mirrors a per-frame storage row: the frame's balls so far, `None` for
/// balls not (yet) bowled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrowRecord {
    pub player: PlayerId,
    pub player_name: String,
    /// 1-based (1..=10)
    pub frame_number: u8,
    /// 0-based (0..=2)
    pub throw_index: u8,
    pub pins: u8,
    pub rolls: [Option<u8>; MAX_THROWS_PER_FRAME],
    /// Frame score with bonuses once resolved, otherwise the pins bowled so far.
    pub frame_score: u16,
    /// Player total through their latest resolved frame.
    pub cumulative_total: u16,
    /// Running total under every frame of the player's game, as of this throw.
    ///
    /// Earlier strike and spare frames resolve here once their bonus balls land.
    pub frame_totals: [FrameTotal; FRAME_COUNT],
}

impl ThrowRecord {
    /// Whether this throw's frame still waits on bonus balls (or more balls of its own).
    pub fn is_pending(&self) -> bool {
        self.frame_totals
            .get(self.frame_number.saturating_sub(1) as usize)
            .map_or(true, |t| t.value().is_none())
    }
}

impl ThrowRecord {
    /// Build the record for a throw `state` has just accepted.
    pub fn from_state(state: &GameState, outcome: &ThrowOutcome) -> Self {
        let turn = outcome.turn;
        let frame = state.frame(turn.player, turn.frame_number());
        let frame_totals = state
            .frame_totals(turn.player)
            .unwrap_or([FrameTotal::Unplayed; FRAME_COUNT]);

        let mut rolls = [None; MAX_THROWS_PER_FRAME];
        if let Some(frame) = frame {
            for (slot, &pins) in rolls.iter_mut().zip(frame.throws()) {
                *slot = Some(pins);
            }
        }

        Self {
            player: turn.player,
            player_name: state
                .roster()
                .name(turn.player)
                .unwrap_or_default()
                .to_string(),
            frame_number: turn.frame_number(),
            throw_index: turn.throw_index,
            pins: outcome.pins,
            rolls,
            frame_score: resolved_frame_score(&frame_totals, turn.frame_index as usize)
                .or_else(|| frame.map(|f| f.pins()))
                .unwrap_or(0),
            cumulative_total: state.cumulative_total(turn.player).unwrap_or(0),
            frame_totals,
        }
    }
}

/// Final result, reported once when a game ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub winners: Vec<PlayerId>,
    /// Final totals in roster order.
    pub totals: Vec<u16>,
    pub throws: u32,
}

impl GameRecord {
    pub fn from_state(state: &GameState) -> Option<Self> {
        let outcome = state.outcome()?;
        Some(Self {
            winners: outcome.winners().to_vec(),
            totals: state
                .roster()
                .ids()
                .map(|p| state.cumulative_total(p).unwrap_or(0))
                .collect(),
            throws: state.throws_accepted(),
        })
    }
}

/// Receiver of accepted throws.
///
/// Implementations must return promptly: an `Err` here means the record could not
/// even be handed off (queue closed or full). Failures that happen later, such as a
/// network write timing out, are the implementation's to log and report.
pub trait ScoreSink {
    fn notify_throw(&self, record: &ThrowRecord) -> Result<(), SinkError>;

    fn notify_game_over(&self, record: &GameRecord) -> Result<(), SinkError> {
        let _ = record;
        Ok(())
    }
}

impl<S: ScoreSink + ?Sized> ScoreSink for Box<S> {
    fn notify_throw(&self, record: &ThrowRecord) -> Result<(), SinkError> {
        (**self).notify_throw(record)
    }

    fn notify_game_over(&self, record: &GameRecord) -> Result<(), SinkError> {
        (**self).notify_game_over(record)
    }
}

/// Game state plus an optional sink that hears about every accepted throw.
pub struct ScoreKeeper {
    state: GameState,
    sink: Option<Box<dyn ScoreSink + Send>>,
    sink_failures: u32,
    last_sink_error: Option<SinkError>,
}

impl ScoreKeeper {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            sink: None,
            sink_failures: 0,
            last_sink_error: None,
        }
    }

    pub fn with_sink<S: ScoreSink + Send + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Swap in another game, keeping the sink. Returns the previous game.
    pub fn replace_state(&mut self, state: GameState) -> GameState {
        std::mem::replace(&mut self.state, state)
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Number of reports the sink refused so far.
    pub fn sink_failures(&self) -> u32 {
        self.sink_failures
    }

    pub fn last_sink_error(&self) -> Option<&SinkError> {
        self.last_sink_error.as_ref()
    }

    /// Apply a throw, then report it. Sink errors never reach the caller.
    pub fn submit_throw(&mut self, pins: u8) -> Result<ThrowOutcome, ScoreError> {
        let outcome = self.state.apply_throw(pins)?;
        self.report(&outcome);
        Ok(outcome)
    }

    fn report(&mut self, outcome: &ThrowOutcome) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };

        let record = ThrowRecord::from_state(&self.state, outcome);
        let mut result = sink.notify_throw(&record);

        if outcome.game_over() {
            if let Some(game) = GameRecord::from_state(&self.state) {
                result = result.and(sink.notify_game_over(&game));
            }
        }

        if let Err(e) = result {
            log::warn!("score sink failed for {}: {}", outcome.turn, e);
            self.sink_failures += 1;
            self.last_sink_error = Some(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingSink {
        throws: Arc<Mutex<Vec<ThrowRecord>>>,
        games: Arc<Mutex<Vec<GameRecord>>>,
    }

    impl ScoreSink for RecordingSink {
        fn notify_throw(&self, record: &ThrowRecord) -> Result<(), SinkError> {
            self.throws.lock().unwrap().push(record.clone());
            Ok(())
        }

        fn notify_game_over(&self, record: &GameRecord) -> Result<(), SinkError> {
            self.games.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct BrokenSink;

    impl ScoreSink for BrokenSink {
        fn notify_throw(&self, _record: &ThrowRecord) -> Result<(), SinkError> {
            Err(SinkError::Disconnected)
        }
    }

    #[test]
    fn test_records_carry_throw_context() {
        let sink = RecordingSink::default();
        let mut keeper =
            ScoreKeeper::new(GameState::new(["Alice"]).unwrap()).with_sink(sink.clone());

        keeper.submit_throw(7).unwrap();
        keeper.submit_throw(3).unwrap();
        keeper.submit_throw(5).unwrap();

        let throws = sink.throws.lock().unwrap();
        assert_eq!(throws.len(), 3);

        assert_eq!(throws[1].frame_number, 1);
        assert_eq!(throws[1].throw_index, 1);
        assert_eq!(throws[1].rolls, [Some(7), Some(3), None]);
        assert_eq!(throws[1].frame_score, 10);
        // Spare not resolved yet.
        assert_eq!(throws[1].cumulative_total, 0);
        assert!(throws[1].is_pending());
        assert_eq!(throws[1].frame_totals[0], FrameTotal::Pending);

        assert_eq!(throws[2].player_name, "Alice");
        assert_eq!(throws[2].frame_number, 2);
        assert_eq!(throws[2].throw_index, 0);
        assert_eq!(throws[2].frame_score, 5);
        assert_eq!(throws[2].cumulative_total, 15);
        assert_eq!(throws[2].frame_totals[0], FrameTotal::Resolved(15));
        assert!(throws[2].is_pending());
    }

    #[test]
    fn test_strike_resolves_in_later_record() {
        let sink = RecordingSink::default();
        let mut keeper =
            ScoreKeeper::new(GameState::new(["Alice"]).unwrap()).with_sink(sink.clone());

        for pins in [10, 3, 4] {
            keeper.submit_throw(pins).unwrap();
        }

        let throws = sink.throws.lock().unwrap();
        assert!(throws[0].is_pending());
        assert_eq!(throws[0].frame_score, 10);

        let last = &throws[2];
        assert!(!last.is_pending());
        assert_eq!(last.frame_score, 7);
        assert_eq!(last.cumulative_total, 24);
        assert_eq!(
            &last.frame_totals[..3],
            &[
                FrameTotal::Resolved(17),
                FrameTotal::Resolved(24),
                FrameTotal::Unplayed
            ]
        );
    }

    #[test]
    fn test_rejected_throw_is_not_reported() {
        let sink = RecordingSink::default();
        let mut keeper =
            ScoreKeeper::new(GameState::new(["Alice"]).unwrap()).with_sink(sink.clone());

        keeper.submit_throw(6).unwrap();
        assert!(keeper.submit_throw(5).is_err());
        assert_eq!(sink.throws.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_game_over_reported_once() {
        let sink = RecordingSink::default();
        let mut keeper =
            ScoreKeeper::new(GameState::new(["Alice"]).unwrap()).with_sink(sink.clone());

        for _ in 0..12 {
            keeper.submit_throw(10).unwrap();
        }

        let games = sink.games.lock().unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].winners, vec![PlayerId(0)]);
        assert_eq!(games[0].totals, vec![300]);
        assert_eq!(games[0].throws, 12);
    }

    #[test]
    fn test_sink_failure_does_not_block_play() {
        let mut keeper = ScoreKeeper::new(GameState::new(["Alice"]).unwrap()).with_sink(BrokenSink);

        let outcome = keeper.submit_throw(10).unwrap();
        assert!(outcome.frame_complete);
        assert_eq!(keeper.state().throws_accepted(), 1);
        assert_eq!(keeper.sink_failures(), 1);
        assert_eq!(keeper.last_sink_error(), Some(&SinkError::Disconnected));
    }

    #[test]
    fn test_replace_state_keeps_sink() {
        let sink = RecordingSink::default();
        let mut keeper =
            ScoreKeeper::new(GameState::new(["Alice"]).unwrap()).with_sink(sink.clone());
        keeper.submit_throw(3).unwrap();

        let old = keeper.replace_state(GameState::new(["Alice"]).unwrap());
        assert_eq!(old.throws_accepted(), 1);
        assert_eq!(keeper.state().throws_accepted(), 0);

        keeper.submit_throw(9).unwrap();
        assert!(keeper.has_sink());
        let throws = sink.throws.lock().unwrap();
        assert_eq!(throws.len(), 2);
        assert_eq!(throws[1].rolls, [Some(9), None, None]);
    }

    #[test]
    fn test_keeper_without_sink() {
        let mut keeper = ScoreKeeper::new(GameState::new(["Alice"]).unwrap());
        assert!(!keeper.has_sink());
        keeper.submit_throw(4).unwrap();
        assert_eq!(keeper.sink_failures(), 0);
    }
}
