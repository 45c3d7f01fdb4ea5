use crate::frame::FrameMarks;
use crate::game_state::GameState;
use crate::types::{FrameTotal, PlayerId, Rack, Turn, FRAME_COUNT};

/// One row of the score sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRow {
    pub id: PlayerId,
    pub name: String,
    pub marks: [FrameMarks; FRAME_COUNT],
    pub totals: [FrameTotal; FRAME_COUNT],
    pub total: u16,
}

/// Host-facing copy of everything a score sheet shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scoreboard {
    pub players: Vec<PlayerRow>,
    pub turn: Option<Turn>,
    pub rack: Option<Rack>,
    pub winners: Vec<PlayerId>,
    pub game_over: bool,
    pub throws: u32,
}

impl Scoreboard {
    pub fn current_player(&self) -> Option<&PlayerRow> {
        self.turn.and_then(|t| self.players.get(t.player.index()))
    }

    pub fn winner_names(&self) -> Vec<&str> {
        self.winners
            .iter()
            .filter_map(|w| self.players.get(w.index()))
            .map(|row| row.name.as_str())
            .collect()
    }
}

impl From<&GameState> for Scoreboard {
    fn from(state: &GameState) -> Self {
        let players = state
            .roster()
            .ids()
            .filter_map(|id| {
                let frames = state.frames(id)?;
                Some(PlayerRow {
                    id,
                    name: state.roster().name(id)?.to_string(),
                    marks: std::array::from_fn(|i| frames[i].marks()),
                    totals: state.frame_totals(id)?,
                    total: state.cumulative_total(id)?,
                })
            })
            .collect();

        Self {
            players,
            turn: state.current_turn(),
            rack: state.rack(),
            winners: state.winners().to_vec(),
            game_over: state.is_terminal(),
            throws: state.throws_accepted(),
        }
    }
}

impl GameState {
    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mark;

    #[test]
    fn test_scoreboard_mirrors_state() {
        let mut state = GameState::new(["Alice", "Bob"]).unwrap();
        for pins in [10, 4, 5, 7] {
            state.apply_throw(pins).unwrap();
        }

        let board = state.scoreboard();
        assert_eq!(board.players.len(), 2);
        assert_eq!(board.players[0].marks[0].as_slice(), &[Mark::Strike, Mark::Skip]);
        assert_eq!(board.players[0].marks[1].as_slice(), &[Mark::Pins(7)]);
        assert_eq!(board.players[0].totals[0], FrameTotal::Pending);
        assert_eq!(board.players[1].totals[0], FrameTotal::Resolved(9));
        assert_eq!(board.players[1].total, 9);
        assert_eq!(board.turn, Some(Turn::new(PlayerId(0), 1, 1)));
        assert_eq!(board.rack.map(|r| r.standing), Some(3));
        assert_eq!(board.current_player().map(|p| p.name.as_str()), Some("Alice"));
        assert!(!board.game_over);
        assert!(board.winner_names().is_empty());
    }
}
