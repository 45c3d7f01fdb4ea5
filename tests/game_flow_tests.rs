//! Game flow tests through the facade: turn order, rejection, lifecycle, winners.

use bowling_tracker::core::{
    submit_throw, GameState, Outcome, RosterError, ScoreError, TurnError,
};
use bowling_tracker::types::{FrameTotal, Mark, PlayerId, Turn, PERFECT_GAME};

/// Two bowlers: one perfect game, one that leaves a pin on the very last ball.
fn near_perfect_duel() -> Vec<u8> {
    let mut balls = Vec::new();
    for _ in 0..9 {
        balls.extend([10, 10]);
    }
    balls.extend([10, 10, 10]);
    balls.extend([10, 10, 9]);
    balls
}

#[test]
fn test_two_player_game_end_to_end() {
    let balls = near_perfect_duel();
    assert_eq!(balls.len(), 24);

    let mut game = GameState::new(["Ann", "Ben"]).unwrap();
    for (i, &pins) in balls.iter().enumerate() {
        assert!(!game.is_terminal(), "terminal before ball {}", i);
        game.apply_throw(pins).unwrap();
    }

    assert!(game.is_terminal());
    assert_eq!(game.current_turn(), None);
    assert_eq!(game.cumulative_total(PlayerId(0)), Some(PERFECT_GAME));
    assert_eq!(game.cumulative_total(PlayerId(1)), Some(299));
    assert_eq!(game.winners(), &[PlayerId(0)]);
    assert_eq!(
        game.outcome(),
        Some(&Outcome::Winner {
            player: PlayerId(0),
            score: 300
        })
    );
    assert_eq!(game.throws_accepted(), 24);

    let tenth = game.frame_display(PlayerId(1), 10).unwrap();
    assert_eq!(tenth.as_slice(), &[Mark::Strike, Mark::Strike, Mark::Pins(9)]);
}

#[test]
fn test_round_robin_turn_order() {
    let mut game = GameState::new(["A", "B", "C"]).unwrap();
    assert_eq!(game.current_turn(), Some(Turn::new(PlayerId(0), 0, 0)));

    game.apply_throw(3).unwrap();
    assert_eq!(game.current_turn(), Some(Turn::new(PlayerId(0), 0, 1)));
    game.apply_throw(4).unwrap();
    assert_eq!(game.current_turn(), Some(Turn::new(PlayerId(1), 0, 0)));

    // A strike ends B's frame at once.
    let outcome = game.apply_throw(10).unwrap();
    assert!(outcome.frame_complete);
    assert_eq!(outcome.next, Some(Turn::new(PlayerId(2), 0, 0)));

    game.apply_throw(0).unwrap();
    game.apply_throw(0).unwrap();
    assert_eq!(game.current_turn(), Some(Turn::new(PlayerId(0), 1, 0)));
}

#[test]
fn test_tie_is_shared() {
    let game = GameState::replay(["A", "B"], &[5; 42]).unwrap();
    assert!(game.is_terminal());
    assert_eq!(game.winners(), &[PlayerId(0), PlayerId(1)]);
    let outcome = game.outcome().unwrap();
    assert!(outcome.is_tie());
    assert_eq!(outcome.score(), 150);
}

#[test]
fn test_invalid_throw_changes_nothing() {
    let mut game = GameState::new(["A"]).unwrap();
    game.apply_throw(8).unwrap();
    let before = game.clone();

    assert_eq!(
        game.apply_throw(3),
        Err(ScoreError::InvalidScore {
            pins: 3,
            standing: 2
        })
    );
    assert_eq!(game, before);
    assert_eq!(game.pins_standing(), Some(2));
}

#[test]
fn test_eleven_pins_rejected_on_fresh_rack() {
    let game = GameState::new(["A"]).unwrap();
    assert!(matches!(
        game.validate_throw(11),
        Err(ScoreError::InvalidScore { pins: 11, .. })
    ));
}

#[test]
fn test_throw_after_game_over_is_illegal() {
    let mut game = GameState::replay(["Solo"], &[0; 20]).unwrap();
    assert!(game.is_terminal());
    assert_eq!(
        game.apply_throw(0),
        Err(ScoreError::IllegalTurnState(TurnError::GameOver))
    );
}

#[test]
fn test_turn_addressed_throws() {
    let mut game = GameState::new(["A", "B"]).unwrap();
    game.apply_throw_at(Turn::new(PlayerId(0), 0, 0), 10).unwrap();

    let stale = Turn::new(PlayerId(0), 0, 1);
    assert!(matches!(
        game.apply_throw_at(stale, 0),
        Err(ScoreError::IllegalTurnState(TurnError::Mismatch { .. }))
    ));
    assert!(matches!(
        game.apply_throw_at(Turn::new(PlayerId(1), 0, 3), 0),
        Err(ScoreError::IllegalTurnState(TurnError::ThrowIndexOutOfRange(3)))
    ));
    assert!(matches!(
        game.apply_throw_at(Turn::new(PlayerId(0), 10, 0), 0),
        Err(ScoreError::IllegalTurnState(TurnError::FrameOutOfRange(11)))
    ));
    assert!(matches!(
        game.apply_throw_at(Turn::new(PlayerId(4), 0, 0), 0),
        Err(ScoreError::IllegalTurnState(TurnError::UnknownPlayer(_)))
    ));
    game.apply_throw_at(Turn::new(PlayerId(1), 0, 0), 2).unwrap();
}

#[test]
fn test_functional_submit_leaves_input_untouched() {
    let start = GameState::new(["A"]).unwrap();
    let next = submit_throw(&start, 7).unwrap();
    assert_eq!(start.throws_accepted(), 0);
    assert_eq!(next.throws_accepted(), 1);
    assert!(submit_throw(&next, 4).is_err());
}

#[test]
fn test_roster_validation() {
    assert_eq!(
        GameState::new(Vec::<String>::new()).unwrap_err(),
        RosterError::Empty
    );
    assert!(matches!(
        GameState::new(["a", "b", "c", "d", "e", "f"]),
        Err(RosterError::TooManyPlayers { count: 6, .. })
    ));
    assert!(matches!(
        GameState::new(["Ann", "  "]),
        Err(RosterError::EmptyName { .. })
    ));
    assert!(matches!(
        GameState::new(["Ann", "ann"]),
        Err(RosterError::DuplicateName(_))
    ));
}

#[test]
fn test_replay_stops_at_first_bad_ball() {
    let err = GameState::replay(["A"], &[4, 4, 9, 9]).unwrap_err();
    assert_eq!(
        err,
        ScoreError::InvalidScore {
            pins: 9,
            standing: 1
        }
    );
}

#[test]
fn test_pending_totals_during_play() {
    let game = GameState::replay(["A"], &[10, 10]).unwrap();
    let totals = game.frame_totals(PlayerId(0)).unwrap();
    assert_eq!(totals[0], FrameTotal::Pending);
    assert_eq!(totals[1], FrameTotal::Pending);
    assert_eq!(totals[2], FrameTotal::Unplayed);
    assert_eq!(game.cumulative_total(PlayerId(0)), Some(0));
}

#[test]
fn test_unknown_player_queries_return_none() {
    let game = GameState::new(["A"]).unwrap();
    assert_eq!(game.frame_display(PlayerId(3), 1), None);
    assert_eq!(game.frame_display(PlayerId(0), 11), None);
    assert_eq!(game.frame_display(PlayerId(0), 0), None);
    assert_eq!(game.cumulative_total(PlayerId(3)), None);
}
