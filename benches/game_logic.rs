use criterion::{black_box, criterion_group, criterion_main, Criterion};
use bowling_tracker::core::{GameState, ScoreKeeper};
use bowling_tracker::types::PlayerId;

fn mixed_game() -> Vec<u8> {
    vec![10, 7, 3, 9, 0, 10, 0, 8, 8, 2, 0, 6, 10, 10, 10, 8, 1]
}

fn bench_perfect_game(c: &mut Criterion) {
    c.bench_function("submit_perfect_game_5_players", |b| {
        b.iter(|| {
            let mut keeper =
                ScoreKeeper::new(GameState::new(["A", "B", "C", "D", "E"]).unwrap());
            while !keeper.state().is_terminal() {
                keeper.submit_throw(black_box(10)).unwrap();
            }
            keeper.into_state()
        })
    });
}

fn bench_frame_totals(c: &mut Criterion) {
    let state = GameState::replay(["Solo"], &mixed_game()).unwrap();

    c.bench_function("frame_totals_recompute", |b| {
        b.iter(|| black_box(&state).frame_totals(PlayerId(0)))
    });
}

fn bench_replay(c: &mut Criterion) {
    let balls = mixed_game();

    c.bench_function("replay_mixed_game", |b| {
        b.iter(|| GameState::replay(["Solo"], black_box(&balls)).unwrap())
    });
}

fn bench_scoreboard(c: &mut Criterion) {
    let mut balls = [10u8; 18].to_vec();
    balls.extend([10, 10, 10, 10, 10, 9]);
    let state = GameState::replay(["Ann", "Ben"], &balls).unwrap();

    c.bench_function("scoreboard_snapshot", |b| {
        b.iter(|| black_box(&state).scoreboard())
    });
}

criterion_group!(
    benches,
    bench_perfect_game,
    bench_frame_totals,
    bench_replay,
    bench_scoreboard
);
criterion_main!(benches);
