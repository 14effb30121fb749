#[macro_use]
extern crate criterion;

use connect_four_mcts::{
    board::Board,
    config::{RolloutKind, SearchConfig},
    policy::simulation::{HeuristicRollout, RandomRollout, RolloutPolicy},
    Mcts,
};
use criterion::{black_box, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

/// A quiet middle-game position
fn middle_game() -> Board {
    Board::from_moves(&[3, 3, 2, 4, 4, 2, 5, 1]).unwrap()
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.measurement_time(Duration::from_secs(10));

    for &iterations in &[100, 1_000, 5_000] {
        let config = SearchConfig::default()
            .with_max_iterations(iterations)
            .with_seed(1);

        group.bench_with_input(
            BenchmarkId::new("iterations", iterations),
            &iterations,
            |b, &_| {
                b.iter(|| {
                    let mut mcts = Mcts::new(Board::new(), config.clone()).unwrap();
                    black_box(mcts.search())
                })
            },
        );
    }

    for (name, kind) in [
        ("random", RolloutKind::Random),
        ("heuristic", RolloutKind::HeuristicGreedy),
    ] {
        let config = SearchConfig::default()
            .with_max_iterations(1_000)
            .with_rollout_policy(kind)
            .with_seed(1);

        group.bench_function(BenchmarkId::new("rollout_policy", name), |b| {
            b.iter(|| {
                let mut mcts = Mcts::new(middle_game(), config.clone()).unwrap();
                black_box(mcts.search())
            })
        });
    }

    group.finish();
}

fn bench_rollouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("rollout");
    let board = middle_game();

    let mut rng = StdRng::seed_from_u64(7);
    group.bench_function("random", |b| {
        b.iter(|| black_box(RandomRollout::new().rollout(&board, &mut rng)))
    });

    let mut rng = StdRng::seed_from_u64(7);
    group.bench_function("heuristic", |b| {
        b.iter(|| black_box(HeuristicRollout::new().rollout(&board, &mut rng)))
    });

    group.finish();
}

fn bench_board(c: &mut Criterion) {
    let board = middle_game();

    c.bench_function("board/apply_move", |b| {
        b.iter(|| black_box(board.apply_move(black_box(0))))
    });
    c.bench_function("board/legal_moves", |b| {
        b.iter(|| black_box(board.legal_moves()))
    });
}

criterion_group!(benches, bench_search, bench_rollouts, bench_board);
criterion_main!(benches);
