use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use krk_endgame::game_state::chess_types::*;
use krk_endgame::search::alpha_beta::{AlphaBetaSearch, SearchConfig};
use krk_endgame::search::board_scoring::{AttackerScorer, BoardScorer, DefenderScorer};
use krk_endgame::search::history::PathHistory;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    /// 0-based (file, rank) of attacker king, rook, defender king.
    squares: [(i32, i32); 3],
    side: Side,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "corner_start",
        squares: [(0, 0), (0, 7), (4, 4)],
        side: Side::Attacker,
    },
    BenchCase {
        name: "edge_squeeze",
        squares: [(4, 5), (0, 6), (4, 7)],
        side: Side::Attacker,
    },
    BenchCase {
        name: "defender_centre",
        squares: [(1, 1), (7, 2), (4, 4)],
        side: Side::Defender,
    },
];

fn position_of(case: &BenchCase) -> Position {
    let square = |(file, rank): (i32, i32)| {
        square_from_coords(file, rank).expect("benchmark square should be on the board")
    };
    Position::try_new(
        square(case.squares[0]),
        Some(square(case.squares[1])),
        square(case.squares[2]),
        case.side,
    )
    .expect("benchmark position should be legal")
}

fn max_depth() -> u32 {
    std::env::var("KRK_BENCH_DEPTH")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(4)
}

fn bench_best_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("best_move");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    let attacker = AttackerScorer::default();
    let defender = DefenderScorer::default();
    let history = PathHistory::new();

    for case in CASES {
        let root = position_of(case);
        let scorer: &dyn BoardScorer = match case.side {
            Side::Attacker => &attacker,
            Side::Defender => &defender,
        };

        for depth in 1..=max_depth() {
            let search = AlphaBetaSearch::new(SearchConfig {
                max_depth: depth,
                ..SearchConfig::default()
            });

            group.bench_with_input(
                BenchmarkId::new(case.name, depth),
                &depth,
                |b, _| {
                    let mut rng = StdRng::seed_from_u64(0);
                    b.iter(|| {
                        let result = search
                            .best_move(black_box(&root), scorer, 70, &history, &mut rng)
                            .expect("benchmark search should succeed");
                        black_box(result.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_best_move);
criterion_main!(search_benches);
