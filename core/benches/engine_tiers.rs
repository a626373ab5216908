use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sapper_core::*;

const TIERS: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_mines");
    for difficulty in TIERS {
        let config = difficulty.config();
        let start = Coordinate::new(config.width() / 2, config.height() / 2);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{difficulty:?}")),
            &config,
            |b, &config| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    let mut board = Board::generate(config).expect("preset is valid");
                    board
                        .place_mines(black_box(start), RandomMineGenerator::new(seed))
                        .expect("preset fits the opening");
                    board
                });
            },
        );
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    let config = GameConfig::new((255, 255), 1).expect("valid config");
    let mut board = Board::generate(config).expect("valid config");
    board
        .place_mines(Coordinate::new(0, 0), FixedMineGenerator::new([Coordinate::new(254, 254)]))
        .expect("mine is outside the opening");

    c.bench_function("flood_fill_255x255", |b| {
        b.iter(|| {
            let mut board = board.clone();
            RevealEngine::new(&mut board)
                .reveal(black_box(Coordinate::new(0, 0)))
                .expect("mines are placed")
        });
    });
}

fn bench_first_taps(c: &mut Criterion) {
    c.bench_function("hard_first_tap", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            let mut session = GameSession::with_seed(Difficulty::Hard, seed, NoTimer).expect("preset is valid");
            session.tap_tile(black_box(Coordinate::new(15, 8))).expect("opening fits")
        });
    });
}

criterion_group!(benches, bench_placement, bench_flood_fill, bench_first_taps);
criterion_main!(benches);
