use criterion::{Criterion, criterion_group, criterion_main};
use splitsat::dpll::cnf::ClauseDb;
use splitsat::dpll::solver::{DirectionPolicy, Heuristic, Options, Solver};
use splitsat::sudoku::{EXAMPLE_FOUR, Sudoku};
use std::hint::black_box;

const HEURISTICS: [Heuristic; 4] = [
    Heuristic::Fifo,
    Heuristic::Dlcs,
    Heuristic::Dlis,
    Heuristic::MostFrequentDigit,
];

fn heuristic_options(heuristic: Heuristic) -> Options {
    Options {
        heuristic,
        ..Options::default()
    }
}

/// A fixed mixed 12-variable formula, satisfiable, with enough structure
/// that propagation alone never closes it.
fn mixed_formula() -> ClauseDb {
    ClauseDb::new(vec![
        vec![1, 4],
        vec![1, -3, -8],
        vec![1, 8, 12],
        vec![2, 11],
        vec![-7, -3, 9],
        vec![-7, 8, -9],
        vec![7, 8, -10],
        vec![7, 10, -12],
        vec![-2, 5, 6],
        vec![-5, -6, 3],
        vec![-4, -11, 10],
    ])
}

fn bench_heuristics_on_formula(c: &mut Criterion) {
    let db = mixed_formula();

    let mut group = c.benchmark_group("mixed formula - heuristic");
    for heuristic in HEURISTICS {
        group.bench_function(format!("{heuristic:?}"), |b| {
            b.iter(|| {
                let mut solver =
                    Solver::with_options(db.clone(), heuristic_options(heuristic));
                black_box(solver.solve());
            });
        });
    }
    group.finish();
}

fn bench_heuristics_on_sudoku(c: &mut Criterion) {
    let puzzle = Sudoku::new(EXAMPLE_FOUR.map(|row| row.to_vec()).to_vec());
    let db = puzzle.to_cnf();

    let mut group = c.benchmark_group("4x4 sudoku - heuristic");
    for heuristic in HEURISTICS {
        group.bench_function(format!("{heuristic:?}"), |b| {
            b.iter(|| {
                let mut solver =
                    Solver::with_options(db.clone(), heuristic_options(heuristic));
                black_box(solver.solve());
            });
        });
    }
    group.finish();
}

fn bench_direction_policies(c: &mut Criterion) {
    let db = mixed_formula();

    let mut group = c.benchmark_group("mixed formula - directions");
    for policy in [
        DirectionPolicy::TrueFirst,
        DirectionPolicy::FalseFirst,
        DirectionPolicy::PositiveOnly,
        DirectionPolicy::NegativeOnly,
    ] {
        group.bench_function(format!("{policy:?}"), |b| {
            b.iter(|| {
                let options = Options {
                    directions: policy.order().to_vec(),
                    ..Options::default()
                };
                let mut solver = Solver::with_options(db.clone(), options);
                black_box(solver.solve());
            });
        });
    }
    group.finish();
}

fn bench_pure_literals(c: &mut Criterion) {
    let db = mixed_formula();

    let mut group = c.benchmark_group("mixed formula - pure literals");
    for pure_literals in [false, true] {
        group.bench_function(format!("{pure_literals}"), |b| {
            b.iter(|| {
                let options = Options {
                    pure_literals,
                    ..Options::default()
                };
                let mut solver = Solver::with_options(db.clone(), options);
                black_box(solver.solve());
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_heuristics_on_formula,
    bench_heuristics_on_sudoku,
    bench_direction_policies,
    bench_pure_literals
);

criterion_main!(benches);
