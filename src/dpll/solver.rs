#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The solver façade: owns the problem state, the configuration and the
//! instrumentation counters, and exposes the single `solve` entry point.
//!
//! The façade is also where the two conditions a caller must not confuse are
//! told apart. A failed search under a bidirectional direction policy is a
//! genuine UNSAT determination; under a restricted policy it only means the
//! explored half of the space is contradictory, reported as
//! [`Status::DirectionsExhausted`]. A blown decision budget is reported as
//! [`Status::LimitExceeded`] and proves nothing either way.

use crate::dpll::assignment::Assignment;
use crate::dpll::branching::{BranchingStrategy, Dlcs, Dlis, Fifo, MostFrequentDigit};
use crate::dpll::cnf::ClauseDb;
use crate::dpll::literal::Variable;
use crate::dpll::search::{Outcome, SearchDriver};
use crate::dpll::simplify::{Simplification, simplify};
use clap::ValueEnum;

/// Default decision-call budget, matching small-to-medium puzzle instances.
pub const DEFAULT_DECISION_LIMIT: u64 = 1_000_000;

/// The closed set of branching heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Heuristic {
    #[default]
    Fifo,
    Dlcs,
    Dlis,
    MostFrequentDigit,
}

impl Heuristic {
    /// The strategy implementation behind the selector.
    #[must_use]
    pub fn strategy(self) -> &'static dyn BranchingStrategy {
        match self {
            Self::Fifo => &Fifo,
            Self::Dlcs => &Dlcs,
            Self::Dlis => &Dlis,
            Self::MostFrequentDigit => &MostFrequentDigit,
        }
    }
}

/// Named polarity exploration orders. The single-direction policies trade
/// completeness for a smaller search space: they can report a satisfiable
/// formula as exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DirectionPolicy {
    #[default]
    TrueFirst,
    FalseFirst,
    PositiveOnly,
    NegativeOnly,
}

impl DirectionPolicy {
    #[must_use]
    pub const fn order(self) -> &'static [bool] {
        match self {
            Self::TrueFirst => &[true, false],
            Self::FalseFirst => &[false, true],
            Self::PositiveOnly => &[true],
            Self::NegativeOnly => &[false],
        }
    }
}

/// Solver configuration. All switches are orthogonal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub heuristic: Heuristic,
    /// Polarity exploration order. Exhaustive only if both values appear.
    pub directions: Vec<bool>,
    pub pure_literals: bool,
    /// Simplify the initial formula once before entering the search.
    pub preprocess: bool,
    pub decision_limit: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::default(),
            directions: DirectionPolicy::default().order().to_vec(),
            pure_literals: false,
            preprocess: true,
            decision_limit: DEFAULT_DECISION_LIMIT,
        }
    }
}

/// Instrumentation accumulated over one solve. Observability only; nothing
/// here feeds back into the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counters {
    /// Search-driver invocations (decision calls).
    pub decisions: u64,
    /// Trials started by branching strategies.
    pub branch_trials: u64,
    /// Membership probes against clause literal sets.
    pub literal_searches: u64,
    /// Literals visited by database scans.
    pub literal_iterations: u64,
}

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Satisfiable,
    /// Every assignment was refuted under an exhaustive direction policy.
    Unsatisfiable,
    /// Every candidate failed, but the direction policy was restricted to a
    /// single polarity. Not a proof of unsatisfiability.
    DirectionsExhausted,
    /// The decision-call budget ran out before a determination was reached.
    LimitExceeded,
}

impl Status {
    #[must_use]
    pub const fn is_sat(self) -> bool {
        matches!(self, Self::Satisfiable)
    }
}

/// Everything a solve reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub status: Status,
    /// The model on success; the last examined partial assignment otherwise.
    pub assignment: Assignment,
    /// Clauses still unresolved when the solve ended. Empty on success.
    pub clauses: ClauseDb,
    /// The violated variable behind a propagation-level contradiction.
    pub conflict: Option<Variable>,
}

/// The solver façade. Owns the canonical initial clause database and an
/// all-unassigned assignment over every variable in it. Reusable: each call
/// to [`solve`](Self::solve) starts from the canonical state with fresh
/// counters.
#[derive(Debug, Clone)]
pub struct Solver {
    clauses: ClauseDb,
    assignment: Assignment,
    options: Options,
    counters: Counters,
}

impl Solver {
    #[must_use]
    pub fn new(clauses: ClauseDb) -> Self {
        Self::with_options(clauses, Options::default())
    }

    #[must_use]
    pub fn with_options(clauses: ClauseDb, options: Options) -> Self {
        let assignment = Assignment::new(clauses.variables());
        Self {
            clauses,
            assignment,
            options,
            counters: Counters::default(),
        }
    }

    /// The original formula, untouched by any solve.
    #[must_use]
    pub const fn clauses(&self) -> &ClauseDb {
        &self.clauses
    }

    #[must_use]
    pub const fn counters(&self) -> &Counters {
        &self.counters
    }

    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Checks an assignment against the original formula.
    #[must_use]
    pub fn verify(&self, assignment: &Assignment) -> bool {
        self.clauses.satisfied_by(assignment)
    }

    /// Runs the DPLL search on a copy of the canonical state.
    pub fn solve(&mut self) -> Report {
        self.counters = Counters::default();

        let mut clauses = self.clauses.clone();
        let mut assignment = self.assignment.clone();

        if self.options.preprocess {
            match simplify(
                &mut clauses,
                &mut assignment,
                self.options.pure_literals,
                &mut self.counters,
            ) {
                Simplification::Satisfied => {
                    return Report {
                        status: Status::Satisfiable,
                        assignment,
                        clauses,
                        conflict: None,
                    };
                }
                Simplification::Conflict(conflict) => {
                    // No branching happened, so this refutation is absolute.
                    return Report {
                        status: Status::Unsatisfiable,
                        assignment,
                        clauses,
                        conflict,
                    };
                }
                Simplification::Continue => {}
            }
        }

        let strategy = self.options.heuristic.strategy();
        let mut driver = SearchDriver {
            strategy,
            directions: &self.options.directions,
            pure_literals: self.options.pure_literals,
            decision_limit: self.options.decision_limit,
            counters: &mut self.counters,
        };

        match driver.decide(clauses, assignment) {
            Ok(Outcome::Sat(assignment)) => Report {
                status: Status::Satisfiable,
                assignment,
                clauses: ClauseDb::default(),
                conflict: None,
            },
            Ok(Outcome::Unsat {
                clauses,
                assignment,
                conflict,
            }) => Report {
                status: self.failure_status(),
                assignment,
                clauses,
                conflict,
            },
            Err(_) => Report {
                status: Status::LimitExceeded,
                assignment: self.assignment.clone(),
                clauses: self.clauses.clone(),
                conflict: None,
            },
        }
    }

    /// A search failure is a genuine UNSAT when both polarities were in play,
    /// or when propagation alone refuted the formula before any trial ran.
    fn failure_status(&self) -> Status {
        let exhaustive =
            self.options.directions.contains(&true) && self.options.directions.contains(&false);
        if exhaustive || self.counters.branch_trials == 0 {
            Status::Unsatisfiable
        } else {
            Status::DirectionsExhausted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dpll::literal::Literal;

    fn solver(clauses: Vec<Vec<i32>>, options: Options) -> Solver {
        Solver::with_options(ClauseDb::new(clauses), options)
    }

    fn options(heuristic: Heuristic, policy: DirectionPolicy) -> Options {
        Options {
            heuristic,
            directions: policy.order().to_vec(),
            ..Options::default()
        }
    }

    // Scenario: eight mixed clauses, bidirectional FIFO.
    #[test]
    fn test_mixed_formula_fifo() {
        let clauses = vec![
            vec![1, 4],
            vec![1, -3, -8],
            vec![1, 8, 12],
            vec![2, 11],
            vec![-7, -3, 9],
            vec![-7, 8, -9],
            vec![7, 8, -10],
            vec![7, 10, -12],
        ];
        let mut solver = solver(clauses, Options::default());
        let report = solver.solve();
        assert_eq!(report.status, Status::Satisfiable);
        assert!(solver.verify(&report.assignment));
        assert!(report.clauses.is_empty());
    }

    // Scenario: {1} and {-1} contradict with zero branching.
    #[test]
    fn test_immediate_contradiction() {
        let mut solver = solver(vec![vec![1], vec![-1]], Options::default());
        let report = solver.solve();
        assert_eq!(report.status, Status::Unsatisfiable);
        assert_eq!(report.conflict, Some(1));
        assert_eq!(solver.counters().branch_trials, 0);
    }

    // Scenario: a lone tautology simplifies to the empty database.
    #[test]
    fn test_tautology_only() {
        let mut solver = solver(vec![vec![1, -1, 2]], Options::default());
        let report = solver.solve();
        assert_eq!(report.status, Status::Satisfiable);
        assert!(report.clauses.is_empty());
        assert!(solver.verify(&report.assignment));
    }

    // Scenario: a single unit clause.
    #[test]
    fn test_single_unit() {
        let mut solver = solver(vec![vec![5]], Options::default());
        let report = solver.solve();
        assert_eq!(report.status, Status::Satisfiable);
        assert_eq!(report.assignment.var_value(5), Some(true));
        assert_eq!(report.assignment.num_assigned(), 1);
    }

    #[test]
    fn test_model_validity_all_heuristics() {
        let clauses = vec![
            vec![1, 2, -3],
            vec![-1, 3],
            vec![-2, 3],
            vec![2, 3, 4],
            vec![-4, -1],
        ];
        for heuristic in [
            Heuristic::Fifo,
            Heuristic::Dlcs,
            Heuristic::Dlis,
            Heuristic::MostFrequentDigit,
        ] {
            let mut solver = solver(
                clauses.clone(),
                options(heuristic, DirectionPolicy::TrueFirst),
            );
            let report = solver.solve();
            assert_eq!(report.status, Status::Satisfiable, "{heuristic:?}");
            assert!(solver.verify(&report.assignment), "{heuristic:?}");
        }
    }

    #[test]
    fn test_unsat_formula_all_heuristics() {
        // All four assignments of {1, 2} are refuted.
        let clauses = vec![vec![1, 2], vec![1, -2], vec![-1, 2], vec![-1, -2]];
        for heuristic in [
            Heuristic::Fifo,
            Heuristic::Dlcs,
            Heuristic::Dlis,
            Heuristic::MostFrequentDigit,
        ] {
            let mut solver = solver(
                clauses.clone(),
                options(heuristic, DirectionPolicy::FalseFirst),
            );
            assert_eq!(solver.solve().status, Status::Unsatisfiable, "{heuristic:?}");
        }
    }

    #[test]
    fn test_restricted_directions_are_incomplete() {
        // Unit propagation is direction-independent: a forced negative
        // literal is still found under positive-only search.
        let clauses = vec![vec![-1], vec![-1, 2]];
        let mut restricted = solver(
            clauses,
            Options {
                directions: DirectionPolicy::PositiveOnly.order().to_vec(),
                preprocess: false,
                ..Options::default()
            },
        );
        let report = restricted.solve();
        assert_eq!(report.status, Status::Satisfiable);

        let clauses = vec![vec![-1, -2], vec![1, -2], vec![-1, 2]];
        // Satisfiable only by 1 = false, 2 = false.
        let mut restricted = solver(
            clauses.clone(),
            Options {
                directions: DirectionPolicy::PositiveOnly.order().to_vec(),
                ..Options::default()
            },
        );
        let report = restricted.solve();
        assert_eq!(report.status, Status::DirectionsExhausted);

        let mut exhaustive = solver(clauses, Options::default());
        let report = exhaustive.solve();
        assert_eq!(report.status, Status::Satisfiable);
        assert_eq!(report.assignment.var_value(1), Some(false));
        assert_eq!(report.assignment.var_value(2), Some(false));
    }

    #[test]
    fn test_limit_exceeded_is_distinct() {
        let clauses = vec![
            vec![1, 2, 3],
            vec![-1, -2, -3],
            vec![1, -2, 3],
            vec![-1, 2, -3],
        ];
        let mut solver = solver(
            clauses,
            Options {
                decision_limit: 1,
                preprocess: false,
                ..Options::default()
            },
        );
        let report = solver.solve();
        assert_eq!(report.status, Status::LimitExceeded);
        assert!(!report.status.is_sat());
        assert_eq!(report.conflict, None);
    }

    #[test]
    fn test_pure_literals_preserve_satisfiability() {
        let clauses = vec![vec![1, 2], vec![1, -2], vec![-2, 3], vec![3, 4]];
        let mut with_pures = solver(
            clauses.clone(),
            Options {
                pure_literals: true,
                ..Options::default()
            },
        );
        let mut without = solver(clauses, Options::default());
        let with_report = with_pures.solve();
        let without_report = without.solve();
        assert_eq!(with_report.status, Status::Satisfiable);
        assert_eq!(without_report.status, Status::Satisfiable);
        assert!(with_pures.verify(&with_report.assignment));
    }

    #[test]
    fn test_counters_reset_between_solves() {
        let mut solver = solver(vec![vec![1, 2], vec![-1, 2]], Options::default());
        solver.solve();
        let first = *solver.counters();
        solver.solve();
        assert_eq!(*solver.counters(), first);
    }

    #[test]
    fn test_exhaustive_search_is_complete() {
        // Brute-force every 3-variable formula shape we throw at it.
        let cases: Vec<Vec<Vec<i32>>> = vec![
            vec![vec![1, 2], vec![-1, 3], vec![-2, -3]],
            vec![vec![-1], vec![1, -2], vec![2, -3], vec![3]],
            vec![vec![1], vec![-1, 2], vec![-2]],
        ];
        for clauses in cases {
            let db = ClauseDb::new(clauses.clone());
            let vars = db.variables();
            let mut brute_sat = false;
            for bits in 0..(1u32 << vars.len()) {
                let mut assignment = Assignment::new(vars.clone());
                for (i, &var) in vars.iter().enumerate() {
                    assignment.resolve(Literal::new(var, bits & (1 << i) != 0));
                }
                if db.satisfied_by(&assignment) {
                    brute_sat = true;
                    break;
                }
            }

            let mut solver = Solver::new(db);
            let report = solver.solve();
            assert_eq!(report.status.is_sat(), brute_sat, "{clauses:?}");
        }
    }
}
