#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The search driver: one decision step of the DPLL recursion.
//!
//! Every invocation simplifies its clause database to fixpoint and then
//! either terminates (empty database means satisfied, contradiction means
//! this branch fails) or hands the unresolved state to the configured
//! branching strategy, whose trials recurse back in here. Conflicts are
//! ordinary return values consumed by the enclosing trial loop; only the
//! decision-call limit aborts the whole search, unwinding as an error to the
//! solver façade.

use crate::dpll::assignment::Assignment;
use crate::dpll::branching::BranchingStrategy;
use crate::dpll::cnf::ClauseDb;
use crate::dpll::literal::Variable;
use crate::dpll::simplify::{Simplification, simplify};
use crate::dpll::solver::Counters;
use core::fmt;
use std::error::Error;

/// The decision-call budget ran out. Says nothing about satisfiability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimitExceeded {
    pub limit: u64,
}

impl fmt::Display for SearchLimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "search limit of {} decision calls exceeded", self.limit)
    }
}

impl Error for SearchLimitExceeded {}

/// Terminal state of one search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The path's clause database emptied; the assignment is a model.
    Sat(Assignment),
    /// The path (and all trials under it) contradicted. Carries the state as
    /// it stood when the failure was decided.
    Unsat {
        clauses: ClauseDb,
        assignment: Assignment,
        conflict: Option<Variable>,
    },
}

/// Borrowed search configuration and instrumentation, threaded through the
/// recursion so no global state is involved.
pub struct SearchDriver<'a> {
    pub strategy: &'a dyn BranchingStrategy,
    pub directions: &'a [bool],
    pub pure_literals: bool,
    pub decision_limit: u64,
    pub counters: &'a mut Counters,
}

impl SearchDriver<'_> {
    /// One decision step on a caller-owned snapshot of the state.
    ///
    /// # Errors
    ///
    /// Returns [`SearchLimitExceeded`] once the decision counter passes the
    /// configured limit. The error propagates through every pending trial.
    pub fn decide(
        &mut self,
        mut clauses: ClauseDb,
        mut assignment: Assignment,
    ) -> Result<Outcome, SearchLimitExceeded> {
        self.counters.decisions += 1;
        if self.counters.decisions > self.decision_limit {
            return Err(SearchLimitExceeded {
                limit: self.decision_limit,
            });
        }

        match simplify(
            &mut clauses,
            &mut assignment,
            self.pure_literals,
            self.counters,
        ) {
            Simplification::Satisfied => Ok(Outcome::Sat(assignment)),
            Simplification::Conflict(conflict) => Ok(Outcome::Unsat {
                clauses,
                assignment,
                conflict,
            }),
            Simplification::Continue => {
                let strategy = self.strategy;
                strategy.branch(&clauses, &assignment, self)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dpll::branching::Fifo;

    fn driver<'a>(counters: &'a mut Counters, limit: u64) -> SearchDriver<'a> {
        SearchDriver {
            strategy: &Fifo,
            directions: &[true, false],
            pure_literals: false,
            decision_limit: limit,
            counters,
        }
    }

    #[test]
    fn test_unit_conflict_needs_no_trials() {
        let db = ClauseDb::new(vec![vec![1], vec![-1]]);
        let assignment = Assignment::new(db.variables());
        let mut counters = Counters::default();
        let outcome = driver(&mut counters, 100).decide(db, assignment).unwrap();
        assert!(matches!(
            outcome,
            Outcome::Unsat {
                conflict: Some(1),
                ..
            }
        ));
        assert_eq!(counters.decisions, 1);
        assert_eq!(counters.branch_trials, 0);
    }

    #[test]
    fn test_branching_finds_model() {
        let db = ClauseDb::new(vec![vec![1, 2], vec![-1, 2], vec![1, -2]]);
        let assignment = Assignment::new(db.variables());
        let mut counters = Counters::default();
        let outcome = driver(&mut counters, 100).decide(db.clone(), assignment).unwrap();
        match outcome {
            Outcome::Sat(model) => assert!(db.satisfied_by(&model)),
            Outcome::Unsat { .. } => panic!("formula is satisfiable"),
        }
        assert!(counters.branch_trials > 0);
    }

    #[test]
    fn test_limit_aborts() {
        // Needs branching, but the budget allows a single decision call.
        let db = ClauseDb::new(vec![vec![1, 2], vec![-1, -2]]);
        let assignment = Assignment::new(db.variables());
        let mut counters = Counters::default();
        let result = driver(&mut counters, 1).decide(db, assignment);
        assert_eq!(result, Err(SearchLimitExceeded { limit: 1 }));
    }
}
