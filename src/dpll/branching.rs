#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Branching strategies: how the case split picks its decision literals.
//!
//! Every strategy produces a fully ordered, deterministic ranking of
//! candidate literals for one direction pass. The trial loop is shared: for
//! each direction in the configured policy, for each ranked candidate, clone
//! the clause database and assignment, assert the candidate on the clones and
//! recurse into the search driver. The first successful trial wins; if every
//! candidate in every direction fails, the branch as a whole fails.
//!
//! Ranking ties keep first-encounter order from the database scan, which
//! together with the insertion-ordered clause database makes runs
//! reproducible.

use crate::dpll::assignment::{Assignment, Resolution};
use crate::dpll::cnf::ClauseDb;
use crate::dpll::literal::{Literal, Variable};
use crate::dpll::search::{Outcome, SearchDriver, SearchLimitExceeded};
use crate::dpll::simplify::apply_literal;
use crate::dpll::solver::Counters;
use core::cmp::Reverse;
use core::fmt::Debug;
use rustc_hash::FxHashMap;

pub trait BranchingStrategy: Debug + Sync {
    /// Decision literals for one direction pass, best candidate first.
    /// Polarity handling is strategy-specific: occurrence-counting strategies
    /// fold their majority polarity into the returned literal, the others
    /// use `direction` as-is.
    fn candidates(
        &self,
        db: &ClauseDb,
        assignment: &Assignment,
        direction: bool,
        counters: &mut Counters,
    ) -> Vec<Literal>;

    /// Runs the trial loop over all directions and candidates, recursing into
    /// the search driver on an independent snapshot per trial. Returns the
    /// first successful outcome, or failure with the caller's state untouched.
    fn branch(
        &self,
        db: &ClauseDb,
        assignment: &Assignment,
        driver: &mut SearchDriver<'_>,
    ) -> Result<Outcome, SearchLimitExceeded> {
        let directions = driver.directions;
        for &direction in directions {
            for lit in self.candidates(db, assignment, direction, driver.counters) {
                driver.counters.branch_trials += 1;

                let mut db_trial = db.clone();
                let mut trial = assignment.clone();
                match trial.resolve(lit) {
                    Resolution::Conflict => continue,
                    Resolution::Recorded => {
                        if apply_literal(&mut db_trial, lit, driver.counters).is_err() {
                            continue;
                        }
                    }
                    Resolution::Duplicate => {}
                }

                if let Outcome::Sat(model) = driver.decide(db_trial, trial)? {
                    return Ok(Outcome::Sat(model));
                }
            }
        }

        Ok(Outcome::Unsat {
            clauses: db.clone(),
            assignment: assignment.clone(),
            conflict: None,
        })
    }
}

/// Unassigned variables in their natural (ascending) order; polarity is the
/// direction value, unmodified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fifo;

impl BranchingStrategy for Fifo {
    fn candidates(
        &self,
        _db: &ClauseDb,
        assignment: &Assignment,
        direction: bool,
        _counters: &mut Counters,
    ) -> Vec<Literal> {
        assignment
            .unassigned()
            .map(|var| Literal::new(var, direction))
            .collect()
    }
}

/// Dynamic Largest Combined Sum: variables ranked by their total literal
/// occurrence count over the surviving clauses. The majority polarity wins,
/// modulated by the direction value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dlcs;

impl BranchingStrategy for Dlcs {
    fn candidates(
        &self,
        db: &ClauseDb,
        assignment: &Assignment,
        direction: bool,
        counters: &mut Counters,
    ) -> Vec<Literal> {
        let mut order: Vec<Variable> = Vec::new();
        let mut positive: FxHashMap<Variable, u64> = FxHashMap::default();
        let mut negative: FxHashMap<Variable, u64> = FxHashMap::default();

        for clause in db.iter() {
            for &lit in clause {
                counters.literal_iterations += 1;
                let var = lit.variable();
                if !assignment.is_unassigned(var) {
                    continue;
                }
                if !positive.contains_key(&var) {
                    positive.insert(var, 0);
                    negative.insert(var, 0);
                    order.push(var);
                }
                let tally = if lit.polarity() {
                    positive.entry(var)
                } else {
                    negative.entry(var)
                };
                *tally.or_insert(0) += 1;
            }
        }

        order.sort_by_key(|var| Reverse(positive[var] + negative[var]));
        order
            .into_iter()
            .map(|var| {
                let polarity = if positive[&var] > negative[&var] {
                    direction
                } else {
                    !direction
                };
                Literal::new(var, polarity)
            })
            .collect()
    }
}

/// Dynamic Largest Individual Sum: literals scored per polarity. A literal's
/// negation always gets a zero entry so both polarities rank, matching the
/// combined-sum tie-break behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dlis;

impl BranchingStrategy for Dlis {
    fn candidates(
        &self,
        db: &ClauseDb,
        assignment: &Assignment,
        direction: bool,
        counters: &mut Counters,
    ) -> Vec<Literal> {
        let mut order: Vec<Literal> = Vec::new();
        let mut scores: FxHashMap<Literal, u64> = FxHashMap::default();

        for clause in db.iter() {
            for &lit in clause {
                counters.literal_iterations += 1;
                if !assignment.is_unassigned(lit.variable()) {
                    continue;
                }
                if !scores.contains_key(&lit) {
                    scores.insert(lit, 0);
                    order.push(lit);
                }
                let neg = lit.negated();
                if !scores.contains_key(&neg) {
                    scores.insert(neg, 0);
                    order.push(neg);
                }
                if let Some(score) = scores.get_mut(&lit) {
                    *score += 1;
                }
            }
        }

        order.sort_by_key(|lit| Reverse(scores[lit]));
        order
            .into_iter()
            .map(|lit| {
                let polarity = if scores[&lit] > scores[&lit.negated()] {
                    direction
                } else {
                    !direction
                };
                Literal::new(lit.variable(), polarity)
            })
            .collect()
    }
}

/// Most-frequent-last-digit: for encodings that store a value digit in the
/// variable id's least significant decimal digit (such as the sudoku
/// `row*100 + col*10 + num` scheme), prefer variables whose digit is already
/// common among the variables assigned true. Greedy value reuse, in effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MostFrequentDigit;

impl BranchingStrategy for MostFrequentDigit {
    fn candidates(
        &self,
        _db: &ClauseDb,
        assignment: &Assignment,
        direction: bool,
        _counters: &mut Counters,
    ) -> Vec<Literal> {
        let mut digit_order: Vec<u32> = Vec::new();
        let mut frequency: FxHashMap<u32, u64> = FxHashMap::default();
        for var in assignment.assigned_true() {
            let digit = var % 10;
            if !frequency.contains_key(&digit) {
                digit_order.push(digit);
            }
            *frequency.entry(digit).or_insert(0) += 1;
        }

        digit_order.sort_by_key(|digit| Reverse(frequency[digit]));
        let ranking: FxHashMap<u32, usize> = digit_order
            .iter()
            .enumerate()
            .map(|(rank, &digit)| (digit, rank))
            .collect();

        let mut vars: Vec<Variable> = assignment.unassigned().collect();
        // Unseen digits sort after every ranked one.
        vars.sort_by_key(|var| ranking.get(&(var % 10)).copied().unwrap_or(usize::MAX));
        vars.into_iter()
            .map(|var| Literal::new(var, direction))
            .collect()
    }
}
