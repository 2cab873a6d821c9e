#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The simplification engine.
//!
//! Runs unit propagation, tautology removal and (optionally) pure-literal
//! elimination as one fixpoint loop over the clause database. Both the
//! database and the assignment are mutated in place; callers that need to
//! branch afterwards must hand in their own copies.
//!
//! Each pass scans every clause once:
//! - an empty clause is an immediate contradiction,
//! - a tautological clause is dropped,
//! - a unit clause forces its literal, which then removes every clause
//!   satisfied by it and strips its negation from the rest.
//!
//! Pure literals are recomputed at the end of every pass, since purity is a
//! property of whatever clauses survived that pass. The loop ends when the
//! database is empty (`Satisfied`), a contradiction appears (`Conflict`), or
//! a full pass changes nothing (`Continue`).

use crate::dpll::assignment::{Assignment, Resolution};
use crate::dpll::cnf::ClauseDb;
use crate::dpll::literal::{Literal, Variable};
use crate::dpll::solver::Counters;
use rustc_hash::FxHashSet;

/// Result of simplifying to fixpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Simplification {
    /// The clause database is empty; the current assignment is a model.
    Satisfied,
    /// A contradiction was found. Carries the violated variable when one is
    /// identifiable (an empty clause handed in from outside has none).
    Conflict(Option<Variable>),
    /// Fixpoint reached with clauses remaining; a decision is needed.
    Continue,
}

pub fn simplify(
    db: &mut ClauseDb,
    assignment: &mut Assignment,
    pure_literals: bool,
    counters: &mut Counters,
) -> Simplification {
    loop {
        let mut changed = false;
        let mut forced: Vec<Literal> = Vec::new();

        let mut idx = 0;
        while idx < db.len() {
            counters.literal_iterations += db[idx].len() as u64;
            if db[idx].is_empty() {
                return Simplification::Conflict(None);
            }
            if db[idx].is_tautology() {
                db.remove(idx);
                changed = true;
                continue;
            }
            if let Some(lit) = db[idx].unit_literal() {
                match assignment.resolve(lit) {
                    Resolution::Conflict => {
                        return Simplification::Conflict(Some(lit.variable()));
                    }
                    Resolution::Recorded => forced.push(lit),
                    Resolution::Duplicate => {}
                }
                db.remove(idx);
                changed = true;
                continue;
            }
            idx += 1;
        }

        for lit in forced {
            if let Err(var) = apply_literal(db, lit, counters) {
                return Simplification::Conflict(Some(var));
            }
            changed = true;
        }

        if pure_literals {
            for lit in find_pure_literals(db, assignment, counters) {
                match assignment.resolve(lit) {
                    Resolution::Conflict => {
                        return Simplification::Conflict(Some(lit.variable()));
                    }
                    Resolution::Recorded => {
                        if let Err(var) = apply_literal(db, lit, counters) {
                            return Simplification::Conflict(Some(var));
                        }
                        changed = true;
                    }
                    Resolution::Duplicate => {}
                }
            }
        }

        if db.is_empty() {
            return Simplification::Satisfied;
        }
        if !changed {
            return Simplification::Continue;
        }
    }
}

/// Applies a freshly assigned literal to the database: clauses containing the
/// literal are satisfied and dropped, its negation is struck from the rest.
/// Striking the last literal of a clause is a contradiction, reported with
/// the propagated variable.
pub(crate) fn apply_literal(
    db: &mut ClauseDb,
    lit: Literal,
    counters: &mut Counters,
) -> Result<(), Variable> {
    let neg = lit.negated();
    let mut idx = 0;
    while idx < db.len() {
        counters.literal_searches += 2;
        if db[idx].contains(lit) {
            db.remove(idx);
            continue;
        }
        if db[idx].remove(neg) && db[idx].is_empty() {
            return Err(lit.variable());
        }
        idx += 1;
    }
    Ok(())
}

/// Literals whose negation occurs in no surviving clause, in first-encounter
/// order across the database scan.
fn find_pure_literals(
    db: &ClauseDb,
    assignment: &Assignment,
    counters: &mut Counters,
) -> Vec<Literal> {
    let mut order: Vec<Literal> = Vec::new();
    let mut seen: FxHashSet<Literal> = FxHashSet::default();
    let mut impure: FxHashSet<Variable> = FxHashSet::default();

    for clause in db.iter() {
        for &lit in clause {
            counters.literal_iterations += 1;
            let var = lit.variable();
            if !assignment.is_unassigned(var) || impure.contains(&var) {
                continue;
            }
            if seen.contains(&lit.negated()) {
                impure.insert(var);
                continue;
            }
            if seen.insert(lit) {
                order.push(lit);
            }
        }
    }

    order
        .into_iter()
        .filter(|lit| !impure.contains(&lit.variable()))
        .collect()
}
