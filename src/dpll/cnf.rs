#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The clause database: an insertion-ordered sequence of clauses.
//!
//! Clause order is load-bearing. The branching heuristics rank candidates by
//! scanning the database front to back and breaking ties by first encounter,
//! so removals must preserve the order of the surviving clauses.

use crate::dpll::assignment::Assignment;
use crate::dpll::clause::Clause;
use crate::dpll::literal::Variable;
use core::fmt;
use core::ops::{Index, IndexMut};
use itertools::Itertools;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClauseDb {
    clauses: Vec<Clause>,
}

impl ClauseDb {
    #[must_use]
    pub fn new(clauses: Vec<Vec<i32>>) -> Self {
        Self {
            clauses: clauses.into_iter().map(Clause::new).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Removes the clause at `index`, shifting later clauses down so their
    /// relative order is unchanged.
    pub fn remove(&mut self, index: usize) -> Clause {
        self.clauses.remove(index)
    }

    pub fn retain<F: FnMut(&Clause) -> bool>(&mut self, keep: F) {
        self.clauses.retain(keep);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// All variables appearing in the database, ascending and deduplicated.
    /// This is the assignment domain for the formula.
    #[must_use]
    pub fn variables(&self) -> Vec<Variable> {
        self.clauses
            .iter()
            .flat_map(|c| c.iter().map(|lit| lit.variable()))
            .sorted_unstable()
            .dedup()
            .collect()
    }

    /// Checks that every clause holds at least one true literal under the
    /// assignment, reading unassigned variables as false. Unconstrained
    /// variables may legitimately stay unassigned in a model, and a clause
    /// left satisfiable only through them is a tautology, which the false
    /// reading still satisfies through the negated literal.
    #[must_use]
    pub fn satisfied_by(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|clause| {
            clause
                .iter()
                .any(|&lit| assignment.literal_value(lit).unwrap_or(!lit.polarity()))
        })
    }
}

impl Index<usize> for ClauseDb {
    type Output = Clause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl IndexMut<usize> for ClauseDb {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.clauses[index]
    }
}

impl From<Vec<Vec<i32>>> for ClauseDb {
    fn from(clauses: Vec<Vec<i32>>) -> Self {
        Self::new(clauses)
    }
}

impl fmt::Display for ClauseDb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num_vars = self.variables().last().copied().unwrap_or(0);
        writeln!(f, "p cnf {num_vars} {}", self.len())?;
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        Ok(())
    }
}
