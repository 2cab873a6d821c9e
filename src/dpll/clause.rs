#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A clause is a disjunction of literals, kept as a deduplicated sequence.
//!
//! Literals keep their first-insertion order. That order has no logical
//! meaning, but the branching heuristics break ties by scan order, so it must
//! be stable for solver runs to be reproducible.

use crate::dpll::literal::Literal;
use core::fmt;
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause {
    literals: SmallVec<[Literal; 8]>,
}

impl Clause {
    /// Builds a clause from DIMACS-style integers, dropping duplicates while
    /// keeping the first occurrence of each literal.
    #[must_use]
    pub fn new<I: IntoIterator<Item = i32>>(literals: I) -> Self {
        let mut clause = Self::default();
        for value in literals {
            clause.insert(Literal::from_i32(value));
        }
        clause
    }

    /// Adds a literal unless the clause already contains it.
    pub fn insert(&mut self, lit: Literal) {
        if !self.contains(lit) {
            self.literals.push(lit);
        }
    }

    /// Removes a literal, preserving the order of the rest.
    /// Returns whether the literal was present.
    pub fn remove(&mut self, lit: Literal) -> bool {
        match self.literals.iter().position(|&l| l == lit) {
            Some(i) => {
                self.literals.remove(i);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, lit: Literal) -> bool {
        self.literals.contains(&lit)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// The forced literal of a unit clause, if this is one.
    #[must_use]
    pub fn unit_literal(&self) -> Option<Literal> {
        if self.is_unit() {
            Some(self.literals[0])
        } else {
            None
        }
    }

    /// A clause containing a literal and its negation is always true.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.literals.iter().any(|lit| self.contains(lit.negated()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }
}

impl From<Vec<i32>> for Clause {
    fn from(literals: Vec<i32>) -> Self {
        Self::new(literals)
    }
}

impl From<&[i32]> for Clause {
    fn from(literals: &[i32]) -> Self {
        Self::new(literals.iter().copied())
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = core::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for lit in &self.literals {
            write!(f, "{lit} ")?;
        }
        write!(f, "0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_deduplicates() {
        let clause = Clause::new(vec![1, -2, 1, 3, -2]);
        assert_eq!(clause.len(), 3);
        let lits: Vec<i32> = clause.iter().map(|l| l.to_i32()).collect();
        assert_eq!(lits, vec![1, -2, 3]);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut clause = Clause::new(vec![1, 2, 3, 4]);
        assert!(clause.remove(Literal::from(2)));
        assert!(!clause.remove(Literal::from(2)));
        let lits: Vec<i32> = clause.iter().map(|l| l.to_i32()).collect();
        assert_eq!(lits, vec![1, 3, 4]);
    }

    #[test]
    fn test_unit_literal() {
        assert_eq!(Clause::new(vec![5]).unit_literal(), Some(Literal::from(5)));
        assert_eq!(Clause::new(vec![5, 6]).unit_literal(), None);
        assert_eq!(Clause::default().unit_literal(), None);
    }

    #[test]
    fn test_tautology() {
        assert!(Clause::new(vec![1, -1, 2]).is_tautology());
        assert!(!Clause::new(vec![1, 2, -3]).is_tautology());
        assert!(!Clause::default().is_tautology());
    }
}
