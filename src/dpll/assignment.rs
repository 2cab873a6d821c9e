#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The partial assignment of truth values to variables.
//!
//! The domain is fixed when the assignment is built from a formula and never
//! grows. Within one search branch a variable is set at most once; sibling
//! branches work on independent clones.

use crate::dpll::literal::{Literal, Variable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VarState {
    #[default]
    Unassigned,
    Assigned(bool),
}

impl VarState {
    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        matches!(self, Self::Unassigned)
    }
}

/// Outcome of extending the assignment with one literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The variable was unassigned and is now set to the literal's polarity.
    Recorded,
    /// The variable already holds the literal's polarity.
    Duplicate,
    /// The variable already holds the opposite polarity.
    Conflict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    states: Vec<VarState>,
    domain: Vec<Variable>,
}

impl Assignment {
    /// Builds an all-unassigned assignment over the given variables.
    /// `domain` is expected sorted ascending and free of duplicates, which is
    /// what [`ClauseDb::variables`](crate::dpll::cnf::ClauseDb::variables)
    /// produces.
    #[must_use]
    pub fn new(domain: Vec<Variable>) -> Self {
        let max_var = domain.last().copied().unwrap_or(0) as usize;
        Self {
            states: vec![VarState::Unassigned; max_var + 1],
            domain,
        }
    }

    #[must_use]
    pub fn domain(&self) -> &[Variable] {
        &self.domain
    }

    #[must_use]
    pub fn var_value(&self, var: Variable) -> Option<bool> {
        match self.states.get(var as usize) {
            Some(VarState::Assigned(b)) => Some(*b),
            _ => None,
        }
    }

    /// The literal's truth value under the current assignment, or `None` if
    /// its variable is unassigned.
    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.var_value(lit.variable())
            .map(|b| if lit.polarity() { b } else { !b })
    }

    #[must_use]
    pub fn is_unassigned(&self, var: Variable) -> bool {
        self.var_value(var).is_none()
    }

    /// Tries to record `lit` as true. Never overwrites an existing value.
    pub fn resolve(&mut self, lit: Literal) -> Resolution {
        let var = lit.variable() as usize;
        match self.states[var] {
            VarState::Unassigned => {
                self.states[var] = VarState::Assigned(lit.polarity());
                Resolution::Recorded
            }
            VarState::Assigned(b) if b == lit.polarity() => Resolution::Duplicate,
            VarState::Assigned(_) => Resolution::Conflict,
        }
    }

    /// Unassigned variables in ascending order.
    pub fn unassigned(&self) -> impl Iterator<Item = Variable> + '_ {
        self.domain
            .iter()
            .copied()
            .filter(|&v| self.is_unassigned(v))
    }

    /// Variables currently assigned true, in ascending order.
    pub fn assigned_true(&self) -> impl Iterator<Item = Variable> + '_ {
        self.domain
            .iter()
            .copied()
            .filter(|&v| self.var_value(v) == Some(true))
    }

    /// Every domain variable with its current state, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, VarState)> + '_ {
        self.domain
            .iter()
            .map(|&v| (v, self.states[v as usize]))
    }

    #[must_use]
    pub fn num_assigned(&self) -> usize {
        self.iter().filter(|(_, s)| !s.is_unassigned()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let mut assignment = Assignment::new(vec![1, 3, 5]);
        assert_eq!(assignment.resolve(Literal::from(3)), Resolution::Recorded);
        assert_eq!(assignment.resolve(Literal::from(3)), Resolution::Duplicate);
        assert_eq!(assignment.resolve(Literal::from(-3)), Resolution::Conflict);
        assert_eq!(assignment.var_value(3), Some(true));
        assert_eq!(assignment.var_value(1), None);
    }

    #[test]
    fn test_literal_value() {
        let mut assignment = Assignment::new(vec![2, 4]);
        assignment.resolve(Literal::from(-4));
        assert_eq!(assignment.literal_value(Literal::from(4)), Some(false));
        assert_eq!(assignment.literal_value(Literal::from(-4)), Some(true));
        assert_eq!(assignment.literal_value(Literal::from(2)), None);
    }

    #[test]
    fn test_iteration_order() {
        let mut assignment = Assignment::new(vec![1, 2, 3, 4]);
        assignment.resolve(Literal::from(2));
        assignment.resolve(Literal::from(-4));
        assert_eq!(assignment.unassigned().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(assignment.assigned_true().collect::<Vec<_>>(), vec![2]);
        assert_eq!(assignment.num_assigned(), 2);
    }
}
