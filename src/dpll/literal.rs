#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Literals and variables.
//!
//! A variable is a positive integer naming a boolean unknown. A literal is a
//! nonzero signed integer: the magnitude is the variable, the sign is the
//! polarity (positive asserts the variable, negative negates it). This is the
//! same convention DIMACS files use, so parsing and printing are trivial.

use core::fmt;
use core::ops::{Neg, Not};

pub type Variable = u32;

/// A signed-integer literal. The inner value is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(i32);

impl Literal {
    /// Builds a literal from a variable and a polarity.
    ///
    /// # Panics
    ///
    /// Panics if `var` does not fit in an `i32`.
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Self {
        let var = i32::try_from(var).expect("literal variable overflowed");
        if polarity { Self(var) } else { Self(-var) }
    }

    /// Builds a literal from its DIMACS integer form.
    ///
    /// `value` must be nonzero; zero is the DIMACS clause terminator and
    /// names no literal.
    #[must_use]
    pub const fn from_i32(value: i32) -> Self {
        debug_assert!(value != 0, "zero is not a literal");
        Self(value)
    }

    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.unsigned_abs()
    }

    /// `true` for an asserted literal, `false` for a negated one.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0.is_positive()
    }

    #[must_use]
    pub const fn negated(self) -> Self {
        Self(-self.0)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl From<Literal> for i32 {
    fn from(lit: Literal) -> Self {
        lit.0
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_accessors() {
        let lit = Literal::new(7, true);
        assert_eq!(lit.variable(), 7);
        assert!(lit.polarity());
        assert_eq!(lit.to_i32(), 7);

        let lit = Literal::new(7, false);
        assert_eq!(lit.variable(), 7);
        assert!(!lit.polarity());
        assert_eq!(lit.to_i32(), -7);
    }

    #[test]
    fn test_negated() {
        assert_eq!(Literal::from(3).negated(), Literal::from(-3));
        assert_eq!(Literal::from(-3).negated(), Literal::from(3));
        assert_eq!(-Literal::from(3), Literal::from(-3));
        assert_eq!(!Literal::from(-3), Literal::from(3));
    }

    #[test]
    fn test_roundtrip() {
        for value in [1, -1, 42, -42, 999] {
            assert_eq!(Literal::from_i32(value).to_i32(), value);
        }
    }
}
