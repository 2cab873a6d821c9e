//! A DPLL SAT solver built for comparing branching heuristics on small CNF
//! instances.

/// The `dpll` module implements the solver itself: clause database,
/// simplification engine, branching strategies, search driver and the
/// solver facade, plus DIMACS input and output.
pub mod dpll;

/// The `sudoku` module encodes Sudoku boards as CNF with a digit-positional
/// variable scheme and decodes models back into grids.
pub mod sudoku;
