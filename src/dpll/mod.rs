#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod assignment;
pub mod branching;
pub mod clause;
pub mod cnf;
pub mod dimacs;
pub mod literal;
pub mod search;
pub mod simplify;
pub mod solver;
