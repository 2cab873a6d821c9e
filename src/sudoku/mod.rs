#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Sudoku as a CNF problem.
//!
//! Cells are encoded with the digit-positional scheme `row*100 + col*10 +
//! num` (all 1-based), so variable 345 means "row 3, column 4 holds 5". The
//! candidate value sits in the least significant decimal digit of the
//! variable id, which is exactly what the most-frequent-digit branching
//! heuristic keys on. The scheme caps boards at 9x9; 4x4 boards use the same
//! ids with a smaller value range.

use crate::dpll::assignment::Assignment;
use crate::dpll::cnf::ClauseDb;
use crate::dpll::solver::{Heuristic, Options, Solver};
use core::fmt;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Size {
    Four = 4,
    Nine = 9,
}

impl Size {
    #[must_use]
    pub const fn block_size(self) -> usize {
        match self {
            Self::Four => 2,
            Self::Nine => 3,
        }
    }
}

impl TryFrom<usize> for Size {
    type Error = ();

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::Four),
            9 => Ok(Self::Nine),
            _ => Err(()),
        }
    }
}

impl From<Size> for usize {
    fn from(size: Size) -> Self {
        size as Self
    }
}

/// The variable id of "cell (`row`, `col`) holds `num`", all 1-based.
///
/// # Panics
///
/// Never in practice: ids top out at 999.
#[must_use]
pub fn encode(row: usize, col: usize, num: usize) -> i32 {
    i32::try_from(row * 100 + col * 10 + num).expect("cell id overflowed")
}

pub const EXAMPLE_FOUR: [[usize; 4]; 4] = [
    [1, 0, 3, 0],
    [0, 4, 0, 2],
    [0, 1, 0, 0],
    [4, 0, 0, 1],
];

pub const EXAMPLE_NINE: [[usize; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sudoku {
    board: Vec<Vec<usize>>,
    size: Size,
}

impl Sudoku {
    /// Wraps a board. Zero means an empty cell.
    ///
    /// # Panics
    ///
    /// Panics if the board is not square with a supported size, or a cell
    /// value is out of range.
    #[must_use]
    pub fn new(board: Vec<Vec<usize>>) -> Self {
        let size = Size::try_from(board.len()).expect("unsupported board size");
        let n = usize::from(size);
        for row in &board {
            assert_eq!(row.len(), n, "board is not square");
            for &cell in row {
                assert!(cell <= n, "cell value {cell} out of range");
            }
        }
        Self { board, size }
    }

    #[must_use]
    pub fn empty(size: Size) -> Self {
        let n = usize::from(size);
        Self {
            board: vec![vec![0; n]; n],
            size,
        }
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn board(&self) -> &[Vec<usize>] {
        &self.board
    }

    /// Parses a board from text: one line per row, cells separated by
    /// whitespace, with `0`, `.` or `-` for an empty cell.
    ///
    /// # Errors
    ///
    /// Fails when a token is not a cell value or the grid has an unsupported
    /// shape.
    pub fn parse(text: &str) -> io::Result<Self> {
        let mut board = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row: Vec<usize> = line
                .split_whitespace()
                .map(|token| match token {
                    "." | "-" => Ok(0),
                    _ => token
                        .parse::<usize>()
                        .map_err(|e| io::Error::other(format!("bad cell '{token}': {e}"))),
                })
                .collect::<io::Result<_>>()?;
            board.push(row);
        }

        let size = Size::try_from(board.len())
            .map_err(|()| io::Error::other(format!("unsupported board size {}", board.len())))?;
        let n = usize::from(size);
        for row in &board {
            if row.len() != n {
                return Err(io::Error::other("board is not square"));
            }
            if row.iter().any(|&cell| cell > n) {
                return Err(io::Error::other("cell value out of range"));
            }
        }
        Ok(Self { board, size })
    }

    /// Reads and parses a board file.
    ///
    /// # Errors
    ///
    /// Propagates I/O and parse failures.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    #[must_use]
    pub fn to_cnf(&self) -> ClauseDb {
        let n = usize::from(self.size);
        let block = self.size.block_size();

        let mut clauses: Vec<Vec<i32>> = Vec::new();
        clauses.extend(cell_clauses(n));
        clauses.extend(cell_uniqueness_clauses(n));
        clauses.extend(row_clauses(n));
        clauses.extend(col_clauses(n));
        clauses.extend(block_clauses(n, block));
        clauses.extend(self.given_clauses());

        ClauseDb::new(clauses)
    }

    fn given_clauses(&self) -> Vec<Vec<i32>> {
        let mut clauses = Vec::new();
        for (r, row) in self.board.iter().enumerate() {
            for (c, &num) in row.iter().enumerate() {
                if num != 0 {
                    clauses.push(vec![encode(r + 1, c + 1, num)]);
                }
            }
        }
        clauses
    }

    /// Reads the positive cell variables of a model back into a board.
    #[must_use]
    pub fn decode(&self, assignment: &Assignment) -> Self {
        let n = usize::from(self.size);
        let mut board = vec![vec![0; n]; n];
        for row in 1..=n {
            for col in 1..=n {
                for num in 1..=n {
                    let var = encode(row, col, num).unsigned_abs();
                    if assignment.var_value(var) == Some(true) {
                        board[row - 1][col - 1] = num;
                    }
                }
            }
        }
        Self {
            board,
            size: self.size,
        }
    }

    /// A fully filled board with no duplicate in any row, column or block.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        let n = usize::from(self.size);
        let block = self.size.block_size();
        let distinct = |cells: &[usize]| {
            let mut seen = vec![false; n + 1];
            cells
                .iter()
                .all(|&num| num >= 1 && num <= n && !std::mem::replace(&mut seen[num], true))
        };

        for r in 0..n {
            let col: Vec<usize> = (0..n).map(|c| self.board[c][r]).collect();
            if !distinct(&self.board[r]) || !distinct(&col) {
                return false;
            }
        }
        for br in (0..n).step_by(block) {
            for bc in (0..n).step_by(block) {
                let cells: Vec<usize> = (0..block)
                    .flat_map(|dr| (0..block).map(move |dc| (br + dr, bc + dc)))
                    .map(|(r, c)| self.board[r][c])
                    .collect();
                if !distinct(&cells) {
                    return false;
                }
            }
        }
        true
    }
}

/// Every cell holds at least one value.
fn cell_clauses(n: usize) -> Vec<Vec<i32>> {
    let mut clauses = Vec::new();
    for row in 1..=n {
        for col in 1..=n {
            clauses.push((1..=n).map(|num| encode(row, col, num)).collect());
        }
    }
    clauses
}

/// No cell holds two values.
fn cell_uniqueness_clauses(n: usize) -> Vec<Vec<i32>> {
    let mut clauses = Vec::new();
    for row in 1..=n {
        for col in 1..=n {
            for n1 in 1..=n {
                for n2 in (n1 + 1)..=n {
                    clauses.push(vec![-encode(row, col, n1), -encode(row, col, n2)]);
                }
            }
        }
    }
    clauses
}

/// No value repeats within a row.
fn row_clauses(n: usize) -> Vec<Vec<i32>> {
    let mut clauses = Vec::new();
    for row in 1..=n {
        for num in 1..=n {
            for c1 in 1..=n {
                for c2 in (c1 + 1)..=n {
                    clauses.push(vec![-encode(row, c1, num), -encode(row, c2, num)]);
                }
            }
        }
    }
    clauses
}

/// No value repeats within a column.
fn col_clauses(n: usize) -> Vec<Vec<i32>> {
    let mut clauses = Vec::new();
    for col in 1..=n {
        for num in 1..=n {
            for r1 in 1..=n {
                for r2 in (r1 + 1)..=n {
                    clauses.push(vec![-encode(r1, col, num), -encode(r2, col, num)]);
                }
            }
        }
    }
    clauses
}

/// No value repeats within a block.
fn block_clauses(n: usize, block: usize) -> Vec<Vec<i32>> {
    let mut clauses = Vec::new();
    for num in 1..=n {
        for br in (0..n).step_by(block) {
            for bc in (0..n).step_by(block) {
                let cells: Vec<(usize, usize)> = (1..=block)
                    .flat_map(|dr| (1..=block).map(move |dc| (br + dr, bc + dc)))
                    .collect();
                for i in 0..cells.len() {
                    for j in (i + 1)..cells.len() {
                        let (r1, c1) = cells[i];
                        let (r2, c2) = cells[j];
                        clauses.push(vec![-encode(r1, c1, num), -encode(r2, c2, num)]);
                    }
                }
            }
        }
    }
    clauses
}

/// Builds a random puzzle: solve the empty board, relabel its values with a
/// random permutation, then keep `clues` randomly chosen cells.
///
/// # Panics
///
/// Panics if the empty board fails to solve, which would mean the encoding
/// itself is broken.
#[must_use]
pub fn generate(size: Size, clues: usize) -> Sudoku {
    let n = usize::from(size);
    let base = Sudoku::empty(size);
    let mut solver = Solver::with_options(
        base.to_cnf(),
        Options {
            heuristic: Heuristic::Dlcs,
            ..Options::default()
        },
    );
    let report = solver.solve();
    assert!(report.status.is_sat(), "empty board must be solvable");
    let solved = base.decode(&report.assignment);

    let mut relabel: Vec<usize> = (1..=n).collect();
    fastrand::shuffle(&mut relabel);

    let mut cells: Vec<(usize, usize)> = (0..n)
        .flat_map(|r| (0..n).map(move |c| (r, c)))
        .collect();
    fastrand::shuffle(&mut cells);
    cells.truncate(clues.min(n * n));

    let mut board = vec![vec![0; n]; n];
    for (r, c) in cells {
        board[r][c] = relabel[solved.board[r][c] - 1];
    }
    Sudoku::new(board)
}

impl fmt::Display for Sudoku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let block = self.size.block_size();
        let n = usize::from(self.size);
        for (r, row) in self.board.iter().enumerate() {
            if r > 0 && r % block == 0 {
                writeln!(f, "{}", "-".repeat(2 * n + 2 * (n / block) - 3))?;
            }
            for (c, &cell) in row.iter().enumerate() {
                if c > 0 && c % block == 0 {
                    write!(f, "| ")?;
                }
                if cell == 0 {
                    write!(f, ". ")?;
                } else {
                    write!(f, "{cell} ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
