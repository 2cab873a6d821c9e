#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reading and writing the DIMACS CNF format.
//!
//! The reader extracts clause data only: comment (`c`) and problem (`p`)
//! lines are skipped without inspection, a `%` line ends the input, and every
//! other line is a clause of whitespace-separated integer literals terminated
//! by `0`. Variable counts are derived from the clauses themselves.
//!
//! The writer serializes a solved assignment back out as unit clauses, one
//! per domain variable, so a solution can be fed to other DIMACS tooling.

use crate::dpll::assignment::Assignment;
use crate::dpll::cnf::ClauseDb;
use itertools::Itertools;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Parses DIMACS data from a `BufRead` source.
///
/// # Panics
///
/// Panics if a line cannot be read or a literal token is not an integer.
/// Malformed input is a caller problem; the solver core never validates
/// clause data itself.
pub fn parse_dimacs<R: BufRead>(reader: R) -> ClauseDb {
    let mut clauses: Vec<Vec<i32>> = Vec::new();

    for line in reader.lines() {
        let line = line.unwrap_or_else(|e| panic!("failed to read line: {e}"));
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            Some(&"%") => break,
            None | Some(&"c" | &"p") => {}
            Some(_) => {
                let literals: Vec<i32> = parts
                    .map(|s| {
                        s.parse::<i32>()
                            .unwrap_or_else(|e| panic!("failed to parse literal '{s}': {e}"))
                    })
                    .filter(|&value| value != 0)
                    .collect_vec();

                if !literals.is_empty() {
                    clauses.push(literals);
                }
            }
        }
    }

    ClauseDb::new(clauses)
}

/// Parses clause lines from plain text, ignoring `c` and `p` lines. Unlike
/// [`parse_dimacs`] each clause stops at its first `0`, so trailing garbage
/// after the terminator is dropped rather than rejected.
#[must_use]
pub fn parse_text(input: &str) -> ClauseDb {
    let clauses = input
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty() && !line.starts_with('c') && !line.starts_with('p')
        })
        .map(|line| {
            line.split_whitespace()
                .map(str::parse::<i32>)
                .take_while(|res| *res != Ok(0))
                .map(|res| res.unwrap_or_else(|e| panic!("failed to parse literal: {e}")))
                .collect()
        })
        .collect_vec();

    ClauseDb::new(clauses)
}

/// Opens and parses a DIMACS CNF file.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be opened.
pub fn parse_file<P: AsRef<Path>>(path: P) -> io::Result<ClauseDb> {
    let file = std::fs::File::open(path)?;
    Ok(parse_dimacs(io::BufReader::new(file)))
}

/// Writes an assignment as DIMACS unit clauses. Every domain variable gets a
/// line; unassigned variables are written as false, which keeps the output a
/// total model of the original formula.
///
/// # Errors
///
/// Propagates write errors from the underlying writer.
pub fn write_model<W: Write>(writer: &mut W, assignment: &Assignment) -> io::Result<()> {
    let max_var = assignment.domain().last().copied().unwrap_or(0);
    writeln!(writer, "p cnf {max_var} {}", assignment.domain().len())?;
    for &var in assignment.domain() {
        let value = assignment.var_value(var).unwrap_or(false);
        let sign = if value { "" } else { "-" };
        writeln!(writer, "{sign}{var} 0")?;
    }
    Ok(())
}

/// Every `.cnf` file under `dir`, recursively, in sorted path order.
///
/// # Errors
///
/// Returns the first traversal error encountered.
pub fn find_cnf_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(io::Error::other)?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "cnf")
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
