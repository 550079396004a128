//! Loading of numeric text files into matrices and vectors.
//!
//! Supported format:
//! - UTF-8 text, numbers separated by any mix of whitespace and commas
//! - blank lines and empty cells (`1,,2`) are skipped
//! - every retained token must parse as a finite `f64`
//!
//! Two modes are offered:
//! - fixed-shape: the caller states the expected shape and the flat count
//!   of parsed numbers must match it exactly
//! - tabular: line breaks delimit rows and every row must be as wide as
//!   the first one
//!
//! Nothing partial is ever returned; a file either loads completely or fails.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{AnnError, Result};
use crate::math::matrix::Matrix;

// ---------------------------------------------------------------------------
// In-memory parsing
// ---------------------------------------------------------------------------

/// Parses every number in `text`, ignoring line structure.
pub fn parse_numbers(text: &str, source_name: &str) -> Result<Vec<f64>> {
    let nums = tokens(text)
        .map(|t| parse_token(t, source_name))
        .collect::<Result<Vec<f64>>>()?;

    if nums.is_empty() {
        return Err(AnnError::EmptySource { source_name: source_name.into() });
    }
    Ok(nums)
}

/// Parses `text` as a table: one row per non-blank line.
pub fn parse_table(text: &str, source_name: &str) -> Result<Matrix> {
    let mut data = Vec::new();
    let mut n_rows = 0;
    let mut n_cols = 0;

    for (line_idx, line) in text.lines().enumerate() {
        let row = tokens(line)
            .map(|t| parse_token(t, source_name))
            .collect::<Result<Vec<f64>>>()?;
        if row.is_empty() {
            continue;
        }

        if n_rows == 0 {
            n_cols = row.len();
        } else if row.len() != n_cols {
            return Err(AnnError::ColumnMismatch {
                source_name: source_name.into(),
                row: line_idx + 1,
                expected: n_cols,
                actual: row.len(),
            });
        }
        data.extend(row);
        n_rows += 1;
    }

    if n_rows == 0 {
        return Err(AnnError::EmptySource { source_name: source_name.into() });
    }
    Matrix::from_flat(n_rows, n_cols, data)
}

/// Reshapes a flat number list into `rows x cols`, requiring an exact count.
pub fn shape_matrix(nums: Vec<f64>, rows: usize, cols: usize, source_name: &str) -> Result<Matrix> {
    if nums.len() != rows * cols {
        return Err(AnnError::size_mismatch(source_name, rows * cols, nums.len()));
    }
    Matrix::from_flat(rows, cols, nums)
}

/// Flattens a 1xN or Nx1 table into a vector.
pub fn table_to_vector(table: Matrix, source_name: &str) -> Result<Vec<f64>> {
    if table.cols() == 1 || table.rows() == 1 {
        return Ok(table.into_vec());
    }
    Err(AnnError::NotAVector {
        source_name: source_name.into(),
        rows: table.rows(),
        cols: table.cols(),
    })
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

/// Reads every number in the file at `path`.
pub fn read_numbers(path: &Path) -> Result<Vec<f64>> {
    let nums = parse_numbers(&read_text(path)?, &path.display().to_string())?;
    debug!("loaded {} values from {}", nums.len(), path.display());
    Ok(nums)
}

/// Fixed-shape mode: the file must hold exactly `rows * cols` numbers.
pub fn read_matrix_fixed(path: &Path, rows: usize, cols: usize) -> Result<Matrix> {
    shape_matrix(read_numbers(path)?, rows, cols, &path.display().to_string())
}

/// Fixed-shape mode: the file must hold exactly `n` numbers.
pub fn read_vector_fixed(path: &Path, n: usize) -> Result<Vec<f64>> {
    let nums = read_numbers(path)?;
    if nums.len() != n {
        return Err(AnnError::size_mismatch(path.display().to_string(), n, nums.len()));
    }
    Ok(nums)
}

/// Tabular mode: rows come from line breaks.
pub fn read_table(path: &Path) -> Result<Matrix> {
    let table = parse_table(&read_text(path)?, &path.display().to_string())?;
    debug!("loaded {}x{} table from {}", table.rows(), table.cols(), path.display());
    Ok(table)
}

/// Tabular mode for vectors laid out as 1xN or Nx1.
pub fn read_table_vector(path: &Path) -> Result<Vec<f64>> {
    table_to_vector(read_table(path)?, &path.display().to_string())
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| AnnError::io(path, e))
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

fn parse_token(token: &str, source_name: &str) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(AnnError::Parse {
            source_name: source_name.into(),
            token: token.into(),
        }),
    }
}
