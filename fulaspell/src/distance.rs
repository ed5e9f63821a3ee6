//! Weighted minimum edit distance between two strings.
//!
//! Classic Levenshtein dynamic program over grapheme units, with separate
//! insert, delete and replace costs. The full cost matrix is kept so the
//! cheapest edit path can be reconstructed.
use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::constants::{DEFAULT_DELETE_COST, DEFAULT_INSERT_COST, DEFAULT_REPLACE_COST};
use crate::tokenizer::Tokenize;

/// Errors that can occur when configuring or computing edit costs.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DistanceError {
    /// A cost was negative
    #[error("Cost for {operation} must be non-negative, got {cost}")]
    NegativeCost {
        /// name of the operation
        operation: &'static str,
        /// the offending cost
        cost: i64,
    },

    /// A cell of the cost grid does not fit in a `u64`
    #[error("Edit distance overflows u64 at cell ({row}, {col})")]
    Overflow {
        /// source position
        row: usize,
        /// target position
        col: usize,
    },
}

/// Per-operation costs for [`min_edit_distance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCosts {
    /// cost of inserting one unit of the target
    pub insert: u64,
    /// cost of deleting one unit of the source
    pub delete: u64,
    /// cost of replacing a source unit with a different target unit
    pub replace: u64,
}

impl EditCosts {
    /// insert = 1, delete = 1, replace = 2
    pub const fn default() -> EditCosts {
        EditCosts {
            insert: DEFAULT_INSERT_COST,
            delete: DEFAULT_DELETE_COST,
            replace: DEFAULT_REPLACE_COST,
        }
    }

    /// Validates signed costs, as received from a caller or the command line.
    pub fn new(insert: i64, delete: i64, replace: i64) -> Result<EditCosts, DistanceError> {
        let check = |operation, cost: i64| {
            u64::try_from(cost).map_err(|_| DistanceError::NegativeCost { operation, cost })
        };

        Ok(EditCosts {
            insert: check("insert", insert)?,
            delete: check("delete", delete)?,
            replace: check("replace", replace)?,
        })
    }

    /// The costs of the reverse transformation: inserts become deletes.
    pub fn swapped(&self) -> EditCosts {
        EditCosts {
            insert: self.delete,
            delete: self.insert,
            replace: self.replace,
        }
    }
}

/// Cost grid of size `(source units + 1) × (target units + 1)`.
///
/// Cell `(i, j)` holds the cheapest cost of turning the first `i` units of
/// the source into the first `j` units of the target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostMatrix {
    source: Vec<SmolStr>,
    target: Vec<SmolStr>,
    cells: Vec<u64>,
}

impl CostMatrix {
    fn new(source: Vec<SmolStr>, target: Vec<SmolStr>) -> CostMatrix {
        let cells = vec![0; (source.len() + 1) * (target.len() + 1)];
        CostMatrix {
            source,
            target,
            cells,
        }
    }

    #[inline(always)]
    fn index(&self, i: usize, j: usize) -> usize {
        i * self.cols() + j
    }

    #[inline(always)]
    fn set(&mut self, i: usize, j: usize, value: u64) {
        let idx = self.index(i, j);
        self.cells[idx] = value;
    }

    /// number of rows, one more than the source length
    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.source.len() + 1
    }

    /// number of columns, one more than the target length
    #[inline(always)]
    pub fn cols(&self) -> usize {
        self.target.len() + 1
    }

    /// cost at row `i`, column `j`
    ///
    /// Panics when out of bounds.
    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> u64 {
        assert!(i < self.rows() && j < self.cols(), "cell ({}, {}) out of bounds", i, j);
        self.cells[self.index(i, j)]
    }

    /// row `i` as a slice
    pub fn row(&self, i: usize) -> &[u64] {
        let start = self.index(i, 0);
        &self.cells[start..start + self.cols()]
    }

    /// the bottom-right cell, i.e. the edit distance
    pub fn corner(&self) -> u64 {
        self.get(self.rows() - 1, self.cols() - 1)
    }

}

impl fmt::Display for CostMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .cells
            .iter()
            .map(|c| c.to_string().chars().count())
            .chain(self.source.iter().chain(self.target.iter()).map(|u| u.chars().count()))
            .max()
            .unwrap_or(1)
            .max(1);

        write!(f, "{:>w$} {:>w$}", "", "#", w = width)?;
        for unit in &self.target {
            write!(f, " {:>w$}", unit.as_str(), w = width)?;
        }
        writeln!(f)?;

        for i in 0..self.rows() {
            let label = if i == 0 { "#" } else { self.source[i - 1].as_str() };
            write!(f, "{:>w$}", label, w = width)?;
            for cost in self.row(i) {
                write!(f, " {:>w$}", cost, w = width)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// One step of an edit path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum EditOp {
    /// unit kept unchanged
    Keep {
        /// the unit
        unit: SmolStr,
    },
    /// source unit replaced with a target unit
    Replace {
        /// source unit
        from: SmolStr,
        /// target unit
        to: SmolStr,
    },
    /// target unit inserted
    Insert {
        /// the inserted unit
        unit: SmolStr,
    },
    /// source unit deleted
    Delete {
        /// the deleted unit
        unit: SmolStr,
    },
}

impl EditOp {
    /// the cost of this step under `costs`
    pub fn cost(&self, costs: &EditCosts) -> u64 {
        match self {
            EditOp::Keep { .. } => 0,
            EditOp::Replace { .. } => costs.replace,
            EditOp::Insert { .. } => costs.insert,
            EditOp::Delete { .. } => costs.delete,
        }
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOp::Keep { unit } => write!(f, "keep {}", unit),
            EditOp::Replace { from, to } => write!(f, "replace {} -> {}", from, to),
            EditOp::Insert { unit } => write!(f, "insert {}", unit),
            EditOp::Delete { unit } => write!(f, "delete {}", unit),
        }
    }
}

/// Result of [`min_edit_distance`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EditDistance {
    matrix: CostMatrix,
    costs: EditCosts,
}

impl EditDistance {
    /// minimum total cost of turning the source into the target
    pub fn distance(&self) -> u64 {
        self.matrix.corner()
    }

    /// the full cost grid
    pub fn matrix(&self) -> &CostMatrix {
        &self.matrix
    }

    /// the costs the grid was computed with
    pub fn costs(&self) -> &EditCosts {
        &self.costs
    }

    /// Reconstructs one cheapest edit path by walking the grid back from the
    /// bottom-right corner. Matches are preferred over replacements, and
    /// replacements over deletions and insertions.
    pub fn alignment(&self) -> Vec<EditOp> {
        let m = &self.matrix;
        let c = &self.costs;
        let (mut i, mut j) = (m.rows() - 1, m.cols() - 1);
        let mut path = Vec::with_capacity(i.max(j));

        while i > 0 || j > 0 {
            let here = m.get(i, j);

            if i > 0 && j > 0 {
                let diag = m.get(i - 1, j - 1);
                let (from, to) = (&m.source[i - 1], &m.target[j - 1]);

                if from == to && here == diag {
                    path.push(EditOp::Keep { unit: from.clone() });
                    i -= 1;
                    j -= 1;
                    continue;
                }

                if from != to && here == diag.saturating_add(c.replace) {
                    path.push(EditOp::Replace {
                        from: from.clone(),
                        to: to.clone(),
                    });
                    i -= 1;
                    j -= 1;
                    continue;
                }
            }

            if i > 0 && here == m.get(i - 1, j).saturating_add(c.delete) {
                path.push(EditOp::Delete {
                    unit: m.source[i - 1].clone(),
                });
                i -= 1;
            } else {
                path.push(EditOp::Insert {
                    unit: m.target[j - 1].clone(),
                });
                j -= 1;
            }
        }

        path.reverse();
        path
    }
}

/// Computes the minimum cost of turning `source` into `target`.
///
/// `D[i][0] = i·delete`, `D[0][j] = j·insert`, and every other cell takes the
/// cheapest of a deletion, an insertion, or a diagonal step that costs
/// nothing when both units are equal and `replace` otherwise.
///
/// Fails with [`DistanceError::Overflow`] when the cheapest cost of some
/// cell does not fit in a `u64`.
pub fn min_edit_distance(
    source: &str,
    target: &str,
    costs: &EditCosts,
) -> Result<EditDistance, DistanceError> {
    let source = source.graphemes().map(SmolStr::from).collect::<Vec<_>>();
    let target = target.graphemes().map(SmolStr::from).collect::<Vec<_>>();
    let mut matrix = CostMatrix::new(source, target);
    let (rows, cols) = (matrix.rows(), matrix.cols());

    for i in 1..rows {
        let above = matrix.get(i - 1, 0);
        let value = above
            .checked_add(costs.delete)
            .ok_or(DistanceError::Overflow { row: i, col: 0 })?;
        matrix.set(i, 0, value);
    }

    for j in 1..cols {
        let left = matrix.get(0, j - 1);
        let value = left
            .checked_add(costs.insert)
            .ok_or(DistanceError::Overflow { row: 0, col: j })?;
        matrix.set(0, j, value);
    }

    for i in 1..rows {
        for j in 1..cols {
            let replace = if matrix.source[i - 1] == matrix.target[j - 1] {
                0
            } else {
                costs.replace
            };

            let value = [
                matrix.get(i - 1, j).checked_add(costs.delete),
                matrix.get(i, j - 1).checked_add(costs.insert),
                matrix.get(i - 1, j - 1).checked_add(replace),
            ]
            .iter()
            .flatten()
            .min()
            .copied()
            .ok_or(DistanceError::Overflow { row: i, col: j })?;
            matrix.set(i, j, value);
        }
    }

    log::trace!(
        "min_edit_distance: {}x{} grid, distance {}",
        rows,
        cols,
        matrix.corner()
    );

    Ok(EditDistance {
        matrix,
        costs: *costs,
    })
}
