//! Column schema for mixed-type data.
//!
//! The type of each column travels with the data as an explicit tag, so
//! grouping metrics by variable type never depends on bare index ranges.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EvalError, Result};
use crate::types::constants;

/// Marginal type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColumnKind {
    /// Exponentially distributed, real valued
    Continuous,
    /// 0/1 indicator
    Binary,
    /// Integer category in `[0, k-1]`
    Ordinal,
}

impl ColumnKind {
    /// All kinds, in reporting order.
    pub const ALL: [Self; 3] = [Self::Continuous, Self::Binary, Self::Ordinal];

    /// Whether imputed values of this kind are discrete categories.
    pub fn is_discrete(self) -> bool {
        !matches!(self, Self::Continuous)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Continuous => "cont",
            Self::Binary => "bin",
            Self::Ordinal => "ord",
        };
        f.write_str(name)
    }
}

/// Ordered list of column kinds, one per data column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnSchema {
    kinds: Vec<ColumnKind>,
}

impl ColumnSchema {
    /// Creates a schema from explicit kinds.
    pub fn new(kinds: Vec<ColumnKind>) -> Self {
        Self { kinds }
    }

    /// Creates a schema of contiguous blocks: continuous, then binary, then
    /// ordinal columns.
    pub fn blocks(continuous: usize, binary: usize, ordinal: usize) -> Self {
        let kinds = std::iter::repeat(ColumnKind::Continuous)
            .take(continuous)
            .chain(std::iter::repeat(ColumnKind::Binary).take(binary))
            .chain(std::iter::repeat(ColumnKind::Ordinal).take(ordinal))
            .collect();
        Self { kinds }
    }

    /// The reference 5 / 5 / 5 layout.
    pub fn reference() -> Self {
        Self::blocks(
            constants::NUM_CONTINUOUS,
            constants::NUM_BINARY,
            constants::NUM_ORDINAL,
        )
    }

    /// Number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether the schema has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Kind of column `j`.
    #[inline]
    pub fn kind(&self, j: usize) -> ColumnKind {
        self.kinds[j]
    }

    /// All kinds in column order.
    pub fn kinds(&self) -> &[ColumnKind] {
        &self.kinds
    }

    /// Indices of the columns of a given kind, ascending.
    pub fn indices_of(&self, kind: ColumnKind) -> Vec<usize> {
        self.kinds
            .iter()
            .enumerate()
            .filter(|(_, &k)| k == kind)
            .map(|(j, _)| j)
            .collect()
    }

    /// Number of columns of a given kind.
    pub fn count(&self, kind: ColumnKind) -> usize {
        self.kinds.iter().filter(|&&k| k == kind).count()
    }

    /// Checks that a matrix has one column per schema entry.
    pub fn check_columns(&self, ncols: usize) -> Result<()> {
        if ncols != self.len() {
            return Err(EvalError::dimension_mismatch(
                format!("{} columns", self.len()),
                format!("{ncols} columns"),
            ));
        }
        Ok(())
    }
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self::reference()
    }
}
