//! Cell visitation orders of the nine `EDGE_WEIGHT_SECTION` matrix layouts.
//!
//! Each layout is an outer loop over `1..=n` and an inner range derived from
//! the outer index. Row layouts walk `(outer, inner)` as `(row, col)`; column
//! layouts walk them as `(col, row)`:
//!
//! | layout          | outer | inner            | diagonal in stream |
//! |-----------------|-------|------------------|--------------------|
//! | FULL_MATRIX     | row   | `1..=n`          | yes                |
//! | UPPER_ROW       | row   | `row+1..=n`      | no                 |
//! | LOWER_ROW       | row   | `1..=row-1`      | no                 |
//! | UPPER_DIAG_ROW  | row   | `row..=n`        | yes                |
//! | LOWER_DIAG_ROW  | row   | `1..=row`        | yes                |
//! | UPPER_COL       | col   | `1..=col-1`      | no                 |
//! | LOWER_COL       | col   | `col+1..=n`      | no                 |
//! | UPPER_DIAG_COL  | col   | `1..=col`        | yes                |
//! | LOWER_DIAG_COL  | col   | `col..=n`        | yes                |

use std::ops::RangeInclusive;

use crate::{EdgeWeightFormat, TsplibError};

/// One visited matrix cell, 1-based.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Diagonal cells are consumed from the stream but never become links.
    pub const fn emits(self) -> bool {
        self.row != self.col
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MatrixLayout {
    FullMatrix,
    UpperRow,
    LowerRow,
    UpperDiagRow,
    LowerDiagRow,
    UpperCol,
    LowerCol,
    UpperDiagCol,
    LowerDiagCol,
}

impl MatrixLayout {
    pub const ALL: [Self; 9] = [
        Self::FullMatrix,
        Self::UpperRow,
        Self::LowerRow,
        Self::UpperDiagRow,
        Self::LowerDiagRow,
        Self::UpperCol,
        Self::LowerCol,
        Self::UpperDiagCol,
        Self::LowerDiagCol,
    ];

    /// Only the full matrix can carry asymmetric weights.
    pub const fn is_symmetric(self) -> bool {
        !matches!(self, Self::FullMatrix)
    }

    pub const fn has_diagonal(self) -> bool {
        matches!(
            self,
            Self::FullMatrix
                | Self::UpperDiagRow
                | Self::LowerDiagRow
                | Self::UpperDiagCol
                | Self::LowerDiagCol
        )
    }

    const fn is_column_major(self) -> bool {
        matches!(
            self,
            Self::UpperCol | Self::LowerCol | Self::UpperDiagCol | Self::LowerDiagCol
        )
    }

    /// Number of tokens the layout consumes for `dimension` nodes, or
    /// `usize::MAX` when that count overflows.
    pub const fn cell_count(self, dimension: usize) -> usize {
        match self {
            Self::FullMatrix => square(dimension),
            _ if self.has_diagonal() => triangle(dimension, dimension.saturating_add(1)),
            _ => triangle(dimension, dimension.saturating_sub(1)),
        }
    }

    /// Number of links the layout emits for `dimension` nodes, or
    /// `usize::MAX` when that count overflows.
    pub const fn link_count(self, dimension: usize) -> usize {
        match self {
            Self::FullMatrix => match dimension.checked_mul(dimension) {
                Some(cells) => cells - dimension,
                None => usize::MAX,
            },
            _ => triangle(dimension, dimension.saturating_sub(1)),
        }
    }

    fn inner_range(self, outer: usize, dimension: usize) -> RangeInclusive<usize> {
        match self {
            Self::FullMatrix => 1..=dimension,
            Self::UpperRow | Self::LowerCol => outer + 1..=dimension,
            Self::LowerRow | Self::UpperCol => 1..=outer - 1,
            Self::UpperDiagRow | Self::LowerDiagCol => outer..=dimension,
            Self::LowerDiagRow | Self::UpperDiagCol => 1..=outer,
        }
    }

    /// Lazily yields the cells of an `n x n` matrix in stream order.
    pub fn cells(self, dimension: usize) -> impl Iterator<Item = Cell> {
        let column_major = self.is_column_major();
        (1..=dimension).flat_map(move |outer| {
            self.inner_range(outer, dimension).map(move |inner| {
                if column_major {
                    Cell::new(inner, outer)
                } else {
                    Cell::new(outer, inner)
                }
            })
        })
    }
}

const fn square(n: usize) -> usize {
    match n.checked_mul(n) {
        Some(cells) => cells,
        None => usize::MAX,
    }
}

const fn triangle(n: usize, m: usize) -> usize {
    match n.checked_mul(m) {
        Some(cells) => cells / 2,
        None => usize::MAX,
    }
}

impl TryFrom<EdgeWeightFormat> for MatrixLayout {
    type Error = TsplibError;

    fn try_from(format: EdgeWeightFormat) -> Result<Self, Self::Error> {
        let layout = match format {
            EdgeWeightFormat::FullMatrix => Self::FullMatrix,
            EdgeWeightFormat::UpperRow => Self::UpperRow,
            EdgeWeightFormat::LowerRow => Self::LowerRow,
            EdgeWeightFormat::UpperDiagRow => Self::UpperDiagRow,
            EdgeWeightFormat::LowerDiagRow => Self::LowerDiagRow,
            EdgeWeightFormat::UpperCol => Self::UpperCol,
            EdgeWeightFormat::LowerCol => Self::LowerCol,
            EdgeWeightFormat::UpperDiagCol => Self::UpperDiagCol,
            EdgeWeightFormat::LowerDiagCol => Self::LowerDiagCol,
            EdgeWeightFormat::Function => {
                return Err(TsplibError::unsupported_format(
                    EdgeWeightFormat::KEYWORD,
                    format.to_string(),
                ));
            }
        };
        Ok(layout)
    }
}

impl From<MatrixLayout> for EdgeWeightFormat {
    fn from(layout: MatrixLayout) -> Self {
        match layout {
            MatrixLayout::FullMatrix => Self::FullMatrix,
            MatrixLayout::UpperRow => Self::UpperRow,
            MatrixLayout::LowerRow => Self::LowerRow,
            MatrixLayout::UpperDiagRow => Self::UpperDiagRow,
            MatrixLayout::LowerDiagRow => Self::LowerDiagRow,
            MatrixLayout::UpperCol => Self::UpperCol,
            MatrixLayout::LowerCol => Self::LowerCol,
            MatrixLayout::UpperDiagCol => Self::UpperDiagCol,
            MatrixLayout::LowerDiagCol => Self::LowerDiagCol,
        }
    }
}
