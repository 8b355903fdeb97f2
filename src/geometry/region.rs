//! Missing-region geometry and observation masks

use crate::io::error::{InpaintError, Result, invalid_parameter};
use bitvec::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Inclusive rectangle of unobserved pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingRegion {
    row_min: usize,
    row_max: usize,
    col_min: usize,
    col_max: usize,
}

impl MissingRegion {
    /// Create a region from inclusive row and column bounds
    ///
    /// # Errors
    ///
    /// Returns an error if a minimum exceeds its maximum.
    pub fn new(row_min: usize, row_max: usize, col_min: usize, col_max: usize) -> Result<Self> {
        if row_min > row_max || col_min > col_max {
            return Err(invalid_parameter(
                "region",
                &format!("{row_min},{row_max},{col_min},{col_max}"),
                &"minimum bounds must not exceed maximum bounds",
            ));
        }
        Ok(Self {
            row_min,
            row_max,
            col_min,
            col_max,
        })
    }

    /// Whether a (possibly out-of-image) position lies inside the rectangle
    pub fn contains(&self, row: isize, col: isize) -> bool {
        let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
            return false;
        };
        (self.row_min..=self.row_max).contains(&row) && (self.col_min..=self.col_max).contains(&col)
    }

    /// Inclusive row bounds
    pub const fn rows(&self) -> (usize, usize) {
        (self.row_min, self.row_max)
    }

    /// Inclusive column bounds
    pub const fn cols(&self) -> (usize, usize) {
        (self.col_min, self.col_max)
    }
}

impl fmt::Display for MissingRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.row_min, self.row_max, self.col_min, self.col_max
        )
    }
}

impl FromStr for MissingRegion {
    type Err = InpaintError;

    /// Parse `row_min,row_max,col_min,col_max`
    fn from_str(s: &str) -> Result<Self> {
        let bounds = s
            .split(',')
            .map(|part| part.trim().parse::<usize>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| invalid_parameter("region", &s, &e))?;

        match bounds.as_slice() {
            &[row_min, row_max, col_min, col_max] => Self::new(row_min, row_max, col_min, col_max),
            _ => Err(invalid_parameter(
                "region",
                &s,
                &"expected four comma-separated bounds: row_min,row_max,col_min,col_max",
            )),
        }
    }
}

/// Per-pixel observed flags for an image
///
/// Positions outside the image count as observed, so border pixels never
/// join the segment because of pixels that do not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationMask {
    rows: usize,
    cols: usize,
    observed: BitVec,
}

impl ObservationMask {
    /// Build a mask from an arbitrary observed predicate
    pub fn from_predicate<F>(rows: usize, cols: usize, is_observed: F) -> Self
    where
        F: Fn(usize, usize) -> bool,
    {
        let mut observed = bitvec![0; rows * cols];
        for row in 0..rows {
            for col in 0..cols {
                observed.set(row * cols + col, is_observed(row, col));
            }
        }
        Self {
            rows,
            cols,
            observed,
        }
    }

    /// Mask where every pixel inside `region` is unobserved
    pub fn from_region(rows: usize, cols: usize, region: &MissingRegion) -> Self {
        Self::from_predicate(rows, cols, |row, col| {
            !region.contains(row as isize, col as isize)
        })
    }

    /// Mask dimensions (rows, cols)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether the pixel is observed; positions outside the image are
    pub fn is_observed(&self, row: isize, col: isize) -> bool {
        let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
            return true;
        };
        if row >= self.rows || col >= self.cols {
            return true;
        }
        self.observed
            .get(row * self.cols + col)
            .as_deref()
            .copied()
            .unwrap_or(true)
    }

    /// Whether the pixel is unobserved or 4-adjacent to an unobserved pixel
    pub fn in_segment(&self, row: isize, col: isize) -> bool {
        !self.is_observed(row, col)
            || !self.is_observed(row - 1, col)
            || !self.is_observed(row, col - 1)
            || !self.is_observed(row + 1, col)
            || !self.is_observed(row, col + 1)
    }

    /// Number of unobserved pixels
    pub fn unobserved_count(&self) -> usize {
        self.observed.count_zeros()
    }

    /// Number of pixels in the update segment
    pub fn segment_count(&self) -> usize {
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .filter(|&(row, col)| self.in_segment(row as isize, col as isize))
            .count()
    }
}
