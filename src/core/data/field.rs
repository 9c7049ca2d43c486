use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    InvalidSize {
        width: u32,
        height: u32,
    },
    CellOutsideBounds {
        cell: Point,
        width: u32,
        height: u32,
    },
    RowLengthMismatch {
        row_length: usize,
        width: u32,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "field size must fit in memory and be non-zero: {}x{}", width, height)
            }
            Self::CellOutsideBounds {
                cell,
                width,
                height,
            } => {
                write!(
                    f,
                    "cell at x:{}, y:{} outside of field bounds {}x{}",
                    cell.x, cell.y, width, height
                )
            }
            Self::RowLengthMismatch { row_length, width } => {
                write!(
                    f,
                    "row of length {} does not match field width {}",
                    row_length, width
                )
            }
        }
    }
}

impl Error for FieldError {}

/// Dense row-major grid of per-pixel iteration counts.
///
/// Dimensions are fixed at construction for the process lifetime; a
/// navigation event zeroes the cells rather than reallocating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    width: u32,
    height: u32,
    cells: Vec<u32>,
}

impl Field {
    pub fn new(width: u32, height: u32) -> Result<Self, FieldError> {
        let cell_count = (width as usize)
            .checked_mul(height as usize)
            .filter(|_| width > 0 && height > 0)
            .ok_or(FieldError::InvalidSize { width, height })?;

        Ok(Self {
            width,
            height,
            cells: vec![0; cell_count],
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn contains(&self, cell: Point) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as u32) < self.width
            && (cell.y as u32) < self.height
    }

    pub fn get(&self, cell: Point) -> Result<u32, FieldError> {
        let index = self.index_of(cell)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, cell: Point, count: u32) -> Result<(), FieldError> {
        let index = self.index_of(cell)?;
        self.cells[index] = count;
        Ok(())
    }

    /// Replaces one row of cells. `row` must span the full field width.
    pub fn copy_row(&mut self, y: u32, row: &[u32]) -> Result<(), FieldError> {
        if y >= self.height {
            return Err(FieldError::CellOutsideBounds {
                cell: Point { x: 0, y: y as i32 },
                width: self.width,
                height: self.height,
            });
        }

        if row.len() != self.width as usize {
            return Err(FieldError::RowLengthMismatch {
                row_length: row.len(),
                width: self.width,
            });
        }

        let start = (y * self.width) as usize;
        self.cells[start..start + self.width as usize].copy_from_slice(row);
        Ok(())
    }

    /// Zeroes every cell in place; the buffer is never reallocated.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    fn index_of(&self, cell: Point) -> Result<usize, FieldError> {
        if !self.contains(cell) {
            return Err(FieldError::CellOutsideBounds {
                cell,
                width: self.width,
                height: self.height,
            });
        }

        Ok((cell.y as u32 * self.width + cell.x as u32) as usize)
    }
}
