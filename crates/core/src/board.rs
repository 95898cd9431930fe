//! Board module - the fixed-size playfield grid.
//!
//! A `height x width` grid of optional block markers. Row index 0 is the
//! visual top. Every operation after construction is total: out-of-range
//! gets return absent, out-of-range sets and row removals are no-ops.

use blockfall_types::{Block, Cell, Coords};

use crate::error::ConfigError;

/// The playfield grid. Dimensions are fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    height: i32,
    width: i32,
    /// Row-major, rows[0] is the top row.
    rows: Vec<Vec<Cell>>,
}

impl Board {
    /// Create an empty board. Fails on zero or negative dimensions.
    pub fn new(height: i32, width: i32) -> Result<Self, ConfigError> {
        if height < 1 {
            return Err(ConfigError::InvalidBoardHeight);
        }
        if width < 1 {
            return Err(ConfigError::InvalidBoardWidth);
        }

        Ok(Self {
            height,
            width,
            rows: vec![vec![None; width as usize]; height as usize],
        })
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    /// Whether (vertical, horizontal) addresses a stored cell.
    pub fn is_inside(&self, vertical: i32, horizontal: i32) -> bool {
        vertical >= 0 && vertical < self.height && horizontal >= 0 && horizontal < self.width
    }

    /// Block at the given position, or `None` when empty or out of range.
    pub fn get(&self, vertical: i32, horizontal: i32) -> Option<&Block> {
        if !self.is_inside(vertical, horizontal) {
            return None;
        }
        self.rows[vertical as usize][horizontal as usize].as_ref()
    }

    /// Convenience accessor taking a coordinate pair.
    pub fn get_at(&self, pos: Coords) -> Option<&Block> {
        self.get(pos.vertical, pos.horizontal)
    }

    /// Replace the cell at the given position. No-op when out of range.
    pub fn set(&mut self, vertical: i32, horizontal: i32, cell: Cell) {
        if !self.is_inside(vertical, horizontal) {
            return;
        }
        self.rows[vertical as usize][horizontal as usize] = cell;
    }

    pub fn set_at(&mut self, pos: Coords, cell: Cell) {
        self.set(pos.vertical, pos.horizontal, cell);
    }

    /// True when every cell of the row is occupied. Out-of-range rows are
    /// never full.
    pub fn is_row_full(&self, row: i32) -> bool {
        if row < 0 || row >= self.height {
            return false;
        }
        self.rows[row as usize].iter().all(|cell| cell.is_some())
    }

    /// Delete the given row and insert a fresh empty row at the top.
    ///
    /// Rows above the removed one keep their relative order and shift down
    /// by one; rows below are untouched. Height is invariant. No-op when
    /// the row index is out of range.
    pub fn remove_row(&mut self, row: i32) {
        if row < 0 || row >= self.height {
            return;
        }
        self.rows.remove(row as usize);
        self.rows.insert(0, vec![None; self.width as usize]);
    }

    /// Set every cell to absent.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            for cell in row {
                *cell = None;
            }
        }
    }
}
