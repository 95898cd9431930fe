//! GameBoard module - collision, landing, locking and row clearing.
//!
//! Composes the board with the currently falling shape and its
//! board-relative anchor. A configurable buffer of hidden rows above row 0
//! lets freshly spawned pieces exist above the visible board: validity
//! accepts a position when it lies in the visible box or would after being
//! translated down by the hidden-row count.

use blockfall_types::Coords;

use crate::board::Board;
use crate::shape::Shape;

#[derive(Debug, Clone)]
pub struct GameBoard {
    board: Board,
    current: Option<Shape>,
    position: Coords,
    hidden_rows: i32,
}

impl GameBoard {
    /// Wrap a board with an empty current-shape slot. A negative hidden-row
    /// count is clamped to zero.
    pub fn new(board: Board, hidden_rows: i32) -> Self {
        Self {
            board,
            current: None,
            position: Coords::default(),
            hidden_rows: hidden_rows.max(0),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hidden_rows(&self) -> i32 {
        self.hidden_rows
    }

    pub fn current_shape(&self) -> Option<&Shape> {
        self.current.as_ref()
    }

    pub fn set_current_shape(&mut self, shape: Option<Shape>) {
        self.current = shape;
    }

    pub fn position(&self) -> Coords {
        self.position
    }

    pub fn set_position(&mut self, position: Coords) {
        self.position = position;
    }

    /// The current shape's occupied coordinates translated to board space.
    /// Empty when no shape is falling.
    pub fn absolute_positions(&self) -> Vec<Coords> {
        match &self.current {
            Some(shape) => shape
                .block_positions()
                .into_iter()
                .map(|pos| self.position + pos)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether the current shape sits at a legal position: every cell either
    /// inside the visible board or inside the hidden spawn buffer above it,
    /// and no visible cell already occupied.
    pub fn is_at_valid_pos(&self) -> bool {
        match &self.current {
            Some(shape) => self.shape_fits(shape, self.position),
            None => true,
        }
    }

    /// True when advancing the current shape one row down would be illegal:
    /// some cell rests on the board's bottom edge or on an occupied cell.
    pub fn has_landed(&self) -> bool {
        match &self.current {
            Some(shape) => self.shape_landed(shape, self.position),
            None => false,
        }
    }

    /// The position the current shape would occupy after falling straight
    /// down. Pure query; the shape is not moved.
    pub fn where_would_land(&self) -> Coords {
        let Some(shape) = &self.current else {
            return self.position;
        };

        let mut trial = self.position;
        while !self.shape_landed(shape, trial) {
            trial += Coords::DOWN;
        }
        trial
    }

    /// Write the current shape's blocks into the board and clear the
    /// current-shape slot. Cells still inside the hidden buffer fall off
    /// silently. No-op when nothing is falling.
    pub fn lock(&mut self) {
        let Some(shape) = self.current.take() else {
            return;
        };
        for (pos, block) in shape.blocks() {
            self.board.set_at(self.position + *pos, Some(*block));
        }
    }

    /// Remove every completely filled row, returning how many were removed.
    ///
    /// Each removal re-inserts an empty row at the top and leaves rows below
    /// the removed one unshifted, so the scan keeps its index after a
    /// removal: the row now at that index was already examined.
    pub fn remove_filled_rows(&mut self) -> u32 {
        let mut removed = 0;
        let mut row = 0;
        while row < self.board.height() {
            if self.board.is_row_full(row) {
                self.board.remove_row(row);
                removed += 1;
            } else {
                row += 1;
            }
        }
        removed
    }

    /// Rotate the current shape counter-clockwise if the rotated geometry
    /// fits at the unchanged position; otherwise leave it untouched.
    pub fn rotate_left(&mut self) {
        self.try_rotate(Shape::rotate_left);
    }

    /// Rotate the current shape clockwise if the rotated geometry fits at
    /// the unchanged position; otherwise leave it untouched.
    pub fn rotate_right(&mut self) {
        self.try_rotate(Shape::rotate_right);
    }

    pub fn move_up(&mut self) {
        self.try_move(Coords::UP);
    }

    pub fn move_down(&mut self) {
        self.try_move(Coords::DOWN);
    }

    pub fn move_left(&mut self) {
        self.try_move(Coords::LEFT);
    }

    pub fn move_right(&mut self) {
        self.try_move(Coords::RIGHT);
    }

    /// Empty the board and the current-shape slot. The position is left
    /// unchanged; callers reposition explicitly on the next spawn.
    pub fn clear(&mut self) {
        self.board.clear();
        self.current = None;
    }

    /// Rotate-and-check: commit only when the rotated clone still fits.
    fn try_rotate(&mut self, rotate: fn(&mut Shape)) {
        let Some(shape) = &self.current else {
            return;
        };

        let mut rotated = shape.clone();
        rotate(&mut rotated);
        if self.shape_fits(&rotated, self.position) {
            self.current = Some(rotated);
        }
    }

    /// Translate by one unit, rolling back when the result is invalid.
    fn try_move(&mut self, offset: Coords) {
        let original = self.position;
        self.position += offset;
        if !self.is_at_valid_pos() {
            self.position = original;
        }
    }

    fn shape_fits(&self, shape: &Shape, at: Coords) -> bool {
        shape.block_positions().into_iter().all(|pos| {
            let abs = at + pos;
            let visible = self.board.is_inside(abs.vertical, abs.horizontal);
            let in_buffer = self
                .board
                .is_inside(abs.vertical + self.hidden_rows, abs.horizontal);
            if !visible && !in_buffer {
                return false;
            }
            !(visible && self.board.get_at(abs).is_some())
        })
    }

    fn shape_landed(&self, shape: &Shape, at: Coords) -> bool {
        shape.block_positions().into_iter().any(|pos| {
            let abs = at + pos;
            abs.vertical + 1 >= self.board.height()
                || self.board.get(abs.vertical + 1, abs.horizontal).is_some()
        })
    }
}
