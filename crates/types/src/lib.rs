//! Core types shared across the blockfall crates.
//! This crate contains pure data types with no external dependencies.

use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Default playfield dimensions used by the interactive binary.
pub const DEFAULT_BOARD_HEIGHT: i32 = 18;
pub const DEFAULT_BOARD_WIDTH: i32 = 10;

/// Default number of hidden spawn-buffer rows above the visible board.
pub const DEFAULT_HIDDEN_ROWS: i32 = 2;

/// Default gravity interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 700;

/// Identifier delivered by an input collaborator (key code, button id, ...).
pub type InputId = i32;

/// A 2D integer offset as (vertical, horizontal).
///
/// Row 0 is the visual top of the board; negative verticals address the
/// hidden spawn buffer above it. Plain value type with component-wise
/// translation arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coords {
    pub vertical: i32,
    pub horizontal: i32,
}

impl Coords {
    pub const UP: Coords = Coords::new(-1, 0);
    pub const DOWN: Coords = Coords::new(1, 0);
    pub const LEFT: Coords = Coords::new(0, -1);
    pub const RIGHT: Coords = Coords::new(0, 1);

    pub const fn new(vertical: i32, horizontal: i32) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

impl Add for Coords {
    type Output = Coords;

    fn add(self, rhs: Coords) -> Coords {
        Coords::new(self.vertical + rhs.vertical, self.horizontal + rhs.horizontal)
    }
}

impl AddAssign for Coords {
    fn add_assign(&mut self, rhs: Coords) {
        self.vertical += rhs.vertical;
        self.horizontal += rhs.horizontal;
    }
}

impl Sub for Coords {
    type Output = Coords;

    fn sub(self, rhs: Coords) -> Coords {
        Coords::new(self.vertical - rhs.vertical, self.horizontal - rhs.horizontal)
    }
}

impl SubAssign for Coords {
    fn sub_assign(&mut self, rhs: Coords) {
        self.vertical -= rhs.vertical;
        self.horizontal -= rhs.horizontal;
    }
}

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// An opaque marker occupying one board cell.
///
/// The engine only cares about present/absent; the kind tag exists so a
/// renderer can color locked cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    kind: PieceKind,
}

impl Block {
    pub const fn new(kind: PieceKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }
}

/// Cell on the board (None = empty, Some = filled with a block marker)
pub type Cell = Option<Block>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords_translation() {
        let a = Coords::new(2, -3);
        let b = Coords::new(-1, 5);

        assert_eq!(a + b, Coords::new(1, 2));
        assert_eq!(a - b, Coords::new(3, -8));

        let mut c = a;
        c += Coords::DOWN;
        assert_eq!(c, Coords::new(3, -3));
        c -= Coords::RIGHT;
        assert_eq!(c, Coords::new(3, -4));
    }

    #[test]
    fn test_unit_offsets() {
        let origin = Coords::default();
        assert_eq!(origin + Coords::UP, Coords::new(-1, 0));
        assert_eq!(origin + Coords::DOWN, Coords::new(1, 0));
        assert_eq!(origin + Coords::LEFT, Coords::new(0, -1));
        assert_eq!(origin + Coords::RIGHT, Coords::new(0, 1));
    }

    #[test]
    fn test_piece_kind_as_str() {
        assert_eq!(PieceKind::I.as_str(), "i");
        assert_eq!(PieceKind::L.as_str(), "l");
        assert_eq!(PieceKind::ALL.len(), 7);
    }
}
