//! The seven canonical tetromino geometries.
//!
//! The engine is agnostic to catalog size and content; this module is the
//! collaborator-supplied standard catalog. I uses a 4x4 bounding box, the
//! rest use 3x3.

use blockfall_types::{Block, Coords, PieceKind};

use crate::shape::Shape;

/// Bounding-box side and occupied cells for one piece kind.
fn geometry(kind: PieceKind) -> (i32, [(i32, i32); 4]) {
    match kind {
        PieceKind::I => (4, [(0, 1), (1, 1), (2, 1), (3, 1)]),
        PieceKind::O => (3, [(1, 1), (1, 2), (2, 1), (2, 2)]),
        PieceKind::T => (3, [(0, 0), (0, 1), (0, 2), (1, 1)]),
        PieceKind::S => (3, [(0, 1), (0, 2), (1, 0), (1, 1)]),
        PieceKind::Z => (3, [(0, 0), (0, 1), (1, 1), (1, 2)]),
        PieceKind::J => (3, [(0, 1), (1, 1), (2, 1), (2, 0)]),
        PieceKind::L => (3, [(0, 1), (1, 1), (2, 1), (2, 2)]),
    }
}

/// The template shape for one piece kind.
pub fn shape_for(kind: PieceKind) -> Shape {
    let (bbox_size, cells) = geometry(kind);
    let cells = cells
        .iter()
        .map(|&(v, h)| (Coords::new(v, h), Block::new(kind)))
        .collect();
    // The geometries above are closed, in-box and duplicate-free.
    Shape::new(bbox_size, cells).expect("canonical tetromino geometry is valid")
}

/// All seven standard templates, one per piece kind.
pub fn standard_catalog() -> Vec<Shape> {
    PieceKind::ALL.iter().copied().map(shape_for).collect()
}
