//! Shape module - a piece geometry inside a square bounding box.
//!
//! A shape is a set of (coordinate, block) cells defined relative to an
//! `N x N` bounding box. Rotation is a pure coordinate remap; legality
//! against the board is the caller's concern. `Clone` is a deep copy, so
//! rotation attempts never alias the committed geometry.

use blockfall_types::{Block, Coords};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    bbox_size: i32,
    cells: Vec<(Coords, Block)>,
}

impl Shape {
    /// Build a shape from its cells. Fails on an empty bounding box or
    /// duplicate cell coordinates.
    pub fn new(bbox_size: i32, cells: Vec<(Coords, Block)>) -> Result<Self, ConfigError> {
        if bbox_size < 1 {
            return Err(ConfigError::EmptyBoundingBox);
        }

        for (i, (pos, _)) in cells.iter().enumerate() {
            if cells[..i].iter().any(|(other, _)| other == pos) {
                return Err(ConfigError::DuplicateCells);
            }
        }

        Ok(Self { bbox_size, cells })
    }

    pub fn bbox_size(&self) -> i32 {
        self.bbox_size
    }

    /// True iff the coordinate lies inside the bounding box. Pure
    /// predicate, independent of occupancy.
    pub fn is_valid(&self, vertical: i32, horizontal: i32) -> bool {
        vertical >= 0
            && horizontal >= 0
            && vertical < self.bbox_size
            && horizontal < self.bbox_size
    }

    /// Block at the given relative coordinate, or `None` when unoccupied
    /// (including out-of-box coordinates).
    pub fn get(&self, vertical: i32, horizontal: i32) -> Option<&Block> {
        self.cells
            .iter()
            .find(|(pos, _)| pos.vertical == vertical && pos.horizontal == horizontal)
            .map(|(_, block)| block)
    }

    /// The occupied relative coordinates. Callers must not rely on order.
    pub fn block_positions(&self) -> Vec<Coords> {
        self.cells.iter().map(|(pos, _)| *pos).collect()
    }

    /// The occupied cells with their block markers.
    pub fn blocks(&self) -> &[(Coords, Block)] {
        &self.cells
    }

    /// Quarter turn clockwise: (v, h) -> (h, N-1-v).
    pub fn rotate_right(&mut self) {
        let n = self.bbox_size;
        for (pos, _) in &mut self.cells {
            *pos = Coords::new(pos.horizontal, n - 1 - pos.vertical);
        }
    }

    /// Quarter turn counter-clockwise: (v, h) -> (N-1-h, v).
    pub fn rotate_left(&mut self) {
        let n = self.bbox_size;
        for (pos, _) in &mut self.cells {
            *pos = Coords::new(n - 1 - pos.horizontal, pos.vertical);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_types::PieceKind;
    use std::collections::HashSet;

    fn shape(bbox: i32, coords: &[(i32, i32)]) -> Shape {
        let cells = coords
            .iter()
            .map(|&(v, h)| (Coords::new(v, h), Block::new(PieceKind::T)))
            .collect();
        Shape::new(bbox, cells).unwrap()
    }

    fn position_set(shape: &Shape) -> HashSet<Coords> {
        shape.block_positions().into_iter().collect()
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert_eq!(
            Shape::new(0, Vec::new()).unwrap_err(),
            ConfigError::EmptyBoundingBox
        );

        let dup = vec![
            (Coords::new(0, 0), Block::new(PieceKind::I)),
            (Coords::new(0, 0), Block::new(PieceKind::I)),
        ];
        assert_eq!(Shape::new(3, dup).unwrap_err(), ConfigError::DuplicateCells);
    }

    #[test]
    fn test_is_valid_boundaries() {
        let s = shape(3, &[(0, 0)]);
        for &(v, h, expected) in &[
            (-1, 0, false),
            (0, -1, false),
            (0, 0, true),
            (2, 2, true),
            (3, 0, false),
            (0, 3, false),
        ] {
            assert_eq!(s.is_valid(v, h), expected, "({v}, {h})");
        }
    }

    #[test]
    fn test_get_occupancy() {
        let s = shape(3, &[(0, 1), (1, 1)]);
        assert!(s.get(0, 1).is_some());
        assert!(s.get(1, 1).is_some());
        assert!(s.get(2, 2).is_none());
        assert!(s.get(-1, 0).is_none());
        assert!(s.get(5, 5).is_none());
    }

    #[test]
    fn test_rotate_right_remap() {
        // T piece: rotating right turns the flat-top tee to point left.
        let mut s = shape(3, &[(0, 0), (0, 1), (0, 2), (1, 1)]);
        s.rotate_right();
        let expected: HashSet<Coords> = [(0, 2), (1, 2), (2, 2), (1, 1)]
            .iter()
            .map(|&(v, h)| Coords::new(v, h))
            .collect();
        assert_eq!(position_set(&s), expected);
    }

    #[test]
    fn test_rotations_are_inverse() {
        for bbox in 1..=4 {
            let mut s = shape(bbox, &[(0, 0), (bbox - 1, bbox - 1)]);
            let original = position_set(&s);

            s.rotate_right();
            s.rotate_left();
            assert_eq!(position_set(&s), original);

            s.rotate_left();
            s.rotate_right();
            assert_eq!(position_set(&s), original);
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let original = shape(3, &[(0, 0), (1, 1)]);
        let mut copy = original.clone();
        copy.rotate_right();
        assert_ne!(position_set(&copy), position_set(&original));
        assert_eq!(
            position_set(&original),
            [(0, 0), (1, 1)]
                .iter()
                .map(|&(v, h)| Coords::new(v, h))
                .collect()
        );
    }
}
