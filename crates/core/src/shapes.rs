//! Shape library - piece offsets and quarter-turn rotation
//!
//! Shapes are stored once in their canonical orientation (see
//! [`ShapeKind::offsets`]); every other orientation is computed on demand by
//! rotating each offset and re-normalizing so the minimum offset is `(0, 0)`.

use crate::types::{Offset, RotateDirection, ShapeKind, ShapeOffsets};

/// Rotate a single offset by a fixed quarter turn.
///
/// - right (90° clockwise): `(x, y) -> (-y, x)`
/// - left (90° counter-clockwise): `(x, y) -> (y, -x)`
/// - half (180°): `(x, y) -> (-x, -y)`
pub fn rotate_offset((x, y): Offset, direction: RotateDirection) -> Offset {
    match direction {
        RotateDirection::Right => (-y, x),
        RotateDirection::Left => (y, -x),
        RotateDirection::Half => (-x, -y),
    }
}

/// Translate offsets so the smallest x and the smallest y are both 0.
pub fn normalize(offsets: ShapeOffsets) -> ShapeOffsets {
    let min_x = offsets.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = offsets.iter().map(|&(_, y)| y).min().unwrap_or(0);
    offsets.map(|(x, y)| (x - min_x, y - min_y))
}

/// Rotate a whole shape and re-anchor it at its own origin.
pub fn rotate_shape(offsets: &ShapeOffsets, direction: RotateDirection) -> ShapeOffsets {
    normalize(offsets.map(|offset| rotate_offset(offset, direction)))
}

/// Canonical shape turned clockwise `quarter_turns` times (mod 4).
pub fn oriented_shape(kind: ShapeKind, quarter_turns: u8) -> ShapeOffsets {
    let offsets = kind.offsets();
    match quarter_turns % 4 {
        0 => offsets,
        1 => rotate_shape(&offsets, RotateDirection::Right),
        2 => rotate_shape(&offsets, RotateDirection::Half),
        _ => rotate_shape(&offsets, RotateDirection::Left),
    }
}

/// Width in cells of a normalized shape
pub fn shape_width(offsets: &ShapeOffsets) -> i32 {
    offsets.iter().map(|&(x, _)| x).max().unwrap_or(0) + 1
}

/// Height in cells of a normalized shape
pub fn shape_height(offsets: &ShapeOffsets) -> i32 {
    offsets.iter().map(|&(_, y)| y).max().unwrap_or(0) + 1
}

/// Order-independent comparison; rotation may permute the offsets.
pub fn same_cells(a: &ShapeOffsets, b: &ShapeOffsets) -> bool {
    let mut a = *a;
    let mut b = *b;
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_formulas() {
        assert_eq!(rotate_offset((1, 2), RotateDirection::Right), (-2, 1));
        assert_eq!(rotate_offset((1, 2), RotateDirection::Left), (2, -1));
        assert_eq!(rotate_offset((1, 2), RotateDirection::Half), (-1, -2));
    }

    #[test]
    fn line_turns_vertical() {
        let vertical = rotate_shape(&ShapeKind::Line.offsets(), RotateDirection::Right);
        assert_eq!(vertical, [(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(shape_width(&vertical), 1);
        assert_eq!(shape_height(&vertical), 4);
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        for kind in ShapeKind::ALL {
            for direction in [RotateDirection::Right, RotateDirection::Left] {
                let mut shape = kind.offsets();
                for _ in 0..4 {
                    shape = rotate_shape(&shape, direction);
                }
                assert_eq!(shape, kind.offsets(), "{:?} {:?}", kind, direction);
            }
        }
    }

    #[test]
    fn left_undoes_right() {
        for kind in ShapeKind::ALL {
            let turned = rotate_shape(&kind.offsets(), RotateDirection::Right);
            let back = rotate_shape(&turned, RotateDirection::Left);
            assert!(same_cells(&back, &kind.offsets()), "{:?}", kind);
        }
    }

    #[test]
    fn half_turn_equals_two_quarter_turns() {
        for kind in ShapeKind::ALL {
            let twice = rotate_shape(
                &rotate_shape(&kind.offsets(), RotateDirection::Right),
                RotateDirection::Right,
            );
            let half = rotate_shape(&kind.offsets(), RotateDirection::Half);
            assert!(same_cells(&twice, &half), "{:?}", kind);
        }
    }

    #[test]
    fn rotated_shapes_stay_normalized() {
        for kind in ShapeKind::ALL {
            for turns in 0..4 {
                let shape = oriented_shape(kind, turns);
                assert_eq!(normalize(shape), shape);
                assert!(shape.iter().all(|&(x, y)| x >= 0 && y >= 0));
            }
        }
    }

    #[test]
    fn square_is_rotation_invariant() {
        for turns in 0..4 {
            assert!(same_cells(
                &oriented_shape(ShapeKind::Square, turns),
                &ShapeKind::Square.offsets()
            ));
        }
    }
}
