//! Cube orientation model: faces, colors, and the two generator moves.
//!
//! A cube has 24 possible orientations in 3D space (the rotation group of a
//! cube). Two quarter-turn generators are enough to reach all of them, so
//! instead of enumerating orientations directly the model exposes the two
//! generators plus [`ORIENTATION_TOUR`], a fixed walk that takes a layer
//! through every orientation one quarter-turn at a time and ends back where
//! it started.

use std::fmt;

/// One of the six labeled positions on a cube.
///
/// The discriminant order matches the layer input format: Right, Left, Top,
/// Bottom, Back, Front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum Face {
    Right = 0,
    Left = 1,
    Top = 2,
    Bottom = 3,
    Back = 4,
    Front = 5,
}

impl Face {
    /// All six faces, in input order.
    pub const ALL: [Face; 6] = [
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
        Face::Back,
        Face::Front,
    ];

    /// The four faces visible on the side of a stack. Top and Bottom are
    /// caps between layers and never count toward a solution.
    pub const LATERAL: [Face; 4] = [Face::Left, Face::Front, Face::Right, Face::Back];
}

/// A face color, named by a single character (the classic puzzle uses
/// 'R', 'G', 'W' and 'B').
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub char);

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rotation axis of a generator move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Cycles Top -> Right -> Bottom -> Left; Back and Front stay put.
    Vertical,
    /// Cycles Top -> Back -> Bottom -> Front; Left and Right stay put.
    Horizontal,
}

/// Turn direction along an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spin {
    /// The cycle direction named on [`Axis`].
    Forward,
    /// The opposite direction.
    Reverse,
}

impl Spin {
    fn flipped(self) -> Spin {
        match self {
            Spin::Forward => Spin::Reverse,
            Spin::Reverse => Spin::Forward,
        }
    }
}

/// A single quarter-turn of one layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub axis: Axis,
    pub spin: Spin,
}

impl Move {
    /// The move that exactly undoes this one: same axis, opposite spin.
    pub fn inverse(self) -> Move {
        Move {
            axis: self.axis,
            spin: self.spin.flipped(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match (self.axis, self.spin) {
            (Axis::Vertical, Spin::Forward) => "V+",
            (Axis::Vertical, Spin::Reverse) => "V-",
            (Axis::Horizontal, Spin::Forward) => "H+",
            (Axis::Horizontal, Spin::Reverse) => "H-",
        };
        write!(f, "{name}")
    }
}

/// One cube in the stack: the mapping from each face to the color shown
/// there. Moves permute the mapping in place; they never add or drop a
/// color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Layer {
    faces: [Color; 6],
}

impl Layer {
    pub fn new(faces: [Color; 6]) -> Self {
        Self { faces }
    }

    /// The color currently shown on `face`.
    #[inline]
    pub fn color(&self, face: Face) -> Color {
        self.faces[face as usize]
    }

    /// All six face colors, in [`Face::ALL`] order.
    pub fn colors(&self) -> &[Color; 6] {
        &self.faces
    }

    /// Applies one quarter-turn in place.
    pub fn apply(&mut self, mv: Move) {
        match (mv.axis, mv.spin) {
            (Axis::Vertical, Spin::Forward) => {
                self.cycle(Face::Top, Face::Right, Face::Bottom, Face::Left)
            }
            (Axis::Vertical, Spin::Reverse) => {
                self.cycle(Face::Left, Face::Bottom, Face::Right, Face::Top)
            }
            (Axis::Horizontal, Spin::Forward) => {
                self.cycle(Face::Top, Face::Back, Face::Bottom, Face::Front)
            }
            (Axis::Horizontal, Spin::Reverse) => {
                self.cycle(Face::Front, Face::Bottom, Face::Back, Face::Top)
            }
        }
    }

    /// Moves the color on `a` to `b`, `b` to `c`, `c` to `d` and `d` to `a`.
    #[inline]
    fn cycle(&mut self, a: Face, b: Face, c: Face, d: Face) {
        let last = self.faces[d as usize];
        self.faces[d as usize] = self.faces[c as usize];
        self.faces[c as usize] = self.faces[b as usize];
        self.faces[b as usize] = self.faces[a as usize];
        self.faces[a as usize] = last;
    }
}

const V: Move = Move {
    axis: Axis::Vertical,
    spin: Spin::Forward,
};
const VR: Move = Move {
    axis: Axis::Vertical,
    spin: Spin::Reverse,
};
const H: Move = Move {
    axis: Axis::Horizontal,
    spin: Spin::Forward,
};
const HR: Move = Move {
    axis: Axis::Horizontal,
    spin: Spin::Reverse,
};

/// A fixed walk through all 24 orientations of a layer.
///
/// Applying the first k moves (k = 0..=23) to any starting layer produces
/// 24 distinct face mappings; applying all 24 returns the layer to its
/// starting mapping exactly. Every element is a single quarter-turn, so an
/// animation can play the walk move by move.
///
/// Layout: five blocks of three vertical turns plus a horizontal
/// transition, then a reversed block that closes the loop.
pub const ORIENTATION_TOUR: [Move; 24] = [
    V, V, V, H, //
    V, V, V, H, //
    V, V, V, HR, //
    V, V, V, HR, //
    V, V, V, H, //
    VR, VR, VR, HR,
];

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashSet;

    use super::*;

    /// A layer with six distinct colors, so every orientation has a unique
    /// face mapping.
    fn rainbow() -> Layer {
        "RGBWYO".parse().expect("six colors")
    }

    #[test]
    fn test_each_move_is_undone_by_its_inverse() {
        for axis in [Axis::Vertical, Axis::Horizontal] {
            for spin in [Spin::Forward, Spin::Reverse] {
                let mv = Move { axis, spin };
                let start = rainbow();
                let mut layer = start;
                layer.apply(mv);
                assert_ne!(layer, start, "{mv} should change the mapping");
                layer.apply(mv.inverse());
                assert_eq!(layer, start, "{mv} then its inverse should restore");
            }
        }
    }

    #[test]
    fn test_each_move_has_period_four() {
        for axis in [Axis::Vertical, Axis::Horizontal] {
            let mv = Move {
                axis,
                spin: Spin::Forward,
            };
            let start = rainbow();
            let mut layer = start;
            for turn in 1..=4 {
                layer.apply(mv);
                if turn < 4 {
                    assert_ne!(layer, start);
                }
            }
            assert_eq!(layer, start);
        }
    }

    #[test]
    fn test_move_sequence_reversed_inverses_restore() {
        let sequence = [V, H, H, VR, HR, V, V, H];
        let start = rainbow();
        let mut layer = start;
        for &mv in &sequence {
            layer.apply(mv);
        }
        for &mv in sequence.iter().rev() {
            layer.apply(mv.inverse());
        }
        assert_eq!(layer, start);
    }

    #[test]
    fn test_moves_only_permute_colors() {
        let start = rainbow();
        let mut layer = start;
        for &mv in &ORIENTATION_TOUR {
            layer.apply(mv);
            let mut seen: Vec<Color> = layer.colors().to_vec();
            let mut expected: Vec<Color> = start.colors().to_vec();
            seen.sort_by_key(|c| c.0);
            expected.sort_by_key(|c| c.0);
            assert_eq!(seen, expected);
        }
    }

    #[test]
    fn test_tour_visits_all_orientations_and_closes() {
        let start = rainbow();
        let mut layer = start;
        let mut seen = FxHashSet::default();
        seen.insert(layer);
        for (index, &mv) in ORIENTATION_TOUR.iter().enumerate() {
            layer.apply(mv);
            if index < ORIENTATION_TOUR.len() - 1 {
                assert!(
                    seen.insert(layer),
                    "orientation repeated after move {}",
                    index + 1
                );
            }
        }
        assert_eq!(layer, start, "tour should end where it began");
        assert_eq!(seen.len(), 24);
    }

    #[test]
    fn test_lateral_faces_exclude_caps() {
        assert!(!Face::LATERAL.contains(&Face::Top));
        assert!(!Face::LATERAL.contains(&Face::Bottom));
        assert_eq!(Face::LATERAL.len(), 4);
    }
}
