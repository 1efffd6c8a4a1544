//! Slice turns: permuting facelet colors when a slice rotates.

use rand::Rng;

use crate::cube::{slice_indices, Axis, CubeGrid, Face, GridIndex, SubCube, CUBE_DIM};

/// Number of random slice picks made by [`CubeGrid::scramble`]
pub(crate) const SCRAMBLE_MOVES: usize = 10;

/// Some number of quarter turns of one slice, each +90 degrees about the
/// positive axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Turn {
    pub(crate) axis: Axis,
    pub(crate) slice: usize,
    /// 0..=3
    pub(crate) quarter_turns: u8,
}

#[cfg(test)]
impl Turn {
    pub(crate) fn inverse(self) -> Self {
        Self {
            quarter_turns: (4 - self.quarter_turns % 4) % 4,
            ..self
        }
    }
}

/// Grid position a sub-cube moves to under a +90 degree rotation about `axis`.
fn rotate_index(index: GridIndex, axis: Axis) -> GridIndex {
    let (u, v) = axis.perpendicular();
    let mut rotated = index;
    rotated[u.index()] = CUBE_DIM - 1 - index[v.index()];
    rotated[v.index()] = index[u.index()];
    rotated
}

impl CubeGrid {
    /// Rotates the colors of one slice by 90 degrees, counter-clockwise when
    /// looking from the positive end of `axis` towards the origin.
    pub(crate) fn rotate_slice_colors(&mut self, axis: Axis, slice: usize) {
        let before: Vec<(GridIndex, SubCube)> = slice_indices(axis, slice)
            .map(|index| (index, *self.cube(index)))
            .collect();

        for (index, cube) in before {
            let target = self.cube_mut(rotate_index(index, axis));
            for face in Face::ALL {
                target.facelets[face.rotated(axis).index()] = cube.facelet(face);
            }
        }
    }

    pub(crate) fn apply(&mut self, turn: Turn) {
        for _ in 0..turn.quarter_turns % 4 {
            self.rotate_slice_colors(turn.axis, turn.slice);
        }
    }

    /// Snaps a dragged slice to the nearest quarter turn and applies it.
    ///
    /// `spin_angle` is in degrees within [0, 360). Returns how many quarter turns
    /// were applied; angles within 45 degrees of a full revolution apply none.
    pub(crate) fn commit_turn(&mut self, axis: Axis, slice: usize, spin_angle: f32) -> u8 {
        let mut angle = spin_angle;
        let mut quarter_turns = 0;
        while angle > 45.0 && angle <= 315.0 {
            self.rotate_slice_colors(axis, slice);
            angle -= 90.0;
            quarter_turns += 1;
        }
        quarter_turns
    }

    /// Applies [`SCRAMBLE_MOVES`] random slice turns and returns them in order.
    pub(crate) fn scramble(&mut self, rng: &mut impl Rng) -> Vec<Turn> {
        let turns: Vec<Turn> = (0..SCRAMBLE_MOVES)
            .map(|_| Turn {
                axis: Axis::ALL[rng.gen_range(0..Axis::ALL.len())],
                slice: rng.gen_range(0..CUBE_DIM),
                quarter_turns: rng.gen_range(0..4),
            })
            .collect();
        for &turn in &turns {
            self.apply(turn);
        }
        turns
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::cube::Color;

    fn scrambled(seed: u64) -> CubeGrid {
        let mut grid = CubeGrid::new();
        grid.scramble(&mut StdRng::seed_from_u64(seed));
        grid
    }

    #[test]
    fn four_quarter_turns_restore_every_slice() {
        for seed in 0..4 {
            let start = scrambled(seed);
            for axis in Axis::ALL {
                for slice in 0..CUBE_DIM {
                    let mut grid = start.clone();
                    for _ in 0..4 {
                        grid.rotate_slice_colors(axis, slice);
                    }
                    assert_eq!(grid, start, "{axis:?} slice {slice}");
                }
            }
        }
    }

    #[test]
    fn three_quarter_turns_undo_one() {
        let start = scrambled(7);
        for axis in Axis::ALL {
            for slice in 0..CUBE_DIM {
                let mut grid = start.clone();
                grid.rotate_slice_colors(axis, slice);
                grid.apply(Turn {
                    axis,
                    slice,
                    quarter_turns: 3,
                });
                assert_eq!(grid, start);
            }
        }
    }

    #[test]
    fn turns_conserve_colors() {
        let mut grid = CubeGrid::new();
        let counts = grid.color_counts();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let axis = Axis::ALL[rng.gen_range(0..3)];
            grid.rotate_slice_colors(axis, rng.gen_range(0..CUBE_DIM));
            assert_eq!(grid.color_counts(), counts);
        }
    }

    #[test]
    fn left_slice_turn_moves_top_to_front() {
        let mut grid = CubeGrid::new();
        grid.rotate_slice_colors(Axis::X, 0);

        for n in 0..CUBE_DIM {
            assert_eq!(grid.cube([0, n, 2]).facelet(Face::Front), Color::Magenta);
            assert_eq!(grid.cube([0, 2, n]).facelet(Face::Top), Color::Cyan);
            assert_eq!(grid.cube([0, n, 0]).facelet(Face::Back), Color::Yellow);
            assert_eq!(grid.cube([0, 0, n]).facelet(Face::Bottom), Color::Green);
        }
        for index in slice_indices(Axis::X, 0) {
            assert_eq!(grid.cube(index).facelet(Face::Left), Color::Red);
        }

        // The corner that was at the top-back now sits at the top-front.
        let corner = grid.cube([0, 2, 2]);
        assert_eq!(corner.facelet(Face::Front), Color::Magenta);
        assert_eq!(corner.facelet(Face::Top), Color::Cyan);
        assert_eq!(corner.facelet(Face::Back), Color::Gray);
        assert_eq!(corner.facelet(Face::Bottom), Color::Gray);

        let solved = CubeGrid::new();
        for (index, cube) in grid.cubes().filter(|(index, _)| index[0] != 0) {
            assert_eq!(cube, solved.cube(index));
        }
    }

    #[test]
    fn middle_slice_turns_keep_interior_faces_gray() {
        let mut grid = CubeGrid::new();
        grid.rotate_slice_colors(Axis::Y, 1);
        grid.rotate_slice_colors(Axis::Z, 1);
        grid.rotate_slice_colors(Axis::X, 1);
        assert!(grid.cube([1, 1, 1]).facelets.iter().all(|&c| c == Color::Gray));
        // Back center went left on the Y turn, then top center replaced it on the Z turn.
        assert_eq!(grid.cube([0, 1, 1]).facelet(Face::Left), Color::Magenta);
    }

    #[test]
    fn commit_snaps_to_nearest_quarter_turn() {
        for (angle, expected) in [
            (0.0, 0),
            (44.0, 0),
            (46.0, 1),
            (135.0, 1),
            (181.0, 2),
            (270.0, 3),
            (315.0, 3),
            (316.0, 0),
            (359.0, 0),
        ] {
            let mut grid = CubeGrid::new();
            assert_eq!(grid.commit_turn(Axis::Z, 2, angle), expected, "{angle}");

            let mut reference = CubeGrid::new();
            reference.apply(Turn {
                axis: Axis::Z,
                slice: 2,
                quarter_turns: expected,
            });
            assert_eq!(grid, reference);
        }
    }

    #[test]
    fn scramble_is_undone_by_inverse_sequence() {
        let mut grid = CubeGrid::new();
        let turns = grid.scramble(&mut StdRng::seed_from_u64(2024));
        assert_eq!(turns.len(), SCRAMBLE_MOVES);
        assert_eq!(grid.color_counts(), CubeGrid::new().color_counts());

        for turn in turns.iter().rev() {
            grid.apply(turn.inverse());
        }
        assert!(grid.is_solved());
    }
}
