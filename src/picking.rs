//! Maps world-space points to the sub-cube and face they lie on.

use nalgebra::Point3;

use crate::cube::{CubeGrid, Face, GridIndex, OUTER_BOUNDARY};

/// Half-width of the band around each outer face plane that counts as "on" that face.
const FACE_TOLERANCE: f32 = 0.02;

/// Slack allowed outside a sub-cube's extents, so clicks on seams still hit.
const CONTAINMENT_TOLERANCE: f32 = 0.05;

/// Result of picking a world point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pick {
    /// The point lies inside a sub-cube. `face` is `None` when the point is not
    /// near any of the six outer face planes.
    Hit { face: Option<Face>, index: GridIndex },
    /// No sub-cube contains the point.
    Miss,
}

/// Locates the outer face and sub-cube containing `point`.
pub(crate) fn locate(grid: &CubeGrid, point: Point3<f32>) -> Pick {
    match sub_cube_at(grid, point) {
        Some(index) => Pick::Hit {
            face: face_at(point),
            index,
        },
        None => Pick::Miss,
    }
}

/// Outer face whose plane `point` lies on, checked Right, Left, Top, Bottom, Front, Back.
pub(crate) fn face_at(point: Point3<f32>) -> Option<Face> {
    const ORDER: [Face; 6] = [
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
    ];

    ORDER.into_iter().find(|face| {
        let (axis, positive) = face.normal();
        let plane = if positive { OUTER_BOUNDARY } else { -OUTER_BOUNDARY };
        (point[axis.index()] - plane).abs() <= FACE_TOLERANCE
    })
}

/// First sub-cube (row-major) containing `point`.
pub(crate) fn sub_cube_at(grid: &CubeGrid, point: Point3<f32>) -> Option<GridIndex> {
    grid.cubes().find_map(|(index, cube)| {
        let (min, max) = (cube.min(), cube.max());
        let inside = (0..3).all(|axis| within(point[axis], min[axis], max[axis]));
        inside.then_some(index)
    })
}

fn within(value: f32, low: f32, high: f32) -> bool {
    (value > low && value < high)
        || (value - low).abs() <= CONTAINMENT_TOLERANCE
        || (value - high).abs() <= CONTAINMENT_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_point_hits_middle_cube_without_face() {
        let grid = CubeGrid::new();
        assert_eq!(
            locate(&grid, Point3::origin()),
            Pick::Hit {
                face: None,
                index: [1, 1, 1],
            }
        );
    }

    #[test]
    fn point_on_right_boundary_picks_right_face() {
        let grid = CubeGrid::new();
        assert_eq!(
            locate(&grid, Point3::new(1.70, 0.0, 0.0)),
            Pick::Hit {
                face: Some(Face::Right),
                index: [2, 1, 1],
            }
        );
        assert_eq!(face_at(Point3::new(1.715, 0.3, -0.2)), Some(Face::Right));
        assert_eq!(face_at(Point3::new(1.73, 0.3, -0.2)), None);
    }

    #[test]
    fn every_face_is_recognised_at_its_center() {
        let grid = CubeGrid::new();
        for face in Face::ALL {
            let (axis, positive) = face.normal();
            let mut point = Point3::origin();
            point[axis.index()] = if positive { 1.7 } else { -1.7 };
            let mut expected = [1, 1, 1];
            expected[axis.index()] = if positive { 2 } else { 0 };
            assert_eq!(
                locate(&grid, point),
                Pick::Hit {
                    face: Some(face),
                    index: expected,
                },
            );
        }
    }

    #[test]
    fn seam_tolerance_and_misses() {
        let grid = CubeGrid::new();
        // Cube (1, _, _) spans x in [-0.5, 0.5]; 0.54 is within tolerance of its edge.
        assert_eq!(sub_cube_at(&grid, Point3::new(0.54, 0.0, 0.0)), Some([1, 1, 1]));
        // Middle of the gap between two cubes is too far from either.
        assert_eq!(sub_cube_at(&grid, Point3::new(0.6, 0.0, 0.0)), None);
        assert_eq!(locate(&grid, Point3::new(4.0, 0.0, 0.0)), Pick::Miss);
    }

    #[test]
    fn corner_point_picks_first_face_in_order() {
        let grid = CubeGrid::new();
        assert_eq!(
            locate(&grid, Point3::new(1.7, 1.7, 1.7)),
            Pick::Hit {
                face: Some(Face::Right),
                index: [2, 2, 2],
            }
        );
    }
}
