//! 3x3x3 Rubik's cube data structures and geometry.
//!
//! This module defines the discrete model of the cube: the 27 sub-cubes, their
//! fixed vertex positions, and the six facelet colors each one carries.

use nalgebra::{Point3, Vector4};

/// Number of sub-cubes along each edge of the puzzle
pub(crate) const CUBE_DIM: usize = 3;

/// Edge length of one sub-cube
pub(crate) const CUBE_SIZE: f32 = 1.0;

/// Space between two adjacent sub-cubes
pub(crate) const CUBE_GAP: f32 = 0.2;

/// Distance from the origin to each outer face of the assembled cube.
pub(crate) const OUTER_BOUNDARY: f32 = 0.5 * (CUBE_DIM as f32 * (CUBE_SIZE + CUBE_GAP) - CUBE_GAP);

/// Position of one sub-cube in the grid, indexed `[i, j, k]` along X, Y and Z.
pub(crate) type GridIndex = [usize; 3];

/// World axis a slice rotates about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub(crate) const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The two other axes in cyclic order, so that `(self, u, v)` is right-handed.
    pub(crate) fn perpendicular(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::Z, Axis::X),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// One of the six faces of a sub-cube, named by its outward normal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Face {
    Back,
    Front,
    Right,
    Left,
    Bottom,
    Top,
}

impl Face {
    pub(crate) const ALL: [Face; 6] = [
        Face::Back,
        Face::Front,
        Face::Right,
        Face::Left,
        Face::Bottom,
        Face::Top,
    ];

    /// Axis of the outward normal and whether it points along the positive direction.
    pub(crate) fn normal(self) -> (Axis, bool) {
        match self {
            Face::Back => (Axis::Z, false),
            Face::Front => (Axis::Z, true),
            Face::Right => (Axis::X, true),
            Face::Left => (Axis::X, false),
            Face::Bottom => (Axis::Y, false),
            Face::Top => (Axis::Y, true),
        }
    }

    pub(crate) fn from_normal(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, true) => Face::Right,
            (Axis::X, false) => Face::Left,
            (Axis::Y, true) => Face::Top,
            (Axis::Y, false) => Face::Bottom,
            (Axis::Z, true) => Face::Front,
            (Axis::Z, false) => Face::Back,
        }
    }

    /// Face that this face's normal points to after a +90 degree rotation about `axis`.
    pub(crate) fn rotated(self, axis: Axis) -> Self {
        let (normal_axis, positive) = self.normal();
        let (u, v) = axis.perpendicular();
        if normal_axis == u {
            Face::from_normal(v, positive)
        } else if normal_axis == v {
            Face::from_normal(u, !positive)
        } else {
            self
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Facelet colors. Six puzzle colors plus the neutral interior color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum Color {
    Red,
    Green,
    Blue,
    Cyan,
    Yellow,
    Magenta,
    Gray,
}

impl Color {
    /// Color of `face` on the outer layer of the solved cube.
    pub(crate) fn solved(face: Face) -> Self {
        match face {
            Face::Back => Color::Cyan,
            Face::Front => Color::Green,
            Face::Right => Color::Blue,
            Face::Left => Color::Red,
            Face::Bottom => Color::Yellow,
            Face::Top => Color::Magenta,
        }
    }
}

/// One of the 27 sub-cubes.
///
/// The vertices never move; turns only permute the facelet colors. The moving
/// slice is rotated by the renderer for display while a drag is in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SubCube {
    /// Corners of the cube, v0..v3 on the back (low z) side and v4..v7 on the front
    pub(crate) vertices: [Point3<f32>; 8],
    /// Colors indexed by [`Face::index`]
    pub(crate) facelets: [Color; 6],
}

impl SubCube {
    /// Creates the sub-cube at `index` in its solved state.
    ///
    /// Vertex coordinates follow from the index, [`CUBE_SIZE`] and [`CUBE_GAP`].
    /// A face is colored only when it lies on the outer boundary of the puzzle.
    pub(crate) fn solved(index: GridIndex) -> Self {
        let pitch = CUBE_SIZE + CUBE_GAP;
        let [x, y, z] = index.map(|n| n as f32 * pitch - OUTER_BOUNDARY);
        let s = CUBE_SIZE;

        let vertices = [
            Point3::new(x, y, z),
            Point3::new(x + s, y, z),
            Point3::new(x + s, y + s, z),
            Point3::new(x, y + s, z),
            Point3::new(x, y, z + s),
            Point3::new(x + s, y, z + s),
            Point3::new(x + s, y + s, z + s),
            Point3::new(x, y + s, z + s),
        ];

        let facelets = Face::ALL.map(|face| {
            let (axis, positive) = face.normal();
            let outer = if positive { CUBE_DIM - 1 } else { 0 };
            if index[axis.index()] == outer {
                Color::solved(face)
            } else {
                Color::Gray
            }
        });

        Self { vertices, facelets }
    }

    pub(crate) fn min(&self) -> Point3<f32> {
        self.vertices[0]
    }

    pub(crate) fn max(&self) -> Point3<f32> {
        self.vertices[6]
    }

    pub(crate) fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min(), &self.max())
    }

    pub(crate) fn facelet(&self, face: Face) -> Color {
        self.facelets[face.index()]
    }
}

/// The complete puzzle: 27 sub-cubes stored row-major by `[i, j, k]`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CubeGrid {
    cubes: [SubCube; CUBE_DIM * CUBE_DIM * CUBE_DIM],
}

impl CubeGrid {
    /// Creates a cube in the solved state.
    pub(crate) fn new() -> Self {
        Self {
            cubes: std::array::from_fn(|n| SubCube::solved(unflatten(n))),
        }
    }

    /// Resets every sub-cube's vertices and colors to the solved state.
    pub(crate) fn initialize(&mut self) {
        *self = Self::new();
    }

    pub(crate) fn cube(&self, index: GridIndex) -> &SubCube {
        &self.cubes[flatten(index)]
    }

    pub(crate) fn cube_mut(&mut self, index: GridIndex) -> &mut SubCube {
        &mut self.cubes[flatten(index)]
    }

    /// All sub-cubes with their grid index, in row-major order.
    pub(crate) fn cubes(&self) -> impl Iterator<Item = (GridIndex, &SubCube)> + '_ {
        self.cubes.iter().enumerate().map(|(n, cube)| (unflatten(n), cube))
    }

    /// Whether the grid is back in its initial coloring.
    pub(crate) fn is_solved(&self) -> bool {
        *self == Self::new()
    }

    /// Number of facelets of each color across all 162 facelets.
    #[cfg(test)]
    pub(crate) fn color_counts(&self) -> std::collections::BTreeMap<Color, usize> {
        let mut counts = std::collections::BTreeMap::new();
        for cube in &self.cubes {
            for &color in &cube.facelets {
                *counts.entry(color).or_insert(0) += 1;
            }
        }
        counts
    }
}

impl Default for CubeGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// The nine grid positions of the slice at `slice` along `axis`.
pub(crate) fn slice_indices(axis: Axis, slice: usize) -> impl Iterator<Item = GridIndex> {
    let (u, v) = axis.perpendicular();
    (0..CUBE_DIM).flat_map(move |a| {
        (0..CUBE_DIM).map(move |b| {
            let mut index = [0; 3];
            index[axis.index()] = slice;
            index[u.index()] = a;
            index[v.index()] = b;
            index
        })
    })
}

fn flatten([i, j, k]: GridIndex) -> usize {
    (i * CUBE_DIM + j) * CUBE_DIM + k
}

fn unflatten(n: usize) -> GridIndex {
    [n / (CUBE_DIM * CUBE_DIM), (n / CUBE_DIM) % CUBE_DIM, n % CUBE_DIM]
}

impl From<Color> for Vector4<f32> {
    /// Converts a facelet color to RGBA for rendering.
    fn from(color: Color) -> Self {
        match color {
            Color::Red => Vector4::new(1.0, 0.0, 0.0, 1.0),
            Color::Green => Vector4::new(0.0, 1.0, 0.0, 1.0),
            Color::Blue => Vector4::new(0.0, 0.0, 1.0, 1.0),
            Color::Cyan => Vector4::new(0.0, 1.0, 1.0, 1.0),
            Color::Yellow => Vector4::new(1.0, 1.0, 0.0, 1.0),
            Color::Magenta => Vector4::new(1.0, 0.0, 1.0, 1.0),
            Color::Gray => Vector4::new(0.7, 0.7, 0.7, 1.0),
        }
    }
}

/// Corner of a unit cube spanning [-1, 1] along with the face it belongs to.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CubeVertex {
    pub(crate) position: [f32; 3],
    /// [`Face::index`] of the owning face
    pub(crate) face: u32,
}

const fn vertex(x: f32, y: f32, z: f32, face: Face) -> CubeVertex {
    CubeVertex {
        position: [x, y, z],
        face: face as u32,
    }
}

/// 36 vertices for a cube (6 faces x 2 triangles), in [`Face`] order.
#[rustfmt::skip]
pub(crate) const CUBE_VERTICES: [CubeVertex; 36] = [
    // Back face (z = -1)
    vertex(-1.0, -1.0, -1.0, Face::Back),
    vertex(-1.0,  1.0, -1.0, Face::Back),
    vertex( 1.0,  1.0, -1.0, Face::Back),
    vertex( 1.0,  1.0, -1.0, Face::Back),
    vertex( 1.0, -1.0, -1.0, Face::Back),
    vertex(-1.0, -1.0, -1.0, Face::Back),
    // Front face (z = +1)
    vertex(-1.0, -1.0,  1.0, Face::Front),
    vertex( 1.0, -1.0,  1.0, Face::Front),
    vertex( 1.0,  1.0,  1.0, Face::Front),
    vertex( 1.0,  1.0,  1.0, Face::Front),
    vertex(-1.0,  1.0,  1.0, Face::Front),
    vertex(-1.0, -1.0,  1.0, Face::Front),
    // Right face (x = +1)
    vertex( 1.0, -1.0, -1.0, Face::Right),
    vertex( 1.0,  1.0, -1.0, Face::Right),
    vertex( 1.0,  1.0,  1.0, Face::Right),
    vertex( 1.0,  1.0,  1.0, Face::Right),
    vertex( 1.0, -1.0,  1.0, Face::Right),
    vertex( 1.0, -1.0, -1.0, Face::Right),
    // Left face (x = -1)
    vertex(-1.0, -1.0, -1.0, Face::Left),
    vertex(-1.0, -1.0,  1.0, Face::Left),
    vertex(-1.0,  1.0,  1.0, Face::Left),
    vertex(-1.0,  1.0,  1.0, Face::Left),
    vertex(-1.0,  1.0, -1.0, Face::Left),
    vertex(-1.0, -1.0, -1.0, Face::Left),
    // Bottom face (y = -1)
    vertex(-1.0, -1.0, -1.0, Face::Bottom),
    vertex( 1.0, -1.0, -1.0, Face::Bottom),
    vertex( 1.0, -1.0,  1.0, Face::Bottom),
    vertex( 1.0, -1.0,  1.0, Face::Bottom),
    vertex(-1.0, -1.0,  1.0, Face::Bottom),
    vertex(-1.0, -1.0, -1.0, Face::Bottom),
    // Top face (y = +1)
    vertex(-1.0,  1.0, -1.0, Face::Top),
    vertex(-1.0,  1.0,  1.0, Face::Top),
    vertex( 1.0,  1.0,  1.0, Face::Top),
    vertex( 1.0,  1.0,  1.0, Face::Top),
    vertex( 1.0,  1.0, -1.0, Face::Top),
    vertex(-1.0,  1.0, -1.0, Face::Top),
];
