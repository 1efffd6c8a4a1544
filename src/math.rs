use nalgebra::{Matrix4, Vector3, Vector4};

use crate::camera::ViewRotation;
use crate::cube::{Axis, CubeGrid, Face, SubCube, CUBE_SIZE};
use crate::renderer::InstanceRaw;
use crate::session::RenderAdapter;

/// Rotation of `angle` degrees about the positive world `axis`.
pub(crate) fn create_slice_rotation(axis: Axis, angle: f32) -> Matrix4<f32> {
    let mut axis_vector = Vector3::zeros();
    axis_vector[axis.index()] = 1.0;
    Matrix4::new_rotation(axis_vector * angle.to_radians())
}

/// Places the shared [-1, 1] cube mesh on `cube`.
fn cube_model(cube: &SubCube) -> Matrix4<f32> {
    Matrix4::new_translation(&cube.center().coords) * Matrix4::new_scaling(CUBE_SIZE * 0.5)
}

fn instance(transform: &Matrix4<f32>, cube: &SubCube) -> InstanceRaw {
    InstanceRaw {
        model: (transform * cube_model(cube)).into(),
        colors: Face::ALL.map(|face| Vector4::from(cube.facelet(face)).into()),
    }
}

/// Collects per-cube instance data for one frame.
pub(crate) struct InstanceBuilder {
    view: Matrix4<f32>,
    pub(crate) instances: Vec<InstanceRaw>,
}

impl InstanceBuilder {
    pub(crate) fn new(view: &ViewRotation) -> Self {
        Self {
            view: view.matrix(),
            instances: Vec::with_capacity(27),
        }
    }
}

impl RenderAdapter for InstanceBuilder {
    fn draw_all(&mut self, grid: &CubeGrid) {
        self.instances = grid
            .cubes()
            .map(|(_, cube)| instance(&self.view, cube))
            .collect();
    }

    fn draw_with_moving_slice(&mut self, grid: &CubeGrid, axis: Axis, slice: usize, angle: f32) {
        let moving = self.view * create_slice_rotation(axis, angle);
        self.instances = grid
            .cubes()
            .map(|(index, cube)| {
                if index[axis.index()] == slice {
                    instance(&moving, cube)
                } else {
                    instance(&self.view, cube)
                }
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Point3;

    use super::*;
    use crate::session::CubeSession;

    #[test]
    fn quarter_slice_rotation_matches_color_turn_direction() {
        // +90 degrees about X carries the top (+Y) onto the front (+Z).
        let rotation = create_slice_rotation(Axis::X, 90.0);
        let rotated = rotation.transform_point(&Point3::new(0.0, 1.0, 0.0));
        assert!((rotated - Point3::new(0.0, 0.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn moving_slice_only_transforms_its_cubes() {
        let session = CubeSession::new();
        let mut at_rest = InstanceBuilder::new(session.view());
        at_rest.draw_all(session.grid());
        let mut moving = InstanceBuilder::new(session.view());
        moving.draw_with_moving_slice(session.grid(), Axis::Z, 0, 30.0);

        assert_eq!(at_rest.instances.len(), 27);
        for ((index, _), (rest, turned)) in session
            .grid()
            .cubes()
            .zip(at_rest.instances.iter().zip(&moving.instances))
        {
            let same = rest.model == turned.model;
            // Even the slice center, which sits on the axis, is reoriented.
            assert_eq!(same, index[2] != 0, "{index:?}");
        }
    }
}
