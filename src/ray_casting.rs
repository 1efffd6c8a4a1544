//! Ray casting for mouse-based picking.
//!
//! Converts a pointer position into a point in the cube's own coordinate frame,
//! the same point a depth-buffer read followed by an unprojection would yield:
//! the first hit on the cube's outer box, or the far plane when the ray misses.

use iced::{Point, Rectangle};
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

use crate::camera::{clip_from_cube, Camera, Projection, ViewRotation};
use crate::cube::OUTER_BOUNDARY;

/// 3D ray for intersection testing
#[derive(Debug, Clone)]
pub(crate) struct Ray {
    /// Ray origin point in 3D space
    pub(crate) origin: Point3<f32>,
    /// Ray direction vector (normalized)
    pub(crate) direction: Vector3<f32>,
    /// Distance along `direction` to the far plane
    pub(crate) length: f32,
}

impl Ray {
    pub(crate) fn at(&self, distance: f32) -> Point3<f32> {
        self.origin + self.direction * distance
    }
}

/// Axis-aligned bounding box in 3D space
#[derive(Debug, Clone)]
pub(crate) struct AABB {
    /// Minimum corner of the 3D bounding box
    pub(crate) min: Point3<f32>,
    /// Maximum corner of the 3D bounding box
    pub(crate) max: Point3<f32>,
}

impl AABB {
    /// Create a 3D AABB centered at a point with given size
    pub(crate) fn from_center_size(center: Point3<f32>, size: f32) -> Self {
        let half_size = Vector3::repeat(size * 0.5);
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }
}

/// Maps pointer positions in a widget to points in cube coordinates.
#[derive(Debug, Clone)]
pub(crate) struct Unprojector {
    bounds: Rectangle,
    /// Inverse of the clip-from-cube transform
    cube_from_clip: Matrix4<f32>,
}

impl Unprojector {
    /// Returns `None` when the view transform is singular.
    pub(crate) fn new(
        bounds: Rectangle,
        camera: &Camera,
        projection: &Projection,
        rotation: &ViewRotation,
    ) -> Option<Self> {
        let cube_from_clip = clip_from_cube(camera, projection, rotation).try_inverse()?;
        Some(Self {
            bounds,
            cube_from_clip,
        })
    }

    /// Calculate mouse ray from a position relative to the widget bounds.
    pub(crate) fn mouse_ray(&self, mouse_pos: Point) -> Ray {
        // Convert mouse position to normalized device coordinates (-1 to 1)
        let ndc_x = (2.0 * mouse_pos.x / self.bounds.width) - 1.0;
        let ndc_y = 1.0 - (2.0 * mouse_pos.y / self.bounds.height);

        let start = self.to_cube(Vector4::new(ndc_x, ndc_y, -1.0, 1.0));
        let end = self.to_cube(Vector4::new(ndc_x, ndc_y, 1.0, 1.0));
        let span = end - start;

        Ray {
            origin: start,
            direction: span.normalize(),
            length: span.norm(),
        }
    }

    /// Cube-space point under `mouse_pos`: the nearest hit on the outer box of
    /// the cube, or the far end of the ray.
    pub(crate) fn unproject(&self, mouse_pos: Point) -> Point3<f32> {
        let ray = self.mouse_ray(mouse_pos);
        let outer = AABB::from_center_size(Point3::origin(), 2.0 * OUTER_BOUNDARY);
        let depth = ray_aabb_intersection(&ray, &outer).unwrap_or(ray.length);
        ray.at(depth)
    }

    fn to_cube(&self, ndc: Vector4<f32>) -> Point3<f32> {
        let world = self.cube_from_clip * ndc;
        Point3::new(world.x / world.w, world.y / world.w, world.z / world.w)
    }
}

/// Test ray intersection with 3D axis-aligned bounding box using the slab method
///
/// Returns Some(distance) if the ray intersects the box, None otherwise.
pub(crate) fn ray_aabb_intersection(ray: &Ray, aabb: &AABB) -> Option<f32> {
    // Pre-compute inverse ray direction to avoid division in the loop
    let inv_dir = ray.direction.map(|d| 1.0 / d);

    let t1 = (aabb.min - ray.origin).component_mul(&inv_dir);
    let t2 = (aabb.max - ray.origin).component_mul(&inv_dir);

    // tmin = where the ray enters the box, tmax = where it exits
    let tmin = t1.inf(&t2).max();
    let tmax = t1.sup(&t2).min();

    if tmax < 0.0 || tmin > tmax {
        None
    } else {
        // Inside the box the exit point is the visible surface
        let distance = if tmin >= 0.0 { tmin } else { tmax };
        Some(distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unprojector() -> Unprojector {
        Unprojector::new(
            Rectangle::new(Point::ORIGIN, iced::Size::new(400.0, 400.0)),
            &Camera::default(),
            &Projection::default(),
            &ViewRotation::default(),
        )
        .expect("view transform is invertible")
    }

    #[test]
    fn slab_test_hits_and_misses() {
        let aabb = AABB::from_center_size(Point3::origin(), 2.0);
        let hit = Ray {
            origin: Point3::new(-5.0, 0.0, 0.0),
            direction: Vector3::x(),
            length: 10.0,
        };
        assert_eq!(ray_aabb_intersection(&hit, &aabb), Some(4.0));

        let miss = Ray {
            origin: Point3::new(-5.0, 3.0, 0.0),
            ..hit
        };
        assert_eq!(ray_aabb_intersection(&miss, &aabb), None);
    }

    #[test]
    fn center_click_lands_on_the_nearest_corner() {
        // Looking from (5, 5, 5) the screen center sees the (+, +, +) corner.
        let point = unprojector().unproject(Point::new(200.0, 200.0));
        for axis in 0..3 {
            assert!((point[axis] - OUTER_BOUNDARY).abs() < 1e-3, "{point:?}");
        }
    }

    #[test]
    fn click_beyond_the_cube_falls_to_the_far_plane() {
        let point = unprojector().unproject(Point::new(5.0, 5.0));
        assert!(point.coords.amax() > 2.0 * OUTER_BOUNDARY, "{point:?}");
    }
}
