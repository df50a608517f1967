//! Exports [`Camera`].
use std::f32::consts::FRAC_PI_4;

use glam::{Mat4, Quat, Vec3};

/// A camera orbiting the origin.
///
/// The view is recomputed from elapsed time, the projection from the
/// current window size.
#[derive(Clone, Debug)]
pub struct Camera {
    view: Mat4,
    projection: Mat4,
    /// Vertical field of view, in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Horizontal distance from the origin while orbiting.
    pub orbit_radius: f32,
    /// Height above the floor while orbiting.
    pub orbit_height: f32,
}

impl Camera {
    /// Create a camera looking from (10, 10, 10) at the origin.
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self {
            view: Mat4::look_at_rh(Vec3::splat(10.0), Vec3::ZERO, Vec3::Y),
            projection: Mat4::IDENTITY,
            fov_y: FRAC_PI_4,
            near: 0.1,
            far: 1000.0,
            orbit_radius: 10.0,
            orbit_height: 10.0,
        };
        if !camera.update_projection(width, height) {
            camera.projection = Mat4::perspective_rh_gl(camera.fov_y, 1.0, camera.near, camera.far);
        }
        camera
    }

    /// Where the camera sits at `time` seconds into the orbit.
    pub fn orbit_position(&self, time: f32) -> Vec3 {
        Vec3::new(
            time.sin() * self.orbit_radius,
            self.orbit_height,
            time.cos() * self.orbit_radius,
        )
    }

    /// Move the camera along its orbit, still looking at the origin.
    pub fn orbit(&mut self, time: f32) {
        self.view = Mat4::look_at_rh(self.orbit_position(time), Vec3::ZERO, Vec3::Y);
    }

    /// Recompute the projection for a window of the given size.
    ///
    /// Returns `false` and keeps the previous projection when either
    /// dimension is zero, e.g. while the window is minimised.
    pub fn update_projection(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        let aspect = width as f32 / height as f32;
        self.projection = Mat4::perspective_rh_gl(self.fov_y, aspect, self.near, self.far);
        true
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn projection_view(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Rotation of `time` radians about the (1, 1, 1) diagonal, moved to `translation`.
pub fn spin_transform(time: f32, translation: Vec3) -> Mat4 {
    Mat4::from_rotation_translation(
        Quat::from_axis_angle(Vec3::ONE.normalize(), time),
        translation,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_follows_aspect_ratio() {
        let mut camera = Camera::new(1280, 720);
        let wide = camera.projection();
        // x scale is y scale divided by aspect
        assert!((wide.x_axis.x * 1280.0 / 720.0 - wide.y_axis.y).abs() < 1e-5);

        assert!(camera.update_projection(600, 600));
        let square = camera.projection();
        assert!((square.x_axis.x - square.y_axis.y).abs() < 1e-6);
        assert_eq!(
            square,
            Mat4::perspective_rh_gl(FRAC_PI_4, 1.0, 0.1, 1000.0)
        );
    }

    #[test]
    fn zero_sized_window_keeps_projection() {
        let mut camera = Camera::new(800, 600);
        let before = camera.projection();
        assert!(!camera.update_projection(0, 600));
        assert!(!camera.update_projection(800, 0));
        assert_eq!(camera.projection(), before);
    }

    #[test]
    fn zero_sized_startup_is_finite() {
        let camera = Camera::new(0, 0);
        assert!(camera.projection().is_finite());
    }

    #[test]
    fn orbit_circles_the_origin() {
        let mut camera = Camera::new(800, 600);
        assert_eq!(camera.orbit_position(0.0), Vec3::new(0.0, 10.0, 10.0));
        for step in 0..8 {
            let time = step as f32 * 0.8;
            let pos = camera.orbit_position(time);
            assert!((pos.x.hypot(pos.z) - 10.0).abs() < 1e-4);
            camera.orbit(time);
            // the origin stays centred in view
            let origin = camera.view().transform_point3(Vec3::ZERO);
            assert!(origin.x.abs() < 1e-4 && origin.y.abs() < 1e-4);
            assert!(origin.z < 0.0);
        }
    }

    #[test]
    fn projection_view_composes_in_order() {
        let mut camera = Camera::new(1024, 768);
        camera.orbit(1.5);
        assert_eq!(
            camera.projection_view(),
            camera.projection() * camera.view()
        );
        let clip = camera.projection_view() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn spin_transform_keeps_translation() {
        let t = spin_transform(2.0, Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(t.w_axis, glam::Vec4::new(-2.0, 0.0, 0.0, 1.0));
        // the rotation axis is left alone
        let axis = t.transform_vector3(Vec3::ONE.normalize());
        assert!(axis.abs_diff_eq(Vec3::ONE.normalize(), 1e-5));
    }
}
