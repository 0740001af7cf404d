/// Orbit camera producing poses and intrinsics for the core projector
use nalgebra::{Matrix3x4, Matrix4, Point3};
use pcvis_core::{Projector, Scene, Transform};

/// Rows in a terminal are roughly twice as tall as columns are wide.
const CELL_ASPECT: f64 = 0.5;

/// Camera circling a target point, parametrized by yaw and pitch (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Point3<f64>,
    pub distance: f64,
    pub yaw: f64,
    /// Positive values look down onto the target.
    pub pitch: f64,
    pub fov: f64,
}

impl OrbitCamera {
    pub fn new(target: Point3<f64>, distance: f64) -> Self {
        Self {
            target,
            distance,
            yaw: 0.0,
            pitch: 0.3,
            fov: std::f64::consts::PI / 3.0, // 60 degrees
        }
    }

    /// Frame the whole scene from a default angle.
    pub fn framing(scene: &Scene) -> Self {
        let radius = scene.radius().max(1e-3);
        let distance = radius / (std::f64::consts::PI / 6.0).tan() + radius;
        let mut camera = Self::new(scene.centroid(), distance);
        camera.yaw = -0.6;
        camera
    }

    /// Rotate by delta amounts (in radians), keeping the pitch away from the poles
    pub fn orbit(&mut self, dyaw: f64, dpitch: f64) {
        let limit = std::f64::consts::FRAC_PI_2 - 1e-3;
        self.yaw += dyaw;
        self.pitch = (self.pitch + dpitch).clamp(-limit, limit);
    }

    pub fn zoom(&mut self, factor: f64) {
        self.distance = (self.distance * factor).max(1e-3);
    }

    /// Camera-to-world pose.
    ///
    /// The camera looks along its +z axis with +y pointing down the screen; at
    /// zero yaw and pitch it sits on the -y side of the target, looking along +y.
    pub fn pose(&self) -> Matrix4<f64> {
        let orientation = Transform::rigid(
            self.yaw,
            -std::f64::consts::FRAC_PI_2 - self.pitch,
            self.target.coords,
        );
        orientation * Transform::translation_matrix(0.0, 0.0, -self.distance)
    }

    /// Pinhole intrinsic for a `width x height` character grid.
    pub fn intrinsic(&self, width: usize, height: usize) -> Matrix3x4<f64> {
        let fx = width as f64 * 0.5 / (self.fov * 0.5).tan();
        Projector::pinhole(fx, fx * CELL_ASPECT, width as f64 * 0.5, height as f64 * 0.5)
    }

    pub fn projector(&self, width: usize, height: usize) -> pcvis_core::Result<Projector> {
        Projector::new(Matrix4::identity(), self.pose(), self.intrinsic(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_target_projects_to_center() {
        let mut camera = OrbitCamera::new(Point3::new(1.0, 2.0, 3.0), 5.0);
        camera.orbit(0.7, 0.2);
        let projector = camera.projector(80, 24).unwrap();
        let pixel = projector.project(&[camera.target])[0];
        assert_abs_diff_eq!(pixel.x, 40.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pixel.y, 12.0, epsilon = 1e-9);

        let cam = projector.to_camera_frame(&[camera.target]);
        assert_abs_diff_eq!(cam[0].z, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_up_is_up() {
        let mut camera = OrbitCamera::new(Point3::origin(), 10.0);
        camera.pitch = 0.0;
        let projector = camera.projector(80, 24).unwrap();
        let pixels = projector.project(&[Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 0.0, 0.0)]);
        assert!(pixels[0].y < 12.0);
        assert!(pixels[1].x > 40.0);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = OrbitCamera::new(Point3::origin(), 1.0);
        camera.orbit(0.0, 10.0);
        assert!(camera.pitch < std::f64::consts::FRAC_PI_2);
    }
}
