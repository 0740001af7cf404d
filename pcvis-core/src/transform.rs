/// Planar rotation and homogeneous transform helpers
use nalgebra::{Matrix4, Point2, Point3, Rotation3, Translation3, Vector3, Vector4};

/// Rotate `point` about `pivot` by `angle` radians (counter-clockwise).
///
/// NaN inputs propagate to the output.
pub fn rotate_about(point: Point2<f64>, pivot: Point2<f64>, angle: f64) -> Point2<f64> {
    let (s, c) = angle.sin_cos();
    let dx = point.x - pivot.x;
    let dy = point.y - pivot.y;
    Point2::new(c * dx - s * dy + pivot.x, s * dx + c * dy + pivot.y)
}

/// Rotate the XY components of a 3D point about `pivot`, leaving Z untouched.
pub fn yaw_about(point: Point3<f64>, pivot: Point2<f64>, yaw: f64) -> Point3<f64> {
    let xy = rotate_about(Point2::new(point.x, point.y), pivot, yaw);
    Point3::new(xy.x, xy.y, point.z)
}

/// Transform builder for homogeneous 4x4 matrices
pub struct Transform;

impl Transform {
    /// Rigid transform rotating by `yaw` about Z, then `pitch` about X, then translating.
    pub fn rigid(yaw: f64, pitch: f64, translation: Vector3<f64>) -> Matrix4<f64> {
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), yaw);
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), pitch);
        Translation3::from(translation).to_homogeneous() * (rz * rx).to_homogeneous()
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f64, y: f64, z: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Append the homogeneous coordinate to a point.
    pub fn to_homogeneous(point: &Point3<f64>) -> Vector4<f64> {
        Vector4::new(point.x, point.y, point.z, 1.0)
    }

    /// Apply a 4x4 matrix to a point and drop the homogeneous coordinate without dividing.
    pub fn apply(matrix: &Matrix4<f64>, point: &Point3<f64>) -> Point3<f64> {
        let v = matrix * Self::to_homogeneous(point);
        Point3::new(v.x, v.y, v.z)
    }
}
