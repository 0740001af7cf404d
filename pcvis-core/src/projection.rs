/// Projection of 3D boxes into image coordinates
use nalgebra::{DMatrix, Matrix3, Matrix3x4, Matrix4, Point2, Point3, Vector3, Vector4};

use crate::error::{PcvisError, Result};
use crate::geometry::{normalize_boxes, BoxFormat, Boxes};
use crate::transform::Transform;

/// Camera setup mapping scan coordinates to color image pixels.
///
/// Holds the inverses of the axis alignment and of the camera pose, computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct Projector {
    axis_align_inv: Matrix4<f64>,
    cam_pose_inv: Matrix4<f64>,
    intrinsic: Matrix3x4<f64>,
}

impl Projector {
    /// Create a projector.
    ///
    /// # Arguments
    ///
    /// * `axis_align` - Transform from the scan's native frame to the aligned world frame.
    /// * `cam_pose` - Camera-to-world pose.
    /// * `intrinsic` - 3x4 color camera intrinsic matrix.
    ///
    /// # Errors
    ///
    /// [`PcvisError::SingularMatrix`] if either 4x4 matrix cannot be inverted.
    pub fn new(
        axis_align: Matrix4<f64>,
        cam_pose: Matrix4<f64>,
        intrinsic: Matrix3x4<f64>,
    ) -> Result<Self> {
        let axis_align_inv = axis_align
            .try_inverse()
            .ok_or(PcvisError::SingularMatrix("axis alignment"))?;
        let cam_pose_inv = cam_pose
            .try_inverse()
            .ok_or(PcvisError::SingularMatrix("camera pose"))?;
        log::debug!(
            "projector ready: axis alignment det {:.6}, camera pose det {:.6}",
            axis_align.determinant(),
            cam_pose.determinant()
        );
        Ok(Self {
            axis_align_inv,
            cam_pose_inv,
            intrinsic,
        })
    }

    /// Create a projector from a 3x3 intrinsic, extended with a zero fourth column.
    pub fn with_intrinsic3(
        axis_align: Matrix4<f64>,
        cam_pose: Matrix4<f64>,
        intrinsic: Matrix3<f64>,
    ) -> Result<Self> {
        let mut k = Matrix3x4::zeros();
        k.fixed_view_mut::<3, 3>(0, 0).copy_from(&intrinsic);
        Self::new(axis_align, cam_pose, k)
    }

    /// Pinhole intrinsic `[fx 0 cx 0; 0 fy cy 0; 0 0 1 0]`.
    pub fn pinhole(fx: f64, fy: f64, cx: f64, cy: f64) -> Matrix3x4<f64> {
        Matrix3x4::new(
            fx, 0.0, cx, 0.0, //
            0.0, fy, cy, 0.0, //
            0.0, 0.0, 1.0, 0.0,
        )
    }

    pub fn axis_align_inverse(&self) -> &Matrix4<f64> {
        &self.axis_align_inv
    }

    pub fn cam_pose_inverse(&self) -> &Matrix4<f64> {
        &self.cam_pose_inv
    }

    pub fn intrinsic(&self) -> &Matrix3x4<f64> {
        &self.intrinsic
    }

    /// Move points into the camera frame, keeping the homogeneous coordinate.
    pub fn to_camera_frame(&self, points: &[Point3<f64>]) -> Vec<Vector4<f64>> {
        let world_to_cam = self.cam_pose_inv * self.axis_align_inv;
        points
            .iter()
            .map(|p| world_to_cam * Transform::to_homogeneous(p))
            .collect()
    }

    /// Divide by the z component and apply the intrinsic.
    ///
    /// z acts as the only divisor: `(x/z, y/z, 1, w)` is fed to the intrinsic
    /// and w is left as is. A zero z yields non-finite pixels.
    pub fn project_camera_frame(&self, points: &[Vector4<f64>]) -> Vec<Point2<f64>> {
        points
            .iter()
            .map(|v| {
                let divided = Vector4::new(v.x / v.z, v.y / v.z, 1.0, v.w);
                let pixel: Vector3<f64> = self.intrinsic * divided;
                Point2::new(pixel.x, pixel.y)
            })
            .collect()
    }

    /// Project 3D points to 2D pixel coordinates.
    pub fn project(&self, points: &[Point3<f64>]) -> Vec<Point2<f64>> {
        let pixels = self.project_camera_frame(&self.to_camera_frame(points));
        if let Some(i) = pixels.iter().position(|p| !(p.x.is_finite() && p.y.is_finite())) {
            log::warn!("point {i} projects to a non-finite pixel, it lies on the camera plane");
        }
        pixels
    }

    /// Project every box, 8 pixels per box in projection corner ordering.
    pub fn project_boxes(&self, boxes: &Boxes) -> Vec<Point2<f64>> {
        let corners: Vec<Point3<f64>> = boxes.transform_corners().into_iter().flatten().collect();
        self.project(&corners)
    }
}

/// Project a box buffer to image coordinates.
///
/// # Arguments
///
/// * `boxes` - `8N x 3` corners when `format` is [`BoxFormat::Corners`], `N x 6` or `N x 7`
///   center-form rows when it is [`BoxFormat::Center`].
/// * `axis_align` - 4x4 axis alignment of the scan.
/// * `cam_pose` - 4x4 camera-to-world pose.
/// * `intrinsic` - 3x4 color intrinsic.
///
/// # Returns
///
/// An `8N` list of pixel coordinates.
///
/// Example:
///
/// ```
/// use nalgebra::{DMatrix, Matrix4};
/// use pcvis_core::{box3d_to_2d, BoxFormat, Projector};
///
/// let boxes = DMatrix::from_row_slice(1, 7, &[0.0, 0.0, 5.0, 2.0, 2.0, 2.0, 0.0]);
/// let k = Projector::pinhole(100.0, 100.0, 50.0, 50.0);
/// let pixels = box3d_to_2d(&boxes, BoxFormat::Center, &Matrix4::identity(), &Matrix4::identity(), &k)?;
/// assert_eq!(pixels.len(), 8);
/// # Ok::<(), pcvis_core::PcvisError>(())
/// ```
pub fn box3d_to_2d(
    boxes: &DMatrix<f64>,
    format: BoxFormat,
    axis_align: &Matrix4<f64>,
    cam_pose: &Matrix4<f64>,
    intrinsic: &Matrix3x4<f64>,
) -> Result<Vec<Point2<f64>>> {
    let boxes = normalize_boxes(boxes, format)?;
    let projector = Projector::new(*axis_align, *cam_pose, *intrinsic)?;
    Ok(projector.project_boxes(&boxes))
}
