/// Box primitives, corner generation and box buffer normalization
use std::str::FromStr;

use nalgebra::{DMatrix, Point2, Point3};

use crate::error::{PcvisError, Result};
use crate::transform::yaw_about;

/// The eight vertices of a box. The ordering depends on which builder produced it.
pub type Corners = [Point3<f64>; 8];

/// A box described by its center, extents and yaw about the vertical axis.
///
/// `length` spans X and `width` spans Y before rotation; `height` spans Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCenter {
    pub center: Point3<f64>,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    /// Right-handed rotation about Z through the center, in radians.
    pub yaw: f64,
}

impl BoxCenter {
    pub fn new(center: Point3<f64>, length: f64, width: f64, height: f64) -> Self {
        Self {
            center,
            length,
            width,
            height,
            yaw: 0.0,
        }
    }

    pub fn with_yaw(mut self, yaw: f64) -> Self {
        self.yaw = yaw;
        self
    }

    /// Build a box from a `[cx, cy, cz, l, w, h]` or `[cx, cy, cz, l, w, h, yaw]` row.
    pub fn from_row(row: &[f64]) -> Result<Self> {
        if row.len() < 6 {
            return Err(PcvisError::DimensionMismatch {
                expected: "a center-form box with at least 6 values".to_string(),
                actual: (1, row.len()),
            });
        }
        let yaw = row.get(6).copied().unwrap_or(0.0);
        Ok(Self::new(Point3::new(row[0], row[1], row[2]), row[3], row[4], row[5]).with_yaw(yaw))
    }

    fn has_valid_extents(&self) -> bool {
        [self.length, self.width, self.height]
            .iter()
            .all(|e| e.is_finite() && *e > 0.0)
    }

    /// Corners in the ordering used by the projection pipeline.
    ///
    /// Top face (`z = cz + h/2`) first, then the bottom face, both walking
    /// `(+l,-w) (+l,+w) (-l,+w) (-l,-w)`:
    ///
    /// ```text
    ///     1 -------- 0
    ///    /|         /|
    ///   2 -------- 3 .
    ///   | |        | |
    ///   . 5 -------- 4
    ///   |/         |/
    ///   6 -------- 7
    /// ```
    ///
    /// Yaw is ignored here; use [`BoxCenter::transform_corners_with_yaw`] to apply it.
    pub fn transform_corners(&self) -> Corners {
        let c = self.center;
        let (l, w, h) = (self.length / 2.0, self.width / 2.0, self.height / 2.0);
        let xy = [(l, -w), (l, w), (-l, w), (-l, -w)];
        let mut corners = [Point3::origin(); 8];
        for (i, (dx, dy)) in xy.iter().enumerate() {
            corners[i] = Point3::new(c.x + dx, c.y + dy, c.z + h);
            corners[i + 4] = Point3::new(c.x + dx, c.y + dy, c.z - h);
        }
        corners
    }

    /// Same ordering as [`BoxCenter::transform_corners`], with every corner yawed about the center.
    pub fn transform_corners_with_yaw(&self) -> Corners {
        self.rotate_corners(self.transform_corners())
    }

    /// Corners in the ordering used by the wireframe builder.
    ///
    /// Indices 0..4 are the `y - width/2` side and 4..8 the `y + width/2`
    /// side; each side walks `(-x,+z) (+x,+z) (+x,-z) (-x,-z)`. A non-zero
    /// yaw rotates every corner about the vertical axis through the center.
    pub fn visualize_corners(&self) -> Corners {
        let c = self.center;
        let (w, l, h) = (self.length / 2.0, self.width / 2.0, self.height / 2.0);
        let mut corners = [Point3::origin(); 8];
        for (side, dy) in [-l, l].iter().enumerate() {
            let ring = [(-w, h), (w, h), (w, -h), (-w, -h)];
            for (i, (dx, dz)) in ring.iter().enumerate() {
                corners[side * 4 + i] = Point3::new(c.x + dx, c.y + dy, c.z + dz);
            }
        }
        if self.yaw != 0.0 {
            corners = self.rotate_corners(corners);
        }
        corners
    }

    fn rotate_corners(&self, corners: Corners) -> Corners {
        let pivot = Point2::new(self.center.x, self.center.y);
        corners.map(|p| yaw_about(p, pivot, self.yaw))
    }
}

/// How rows of a box buffer are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxFormat {
    /// Eight consecutive `x, y, z` rows per box.
    #[default]
    Corners,
    /// One `cx, cy, cz, l, w, h[, yaw]` row per box.
    Center,
}

impl FromStr for BoxFormat {
    type Err = PcvisError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "corners" => Ok(BoxFormat::Corners),
            "center" => Ok(BoxFormat::Center),
            other => Err(PcvisError::InvalidFormat(other.to_string())),
        }
    }
}

/// A validated box buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Boxes {
    Corners(Vec<Corners>),
    Center(Vec<BoxCenter>),
}

impl Boxes {
    pub fn len(&self) -> usize {
        match self {
            Boxes::Corners(c) => c.len(),
            Boxes::Center(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Corners of every box in the projection ordering.
    ///
    /// Corner-form boxes are returned as given.
    pub fn transform_corners(&self) -> Vec<Corners> {
        match self {
            Boxes::Corners(c) => c.clone(),
            Boxes::Center(b) => b.iter().map(BoxCenter::transform_corners).collect(),
        }
    }

    /// Corners of every box in the wireframe ordering.
    ///
    /// Corner-form boxes are returned as given.
    pub fn visualize_corners(&self) -> Vec<Corners> {
        match self {
            Boxes::Corners(c) => c.clone(),
            Boxes::Center(b) => b.iter().map(BoxCenter::visualize_corners).collect(),
        }
    }
}

/// Validate a box buffer against `format`.
///
/// Corner-form buffers must hold exactly 3 columns and 8 rows per box;
/// center-form buffers need at least 6 columns, the 7th being an optional yaw.
/// A buffer without rows is rejected in either layout.
pub fn normalize_boxes(buffer: &DMatrix<f64>, format: BoxFormat) -> Result<Boxes> {
    let shape = buffer.shape();
    match format {
        BoxFormat::Corners => {
            if shape.0 == 0 || shape.0 % 8 != 0 || shape.1 != 3 {
                return Err(PcvisError::DimensionMismatch {
                    expected: "8 rows of 3 coordinates per corner-form box".to_string(),
                    actual: shape,
                });
            }
            let boxes: Vec<Corners> = (0..shape.0 / 8)
                .map(|b| {
                    std::array::from_fn(|i| {
                        let r = b * 8 + i;
                        Point3::new(buffer[(r, 0)], buffer[(r, 1)], buffer[(r, 2)])
                    })
                })
                .collect();
            Ok(Boxes::Corners(boxes))
        }
        BoxFormat::Center => {
            if shape.0 == 0 || shape.1 < 6 {
                return Err(PcvisError::DimensionMismatch {
                    expected: "one or more rows of at least 6 columns per center-form box".to_string(),
                    actual: shape,
                });
            }
            let mut boxes = Vec::with_capacity(shape.0);
            for (index, row) in buffer.row_iter().enumerate() {
                let values: Vec<f64> = row.iter().take(7).copied().collect();
                let b = BoxCenter::from_row(&values)?;
                if !b.has_valid_extents() {
                    return Err(PcvisError::InvalidExtent {
                        index,
                        length: b.length,
                        width: b.width,
                        height: b.height,
                    });
                }
                boxes.push(b);
            }
            Ok(Boxes::Center(boxes))
        }
    }
}

/// Build a row-major matrix from a list of rows.
///
/// Ragged or empty input is not a numeric array and is rejected.
pub fn matrix_from_rows(rows: &[Vec<f64>]) -> Result<DMatrix<f64>> {
    let cols = match rows.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => {
            return Err(PcvisError::InvalidInputType(
                "expected a non-empty list of rows".to_string(),
            ))
        }
    };
    if let Some(i) = rows.iter().position(|r| r.len() != cols) {
        return Err(PcvisError::InvalidInputType(format!(
            "row {} has {} values, expected {}",
            i,
            rows[i].len(),
            cols
        )));
    }
    Ok(DMatrix::from_row_iterator(
        rows.len(),
        cols,
        rows.iter().flatten().copied(),
    ))
}

/// Stack corner sets into an `8N x 3` buffer in corner-form layout.
pub fn corners_to_matrix(corners: &[Corners]) -> DMatrix<f64> {
    DMatrix::from_row_iterator(
        corners.len() * 8,
        3,
        corners.iter().flatten().flat_map(|p| [p.x, p.y, p.z]),
    )
}
