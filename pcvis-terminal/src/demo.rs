/// Synthetic room scan used by the demo binary
use nalgebra::{DMatrix, Point3};
use pcvis_core::{geometry::corners_to_matrix, BoxCenter, BoxFormat};

/// Furniture-like boxes as `cx, cy, cz, l, w, h, yaw` rows.
const BOXES: [[f64; 7]; 3] = [
    [-1.5, 0.5, 0.4, 1.2, 0.8, 0.8, 0.3],
    [1.2, -0.8, 0.5, 0.6, 0.6, 1.0, 0.0],
    [0.8, 1.6, 0.25, 1.6, 0.5, 0.5, -0.8],
];

/// Floor half extent in meters.
const FLOOR: f64 = 3.0;

/// The demo boxes, each turned by an additional `extra_yaw` radians.
pub fn box_rows(extra_yaw: f64) -> Vec<BoxCenter> {
    BOXES
        .iter()
        .map(|row| {
            BoxCenter::new(Point3::new(row[0], row[1], row[2]), row[3], row[4], row[5])
                .with_yaw(row[6] + extra_yaw)
        })
        .collect()
}

/// The demo boxes as a buffer in the requested layout.
pub fn box_buffer(format: BoxFormat, extra_yaw: f64) -> DMatrix<f64> {
    let boxes = box_rows(extra_yaw);
    match format {
        BoxFormat::Center => DMatrix::from_row_iterator(
            boxes.len(),
            7,
            boxes.iter().flat_map(|b| {
                [b.center.x, b.center.y, b.center.z, b.length, b.width, b.height, b.yaw]
            }),
        ),
        BoxFormat::Corners => {
            let corners: Vec<_> = boxes.iter().map(BoxCenter::visualize_corners).collect();
            corners_to_matrix(&corners)
        }
    }
}

/// `N x 6` points: a checkered floor plus samples on the top face of every box.
pub fn point_buffer() -> DMatrix<f64> {
    let mut rows: Vec<[f64; 6]> = Vec::new();
    let steps = 30;
    for i in 0..=steps {
        for j in 0..=steps {
            let x = -FLOOR + 2.0 * FLOOR * i as f64 / steps as f64;
            let y = -FLOOR + 2.0 * FLOOR * j as f64 / steps as f64;
            let shade = if (i / 5 + j / 5) % 2 == 0 { 160.0 } else { 90.0 };
            rows.push([x, y, 0.0, shade, shade, shade]);
        }
    }
    for b in box_rows(0.0) {
        let top = b.visualize_corners();
        // corners 0, 1, 4, 5 span the top face
        let (a, u, v) = (top[0], top[1] - top[0], top[4] - top[0]);
        for i in 0..=6 {
            for j in 0..=6 {
                let p = a + u * (i as f64 / 6.0) + v * (j as f64 / 6.0);
                rows.push([p.x, p.y, p.z, 200.0, 120.0, 60.0]);
            }
        }
    }
    DMatrix::from_row_iterator(rows.len(), 6, rows.iter().flatten().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcvis_core::normalize_boxes;

    #[test]
    fn test_buffers_normalize() {
        for format in [BoxFormat::Center, BoxFormat::Corners] {
            let boxes = normalize_boxes(&box_buffer(format, 0.5), format).unwrap();
            assert_eq!(boxes.len(), BOXES.len());
        }
        assert_eq!(point_buffer().ncols(), 6);
    }

    #[test]
    fn test_both_layouts_give_same_wireframe() {
        let center = normalize_boxes(&box_buffer(BoxFormat::Center, 0.2), BoxFormat::Center).unwrap();
        let corners = normalize_boxes(&box_buffer(BoxFormat::Corners, 0.2), BoxFormat::Corners).unwrap();
        assert_eq!(center.visualize_corners(), corners.visualize_corners());
    }
}
