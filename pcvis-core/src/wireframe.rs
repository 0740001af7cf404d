/// Line segment assembly for box wireframes and axis gizmos
use nalgebra::Point3;

use crate::color::{Color, NamedColor};
use crate::geometry::Corners;

/// A colored segment between two 3D points.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    pub color: Color,
    pub vertices: [Point3<f64>; 2],
}

const TOP_RING: [usize; 5] = [0, 1, 2, 3, 0];
const BOTTOM_RING: [usize; 5] = [4, 5, 6, 7, 4];

/// The 12 edges of a box whose corners follow the wireframe ordering.
///
/// Edges come out grouped per ring position: first-ring edge, second-ring
/// edge, then the edge joining the two rings.
pub fn box_edges(corners: &Corners, color: &Color) -> Vec<LineSegment> {
    let mut edges = Vec::with_capacity(12);
    for i in 0..4 {
        let (t0, t1) = (TOP_RING[i], TOP_RING[i + 1]);
        let (b0, b1) = (BOTTOM_RING[i], BOTTOM_RING[i + 1]);
        edges.push(line(corners[t0], corners[t1], color.clone()));
        edges.push(line(corners[b0], corners[b1], color.clone()));
        edges.push(line(corners[t0], corners[b0], color.clone()));
    }
    edges
}

pub fn line(a: Point3<f64>, b: Point3<f64>, color: Color) -> LineSegment {
    LineSegment {
        color,
        vertices: [a, b],
    }
}

/// X, Y and Z axes from the origin, colored red, green and blue.
pub fn axis_indicators(length: f64) -> [LineSegment; 3] {
    let o = Point3::origin();
    [
        line(o, Point3::new(length, 0.0, 0.0), NamedColor::Red.into()),
        line(o, Point3::new(0.0, length, 0.0), NamedColor::Green.into()),
        line(o, Point3::new(0.0, 0.0, length), NamedColor::Blue.into()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoxCenter;

    #[test]
    fn test_box_edges_count() {
        let corners = BoxCenter::new(Point3::origin(), 1.0, 2.0, 3.0).visualize_corners();
        let edges = box_edges(&corners, &NamedColor::Yellow.into());
        assert_eq!(edges.len(), 12);
        for edge in &edges {
            assert_eq!(edge.vertices.len(), 2);
            assert_eq!(edge.color, Color::Named(NamedColor::Yellow));
        }
    }

    #[test]
    fn test_box_edges_order() {
        let corners: Corners = std::array::from_fn(|i| Point3::new(i as f64, 0.0, 0.0));
        let edges = box_edges(&corners, &Color::Hex("#abcdef".to_string()));
        let index = |e: &LineSegment| (e.vertices[0].x as usize, e.vertices[1].x as usize);
        let got: Vec<_> = edges.iter().map(index).collect();
        assert_eq!(
            got,
            vec![
                (0, 1), (4, 5), (0, 4),
                (1, 2), (5, 6), (1, 5),
                (2, 3), (6, 7), (2, 6),
                (3, 0), (7, 4), (3, 7),
            ]
        );
    }

    #[test]
    fn test_box_edges_are_box_edges() {
        // every edge of an axis-aligned box differs in exactly one coordinate
        let corners = BoxCenter::new(Point3::new(1.0, 1.0, 1.0), 2.0, 3.0, 4.0).visualize_corners();
        for edge in box_edges(&corners, &NamedColor::Red.into()) {
            let d = edge.vertices[1] - edge.vertices[0];
            let changed = d.iter().filter(|v| v.abs() > 1e-12).count();
            assert_eq!(changed, 1);
        }
    }

    #[test]
    fn test_axis_indicators() {
        let axes = axis_indicators(0.5);
        assert_eq!(axes[0].vertices[1], Point3::new(0.5, 0.0, 0.0));
        assert_eq!(axes[1].color, Color::Named(NamedColor::Green));
        assert_eq!(axes[2].vertices[0], Point3::origin());
        assert_eq!(axes[2].vertices[1], Point3::new(0.0, 0.0, 0.5));
    }
}
