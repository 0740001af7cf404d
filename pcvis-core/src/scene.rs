/// Point cloud and wireframe scene assembly
use nalgebra::{DMatrix, Point3};

use crate::color::{Color, NamedColor};
use crate::error::{PcvisError, Result};
use crate::geometry::{normalize_boxes, BoxCenter, BoxFormat, Corners};
use crate::wireframe::{axis_indicators, box_edges, LineSegment};

/// A point with 0-255 color channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColoredPoint {
    pub position: Point3<f64>,
    pub rgb: [u8; 3],
}

/// Defaults used when building and drawing a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub point_color: Color,
    /// Color of boxes added by [`show_scene_by_boxes`].
    pub box_color: Color,
    pub point_size: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            point_color: NamedColor::Green.into(),
            box_color: NamedColor::Red.into(),
            point_size: 0.02,
        }
    }
}

impl SceneConfig {
    pub fn with_point_color(mut self, color: Color) -> Self {
        self.point_color = color;
        self
    }

    pub fn with_box_color(mut self, color: Color) -> Self {
        self.box_color = color;
        self
    }

    pub fn with_point_size(mut self, point_size: f64) -> Self {
        self.point_size = point_size;
        self
    }
}

/// Something that can draw a scene, e.g. a terminal or a GUI viewer.
pub trait SceneRenderer {
    type Error;

    fn render(&mut self, scene: &Scene) -> std::result::Result<(), Self::Error>;
}

/// Colored points plus the line segments to draw over them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    points: Vec<ColoredPoint>,
    lines: Vec<LineSegment>,
    point_size: f64,
}

/// Copy the XYZ columns of `points`, attaching the same color to every point.
///
/// # Errors
///
/// [`PcvisError::DimensionMismatch`] if `points` has fewer than 3 columns.
pub fn paint_points(points: &DMatrix<f64>, rgb: [u8; 3]) -> Result<Vec<ColoredPoint>> {
    check_columns(points, 3, "x, y, z")?;
    Ok(points
        .row_iter()
        .map(|row| ColoredPoint {
            position: Point3::new(row[0], row[1], row[2]),
            rgb,
        })
        .collect())
}

fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn check_columns(points: &DMatrix<f64>, required: usize, what: &str) -> Result<()> {
    if points.ncols() < required {
        return Err(PcvisError::DimensionMismatch {
            expected: format!("at least {required} columns ({what})"),
            actual: points.shape(),
        });
    }
    Ok(())
}

impl Scene {
    /// Build a scene from an `N x 3` point buffer, or `N x 6` when `with_rgb` is set.
    ///
    /// With `with_rgb` the colors come from columns 3..6 and `color` is ignored.
    /// Hex colors that cannot be resolved fall back to the default point color.
    pub fn new(points: &DMatrix<f64>, color: &Color, with_rgb: bool) -> Result<Self> {
        Self::with_config(points, with_rgb, &SceneConfig::default().with_point_color(color.clone()))
    }

    pub fn with_config(points: &DMatrix<f64>, with_rgb: bool, config: &SceneConfig) -> Result<Self> {
        let points: Vec<ColoredPoint> = if with_rgb {
            check_columns(points, 6, "x, y, z, r, g, b")?;
            points
                .row_iter()
                .map(|row| ColoredPoint {
                    position: Point3::new(row[0], row[1], row[2]),
                    rgb: [channel(row[3]), channel(row[4]), channel(row[5])],
                })
                .collect()
        } else {
            let rgb = config.point_color.rgb().unwrap_or_else(|| {
                log::warn!("cannot resolve point color {}, using green", config.point_color);
                NamedColor::Green.rgb()
            });
            paint_points(points, rgb)?
        };
        log::debug!("scene created with {} points", points.len());
        Ok(Self {
            points,
            lines: Vec::new(),
            point_size: config.point_size,
        })
    }

    pub fn points(&self) -> &[ColoredPoint] {
        &self.points
    }

    pub fn lines(&self) -> &[LineSegment] {
        &self.lines
    }

    pub fn point_size(&self) -> f64 {
        self.point_size
    }

    /// Add wireframes for center-form boxes.
    pub fn add_boxes_by_center(&mut self, boxes: &[BoxCenter], color: &Color) -> &mut Self {
        for b in boxes {
            self.lines.extend(box_edges(&b.visualize_corners(), color));
        }
        log::debug!("added {} center-form boxes", boxes.len());
        self
    }

    /// Add wireframes for boxes given as 8 corners in wireframe ordering.
    pub fn add_boxes_by_corners(&mut self, boxes: &[Corners], color: &Color) -> &mut Self {
        for corners in boxes {
            self.lines.extend(box_edges(corners, color));
        }
        log::debug!("added {} corner-form boxes", boxes.len());
        self
    }

    /// Validate a box buffer against `format` and add its wireframes.
    pub fn append_boxes(
        &mut self,
        boxes: &DMatrix<f64>,
        format: BoxFormat,
        color: &Color,
    ) -> Result<&mut Self> {
        let corners = normalize_boxes(boxes, format)?.visualize_corners();
        Ok(self.add_boxes_by_corners(&corners, color))
    }

    pub fn add_lines<I: IntoIterator<Item = LineSegment>>(&mut self, lines: I) -> &mut Self {
        self.lines.extend(lines);
        self
    }

    /// Add red/green/blue X/Y/Z axes of the given length at the origin.
    pub fn add_axes(&mut self, length: f64) -> &mut Self {
        self.add_lines(axis_indicators(length))
    }

    /// Arithmetic mean of the point positions, or the origin for an empty scene.
    pub fn centroid(&self) -> Point3<f64> {
        if self.points.is_empty() {
            return Point3::origin();
        }
        let sum = self
            .points
            .iter()
            .fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.position.coords);
        Point3::from(sum / self.points.len() as f64)
    }

    /// Largest distance from the centroid to any point or line vertex.
    pub fn radius(&self) -> f64 {
        let c = self.centroid();
        self.points
            .iter()
            .map(|p| p.position)
            .chain(self.lines.iter().flat_map(|l| l.vertices))
            .map(|p| (p - c).norm())
            .fold(0.0, f64::max)
    }
}

/// Build a scene from `points` and hand it to `renderer`.
pub fn show_scene<R: SceneRenderer>(
    renderer: &mut R,
    points: &DMatrix<f64>,
    config: &SceneConfig,
    with_rgb: bool,
) -> std::result::Result<(), R::Error>
where
    R::Error: From<PcvisError>,
{
    let scene = Scene::with_config(points, with_rgb, config)?;
    renderer.render(&scene)
}

/// Build a scene from `points` and `boxes`, then hand it to `renderer`.
pub fn show_scene_by_boxes<R: SceneRenderer>(
    renderer: &mut R,
    points: &DMatrix<f64>,
    boxes: &DMatrix<f64>,
    format: BoxFormat,
    config: &SceneConfig,
    with_rgb: bool,
) -> std::result::Result<(), R::Error>
where
    R::Error: From<PcvisError>,
{
    let mut scene = Scene::with_config(points, with_rgb, config)?;
    scene.append_boxes(boxes, format, &config.box_color)?;
    renderer.render(&scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        scenes: Vec<Scene>,
    }

    impl SceneRenderer for Recorder {
        type Error = PcvisError;

        fn render(&mut self, scene: &Scene) -> Result<()> {
            self.scenes.push(scene.clone());
            Ok(())
        }
    }

    fn cloud() -> DMatrix<f64> {
        DMatrix::from_row_slice(2, 6, &[
            0.0, 0.0, 0.0, 255.0, 10.4, 300.0, //
            1.0, 2.0, 3.0, -5.0, 128.0, 0.0,
        ])
    }

    #[test]
    fn test_paint_points_copies() {
        let points = cloud();
        let painted = paint_points(&points, [1, 2, 3]).unwrap();
        assert_eq!(painted.len(), 2);
        assert_eq!(painted[1].position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(painted[1].rgb, [1, 2, 3]);
        assert_eq!(points, cloud());
    }

    #[test]
    fn test_paint_points_needs_three_columns() {
        let xy = DMatrix::<f64>::zeros(2, 2);
        assert!(matches!(
            paint_points(&xy, [1, 2, 3]),
            Err(PcvisError::DimensionMismatch { actual: (2, 2), .. })
        ));
    }

    #[test]
    fn test_scene_named_color() {
        let scene = Scene::new(&cloud(), &NamedColor::Orange.into(), false).unwrap();
        assert!(scene.points().iter().all(|p| p.rgb == [255, 125, 0]));
        assert_eq!(scene.point_size(), 0.02);

        let config = SceneConfig::default().with_point_size(0.05);
        let scene = Scene::with_config(&cloud(), false, &config).unwrap();
        assert_eq!(scene.point_size(), 0.05);
        assert!(scene.points().iter().all(|p| p.rgb == [0, 255, 0]));
    }

    #[test]
    fn test_scene_with_rgb() {
        let scene = Scene::new(&cloud(), &NamedColor::Green.into(), true).unwrap();
        assert_eq!(scene.points()[0].rgb, [255, 10, 255]);
        assert_eq!(scene.points()[1].rgb, [0, 128, 0]);
    }

    #[test]
    fn test_scene_rgb_needs_six_columns() {
        let xyz = DMatrix::<f64>::zeros(4, 3);
        assert!(matches!(
            Scene::new(&xyz, &NamedColor::Green.into(), true),
            Err(PcvisError::DimensionMismatch { actual: (4, 3), .. })
        ));
        let xy = DMatrix::<f64>::zeros(4, 2);
        assert!(Scene::new(&xy, &NamedColor::Green.into(), false).is_err());
    }

    #[test]
    fn test_add_boxes() {
        let mut scene = Scene::new(&cloud(), &NamedColor::Green.into(), false).unwrap();
        let b = BoxCenter::new(Point3::origin(), 1.0, 1.0, 1.0);
        scene
            .add_boxes_by_center(&[b, b.with_yaw(0.5)], &NamedColor::Blue.into())
            .add_boxes_by_corners(&[b.visualize_corners()], &NamedColor::Yellow.into())
            .add_axes(1.0);
        assert_eq!(scene.lines().len(), 12 * 3 + 3);
        assert_eq!(scene.lines()[0].color, Color::Named(NamedColor::Blue));
        assert_eq!(scene.lines()[24].color, Color::Named(NamedColor::Yellow));
    }

    #[test]
    fn test_append_boxes_validates() {
        let mut scene = Scene::default();
        let center = DMatrix::from_row_slice(1, 6, &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        scene
            .append_boxes(&center, BoxFormat::Center, &NamedColor::Red.into())
            .unwrap();
        assert_eq!(scene.lines().len(), 12);

        let bad = DMatrix::<f64>::zeros(5, 3);
        assert!(scene
            .append_boxes(&bad, BoxFormat::Corners, &NamedColor::Red.into())
            .is_err());
        assert_eq!(scene.lines().len(), 12);
    }

    #[test]
    fn test_centroid_and_radius() {
        let scene = Scene::new(&cloud(), &NamedColor::Green.into(), false).unwrap();
        assert_eq!(scene.centroid(), Point3::new(0.5, 1.0, 1.5));
        let expected = (0.25f64 + 1.0 + 2.25).sqrt();
        assert!((scene.radius() - expected).abs() < 1e-12);
        assert_eq!(Scene::default().centroid(), Point3::origin());
    }

    #[test]
    fn test_show_scene_by_boxes() {
        let mut recorder = Recorder::default();
        let boxes = DMatrix::from_row_slice(1, 7, &[0.0, 0.0, 0.0, 2.0, 1.0, 1.0, 0.3]);
        show_scene_by_boxes(
            &mut recorder,
            &cloud(),
            &boxes,
            BoxFormat::Center,
            &SceneConfig::default(),
            true,
        )
        .unwrap();
        show_scene(&mut recorder, &cloud(), &SceneConfig::default(), false).unwrap();
        assert_eq!(recorder.scenes.len(), 2);
        assert_eq!(recorder.scenes[0].lines().len(), 12);
        assert_eq!(recorder.scenes[0].lines()[0].color, Color::Named(NamedColor::Red));
        assert!(recorder.scenes[1].lines().is_empty());
    }

    #[test]
    fn test_show_scene_by_boxes_rejects_bad_format() {
        let mut recorder = Recorder::default();
        let boxes = DMatrix::<f64>::zeros(3, 3);
        let err = show_scene_by_boxes(
            &mut recorder,
            &cloud(),
            &boxes,
            BoxFormat::Corners,
            &SceneConfig::default(),
            false,
        );
        assert!(err.is_err());
        assert!(recorder.scenes.is_empty());
    }
}
