/// ASCII rasterizer for points and line segments
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Vector4;
use pcvis_core::{LineSegment, Projector, Scene, SceneRenderer};
use std::io::{self, Write};

use crate::camera::OrbitCamera;

/// Character ramp for point depth (farthest to nearest)
const DEPTH_RAMP: &[char] = &['.', ':', '+', '*', '#', '@'];

/// Points closer than this to the camera plane are discarded.
const NEAR: f64 = 1e-2;

const LINE_CHAR: char = 'o';

/// Fallback for hex colors the terminal cannot resolve
const UNRESOLVED_RGB: [u8; 3] = [255, 255, 255];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    character: char,
    rgb: [u8; 3],
}

const EMPTY: Cell = Cell {
    character: ' ',
    rgb: [0, 0, 0],
};

/// ASCII renderer that converts scenes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f64>,
    cell_buffer: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f64::INFINITY; size],
            cell_buffer: vec![EMPTY; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f64::INFINITY);
        self.cell_buffer.fill(EMPTY);
    }

    /// Character at a cell, `None` when out of bounds.
    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cell_buffer[y * self.width + x].character)
    }

    pub fn render_scene(&mut self, scene: &Scene, camera: &OrbitCamera) -> pcvis_core::Result<()> {
        let projector = camera.projector(self.width, self.height)?;
        self.render_points(scene, &projector, camera.distance);
        for segment in scene.lines() {
            self.render_line(segment, &projector);
        }
        Ok(())
    }

    fn render_points(&mut self, scene: &Scene, projector: &Projector, focus: f64) {
        let positions: Vec<_> = scene.points().iter().map(|p| p.position).collect();
        let cam = projector.to_camera_frame(&positions);
        for (point, v) in scene.points().iter().zip(cam.iter()) {
            if v.z <= NEAR {
                continue;
            }
            let pixel = projector.project_camera_frame(std::slice::from_ref(v))[0];
            // nearer points get denser glyphs
            let closeness = (1.0 - (v.z / (2.0 * focus))).clamp(0.0, 1.0);
            let index = ((closeness * (DEPTH_RAMP.len() - 1) as f64) as usize).min(DEPTH_RAMP.len() - 1);
            self.plot(pixel.x, pixel.y, v.z, DEPTH_RAMP[index], point.rgb);
        }
    }

    fn render_line(&mut self, segment: &LineSegment, projector: &Projector) {
        let cam = projector.to_camera_frame(&segment.vertices);
        let Some((a, b)) = clip_near(cam[0], cam[1]) else {
            return;
        };
        let pixels = projector.project_camera_frame(&[a, b]);
        let (p0, p1) = (pixels[0], pixels[1]);
        let rgb = segment.color.rgb().unwrap_or(UNRESOLVED_RGB);

        // DDA over the longer screen axis, bounded so off-screen lines stay cheap
        let steps = (p1.x - p0.x).abs().max((p1.y - p0.y).abs()).ceil();
        let steps = steps.min((self.width + self.height) as f64 * 4.0).max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = p0.x + (p1.x - p0.x) * t;
            let y = p0.y + (p1.y - p0.y) * t;
            let depth = a.z + (b.z - a.z) * t;
            // lines win ties against points on the same surface
            self.plot(x, y, depth * 0.999, LINE_CHAR, rgb);
        }
    }

    fn plot(&mut self, x: f64, y: f64, depth: f64, character: char, rgb: [u8; 3]) {
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return;
        }
        let (col, row) = (x as usize, y as usize);
        if col >= self.width || row >= self.height {
            return;
        }
        let idx = row * self.width + col;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.cell_buffer[idx] = Cell { character, rgb };
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cell_buffer[y * self.width + x];
                let [r, g, b] = cell.rgb;
                writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                writer.queue(Print(cell.character))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Clip a camera-frame segment against the near plane.
fn clip_near(a: Vector4<f64>, b: Vector4<f64>) -> Option<(Vector4<f64>, Vector4<f64>)> {
    match (a.z > NEAR, b.z > NEAR) {
        (true, true) => Some((a, b)),
        (false, false) => None,
        (a_visible, _) => {
            let t = (NEAR - a.z) / (b.z - a.z);
            let cut = a + (b - a) * t;
            if a_visible {
                Some((a, cut))
            } else {
                Some((cut, b))
            }
        }
    }
}

/// One-shot renderer: frames the scene automatically and prints it once.
pub struct TerminalRenderer<W: Write> {
    writer: W,
    raster: AsciiRenderer,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(writer: W, width: usize, height: usize) -> Self {
        Self {
            writer,
            raster: AsciiRenderer::new(width, height),
        }
    }

    pub fn raster(&self) -> &AsciiRenderer {
        &self.raster
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SceneRenderer for TerminalRenderer<W> {
    type Error = io::Error;

    fn render(&mut self, scene: &Scene) -> io::Result<()> {
        self.raster.clear();
        self.raster.render_scene(scene, &OrbitCamera::framing(scene))?;
        self.raster.draw(&mut self.writer)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{DMatrix, Point3};
    use pcvis_core::{BoxCenter, NamedColor};

    fn count(raster: &AsciiRenderer, c: char) -> usize {
        (0..raster.height())
            .flat_map(|y| (0..raster.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| raster.char_at(x, y) == Some(c))
            .count()
    }

    #[test]
    fn test_clip_near() {
        let a = Vector4::new(0.0, 0.0, -1.0, 1.0);
        let b = Vector4::new(0.0, 0.0, 1.0, 1.0);
        let (ca, cb) = clip_near(a, b).unwrap();
        assert!((ca.z - NEAR).abs() < 1e-12);
        assert_eq!(cb, b);
        assert!(clip_near(a, a).is_none());
    }

    #[test]
    fn test_single_point_at_target() {
        let points = DMatrix::from_row_slice(1, 3, &[0.0, 0.0, 0.0]);
        let scene = Scene::new(&points, &NamedColor::Red.into(), false).unwrap();
        let mut raster = AsciiRenderer::new(21, 11);
        raster
            .render_scene(&scene, &OrbitCamera::new(Point3::origin(), 4.0))
            .unwrap();
        assert_ne!(raster.char_at(10, 5), Some(' '));
        assert_eq!(raster.char_at(0, 0), Some(' '));
        assert_eq!(raster.char_at(21, 0), None);
    }

    #[test]
    fn test_box_wireframe_is_drawn() {
        let mut scene = Scene::default();
        let b = BoxCenter::new(Point3::origin(), 2.0, 2.0, 2.0).with_yaw(0.4);
        scene.add_boxes_by_center(&[b], &NamedColor::Blue.into());
        let mut renderer = TerminalRenderer::new(Vec::new(), 60, 20);
        renderer.render(&scene).unwrap();
        assert!(count(renderer.raster(), LINE_CHAR) > 20);
        assert!(!renderer.into_inner().is_empty());
    }

    #[test]
    fn test_points_behind_camera_are_skipped() {
        let points = DMatrix::from_row_slice(1, 3, &[0.0, -20.0, 0.0]);
        let scene = Scene::new(&points, &NamedColor::Red.into(), false).unwrap();
        let mut camera = OrbitCamera::new(Point3::origin(), 4.0);
        camera.pitch = 0.0;
        let mut raster = AsciiRenderer::new(20, 10);
        raster.render_scene(&scene, &camera).unwrap();
        for c in DEPTH_RAMP {
            assert_eq!(count(&raster, *c), 0);
        }
    }
}
