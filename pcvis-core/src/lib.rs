/// PCVIS Core Library - Box geometry, projection and scene assembly
///
/// This library provides the stateless core for point cloud box
/// visualization: oriented box corners, the axis-alignment / camera-pose /
/// intrinsic projection chain, and colored wireframe scenes for renderers.

pub mod color;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod scene;
pub mod transform;
pub mod wireframe;

// Re-export commonly used types
pub use color::{Color, NamedColor};
pub use error::{PcvisError, Result};
pub use geometry::{matrix_from_rows, normalize_boxes, BoxCenter, BoxFormat, Boxes, Corners};
pub use projection::{box3d_to_2d, Projector};
pub use scene::{paint_points, show_scene, show_scene_by_boxes, ColoredPoint, Scene, SceneConfig, SceneRenderer};
pub use transform::{rotate_about, Transform};
pub use wireframe::{axis_indicators, box_edges, line, LineSegment};
