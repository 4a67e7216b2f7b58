//! wire3d core library - wireframe geometry, projection and rasterization
//!
//! Stateless building blocks for drawing edge-only meshes: matrix builders,
//! a look-at camera, vertex projection, a depth-sorted wireframe rasterizer
//! writing into an accumulating grayscale canvas, plus PGM export, OBJ
//! loading, edge lighting and Bézier animation.

pub mod animation;
pub mod camera;
pub mod canvas;
pub mod geometry;
pub mod lighting;
pub mod obj;
pub mod pgm;
pub mod projection;
pub mod rasterizer;
pub mod soccer;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use animation::{AnimationError, AnimationSystem, BezierCurve};
pub use camera::Camera;
pub use canvas::{Canvas, CanvasError};
pub use geometry::{Edge, EdgeSet, Mesh, MeshError};
pub use lighting::{Light, LightSystem};
pub use obj::{load_obj, parse_obj, ObjError};
pub use pgm::{save_pgm, write_pgm, ExportError};
pub use projection::{project_vertex, ScreenPoint};
pub use rasterizer::{
    ClipPolicy, FrameStats, RenderError, RenderOptions, Segment, WireframeRasterizer,
};
pub use soccer::soccer_ball;
pub use transform::{ModelTransform, RotationState, Transform};
