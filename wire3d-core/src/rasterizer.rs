//! Depth-sorted wireframe rasterizer
//!
//! Edges are ordered back to front by the average NDC depth of their endpoints
//! and drawn into an accumulating canvas (painter's algorithm). There is no
//! per-pixel depth test, so edges that cross each other in depth along their
//! length are not resolved exactly.

use nalgebra::{Matrix4, Point3};
use thiserror::Error;

use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::geometry::{Edge, Mesh};
use crate::lighting::LightSystem;
use crate::projection::{project_vertex, ScreenPoint};
use crate::transform::Transform;

/// Bounds of the depth-derived intensity factor
const MIN_DEPTH_INTENSITY: f32 = 0.1;
const MAX_DEPTH_INTENSITY: f32 = 1.0;

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("camera target equals its position or up is parallel to the view direction")]
    DegenerateCamera,

    #[error("model-view-projection matrix contains non-finite values")]
    NonFiniteTransform,

    #[error("could not allocate scratch space for {count} {what}")]
    ScratchAllocation { what: &'static str, count: usize },
}

/// Which endpoints of a segment must fall inside the circular viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipPolicy {
    /// Draw when at least one endpoint is inside (partially visible segments)
    #[default]
    AnyEndpoint,
    /// Draw only when both endpoints are inside
    BothEndpoints,
}

impl ClipPolicy {
    fn accepts(self, start_inside: bool, end_inside: bool) -> bool {
        match self {
            ClipPolicy::AnyEndpoint => start_inside || end_inside,
            ClipPolicy::BothEndpoints => start_inside && end_inside,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Line thickness in pixels
    pub thickness: f32,
    pub clip: ClipPolicy,
    /// Scale intensity by depth so nearer edges are brighter
    pub depth_cue: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            thickness: 1.0,
            clip: ClipPolicy::AnyEndpoint,
            depth_cue: true,
        }
    }
}

/// One edge ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub edge: Edge,
    pub start: ScreenPoint,
    pub end: ScreenPoint,
    /// Average endpoint depth used for ordering
    pub depth: f32,
    pub intensity: f32,
}

/// Per-frame counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub edges_total: usize,
    pub edges_drawn: usize,
    pub edges_clipped: usize,
}

/// Circular "porthole" test: inside when within half the smaller canvas
/// dimension of the canvas centre (boundary included)
pub fn in_circular_viewport(width: usize, height: usize, x: f32, y: f32) -> bool {
    let cx = width as f32 * 0.5;
    let cy = height as f32 * 0.5;
    let radius = width.min(height) as f32 * 0.5;
    let dx = x - cx;
    let dy = y - cy;
    dx * dx + dy * dy <= radius * radius
}

/// Map NDC depth to a brightness factor: near plane 1.0, far plane 0.1
pub fn depth_intensity(depth: f32) -> f32 {
    (1.0 - (depth + 1.0) * 0.5).clamp(MIN_DEPTH_INTENSITY, MAX_DEPTH_INTENSITY)
}

/// Map a view-space distance in `[near, far]` onto `[0, 1]` logarithmically
pub fn linear_to_log_depth(linear: f32, near: f32, far: f32) -> f32 {
    (linear / near).ln() / (far / near).ln()
}

/// Inverse of [`linear_to_log_depth`]
pub fn log_to_linear_depth(log_depth: f32, near: f32, far: f32) -> f32 {
    near * (far / near).powf(log_depth)
}

/// Endpoint lies between the near and far planes with finite screen coordinates
fn within_depth_range(p: &ScreenPoint) -> bool {
    p.x.is_finite() && p.y.is_finite() && p.depth.is_finite() && (-1.0..=1.0).contains(&p.depth)
}

fn scratch<T>(what: &'static str, count: usize) -> Result<Vec<T>, RenderError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(count)
        .map_err(|_| RenderError::ScratchAllocation { what, count })?;
    Ok(buffer)
}

/// Wireframe renderer that draws meshes into a [`Canvas`]
#[derive(Debug, Clone, Default)]
pub struct WireframeRasterizer {
    pub options: RenderOptions,
}

impl WireframeRasterizer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Project, shade, sort and clip every edge of `mesh` without drawing.
    ///
    /// Returned segments are in drawing order: depth never increases. When
    /// `lights` is given, each edge's intensity comes from the lighting model
    /// evaluated on world-space endpoints.
    pub fn plan(
        &self,
        mesh: &Mesh,
        camera: &Camera,
        width: usize,
        height: usize,
        lights: Option<&LightSystem>,
    ) -> Result<Vec<Segment>, RenderError> {
        if camera.is_degenerate() {
            return Err(RenderError::DegenerateCamera);
        }
        let mvp = camera.view_projection() * mesh.transform;
        self.plan_with_mvp(mesh, &mvp, width, height, lights)
    }

    /// [`WireframeRasterizer::plan`] through an explicit model-view-projection
    /// matrix.
    ///
    /// Edges with an endpoint in front of the near plane, behind the far plane
    /// or at a non-finite position are dropped along with those the viewport
    /// rejects.
    pub fn plan_with_mvp(
        &self,
        mesh: &Mesh,
        mvp: &Matrix4<f32>,
        width: usize,
        height: usize,
        lights: Option<&LightSystem>,
    ) -> Result<Vec<Segment>, RenderError> {
        if mvp.iter().any(|v| !v.is_finite()) {
            return Err(RenderError::NonFiniteTransform);
        }

        let mut projected: Vec<ScreenPoint> = scratch("projected vertices", mesh.vertex_count())?;
        projected.extend(
            mesh.vertices()
                .iter()
                .map(|v| project_vertex(v, mvp, width, height)),
        );

        let world = match lights {
            Some(_) => Some(world_vertices(mesh)?),
            None => None,
        };

        let mut segments: Vec<Segment> = scratch("edge segments", mesh.edge_count())?;
        for &edge in mesh.edges() {
            let start = projected[edge.a];
            let end = projected[edge.b];
            let depth = (start.depth + end.depth) * 0.5;

            let mut intensity = 1.0;
            if let (Some(lights), Some(world)) = (lights, world.as_ref()) {
                intensity *= lights.edge_intensity(&world[edge.a], &world[edge.b]);
            }
            if self.options.depth_cue {
                intensity *= depth_intensity(depth);
            }

            segments.push(Segment {
                edge,
                start,
                end,
                depth,
                intensity,
            });
        }

        // Stable, back to front
        segments.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        segments.retain(|s| {
            within_depth_range(&s.start)
                && within_depth_range(&s.end)
                && self.options.clip.accepts(
                    in_circular_viewport(width, height, s.start.x, s.start.y),
                    in_circular_viewport(width, height, s.end.x, s.end.y),
                )
        });
        Ok(segments)
    }

    /// Render `mesh` as seen by `camera` into `canvas`.
    ///
    /// On error nothing has been drawn.
    pub fn render(
        &self,
        canvas: &mut Canvas,
        mesh: &Mesh,
        camera: &Camera,
    ) -> Result<FrameStats, RenderError> {
        let segments = self.plan(mesh, camera, canvas.width(), canvas.height(), None)?;
        Ok(self.draw_counted(canvas, mesh, &segments))
    }

    /// Like [`WireframeRasterizer::render`], with per-edge intensity from `lights`
    pub fn render_lit(
        &self,
        canvas: &mut Canvas,
        mesh: &Mesh,
        camera: &Camera,
        lights: &LightSystem,
    ) -> Result<FrameStats, RenderError> {
        let segments = self.plan(mesh, camera, canvas.width(), canvas.height(), Some(lights))?;
        Ok(self.draw_counted(canvas, mesh, &segments))
    }

    fn draw_counted(&self, canvas: &mut Canvas, mesh: &Mesh, segments: &[Segment]) -> FrameStats {
        self.draw_segments(canvas, segments);

        let stats = FrameStats {
            edges_total: mesh.edge_count(),
            edges_drawn: segments.len(),
            edges_clipped: mesh.edge_count() - segments.len(),
        };
        log::debug!("frame: {:?}", stats);
        stats
    }

    /// Draw planned segments in order
    pub fn draw_segments(&self, canvas: &mut Canvas, segments: &[Segment]) {
        for s in segments {
            canvas.draw_line(
                s.start.x,
                s.start.y,
                s.end.x,
                s.end.y,
                self.options.thickness,
                s.intensity,
            );
        }
    }
}

fn world_vertices(mesh: &Mesh) -> Result<Vec<Point3<f32>>, RenderError> {
    let mut world: Vec<Point3<f32>> = scratch("world vertices", mesh.vertex_count())?;
    world.extend(
        mesh.vertices()
            .iter()
            .map(|v| Transform::transform_point(&mesh.transform, v)),
    );
    Ok(world)
}

/// Draw a mesh through an explicit MVP matrix, bypassing the camera.
///
/// Convenience for callers that assemble their own matrices.
pub fn render_with_mvp(
    canvas: &mut Canvas,
    mesh: &Mesh,
    mvp: &Matrix4<f32>,
    options: &RenderOptions,
) -> Result<FrameStats, RenderError> {
    let rasterizer = WireframeRasterizer::new(*options);
    let segments = rasterizer.plan_with_mvp(mesh, mvp, canvas.width(), canvas.height(), None)?;
    Ok(rasterizer.draw_counted(canvas, mesh, &segments))
}
