//! Terminal wireframe viewer built on wire3d-core

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::Matrix4;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wire3d_core::{
    BezierCurve, Camera, Canvas, FrameStats, LightSystem, Mesh, ModelTransform, RenderError,
    RenderOptions, RotationState, WireframeRasterizer,
};

pub mod cli;
pub mod export;
pub mod renderer;

pub use renderer::AsciiRenderer;

/// Rotation applied per key press, in radians
const KEY_STEP: f32 = 0.1;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    mesh: Mesh,
    rotation: RotationState,
    camera: Camera,
    canvas: Canvas,
    rasterizer: WireframeRasterizer,
    renderer: AsciiRenderer,
    lights: Option<LightSystem>,
    path: Option<BezierCurve>,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    stats: FrameStats,
}

impl TerminalApp {
    /// Viewer sized to the current terminal
    pub fn new(mesh: Mesh, options: RenderOptions) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Self::with_size(mesh, width as usize, height as usize, options)
    }

    /// Viewer for a `cols` x `rows` character grid
    pub fn with_size(
        mesh: Mesh,
        cols: usize,
        rows: usize,
        options: RenderOptions,
    ) -> io::Result<Self> {
        let renderer = AsciiRenderer::new(cols, rows);
        let (width, height) = renderer.canvas_size();
        let canvas = Canvas::new(width, height)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        Ok(Self {
            mesh,
            rotation: RotationState::new(0.3, 0.3, 0.0),
            camera: Camera::new(width as u32, height as u32),
            canvas,
            rasterizer: WireframeRasterizer::new(options),
            renderer,
            lights: None,
            path: None,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            stats: FrameStats::default(),
        })
    }

    /// Vertical field of view in radians
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.camera = self.camera.with_fov(fov);
        self
    }

    pub fn with_lights(mut self, lights: LightSystem) -> Self {
        self.lights = Some(lights);
        self
    }

    /// Move the model along `path` while it spins
    pub fn with_path(mut self, path: BezierCurve) -> Self {
        self.path = Some(path);
        self
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Rebuild the canvas for a new terminal size
    pub fn resize(&mut self, cols: usize, rows: usize) -> io::Result<()> {
        let renderer = AsciiRenderer::new(cols, rows);
        let (width, height) = renderer.canvas_size();
        self.canvas = Canvas::new(width, height)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        self.camera = self.camera.with_aspect(width as f32 / height as f32);
        self.renderer = renderer;
        log::debug!("resized to {}x{} cells ({}x{} pixels)", cols, rows, width, height);
        Ok(())
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target
        let mut previous = Instant::now();

        while self.running {
            let frame_start = Instant::now();
            let delta = (frame_start - previous).as_secs_f32();
            previous = frame_start;

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            match self.step(delta) {
                Ok(_) => self.draw()?,
                Err(e) => log::warn!("skipping frame: {}", e),
            }

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent { code, .. }) => self.handle_key(code),
            Event::Resize(width, height) => self.resize(width as usize, height as usize)?,
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('w') | KeyCode::Up => {
                self.rotation.rotate(KEY_STEP, 0.0, 0.0);
            }
            KeyCode::Char('s') | KeyCode::Down => {
                self.rotation.rotate(-KEY_STEP, 0.0, 0.0);
            }
            KeyCode::Char('a') | KeyCode::Left => {
                self.rotation.rotate(0.0, -KEY_STEP, 0.0);
            }
            KeyCode::Char('d') | KeyCode::Right => {
                self.rotation.rotate(0.0, KEY_STEP, 0.0);
            }
            KeyCode::Char('e') => {
                self.rotation.rotate(0.0, 0.0, KEY_STEP);
            }
            KeyCode::Char('r') => {
                self.rotation.rotate(0.0, 0.0, -KEY_STEP);
            }
            _ => {}
        }
    }

    /// Advance the scene by `delta` seconds and rasterize one frame into the
    /// canvas and the character grid. Nothing is written to the terminal.
    pub fn step(&mut self, delta: f32) -> Result<FrameStats, RenderError> {
        self.update(delta);
        self.mesh.transform = self.model_matrix();

        self.canvas.clear();
        self.stats = match &self.lights {
            Some(lights) => self
                .rasterizer
                .render_lit(&mut self.canvas, &self.mesh, &self.camera, lights)?,
            None => self.rasterizer.render(&mut self.canvas, &self.mesh, &self.camera)?,
        };
        self.renderer.rasterize(&self.canvas);
        Ok(self.stats)
    }

    fn update(&mut self, delta: f32) {
        // Continuous slow rotation for demo effect
        self.rotation.rotate(0.01, 0.015, 0.0);
        if let Some(path) = &mut self.path {
            path.advance(delta);
        }
    }

    fn model_matrix(&self) -> Matrix4<f32> {
        let model = ModelTransform::new().with_rotation(self.rotation);
        match &self.path {
            Some(path) => {
                let offset = path.position();
                model.with_translation(offset.x, offset.y, offset.z).matrix()
            }
            None => model.matrix(),
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "wire3d | FPS: {:.1} | edges {}/{} | WASD/Arrows=Rotate E/R=Roll Q=Quit",
                self.fps, self.stats.edges_drawn, self.stats.edges_total
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
