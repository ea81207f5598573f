//! Headless solar system demo
//!
//! Builds the solar system from a config file (or the built-in table), then
//! drives the animation and render submission for a fixed number of frames
//! against a backend that only counts and logs draw calls.
//!
//! Usage: `solar_app [config.toml|config.ron] [frames]`

use orrery::foundation::logging;
use orrery::prelude::*;
use orrery::scene::NodeId;

/// Fixed simulation step (60 Hz)
const FRAME_STEP: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u64 = 600;
const WINDOW_SIZE: (u32, u32) = (1280, 720);

/// Render backend that counts submitted work instead of drawing it
#[derive(Debug, Default)]
struct LoggingBackend {
    lights: usize,
    meshes: usize,
    strips: usize,
    strip_points: usize,
    points: usize,
}

impl RenderBackend for LoggingBackend {
    fn upload_light(&mut self, light: &LightUniforms) -> Result<(), RenderError> {
        log::trace!("light at {:?}", light.position);
        self.lights += 1;
        Ok(())
    }

    fn draw_mesh(&mut self, mesh: MeshHandle, _uniforms: &ObjectUniforms) -> Result<(), RenderError> {
        log::trace!("draw mesh {:?}", mesh);
        self.meshes += 1;
        Ok(())
    }

    fn draw_line_strip(&mut self, points: &[[f32; 3]]) -> Result<(), RenderError> {
        self.strips += 1;
        self.strip_points += points.len();
        Ok(())
    }

    fn draw_points(&mut self, points: &[StarVertex]) -> Result<(), RenderError> {
        self.points += points.len();
        Ok(())
    }
}

struct SolarApp {
    graph: SceneGraph,
    camera: NodeId,
    renderer: SolarRenderer,
    view: ViewController,
    clock: SimulationClock,
    backend: LoggingBackend,
}

impl SolarApp {
    fn new(config: SolarConfig) -> Result<Self, Box<dyn std::error::Error>> {
        config.validate()?;

        let mut graph = build_solar_system(&config.system, MeshHandle(0))?;
        let camera = camera_node(&graph)?;
        let written = refresh_orbit_paths(&mut graph, &config.orbits, OrbitSelection::All)?;
        log::info!("Precomputed {} orbit paths", written);

        let mut renderer = SolarRenderer::new();
        renderer.set_orbit_config(config.orbits);
        renderer.set_star_field(generate_star_field(&config.stars, &mut rand::thread_rng()));

        #[allow(clippy::cast_precision_loss)]
        let aspect = WINDOW_SIZE.0 as f32 / WINDOW_SIZE.1 as f32;
        let view = ViewController::new(config.camera, aspect);
        view.sync_camera_node(&mut graph, camera)?;

        log::info!("Scene graph:\n{}", graph.print_graph()?);

        Ok(Self {
            graph,
            camera,
            renderer,
            view,
            clock: SimulationClock::new(),
            backend: LoggingBackend::default(),
        })
    }

    /// Scripted input standing in for keyboard and mouse events
    fn apply_input(&mut self, frame: u64) {
        match frame {
            120 => self.view.handle_command(ViewCommand::Backward),
            240 => self.view.handle_mouse(-90.0, 4.0),
            300 => {
                self.clock.toggle_pause();
            }
            360 => {
                self.clock.toggle_pause();
                self.view.handle_command(ViewCommand::TopDown);
                self.view.handle_mouse(0.0, 1800.0);
            }
            480 => self.view.handle_command(ViewCommand::Reset),
            _ => {}
        }
    }

    fn frame(&mut self, frame: u64) -> Result<FrameStats, Box<dyn std::error::Error>> {
        self.apply_input(frame);
        self.clock.advance(FRAME_STEP);

        let view = self.view.view_matrix();
        let stats = self
            .renderer
            .render_frame(&mut self.graph, &mut self.backend, self.clock.elapsed(), &view)?;
        self.view.sync_camera_node(&mut self.graph, self.camera)?;
        Ok(stats)
    }

    fn run(&mut self, frames: u64) -> Result<(), Box<dyn std::error::Error>> {
        log::info!("Running {} frames at {:.4}s per step", frames, FRAME_STEP);
        for frame in 0..frames {
            let stats = self.frame(frame)?;
            if self.clock.frame_count() % 60 == 0 {
                log::info!(
                    "t={:.2}s frame {}: {} meshes, {} orbits, {} stars{}",
                    self.clock.elapsed(),
                    self.clock.frame_count(),
                    stats.meshes,
                    stats.orbits,
                    stats.stars,
                    if self.clock.is_paused() { " (paused)" } else { "" }
                );
            }
        }

        let b = &self.backend;
        log::info!(
            "Done: {} light uploads, {} mesh draws, {} line strips ({} points), {} star points",
            b.lights,
            b.meshes,
            b.strips,
            b.strip_points,
            b.points
        );
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting solar system demo");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SolarConfig::load_from_file(&path)?,
        None => {
            log::info!("No config file given, using the built-in body table");
            SolarConfig::default()
        }
    };
    let frames = match args.next() {
        Some(n) => n.parse::<u64>()?,
        None => DEFAULT_FRAMES,
    };

    let mut app = SolarApp::new(config)?;
    app.run(frames)?;

    log::info!("Solar system demo finished");
    Ok(())
}
