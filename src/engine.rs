use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
pub use winit::keyboard::KeyCode;
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::camera::Camera;
use crate::input::InputState;
use crate::map::TileMap;
use crate::player::Player;
use crate::renderer::Renderer;
use crate::{DISPLAY_SCALE, MAP_HEIGHT, MAP_WIDTH, TARGET_UPS, TILE_SIZE, VIEW_HEIGHT, VIEW_WIDTH, scene};

// ── Viewer ──────────────────────────────────────────────────────────────────

/// The running viewer: owns the renderer and all per-frame state.
///
/// Tick order is fixed — motion first, then the camera reads the new
/// position, then the render pass reads whatever both produced. Key events
/// mutate `input` between frames; the next tick picks up the latest set.
pub struct Viewer {
    pub renderer: Renderer,
    pub input: InputState,
    map: TileMap,
    player: Player,
    camera: Camera,
    /// Set by `request_quit()`; the event loop exits after the current tick.
    quit_requested: bool,
}

impl Viewer {
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::default()
    }

    fn from_builder(renderer: Renderer) -> Self {
        let map = TileMap::generate(MAP_WIDTH, MAP_HEIGHT, &mut rand::thread_rng());
        let player = Player::new();
        let camera = Camera::centered_on(player.pos);
        Self {
            renderer,
            input: InputState::new(),
            map,
            player,
            camera,
            quit_requested: false,
        }
    }

    /// One fixed simulation step: integrate motion, then ease the camera
    /// toward the (possibly moved) entity.
    fn tick(&mut self) {
        self.player.tick(&self.input);
        self.camera.tick(Camera::target_for(self.player.pos));
    }

    /// Assemble the frame from the latest state and submit it.
    fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let tile_verts = scene::build_tile_vertices(&self.map, self.camera.origin);
        let sprite = self
            .renderer
            .sprite_data(scene::walk_sprite_name(self.player.facing, self.player.frame));
        let sprite_verts = scene::build_player_vertices(&self.player, self.camera.origin, sprite);
        self.renderer.render(&tile_verts, &sprite_verts)
    }

    /// Signal that the application should exit. The event loop calls
    /// `exit()` after the current tick completes.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }
}

// ── ViewerBuilder ───────────────────────────────────────────────────────────

pub struct ViewerBuilder {
    title: String,
    sprite_folder: Option<String>,
    target_ups: u32,
}

impl Default for ViewerBuilder {
    fn default() -> Self {
        Self {
            title: "tilewalker".into(),
            sprite_folder: None,
            target_ups: TARGET_UPS,
        }
    }
}

impl ViewerBuilder {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.into();
        self
    }

    /// Directory scanned recursively for walk-frame `.png` files. The atlas
    /// is baked once at startup before the frame loop begins; when unset (or
    /// empty) the walker renders as a placeholder indefinitely.
    pub fn with_sprite_folder(mut self, path: &str) -> Self {
        self.sprite_folder = Some(path.to_string());
        self
    }

    pub fn with_ups(mut self, ups: u32) -> Self {
        self.target_ups = ups;
        self
    }

    pub fn run(self) {
        let event_loop = EventLoop::new().unwrap();
        let fixed_dt = 1.0 / self.target_ups as f32;
        let mut app = App {
            config: self,
            viewer: None,
            last_instant: None,
            accumulator: 0.0,
            fixed_dt,
        };
        event_loop.run_app(&mut app).unwrap();
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct App {
    config: ViewerBuilder,
    viewer: Option<Viewer>,
    last_instant: Option<Instant>,
    accumulator: f32,
    fixed_dt: f32,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title(&self.config.title)
                        .with_inner_size(winit::dpi::PhysicalSize::new(
                            VIEW_WIDTH * TILE_SIZE * DISPLAY_SCALE,
                            VIEW_HEIGHT * TILE_SIZE * DISPLAY_SCALE,
                        ))
                        .with_resizable(false),
                )
                .unwrap(),
        );
        let mut renderer = pollster::block_on(Renderer::new(window));

        if let Some(folder) = &self.config.sprite_folder {
            renderer.load_sprite_folder(folder);
        }

        self.viewer = Some(Viewer::from_builder(renderer));
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(viewer) = self.viewer.as_ref() {
            viewer.renderer.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(viewer) = self.viewer.as_mut() else { return };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                viewer.renderer.resize(size);
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let elapsed = match self.last_instant {
                    Some(prev) => now.duration_since(prev).as_secs_f32().min(0.25),
                    None => self.fixed_dt,
                };
                self.last_instant = Some(now);
                self.accumulator += elapsed;

                while self.accumulator >= self.fixed_dt {
                    viewer.tick();
                    if viewer.quit_requested {
                        event_loop.exit();
                        return;
                    }
                    self.accumulator -= self.fixed_dt;
                }

                match viewer.render_frame() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let size = viewer.renderer.window.inner_size();
                        viewer.renderer.resize(size);
                    }
                    Err(e) => log::error!("render error: {e}"),
                }
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    if code == KeyCode::Escape {
                        viewer.request_quit();
                    }
                    viewer.input.press(code);
                }
                ElementState::Released => {
                    viewer.input.release(code);
                }
            },

            _ => {}
        }
    }
}
