pub mod pipeline;
pub mod sprite_atlas;

use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use pipeline::{TilePipeline, TileVertex, create_tile_pipeline};
use sprite_atlas::{SpriteAtlas, SpriteData};

use crate::camera::CameraUniform;
use crate::{TILE_SIZE, VIEW_HEIGHT, VIEW_WIDTH};

/// Render-pass clear color — the dark surround behind the world view
/// (#222222, given linearized for the sRGB swapchain).
const CLEAR_COLOR: wgpu::Color = wgpu::Color { r: 0.016, g: 0.016, b: 0.016, a: 1.0 };

pub struct Renderer {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    tile_pipeline: TilePipeline,
    /// Static orthographic projection of the logical resolution. The window
    /// is an integer upscale of it, so this never changes after creation.
    projection_bind_group: wgpu::BindGroup,
    /// Bind group for the walker sprite atlas. Always present — starts out
    /// pointing at the empty 1×1 atlas until `load_sprite_folder` runs.
    atlas_bind_group: wgpu::BindGroup,
    sprite_atlas: SpriteAtlas,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window)).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .expect("no suitable GPU adapter found");

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .expect("failed to create device");

        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let tile_pipeline = create_tile_pipeline(&device, format);

        // ── Logical-resolution projection (fixed for the process lifetime) ─
        let proj = CameraUniform::ortho(
            (VIEW_WIDTH * TILE_SIZE) as f32,
            (VIEW_HEIGHT * TILE_SIZE) as f32,
        );
        let projection_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("projection_buffer"),
            contents: bytemuck::cast_slice(std::slice::from_ref(&proj)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let projection_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("projection_bg"),
            layout: &tile_pipeline.projection_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_buffer.as_entire_binding(),
            }],
        });

        // ── Empty sprite atlas until the folder is loaded ──────────────────
        let sprite_atlas = SpriteAtlas::empty(&device, &queue);
        let atlas_bind_group =
            Self::atlas_bind_group(&device, &tile_pipeline, &sprite_atlas);

        Self {
            window,
            surface,
            device,
            queue,
            config,
            tile_pipeline,
            projection_bind_group,
            atlas_bind_group,
            sprite_atlas,
        }
    }

    fn atlas_bind_group(
        device: &wgpu::Device,
        tile_pipeline: &TilePipeline,
        atlas: &SpriteAtlas,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sprite_atlas_bg"),
            layout: &tile_pipeline.atlas_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&atlas.texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&atlas.sampler),
                },
            ],
        })
    }

    /// Load all walk-frame `.png` files from `path` into the sprite atlas.
    /// Called once during initialisation, before the frame loop starts; a
    /// missing or empty folder leaves the empty atlas in place and every
    /// sprite lookup unready.
    pub fn load_sprite_folder(&mut self, path: &str) {
        let atlas = SpriteAtlas::load_folder(&self.device, &self.queue, path);
        self.atlas_bind_group = Self::atlas_bind_group(&self.device, &self.tile_pipeline, &atlas);
        self.sprite_atlas = atlas;
    }

    /// Ready-or-not lookup polled by the render pass each frame.
    pub fn sprite_data(&self, name: &str) -> Option<SpriteData> {
        self.sprite_atlas.get(name)
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        // The projection is deliberately left alone: it maps the logical
        // resolution, and the swapchain stretches it across the window.
    }

    /// Render one frame: the scrolled tile window, then the walker on top.
    /// Both batches share the tile pipeline; the walker batch carries the
    /// atlas layer id (or a flat placeholder quad when the sprite is unready).
    pub fn render(
        &mut self,
        tile_verts: &[TileVertex],
        sprite_verts: &[TileVertex],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: None,
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_pipeline(&self.tile_pipeline.render_pipeline);
            pass.set_bind_group(0, &self.projection_bind_group, &[]);
            pass.set_bind_group(1, &self.atlas_bind_group, &[]);

            // ── Pass 1: tile window ───────────────────────────────────────
            if !tile_verts.is_empty() {
                let vbuf = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("tile_vertex_buffer"),
                    contents: bytemuck::cast_slice(tile_verts),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                pass.set_vertex_buffer(0, vbuf.slice(..));
                pass.draw(0..tile_verts.len() as u32, 0..1);
            }

            // ── Pass 2: walker sprite (or placeholder) ────────────────────
            if !sprite_verts.is_empty() {
                let vbuf = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("walker_vertex_buffer"),
                    contents: bytemuck::cast_slice(sprite_verts),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                pass.set_vertex_buffer(0, vbuf.slice(..));
                pass.draw(0..sprite_verts.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }
}
