use glam::Vec2;

use crate::{
    CAMERA_SMOOTHING, CAMERA_SNAP_EPSILON, MAP_HEIGHT, MAP_WIDTH, TILE_SIZE, VIEW_HEIGHT,
    VIEW_WIDTH, clamp,
};

/// Camera uniform uploaded to the GPU — an orthographic projection of the
/// logical resolution.
///
/// Layout (column-major, matching WGSL `mat4x4<f32>`):
/// ```text
/// col0: [2/w,  0,    0, 0]
/// col1: [0,   -2/h,  0, 0]
/// col2: [0,    0,    1, 0]
/// col3: [-1,   1,    0, 1]
/// ```
/// Maps y-down pixel coords `[0..w] × [0..h]` to clip space. Scrolling is
/// baked into the vertex positions, so the matrix itself is static.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn ortho(width: f32, height: f32) -> Self {
        let sx = 2.0 / width;
        let sy = -2.0 / height;
        Self {
            view_proj: [
                [sx, 0.0, 0.0, 0.0],   // col0
                [0.0, sy, 0.0, 0.0],   // col1
                [0.0, 0.0, 1.0, 0.0],  // col2
                [-1.0, 1.0, 0.0, 1.0], // col3
            ],
        }
    }
}

/// Eased follow camera: the viewport origin (top-left of the visible window,
/// world pixels) chases a clamped target centered on the entity.
pub struct Camera {
    pub origin: Vec2,
}

impl Camera {
    /// Start already settled on the clamped target for `entity_pos`.
    pub fn centered_on(entity_pos: Vec2) -> Self {
        Self { origin: Self::target_for(entity_pos) }
    }

    /// Viewport origin that centers the entity, clamped per axis so the
    /// window never shows outside the world. When the world is smaller than
    /// the viewport the inverted range collapses to 0 instead of panicking.
    pub fn target_for(entity_pos: Vec2) -> Vec2 {
        let view_w = (VIEW_WIDTH * TILE_SIZE) as f32;
        let view_h = (VIEW_HEIGHT * TILE_SIZE) as f32;
        Vec2::new(
            clamp(
                entity_pos.x - view_w / 2.0,
                0.0,
                (MAP_WIDTH * TILE_SIZE) as f32 - view_w,
            ),
            clamp(
                entity_pos.y - view_h / 2.0,
                0.0,
                (MAP_HEIGHT * TILE_SIZE) as f32 - view_h,
            ),
        )
    }

    /// Ease the origin toward `target`, each axis independently.
    ///
    /// Pure exponential decay (factor in (0,1)) never overshoots; the epsilon
    /// snap guarantees exact alignment in bounded ticks once the entity
    /// stops, instead of an infinite asymptotic creep.
    pub fn tick(&mut self, target: Vec2) {
        self.origin.x = ease_axis(self.origin.x, target.x);
        self.origin.y = ease_axis(self.origin.y, target.y);
    }
}

fn ease_axis(current: f32, target: f32) -> f32 {
    if (current - target).abs() < CAMERA_SNAP_EPSILON {
        target
    } else {
        current + (target - current) * CAMERA_SMOOTHING
    }
}
