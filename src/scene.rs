//! Per-frame vertex assembly: tiles and the walker sprite.
//!
//! Everything here is CPU-side and pure — the functions turn the latest map /
//! viewport / player state into `TileVertex` quads, and `Renderer::render`
//! uploads whatever they produce. Nothing in this module can fail: unknown
//! tiles fall back to the background type and a missing sprite falls back to
//! a placeholder fill.

use glam::Vec2;

use crate::TILE_SIZE;
use crate::map::TileMap;
use crate::player::{Facing, Player};
use crate::renderer::pipeline::TileVertex;
use crate::renderer::sprite_atlas::SpriteData;
use crate::{VIEW_HEIGHT, VIEW_WIDTH, WALK_CYCLE_LEN};

/// Flat-fill quads ignore the atlas; the UV is never sampled.
const DUMMY_UV: [f32; 2] = [0.0, 0.0];
/// Solid stand-in drawn while the walker sprite is not (yet) loaded.
const PLACEHOLDER_COLOR: [f32; 4] = [0.133, 0.133, 1.0, 1.0];
/// Pixel inset of the placeholder from the sprite's tile bounds.
const PLACEHOLDER_INSET: f32 = 4.0;

// ── Visible window derivation ─────────────────────────────────────────────────

/// Which tile the viewport starts on, and how far into it the origin sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleWindow {
    /// Tile index of the top-left visible tile (may be negative off-world).
    pub start_x: i32,
    pub start_y: i32,
    /// Sub-tile pixel remainder in `[0, TILE_SIZE)`.
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Derive the visible tile window from a viewport origin.
///
/// Floor division + euclidean remainder keep the pair consistent for any
/// origin, including negative ones (origins are clamped non-negative in
/// normal operation, but this stays total regardless).
pub fn visible_window(origin: Vec2) -> VisibleWindow {
    let tile = TILE_SIZE as f32;
    VisibleWindow {
        start_x: (origin.x / tile).floor() as i32,
        start_y: (origin.y / tile).floor() as i32,
        offset_x: origin.x.rem_euclid(tile),
        offset_y: origin.y.rem_euclid(tile),
    }
}

/// Snap a quad to the pixel grid: floor the origin, ceil the extent.
/// Adjacent tiles then share pixel edges with no sub-pixel seams.
pub fn snapped_quad(x: f32, y: f32, w: f32, h: f32) -> (f32, f32, f32, f32) {
    (x.floor(), y.floor(), w.ceil(), h.ceil())
}

// ── Quad emission ─────────────────────────────────────────────────────────────

fn push_quad(
    verts: &mut Vec<TileVertex>,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
    layer_id: f32,
) {
    let tl = TileVertex { position: [x, y], uv: uv_min, color, layer_id };
    let tr = TileVertex { position: [x + w, y], uv: [uv_max[0], uv_min[1]], color, layer_id };
    let bl = TileVertex { position: [x, y + h], uv: [uv_min[0], uv_max[1]], color, layer_id };
    let br = TileVertex { position: [x + w, y + h], uv: uv_max, color, layer_id };
    verts.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
}

// ── Tile layer ────────────────────────────────────────────────────────────────

/// Build the scrolled tile window: `(VIEW_WIDTH + 2) × (VIEW_HEIGHT + 2)`
/// solid quads. The +2 margin keeps the screen covered at any sub-tile
/// offset; cells outside the generated grid draw as the background type.
pub fn build_tile_vertices(map: &TileMap, origin: Vec2) -> Vec<TileVertex> {
    let win = visible_window(origin);
    let tile = TILE_SIZE as f32;
    let cols = VIEW_WIDTH + 2;
    let rows = VIEW_HEIGHT + 2;

    let mut verts = Vec::with_capacity((cols * rows) as usize * 6);
    for y in 0..rows {
        for x in 0..cols {
            let color = map
                .get(win.start_x + x as i32, win.start_y + y as i32)
                .color();
            let (px, py, pw, ph) = snapped_quad(
                x as f32 * tile - win.offset_x,
                y as f32 * tile - win.offset_y,
                tile,
                tile,
            );
            push_quad(&mut verts, px, py, pw, ph, DUMMY_UV, DUMMY_UV, color, 0.0);
        }
    }
    verts
}

// ── Walker sprite ─────────────────────────────────────────────────────────────

/// Sprite name for a facing/frame pair.
///
/// The 4-frame cycle reuses the middle sheet image at both odd positions
/// (`…1 → …2 → …3 → …2`), so the step animation swings back through the
/// neutral pose instead of toggling.
pub fn walk_sprite_name(facing: Facing, frame: usize) -> &'static str {
    const LEFT: [&str; WALK_CYCLE_LEN] = [
        "character_left1",
        "character_left2",
        "character_left3",
        "character_left2",
    ];
    const RIGHT: [&str; WALK_CYCLE_LEN] = [
        "character_right1",
        "character_right2",
        "character_right3",
        "character_right2",
    ];
    match facing {
        Facing::Left => LEFT[frame % WALK_CYCLE_LEN],
        Facing::Right => RIGHT[frame % WALK_CYCLE_LEN],
    }
}

/// Build the walker quad at its screen position (world − viewport origin).
///
/// With a resolved sprite this is a textured tile-size quad; without one it
/// degrades to a solid inset rectangle so the frame still renders while
/// assets are missing or unready.
pub fn build_player_vertices(
    player: &Player,
    origin: Vec2,
    sprite: Option<SpriteData>,
) -> Vec<TileVertex> {
    let screen = player.pos - origin;
    let tile = TILE_SIZE as f32;
    let mut verts = Vec::with_capacity(6);

    match sprite {
        Some(s) => {
            let (px, py, pw, ph) = snapped_quad(screen.x, screen.y, tile, tile);
            push_quad(
                &mut verts,
                px,
                py,
                pw,
                ph,
                s.uv_min,
                s.uv_max,
                [1.0, 1.0, 1.0, 1.0],
                1.0,
            );
        }
        None => {
            let (px, py, pw, ph) = snapped_quad(
                screen.x + PLACEHOLDER_INSET,
                screen.y + PLACEHOLDER_INSET,
                tile - PLACEHOLDER_INSET * 2.0,
                tile - PLACEHOLDER_INSET * 2.0,
            );
            push_quad(&mut verts, px, py, pw, ph, DUMMY_UV, DUMMY_UV, PLACEHOLDER_COLOR, 0.0);
        }
    }
    verts
}

// ── Tests ─────────────────────────────────────────────────────────────────────
