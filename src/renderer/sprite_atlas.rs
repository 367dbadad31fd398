use std::collections::{HashMap, HashSet};
use std::path::Path;

use image::RgbaImage;
use wgpu::util::DeviceExt;

// ── SpriteData ───────────────────────────────────────────────────────────────

/// UV rectangle of a single named sprite inside the packed atlas.
#[derive(Clone, Copy, Debug)]
pub struct SpriteData {
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
}

// ── Strip layout (pure, GPU-free) ────────────────────────────────────────────

/// One sprite's position inside the packed strip.
#[derive(Debug, PartialEq)]
pub(crate) struct PlacedSprite {
    pub name: String,
    /// Left pixel edge inside the atlas (all sprites sit on row 0).
    pub atlas_x: u32,
    pub pixel_w: u32,
    pub pixel_h: u32,
}

/// Pack sprites side by side into a single horizontal strip — no I/O, no GPU.
///
/// `items` is a slice of `(name, pixel_w, pixel_h)`. Duplicate names are
/// skipped (only the first occurrence is packed). The handful of fixed-size
/// walk frames this table holds never needs row wrapping.
///
/// Returns `(placements, atlas_pixel_width, atlas_pixel_height)`; both atlas
/// dimensions are rounded up to the next power of two.
pub(crate) fn layout_strip(items: &[(String, u32, u32)]) -> (Vec<PlacedSprite>, u32, u32) {
    let mut placed_names: HashSet<&str> = HashSet::new();
    let mut placements: Vec<PlacedSprite> = Vec::new();
    let mut cur_x = 0u32;
    let mut max_h = 0u32;

    for (name, w, h) in items {
        if !placed_names.insert(name.as_str()) {
            continue;
        }
        placements.push(PlacedSprite {
            name: name.clone(),
            atlas_x: cur_x,
            pixel_w: *w,
            pixel_h: *h,
        });
        cur_x += w;
        max_h = max_h.max(*h);
    }

    let atlas_w = cur_x.next_power_of_two().max(1);
    let atlas_h = max_h.next_power_of_two().max(1);
    (placements, atlas_w, atlas_h)
}

// ── SpriteAtlas ──────────────────────────────────────────────────────────────

pub struct SpriteAtlas {
    pub sprites: HashMap<String, SpriteData>,
    pub texture_view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl SpriteAtlas {
    /// Scan `path` recursively for `.png` files, pack them into a strip,
    /// upload once to the GPU, and return a ready-to-use atlas.
    ///
    /// Every failure mode degrades instead of propagating: unreadable files
    /// and duplicate stems are logged and skipped, and a folder that yields
    /// nothing produces the same empty atlas as a missing folder — lookups
    /// then miss forever and the renderer keeps drawing its placeholder.
    pub fn load_folder(device: &wgpu::Device, queue: &wgpu::Queue, path: &str) -> Self {
        if !Path::new(path).is_dir() {
            log::warn!("sprite_atlas: '{path}' is not a directory; sprites will stay unready");
            return Self::empty(device, queue);
        }

        // ── 1. Discover and decode PNG files ──────────────────────────────
        let mut loaded: Vec<(String, image::DynamicImage)> = Vec::new();
        let mut seen_names: HashSet<String> = HashSet::new();

        for entry in walkdir::WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let file_path = entry.path();
            if file_path.extension().and_then(|s| s.to_str()) != Some("png") {
                continue;
            }
            let name = match file_path.file_stem().and_then(|s| s.to_str()) {
                Some(n) if !n.is_empty() => n.to_string(),
                _ => continue,
            };

            if !seen_names.insert(name.clone()) {
                log::warn!("sprite_atlas: duplicate name '{name}' from {file_path:?}; skipping");
                continue;
            }

            match image::open(file_path) {
                Ok(img) => loaded.push((name, img)),
                Err(e) => log::warn!("sprite_atlas: failed to load {file_path:?}: {e}"),
            }
        }

        if loaded.is_empty() {
            log::warn!("sprite_atlas: no sprites under '{path}'; drawing placeholders");
            return Self::empty(device, queue);
        }

        // ── 2. Lay out the strip (pure, no GPU) ───────────────────────────
        // Sorted by name so frame files land in a stable order regardless of
        // directory iteration.
        loaded.sort_by(|(a, _), (b, _)| a.cmp(b));
        let dims: Vec<(String, u32, u32)> = loaded
            .iter()
            .map(|(name, img)| (name.clone(), img.width(), img.height()))
            .collect();
        let (placements, atlas_w, atlas_h) = layout_strip(&dims);

        // ── 3. Composite into a single RGBA image ─────────────────────────
        let mut atlas_img = RgbaImage::new(atlas_w, atlas_h);
        let img_lookup: HashMap<&str, &image::DynamicImage> =
            loaded.iter().map(|(n, i)| (n.as_str(), i)).collect();

        let mut sprites = HashMap::new();
        for p in &placements {
            // img_lookup always matches p.name because loaded is deduplicated.
            let Some(img) = img_lookup.get(p.name.as_str()) else { continue };
            let rgba = img.to_rgba8();

            for dy in 0..p.pixel_h {
                for dx in 0..p.pixel_w {
                    atlas_img.put_pixel(p.atlas_x + dx, dy, *rgba.get_pixel(dx, dy));
                }
            }

            let uv_min = [p.atlas_x as f32 / atlas_w as f32, 0.0];
            let uv_max = [
                (p.atlas_x + p.pixel_w) as f32 / atlas_w as f32,
                p.pixel_h as f32 / atlas_h as f32,
            ];
            sprites.insert(p.name.clone(), SpriteData { uv_min, uv_max });
        }

        log::info!("sprite_atlas: packed {} sprites into {atlas_w}x{atlas_h}", sprites.len());

        // ── 4. Upload to GPU ──────────────────────────────────────────────
        let (texture_view, sampler) = Self::upload(device, queue, &atlas_img);
        Self { sprites, texture_view, sampler }
    }

    /// 1×1 transparent atlas for when no sprites are available.
    pub fn empty(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let img = RgbaImage::new(1, 1);
        let (texture_view, sampler) = Self::upload(device, queue, &img);
        Self { sprites: HashMap::new(), texture_view, sampler }
    }

    pub fn get(&self, name: &str) -> Option<SpriteData> {
        self.sprites.get(name).copied()
    }

    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &RgbaImage,
    ) -> (wgpu::TextureView, wgpu::Sampler) {
        let (w, h) = img.dimensions();
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("sprite_atlas_tex"),
                size: wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            img.as_raw(),
        );
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        (texture_view, sampler)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, w: u32, h: u32) -> (String, u32, u32) {
        (name.to_string(), w, h)
    }

    #[test]
    fn layout_empty_input_returns_unit_atlas() {
        let (placements, atlas_w, atlas_h) = layout_strip(&[]);
        assert!(placements.is_empty());
        assert_eq!(atlas_w, 1);
        assert_eq!(atlas_h, 1);
    }

    #[test]
    fn layout_single_sprite_at_origin() {
        let (pl, _, _) = layout_strip(&[item("character_left1", 16, 16)]);
        assert_eq!(pl.len(), 1);
        assert_eq!(pl[0].atlas_x, 0);
        assert_eq!(pl[0].pixel_w, 16);
        assert_eq!(pl[0].pixel_h, 16);
    }

    #[test]
    fn layout_places_sprites_side_by_side_in_input_order() {
        let items = [item("a", 16, 16), item("b", 16, 16), item("c", 16, 16)];
        let (pl, _, _) = layout_strip(&items);
        let xs: Vec<u32> = pl.iter().map(|p| p.atlas_x).collect();
        assert_eq!(xs, vec![0, 16, 32]);
    }

    #[test]
    fn layout_skips_duplicate_names() {
        let items = [item("hero", 16, 16), item("hero", 32, 32)];
        let (pl, _, _) = layout_strip(&items);
        assert_eq!(pl.len(), 1, "duplicate name produces only one placement");
        assert_eq!(pl[0].pixel_w, 16, "first occurrence wins");
    }

    #[test]
    fn layout_atlas_dimensions_are_powers_of_two() {
        // Six 16×16 walk frames: 96 px of strip → 128-wide atlas, 16 tall.
        let items: Vec<_> = (0..6).map(|i| item(&format!("f{i}"), 16, 16)).collect();
        let (_, atlas_w, atlas_h) = layout_strip(&items);
        assert!(atlas_w.is_power_of_two(), "atlas_w={atlas_w}");
        assert!(atlas_h.is_power_of_two(), "atlas_h={atlas_h}");
        assert_eq!(atlas_w, 128);
        assert_eq!(atlas_h, 16);
    }

    #[test]
    fn layout_height_tracks_tallest_sprite() {
        let items = [item("short", 16, 16), item("tall", 16, 24)];
        let (_, _, atlas_h) = layout_strip(&items);
        assert_eq!(atlas_h, 32, "24 px rounds up to the next power of two");
    }

    #[test]
    fn layout_no_placement_overflows_atlas_width() {
        let items: Vec<_> = (0..9).map(|i| item(&format!("s{i}"), 20, 12)).collect();
        let (pl, atlas_w, _) = layout_strip(&items);
        for p in &pl {
            assert!(
                p.atlas_x + p.pixel_w <= atlas_w,
                "sprite '{}' overflows atlas: {}+{} > {atlas_w}",
                p.name,
                p.atlas_x,
                p.pixel_w
            );
        }
    }

    #[test]
    fn layout_uvs_stay_within_zero_one() {
        let items = [item("a", 16, 16), item("b", 48, 16)];
        let (pl, atlas_w, atlas_h) = layout_strip(&items);
        for p in &pl {
            let u0 = p.atlas_x as f32 / atlas_w as f32;
            let u1 = (p.atlas_x + p.pixel_w) as f32 / atlas_w as f32;
            let v1 = p.pixel_h as f32 / atlas_h as f32;
            assert!(u0 >= 0.0 && u1 <= 1.0, "u out of range for '{}'", p.name);
            assert!(v1 <= 1.0, "v out of range for '{}'", p.name);
            assert!(u0 < u1, "uv_min must be strictly below uv_max");
        }
    }
}
