// Uncomment these if you want to generate placeholder walk frames
//
// use image::{Rgba, RgbaImage};
// use std::path::Path;
//
// fn draw_walker(width: u32, height: u32, facing_left: bool, stride: u32) -> RgbaImage {
//     let mut img = RgbaImage::new(width, height);
//     let body = Rgba([0x3A, 0x5F, 0xCD, 0xFF]);
//     let skin = Rgba([0xE8, 0xC3, 0x9E, 0xFF]);
//     let boot = Rgba([0x44, 0x30, 0x26, 0xFF]);
//     // Torso fills the middle columns; head sits on top.
//     for y in 2..height - 4 {
//         for x in width / 4..3 * width / 4 {
//             img.put_pixel(x, y, if y < 6 { skin } else { body });
//         }
//     }
//     // Feet spread apart by `stride` so the three frames read as a step cycle.
//     let base = height - 4;
//     let (lx, rx) = if facing_left {
//         (width / 4 - stride.min(width / 4), 3 * width / 4 - 2 + stride / 2)
//     } else {
//         (width / 4 - stride / 2, 3 * width / 4 - 2 + stride.min(width / 4))
//     };
//     for dy in 0..4u32 {
//         for dx in 0..2u32 {
//             if lx + dx < width { img.put_pixel(lx + dx, base + dy, boot); }
//             if rx + dx < width { img.put_pixel(rx + dx, base + dy, boot); }
//         }
//     }
//     img
// }
//
// fn save_if_missing(path: &str, img: RgbaImage) {
//     if !Path::new(path).exists() {
//         img.save(path).unwrap_or_else(|e| eprintln!("build: could not save {path}: {e}"));
//     }
// }
//
// fn main() {
//     let dir = "resources/sprites";
//     std::fs::create_dir_all(dir).expect("build: failed to create resources/sprites/");
//
//     for (i, stride) in [0u32, 2, 4].iter().enumerate() {
//         save_if_missing(&format!("{dir}/character_left{}.png", i + 1), draw_walker(16, 16, true, *stride));
//         save_if_missing(&format!("{dir}/character_right{}.png", i + 1), draw_walker(16, 16, false, *stride));
//     }
//
//     println!("cargo:rerun-if-changed=build.rs");
// }
fn main() {

}
