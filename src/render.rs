//! Rasterization of layout grids to PNG
//!
//! Renders each cell as a shaded square, with the land use's icon (if any)
//! centered on top. The transform is deterministic: the same grid and
//! appearance table always produce the same pixels.

use std::error::Error;
use std::fmt;
use std::io::Cursor;

use base64::Engine;
use image::{ImageBuffer, Rgb, RgbImage};

use crate::appearance::{appearance, IconGlyph, ICON_MASK_SIZE};
use crate::grid::CityGrid;
use crate::land_use::LandUse;

/// Side length of one cell in the exported image, in pixels.
pub const CELL_SIZE: u32 = 40;

/// Fraction of the cell width an icon occupies.
pub const ICON_SCALE: f32 = 0.6;

/// Rendering a zero-row grid is meaningless rather than correctable, so it
/// is the one precondition failure the rasterizer reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyGridError;

impl fmt::Display for EmptyGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot render an empty grid")
    }
}

impl Error for EmptyGridError {}

/// Render a layout grid to an RGB image.
///
/// Cell fills are modulated by brightness `1.2 - density * 0.5`: low density
/// renders lighter, high density darker. Icons keep their configured tint
/// regardless of the cell's shading.
pub fn render_grid(grid: &CityGrid) -> Result<RgbImage, EmptyGridError> {
    if grid.is_empty() {
        return Err(EmptyGridError);
    }

    let side = grid.size() as u32 * CELL_SIZE;
    let background = appearance(LandUse::Empty).fill;
    let mut img: RgbImage = ImageBuffer::from_pixel(side, side, Rgb(background));

    for (y, row) in grid.rows().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            let look = appearance(cell.land_use);
            let brightness = 1.2 - cell.density * 0.5;
            let fill = shade(look.fill, brightness);

            let cell_x = x as u32 * CELL_SIZE;
            let cell_y = y as u32 * CELL_SIZE;
            for py in 0..CELL_SIZE {
                for px in 0..CELL_SIZE {
                    img.put_pixel(cell_x + px, cell_y + py, Rgb(fill));
                }
            }

            if let Some(icon) = look.icon {
                draw_icon(&mut img, icon, cell_x, cell_y);
            }
        }
    }

    Ok(img)
}

/// Multiply each channel by `brightness`, saturating at white.
fn shade(color: [u8; 3], brightness: f32) -> [u8; 3] {
    let mut out = [0u8; 3];
    for (o, &c) in out.iter_mut().zip(color.iter()) {
        *o = (c as f32 * brightness).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Draw an icon centered in the cell at `(cell_x, cell_y)`, scaled to
/// `ICON_SCALE` of the cell width, alpha-blended with its tint.
fn draw_icon(img: &mut RgbImage, icon: &IconGlyph, cell_x: u32, cell_y: u32) {
    let target = (CELL_SIZE as f32 * ICON_SCALE).round() as u32;
    if target == 0 {
        return;
    }
    let offset = (CELL_SIZE - target) / 2;
    let [tr, tg, tb, ta] = icon.color;
    let alpha = ta as f32 / 255.0;

    for ty in 0..target {
        for tx in 0..target {
            // Nearest-neighbor sample from the native mask.
            let sx = tx * ICON_MASK_SIZE / target;
            let sy = ty * ICON_MASK_SIZE / target;
            if !icon.covers(sx, sy) {
                continue;
            }
            let px = cell_x + offset + tx;
            let py = cell_y + offset + ty;
            let Rgb([br, bg, bb]) = *img.get_pixel(px, py);
            img.put_pixel(
                px,
                py,
                Rgb([
                    blend(br, tr, alpha),
                    blend(bg, tg, alpha),
                    blend(bb, tb, alpha),
                ]),
            );
        }
    }
}

fn blend(base: u8, tint: u8, alpha: f32) -> u8 {
    (tint as f32 * alpha + base as f32 * (1.0 - alpha)).round() as u8
}

/// Encode an image as PNG bytes.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

/// Wrap PNG bytes as a `data:` URI.
pub fn png_data_uri(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

/// Download-style filename for an exported plan image.
pub fn image_filename(city_name: &str) -> String {
    format!("{}-plan.png", crate::plan::slugify(city_name))
}
