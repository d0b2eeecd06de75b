//! RGBA pixel rendering.

use crate::options::RenderOptions;
use crate::symbol::Symbol;

/// A square RGBA8 image, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    pixels: Vec<u8>,
}

impl Image {
    /// Side length in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// RGBA bytes, four per pixel.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// RGBA of the pixel at (`x`, `y`).
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

/// Draw `symbol` with its quiet zone.
///
/// Pixels inside the margin map back to module
/// `floor((pixel - margin * scale) / scale)`; everything else is light.
pub fn render(symbol: &Symbol, options: &RenderOptions) -> Image {
    let size = symbol.size();
    let scale = options.scale_for(size);
    let width = options.image_width(size);
    let margin = options.margin as f64 * scale;

    let dark = options.color.dark;
    let light = options.color.light;

    let mut pixels = Vec::with_capacity(width * width * 4);
    for i in 0..width {
        for j in 0..width {
            let (y, x) = (i as f64, j as f64);
            let inside = y >= margin
                && x >= margin
                && y < width as f64 - margin
                && x < width as f64 - margin;

            let color = if inside {
                let row = (((y - margin) / scale).floor() as usize).min(size - 1);
                let col = (((x - margin) / scale).floor() as usize).min(size - 1);
                if symbol.get(row, col) { dark } else { light }
            } else {
                light
            };

            pixels.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    tracing::debug!(width, scale, "rendered image");
    Image { width, pixels }
}
