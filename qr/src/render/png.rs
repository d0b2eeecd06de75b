//! PNG rendering.

use crate::error::{QrError, Result};
use crate::options::RenderOptions;
use crate::render::image;
use crate::symbol::Symbol;

/// Encode `symbol` as an RGBA PNG.
///
/// # Example
/// ```
/// use qrgen::{QrOptions, RenderOptions};
/// let symbol = qrgen::create("Hello", &QrOptions::default()).unwrap();
/// let png_data = qrgen::render::png::render(&symbol, &RenderOptions::default()).unwrap();
/// assert_eq!(&png_data[1..4], b"PNG");
/// ```
pub fn render(symbol: &Symbol, options: &RenderOptions) -> Result<Vec<u8>> {
    let image = image::render(symbol, options);
    let side = image.width() as u32;

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, side, side);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| QrError::Png(e.to_string()))?;
        writer
            .write_image_data(image.pixels())
            .map_err(|e| QrError::Png(e.to_string()))?;
    }

    Ok(png_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::QrOptions;

    #[test]
    fn decodes_back_to_the_image() {
        let symbol = crate::create("HELLO WORLD", &QrOptions::default()).unwrap();
        let options = RenderOptions::default();
        let data = render(&symbol, &options).unwrap();

        let decoder = png::Decoder::new(data.as_slice());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();

        assert_eq!(info.width, 116);
        assert_eq!(info.height, 116);
        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!(&buf[..info.buffer_size()], image::render(&symbol, &options).pixels());
    }
}
