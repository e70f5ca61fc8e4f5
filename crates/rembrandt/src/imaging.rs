//! Conversions between image files and engine pixel buffers.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, ImageReader, RgbaImage};
use rembrandt_core::PixelBuffer;

/// Decode an image file (any format `image` understands) into RGBA8 pixels.
pub fn open(path: &Path) -> Result<PixelBuffer> {
    let img = ImageReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read {}", path.display()))?
        .decode()
        .with_context(|| format!("Failed to decode {}", path.display()))?
        .to_rgba8();
    from_image(img)
}

/// Decode in-memory image bytes into RGBA8 pixels.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer> {
    let img = image::load_from_memory(bytes)
        .context("Failed to decode image")?
        .to_rgba8();
    from_image(img)
}

pub fn from_image(img: RgbaImage) -> Result<PixelBuffer> {
    let (w, h) = img.dimensions();
    PixelBuffer::new(w, h, img.into_raw()).context("Decoded image has an unexpected layout")
}

pub fn to_image(buf: &PixelBuffer) -> Result<RgbaImage> {
    RgbaImage::from_raw(buf.width(), buf.height(), buf.as_bytes().to_vec())
        .context("Pixel buffer does not match its dimensions")
}

pub fn encode_png(buf: &PixelBuffer) -> Result<Vec<u8>> {
    let img = to_image(buf)?;
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(png)
}

/// Save as PNG, creating parent directories as needed.
pub fn save_png(buf: &PixelBuffer, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let png = encode_png(buf)?;
    std::fs::write(path, png).with_context(|| format!("Failed to write {}", path.display()))
}
