//! RGBA pixel storage and color lookup.

use crate::CompareError;

/// Bytes per pixel (RGBA, 8 bits per channel).
pub const CHANNELS: usize = 4;

/// An RGBA color with every channel normalized to `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Normalize raw 8-bit channels by 255.
    pub fn from_rgba8([r, g, b, a]: [u8; 4]) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
            a: f64::from(a) / 255.0,
        }
    }
}

/// Row-major RGBA buffer. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap `bytes` as a `width x height` RGBA buffer.
    ///
    /// Fails when `bytes.len() != width * height * 4`.
    pub fn new(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self, CompareError> {
        let expected = byte_len(width, height);
        if bytes.len() != expected {
            return Err(CompareError::BufferLength {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bytes,
        })
    }

    /// Caller guarantees `bytes.len() == width * height * 4`.
    pub(crate) fn from_parts(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), byte_len(width, height));
        Self {
            width,
            height,
            bytes,
        }
    }

    /// A buffer where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            width,
            height,
            bytes: rgba.repeat(pixels),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Raw channels at `(x, y)`.
    ///
    /// Out-of-range coordinates are a caller bug; they trip a debug assertion
    /// and otherwise panic on the slice bounds check.
    #[inline]
    pub fn rgba_at(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width,
            self.height
        );
        let i = self.offset(x, y);
        let px = &self.bytes[i..i + CHANNELS];
        [px[0], px[1], px[2], px[3]]
    }

    /// Normalized color at `(x, y)`. Same preconditions as [`Self::rgba_at`].
    #[inline]
    pub fn color_at(&self, x: u32, y: u32) -> Color {
        Color::from_rgba8(self.rgba_at(x, y))
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (self.width as usize * y as usize + x as usize) * CHANNELS
    }
}

fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}
