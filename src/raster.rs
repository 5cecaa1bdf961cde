//! Square color matrices, and reading and writing them as image files.

use crate::error::{Error, Result};
use image::{Rgb, RgbImage};
use std::path::Path;

/// A square matrix of RGB colors, stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMatrix {
    side: usize,
    pixels: Vec<[u8; 3]>,
}

impl ColorMatrix {
    pub fn new(side: usize, pixels: Vec<[u8; 3]>) -> Result<Self> {
        if pixels.len() != side * side {
            return Err(Error::Invariant(format!(
                "color matrix of side {side} needs {} pixels, got {}",
                side * side,
                pixels.len()
            )));
        }
        Ok(Self { side, pixels })
    }

    /// Caller guarantees `pixels.len() == side * side`.
    pub(crate) fn square(side: usize, pixels: Vec<[u8; 3]>) -> Self {
        debug_assert_eq!(pixels.len(), side * side);
        Self { side, pixels }
    }

    /// A matrix where every pixel is the same color.
    pub fn filled(side: usize, color: [u8; 3]) -> Self {
        Self {
            side,
            pixels: vec![color; side * side],
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn get(&self, row: usize, col: usize) -> Option<[u8; 3]> {
        if row < self.side && col < self.side {
            Some(self.pixels[row * self.side + col])
        } else {
            None
        }
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Convert a decoded image, which must be square and not empty.
    pub fn from_image(image: &RgbImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::Configuration("target image is empty".into()));
        }
        if width != height {
            return Err(Error::Configuration(format!(
                "target image must be square, found {width}x{height}"
            )));
        }
        let pixels = image.pixels().map(|Rgb(rgb)| *rgb).collect();
        Ok(Self {
            side: width as usize,
            pixels,
        })
    }

    pub fn to_image(&self) -> RgbImage {
        let side = self.side as u32;
        RgbImage::from_fn(side, side, |x, y| Rgb(self.pixels[y as usize * self.side + x as usize]))
    }

    /// Load an image file in any format the `image` crate can decode.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::Configuration(format!("target image not found {path:?}")));
        }
        let image = image::open(path)?.to_rgb8();
        Self::from_image(&image)
    }

    /// Write this matrix as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_image()
            .save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        Ok(())
    }
}
