use image::{DynamicImage, GrayImage, Rgb, RgbImage, Rgba, RgbaImage};

use crate::metadata::Color;

pub const DEFAULT_THRESHOLD: u8 = 128;

// Luminance
//------------------------------------------------------------------------------

// Rec. 601 luma scaled by 1000, kept integral so the threshold comparison is exact
fn luma_milli(r: u8, g: u8, b: u8) -> u32 {
    299 * r as u32 + 587 * g as u32 + 114 * b as u32
}

fn is_dark_rgb(r: u8, g: u8, b: u8, threshold: u8) -> bool {
    luma_milli(r, g, b) < threshold as u32 * 1000
}

// Composites the pixel over white so transparent areas read as light
fn flatten_alpha(px: &Rgba<u8>) -> [u8; 3] {
    let [r, g, b, a] = px.0;
    if a == 255 {
        return [r, g, b];
    }
    let a = a as u32;
    let blend = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
    [blend(r), blend(g), blend(b)]
}

// Binary image
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryImage {
    buffer: Vec<Color>,
    pub w: u32,
    pub h: u32,
}

impl BinaryImage {
    pub fn new(w: u32, h: u32, buffer: Vec<Color>) -> Self {
        debug_assert!(
            buffer.len() == (w * h) as usize,
            "Buffer size {} doesn't match dimensions {w}x{h}",
            buffer.len()
        );
        Self { buffer, w, h }
    }

    pub fn from_fn(w: u32, h: u32, f: impl Fn(u32, u32) -> Color) -> Self {
        let mut buffer = Vec::with_capacity((w * h) as usize);
        for y in 0..h {
            for x in 0..w {
                buffer.push(f(x, y));
            }
        }
        Self { buffer, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.w || y >= self.h {
            return None;
        }
        Some(self.buffer[(y * self.w + x) as usize])
    }

    pub fn row(&self, y: u32) -> &[Color] {
        let off = (y * self.w) as usize;
        &self.buffer[off..off + self.w as usize]
    }
}

// Binarize trait for images from the image crate. A pixel is dark if its luminance is
// strictly below the threshold; there is no adaptive thresholding, the input is expected to
// be a generated or cleanly captured symbol.
//------------------------------------------------------------------------------

pub trait Binarize {
    fn binarize(&self, threshold: u8) -> BinaryImage;
}

impl Binarize for BinaryImage {
    fn binarize(&self, _threshold: u8) -> BinaryImage {
        self.clone()
    }
}

impl Binarize for GrayImage {
    fn binarize(&self, threshold: u8) -> BinaryImage {
        let (w, h) = self.dimensions();
        let buffer = self.pixels().map(|p| Color::from(p[0] < threshold)).collect();
        BinaryImage::new(w, h, buffer)
    }
}

impl Binarize for RgbImage {
    fn binarize(&self, threshold: u8) -> BinaryImage {
        let (w, h) = self.dimensions();
        let buffer = self
            .pixels()
            .map(|&Rgb([r, g, b])| Color::from(is_dark_rgb(r, g, b, threshold)))
            .collect();
        BinaryImage::new(w, h, buffer)
    }
}

impl Binarize for RgbaImage {
    fn binarize(&self, threshold: u8) -> BinaryImage {
        let (w, h) = self.dimensions();
        let buffer = self
            .pixels()
            .map(|p| {
                let [r, g, b] = flatten_alpha(p);
                Color::from(is_dark_rgb(r, g, b, threshold))
            })
            .collect();
        BinaryImage::new(w, h, buffer)
    }
}

impl Binarize for DynamicImage {
    fn binarize(&self, threshold: u8) -> BinaryImage {
        match self {
            DynamicImage::ImageLuma8(img) => img.binarize(threshold),
            DynamicImage::ImageRgb8(img) => img.binarize(threshold),
            DynamicImage::ImageRgba8(img) => img.binarize(threshold),
            img => img.to_rgba8().binarize(threshold),
        }
    }
}
