use crate::metadata::Color;

use super::{binarize::BinaryImage, GeometryEstimate};

// Module matrix
//------------------------------------------------------------------------------

// Color of every module of a detected symbol, row-major, (x, y) = (column, row)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    modules: Vec<Color>,
    w: usize,
}

impl ModuleMatrix {
    pub fn width(&self) -> usize {
        self.w
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.w || y >= self.w {
            return None;
        }
        Some(self.modules[y * self.w + x])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.modules.chunks(self.w)
    }

    pub fn count_dark(&self) -> usize {
        self.modules.iter().filter(|c| c.is_dark()).count()
    }
}

// Sampling
//------------------------------------------------------------------------------

// Reads the pixel nearest the centre of every module of the estimate's content box. Centres
// falling outside the image are clamped to its edge.
pub fn sample_modules(img: &BinaryImage, est: &GeometryEstimate) -> ModuleMatrix {
    let n = est.module_count;
    let b = &est.bounds;
    let mod_w = b.width() as f64 / n as f64;
    let mod_h = b.height() as f64 / n as f64;

    let max_x = img.w.saturating_sub(1) as f64;
    let max_y = img.h.saturating_sub(1) as f64;

    let mut modules = Vec::with_capacity(n * n);
    for y in 0..n {
        let cy = (b.min_y as f64 + (y as f64 + 0.5) * mod_h).round().clamp(0.0, max_y) as u32;
        for x in 0..n {
            let cx = (b.min_x as f64 + (x as f64 + 0.5) * mod_w).round().clamp(0.0, max_x) as u32;
            modules.push(img.get(cx, cy).unwrap_or(Color::Light));
        }
    }

    ModuleMatrix { modules, w: n }
}
