use super::binarize::BinaryImage;

// Bounding box
//------------------------------------------------------------------------------

// Tightest axis aligned box around every dark pixel. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl BoundingBox {
    // Single pass over the image. Returns None if there isn't a single dark pixel, so the
    // sentinel extremes never leak into the geometry.
    pub fn scan(img: &BinaryImage) -> Option<Self> {
        let mut bounds: Option<Self> = None;

        for y in 0..img.h {
            let row = img.row(y);
            let first = match row.iter().position(|c| c.is_dark()) {
                Some(x) => x as u32,
                None => continue,
            };
            let last = row.iter().rposition(|c| c.is_dark()).unwrap_or(first as usize) as u32;

            bounds = Some(match bounds {
                None => Self { min_x: first, max_x: last, min_y: y, max_y: y },
                Some(b) => Self {
                    min_x: b.min_x.min(first),
                    max_x: b.max_x.max(last),
                    min_y: b.min_y,
                    max_y: y,
                },
            });
        }

        bounds
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    pub fn mid_y(&self) -> u32 {
        (self.min_y + self.max_y) / 2
    }

    // Margins between the box and the image edges as [left, top, right, bottom]
    pub fn margins(&self, w: u32, h: u32) -> [u32; 4] {
        debug_assert!(self.max_x < w && self.max_y < h, "Bounding box exceeds image");
        [self.min_x, self.min_y, w - 1 - self.max_x, h - 1 - self.max_y]
    }

    // Average of the four margins, rounded half away from zero
    pub fn quiet_zone(&self, w: u32, h: u32) -> u32 {
        let sum: u32 = self.margins(w, h).iter().sum();
        (sum as f64 / 4.0).round() as u32
    }
}
