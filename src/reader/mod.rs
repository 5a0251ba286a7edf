pub mod binarize;
pub mod bounds;
pub mod runs;
pub mod sample;
pub mod validate;

use crate::{
    error::{GeomError, GeomResult},
    metadata::{is_standard_size, Version},
};
use binarize::{Binarize, BinaryImage, DEFAULT_THRESHOLD};
use bounds::BoundingBox;
use runs::estimate_module_size;
use validate::{
    candidates_within, closest_standard_size, select_best, validate_size, Candidate, MAX_SCORE,
};

// Geometry estimate
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryEstimate {
    /// Modules per side of the symbol, always a standard size (21 to 177 in steps of 4).
    pub module_count: usize,
    /// Average margin between the content box and the image edges, in pixels.
    pub quiet_zone: u32,
    /// Pixel pitch of one module, content width divided by module count.
    pub module_size: f64,
    /// Number of finder patterns (0-3) that read correctly at the chosen size.
    pub finder_score: u8,
    /// Tightest box around the dark pixels of the symbol.
    pub bounds: BoundingBox,
}

impl GeometryEstimate {
    /// Builds the geometry of a square image whose symbol size and quiet zone (in modules per
    /// side) are already known, skipping detection altogether.
    ///
    /// The content box is snapped to whole pixels. No finder is checked, so `finder_score`
    /// is 0.
    pub fn from_dimensions(
        w: u32,
        h: u32,
        module_count: usize,
        quiet_zone_modules: u32,
    ) -> GeomResult<Self> {
        if w == 0 || h == 0 {
            return Err(GeomError::EmptyImage);
        }
        if w != h {
            return Err(GeomError::NonSquareImage);
        }
        if !is_standard_size(module_count) {
            return Err(GeomError::InvalidModuleCount);
        }

        let qz = quiet_zone_modules as f64;
        let pitch = w as f64 / (module_count as f64 + 2.0 * qz);
        if pitch < 1.0 {
            return Err(GeomError::InvalidQuietZone);
        }

        let min = (qz * pitch).round() as u32;
        let max = ((qz + module_count as f64) * pitch).round() as u32 - 1;
        let bounds = BoundingBox { min_x: min, max_x: max, min_y: min, max_y: max };

        Ok(Self {
            module_count,
            quiet_zone: min,
            module_size: pitch,
            finder_score: 0,
            bounds,
        })
    }

    pub fn version(&self) -> Option<Version> {
        Version::from_width(self.module_count)
    }

    /// Quiet zone expressed in modules, rounded to the nearest whole module.
    pub fn quiet_zone_modules(&self) -> u32 {
        (self.quiet_zone as f64 / self.module_size).round() as u32
    }

    pub fn is_confident(&self) -> bool {
        self.finder_score == MAX_SCORE
    }
}

// Geometry detector
//------------------------------------------------------------------------------

/// Infers the module grid of an axis aligned QR symbol from its pixels.
///
/// ```rust
/// use qrgrid::{builder::Grid, Color, GeometryDetector, Version};
///
/// let mut grid = Grid::new(Version::new(2).unwrap());
/// grid.draw_all_function_patterns();
/// grid.fill_data(|r, c| Color::from((r + c) % 2 == 0));
/// let img = grid.to_image(6, 24);
///
/// let est = GeometryDetector::new().threshold(100).detect(&img).unwrap();
/// assert_eq!(est.module_count, 25);
/// assert_eq!(est.quiet_zone, 24);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryDetector {
    threshold: u8,
    narrow_radius: usize,
    wide_radius: usize,
    rough_fraction: f64,
}

impl Default for GeometryDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryDetector {
    pub fn new() -> Self {
        Self { threshold: DEFAULT_THRESHOLD, narrow_radius: 2, wide_radius: 4, rough_fraction: 0.3 }
    }

    pub fn threshold(&mut self, threshold: u8) -> &mut Self {
        self.threshold = threshold;
        self
    }

    /// Sizes within this distance of the measured module count are checked first.
    pub fn narrow_radius(&mut self, radius: usize) -> &mut Self {
        self.narrow_radius = radius;
        self
    }

    /// Search radius used when no size within the narrow radius validates all three finders.
    pub fn wide_radius(&mut self, radius: usize) -> &mut Self {
        self.wide_radius = radius;
        self
    }

    /// Share of the shortest middle row runs averaged into the rough module size.
    pub fn rough_fraction(&mut self, fraction: f64) -> &mut Self {
        self.rough_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn detect<I: Binarize + ?Sized>(&self, img: &I) -> GeomResult<GeometryEstimate> {
        let img = img.binarize(self.threshold);
        self.detect_binary(&img)
    }

    pub fn detect_binary(&self, img: &BinaryImage) -> GeomResult<GeometryEstimate> {
        log::debug!("Detecting geometry of {}x{} image...", img.w, img.h);
        if img.is_empty() {
            return Err(GeomError::EmptyImage);
        }

        let bounds = BoundingBox::scan(img).ok_or(GeomError::EmptyImage)?;
        let quiet_zone = bounds.quiet_zone(img.w, img.h);
        log::debug!("Content box {bounds:?}, quiet zone {quiet_zone}px");

        let module_px = estimate_module_size(img, &bounds, self.rough_fraction);
        let raw = (bounds.width() as f64 / module_px).round() as usize;
        log::debug!("Raw module count {raw}");

        let best = self.search(img, &bounds, raw);
        let (module_count, finder_score) = match best {
            Some(Candidate { size, score, .. }) => (size, score),
            None => {
                let size = closest_standard_size(raw);
                log::debug!("No standard size near {raw}, falling back to {size}");
                (size, validate_size(img, &bounds, size))
            }
        };
        log::debug!("Chose {module_count} modules with {finder_score}/{MAX_SCORE} finders");

        Ok(GeometryEstimate {
            module_count,
            quiet_zone,
            module_size: bounds.width() as f64 / module_count as f64,
            finder_score,
            bounds,
        })
    }

    // Narrow search first, then the wider ring if no size validated every finder
    fn search(&self, img: &BinaryImage, bounds: &BoundingBox, raw: usize) -> Option<Candidate> {
        let score = |size| validate_size(img, bounds, size);

        let best = select_best(candidates_within(raw, self.narrow_radius), raw, None, score);
        if best.is_some_and(|b| b.score >= MAX_SCORE) {
            return best;
        }

        log::debug!("Widening search to ±{} modules", self.wide_radius);
        let narrow = self.narrow_radius;
        let wider = candidates_within(raw, self.wide_radius).filter(|s| s.abs_diff(raw) > narrow);
        select_best(wider, raw, best, score)
    }
}

/// Detects geometry with the default settings.
pub fn detect<I: Binarize + ?Sized>(img: &I) -> GeomResult<GeometryEstimate> {
    GeometryDetector::new().detect(img)
}
