use crate::metadata::Color;

use super::{binarize::BinaryImage, bounds::BoundingBox};

// Finder line
//------------------------------------------------------------------------------

// A horizontal line through the centre of a finder reads 1:1:3:1:1, so the stone run is
// three times the outer runs. Anything strictly between these bounds is accepted.
pub const FINDER_RATIO_MIN: f64 = 2.5;
pub const FINDER_RATIO_MAX: f64 = 3.5;

// Calibrated module sizes below this are treated as noise
pub const MIN_MODULE_SIZE: f64 = 2.0;

// Vertical offset, in modules, from the top of the symbol to the centre of the top-left finder
pub const FINDER_CENTER_OFFSET: f64 = 3.5;

// Run length decomposition
//------------------------------------------------------------------------------

// Splits row y between x0 and x1 (inclusive) into maximal same-color runs. The first run has
// the color of the pixel at x0; colors alternate from there.
pub fn row_runs(img: &BinaryImage, y: u32, x0: u32, x1: u32) -> Vec<u32> {
    let mut runs = Vec::new();
    if y >= img.h || x0 > x1 || x0 >= img.w {
        return runs;
    }

    let x1 = x1.min(img.w - 1);
    let span = &img.row(y)[x0 as usize..=x1 as usize];

    let mut last: Option<Color> = None;
    for &color in span {
        if last == Some(color) {
            if let Some(len) = runs.last_mut() {
                *len += 1;
            }
        } else {
            runs.push(1);
            last = Some(color);
        }
    }

    runs
}

// Rough module size
//------------------------------------------------------------------------------

// Averages the shortest runs of the middle row. In a QR symbol the shortest runs are single
// modules; taking only the smallest fraction keeps finder and background runs out of the mean.
pub fn rough_module_size(img: &BinaryImage, bounds: &BoundingBox, fraction: f64) -> f64 {
    let mut runs = row_runs(img, bounds.mid_y(), bounds.min_x, bounds.max_x);
    if runs.is_empty() {
        return bounds.width() as f64;
    }

    runs.sort_unstable();
    let count = ((runs.len() as f64 * fraction) as usize).max(2).min(runs.len());
    let sum: u32 = runs[..count].iter().sum();

    sum as f64 / count as f64
}

// Finder calibration
//------------------------------------------------------------------------------

// Measures the top-left finder along its middle row. Returns the average width of the two
// outer dark runs if the stone run is about three times as wide, None otherwise.
pub fn calibrate_finder(img: &BinaryImage, bounds: &BoundingBox, rough: f64) -> Option<f64> {
    let y = (bounds.min_y as f64 + rough * FINDER_CENTER_OFFSET).round() as u32;
    if y > bounds.max_y {
        return None;
    }

    let runs = row_runs(img, y, bounds.min_x, bounds.max_x);
    if runs.len() < 5 || runs[0] == 0 {
        return None;
    }

    let outer_avg = (runs[0] + runs[4]) as f64 / 2.0;
    let ratio = runs[2] as f64 / outer_avg;
    log::trace!("Finder row {y}: runs {:?}, stone ratio {ratio:.3}", &runs[..5]);

    (FINDER_RATIO_MIN < ratio && ratio < FINDER_RATIO_MAX).then_some(outer_avg)
}

// Calibrated size if it is plausible, rough size otherwise
pub fn estimate_module_size(img: &BinaryImage, bounds: &BoundingBox, fraction: f64) -> f64 {
    let rough = rough_module_size(img, bounds, fraction);
    log::debug!("Rough module size from middle row: {rough:.3}px");

    match calibrate_finder(img, bounds, rough) {
        Some(sz) if sz >= MIN_MODULE_SIZE => {
            log::debug!("Finder calibrated module size: {sz:.3}px");
            sz
        }
        Some(sz) => {
            log::debug!("Calibrated module size {sz:.3}px too small, using rough size");
            rough
        }
        None => {
            log::debug!("Finder calibration failed, using rough size");
            rough
        }
    }
}
