use imageproc::rect::Rect;

// Layout
//------------------------------------------------------------------------------

/// Maps module coordinates onto a canvas that shows the whole symbol, quiet zone included.
///
/// The canvas is split into `module_count + 2 * quiet_zone` cells per side. Rows and columns
/// are content coordinates, so `(0, 0)` is the top-left finder module, not the corner of
/// the quiet zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    w: u32,
    h: u32,
    module_count: usize,
    quiet_zone: usize,
}

impl Layout {
    pub fn new(w: u32, h: u32, module_count: usize, quiet_zone: usize) -> Self {
        debug_assert!(module_count > 0, "Layout needs at least one module");
        Self { w, h, module_count, quiet_zone }
    }

    pub fn module_count(&self) -> usize {
        self.module_count
    }

    pub fn quiet_zone(&self) -> usize {
        self.quiet_zone
    }

    pub fn total_modules(&self) -> usize {
        self.module_count + 2 * self.quiet_zone
    }

    /// Width and height of a single cell in pixels.
    pub fn module_px(&self) -> (f64, f64) {
        let total = self.total_modules() as f64;
        (self.w as f64 / total, self.h as f64 / total)
    }

    fn edges(&self, i: usize, len: u32) -> (i32, i32) {
        let f = len as f64 / self.total_modules() as f64;
        let i = (i + self.quiet_zone) as f64;
        let lo = (i * f).round() as i32;
        let hi = ((i + 1.0) * f).round() as i32 - 1;
        (lo, hi.max(lo))
    }

    /// Pixel aligned cell of the module at (row, col). Neighbouring cells share no pixel and
    /// leave no gap; on canvases smaller than one pixel per cell each cell is still 1px wide.
    pub fn cell_bounds(&self, row: usize, col: usize) -> Rect {
        let (x0, x1) = self.edges(col, self.w);
        let (y0, y1) = self.edges(row, self.h);
        Rect::at(x0, y0).of_size((x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32)
    }

    /// Centre of the module at (row, col) in canvas coordinates.
    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        let (mw, mh) = self.module_px();
        let q = self.quiet_zone as f64;
        ((col as f64 + q + 0.5) * mw, (row as f64 + q + 0.5) * mh)
    }
}
