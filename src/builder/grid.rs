use std::ops::Deref;

use image::{Rgb, RgbImage};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};

use crate::metadata::{Color, Version};
use crate::pattern::alignment_centers;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Data(c) => c,
        }
    }
}

// Module grid of a symbol. Holds the function patterns and whatever the caller places in the
// data region; no payload is encoded.
#[derive(Debug, Clone)]
pub struct Grid {
    grid: Vec<Module>,
    w: usize,
}

// Grid
//------------------------------------------------------------------------------

impl Grid {
    pub fn new(ver: Version) -> Self {
        let w = ver.width();
        Self { grid: vec![Module::Empty; w * w], w }
    }

    pub fn grid(&self) -> &[Module] {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|m| m.is_dark()).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for r in 0..w {
            for c in 0..w {
                let ch = match self.get(r, c) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(ch);
            }
            res.push('\n');
        }
        res
    }

    // Negative coordinates count back from the far edge
    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "Row {r} out of bounds for width {w}");
        debug_assert!(-w <= c && c < w, "Column {c} out of bounds for width {w}");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl Grid {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Draws the 7x7 finder centred at (r, c) plus its separator on the sides facing the symbol
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_top, dr_bottom): (i16, i16) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right): (i16, i16) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                let ring = i16::max(i.abs(), j.abs());
                self.set(r + i, c + j, Module::Func(Color::from(ring != 2 && ring != 4)));
            }
        }
    }
}

// Timing pattern
//------------------------------------------------------------------------------

impl Grid {
    fn draw_timing_pattern(&mut self) {
        let last = self.w as i16 - 9;
        self.draw_line(6, 8, 6, last);
        self.draw_line(8, 6, last, 6);
    }

    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                self.set(r1, j, Module::Func(Color::from(j & 1 == 0)));
            }
        } else {
            for i in r1..=r2 {
                self.set(i, c1, Module::Func(Color::from(i & 1 == 0)));
            }
        }
    }
}

// Alignment pattern
//------------------------------------------------------------------------------

impl Grid {
    fn draw_alignment_patterns(&mut self) {
        for ctr in alignment_centers(self.w as i32) {
            self.draw_alignment_pattern_at(ctr.y as i16, ctr.x as i16);
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        for i in -2..=2i16 {
            for j in -2..=2i16 {
                let ring = i16::max(i.abs(), j.abs());
                self.set(r + i, c + j, Module::Func(Color::from(ring != 1)));
            }
        }
    }
}

// All function patterns
//------------------------------------------------------------------------------

impl Grid {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_timing_pattern();
        self.draw_alignment_patterns();
    }

    // Fills every module not taken by a function pattern with the color returned for its
    // (row, column)
    pub fn fill_data(&mut self, mut f: impl FnMut(i16, i16) -> Color) {
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if let Module::Empty = self.get(r, c) {
                    self.set(r, c, Module::Data(f(r, c)));
                }
            }
        }
    }
}

#[cfg(test)]
mod function_pattern_tests {
    use test_case::test_case;

    use super::{Grid, Module};
    use crate::metadata::{Color, Version};
    use crate::pattern::{is_alignment, is_finder};

    #[test]
    fn test_finder_pattern() {
        let mut grid = Grid::new(Version::new(1).unwrap());
        grid.draw_finder_patterns();
        assert_eq!(
            grid.to_debug_str(),
            "\n\
             fffffffF.....Ffffffff\n\
             fFFFFFfF.....FfFFFFFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFFFFFfF.....FfFFFFFf\n\
             fffffffF.....Ffffffff\n\
             FFFFFFFF.....FFFFFFFF\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             FFFFFFFF.............\n\
             fffffffF.............\n\
             fFFFFFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFFFFFfF.............\n\
             fffffffF.............\n"
        );
    }

    #[test]
    fn test_all_function_patterns_2() {
        let mut grid = Grid::new(Version::new(2).unwrap());
        grid.draw_all_function_patterns();
        assert_eq!(
            grid.to_debug_str(),
            "\n\
             fffffffF.........Ffffffff\n\
             fFFFFFfF.........FfFFFFFf\n\
             fFfffFfF.........FfFfffFf\n\
             fFfffFfF.........FfFfffFf\n\
             fFfffFfF.........FfFfffFf\n\
             fFFFFFfF.........FfFFFFFf\n\
             fffffffFfFfFfFfFfFfffffff\n\
             FFFFFFFF.........FFFFFFFF\n\
             ......f..................\n\
             ......F..................\n\
             ......f..................\n\
             ......F..................\n\
             ......f..................\n\
             ......F..................\n\
             ......f..................\n\
             ......F..................\n\
             ......f.........fffff....\n\
             FFFFFFFF........fFFFf....\n\
             fffffffF........fFfFf....\n\
             fFFFFFfF........fFFFf....\n\
             fFfffFfF........fffff....\n\
             fFfffFfF.................\n\
             fFfffFfF.................\n\
             fFFFFFfF.................\n\
             fffffffF.................\n"
        );
    }

    #[test]
    fn test_alignment_pattern_rings() {
        let mut grid = Grid::new(Version::new(1).unwrap());
        grid.draw_alignment_pattern_at(10, 10);
        for i in -2..=2i16 {
            for j in -2..=2i16 {
                let ring = i16::max(i.abs(), j.abs());
                let exp = Module::Func(Color::from(ring != 1));
                assert_eq!(grid.get(10 + i, 10 + j), exp, "Offset ({i}, {j})");
            }
        }
        assert_eq!(grid.get(7, 10), Module::Empty);
    }

    #[test]
    fn test_finder_pattern_corners_of_largest() {
        let mut grid = Grid::new(Version::new(40).unwrap());
        grid.draw_finder_patterns();
        // Stone centres dark, separators light, opposite corner untouched
        assert_eq!(grid.get(3, 3), Module::Func(Color::Dark));
        assert_eq!(grid.get(3, -4), Module::Func(Color::Dark));
        assert_eq!(grid.get(-4, 3), Module::Func(Color::Dark));
        assert_eq!(grid.get(7, 7), Module::Func(Color::Light));
        assert_eq!(grid.get(7, -8), Module::Func(Color::Light));
        assert_eq!(grid.get(-8, 7), Module::Func(Color::Light));
        assert_eq!(grid.get(-1, -1), Module::Empty);
        assert_eq!(grid.count_dark_modules(), 3 * 33);
    }

    // Drawn finders and separators occupy exactly the classifier's finder zones, and drawn
    // alignment patterns exactly its alignment cells
    #[test_case(1)]
    #[test_case(2)]
    #[test_case(7)]
    #[test_case(14)]
    #[test_case(40)]
    fn test_drawn_patterns_match_classifier(ver: u8) {
        let ver = Version::new(ver).unwrap();
        let m = ver.width() as i32;

        let mut finders = Grid::new(ver);
        finders.draw_finder_patterns();
        let mut aligns = Grid::new(ver);
        aligns.draw_alignment_patterns();

        for r in 0..m {
            for c in 0..m {
                let (r16, c16) = (r as i16, c as i16);
                let drawn_finder = finders.get(r16, c16) != Module::Empty;
                let drawn_align = aligns.get(r16, c16) != Module::Empty;
                assert_eq!(drawn_finder, is_finder(c, r, m), "({c}, {r})");
                assert_eq!(drawn_align, is_alignment(c, r, m), "({c}, {r})");
            }
        }
    }

    #[test]
    fn test_fill_data_skips_function_modules() {
        let mut grid = Grid::new(Version::new(1).unwrap());
        grid.draw_all_function_patterns();
        let before = grid.grid().iter().filter(|m| matches!(m, Module::Func(_))).count();
        grid.fill_data(|_, _| Color::Dark);
        let after = grid.grid().iter().filter(|m| matches!(m, Module::Func(_))).count();
        assert_eq!(before, after);
        assert!(grid.grid().iter().all(|m| *m != Module::Empty));
        assert_eq!(grid.get(10, 10), Module::Data(Color::Dark));
    }
}

// Render
//------------------------------------------------------------------------------

impl Grid {
    // Renders with the same quiet zone in pixels on every side
    pub fn to_image(&self, module_sz: u32, quiet_zone: u32) -> RgbImage {
        self.render_with_margins(module_sz, [quiet_zone; 4])
    }

    // Renders with margins in pixels given as [left, top, right, bottom]
    pub fn render_with_margins(&self, module_sz: u32, margins: [u32; 4]) -> RgbImage {
        debug_assert!(module_sz > 0, "Module size must be positive");

        let [left, top, right, bottom] = margins;
        let qr_sz = self.w as u32 * module_sz;
        let mut canvas =
            RgbImage::from_pixel(left + qr_sz + right, top + qr_sz + bottom, Rgb([255, 255, 255]));

        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if !self.get(r, c).is_dark() {
                    continue;
                }
                let x = left + c as u32 * module_sz;
                let y = top + r as u32 * module_sz;
                let rect = Rect::at(x as i32, y as i32).of_size(module_sz, module_sz);
                draw_filled_rect_mut(&mut canvas, rect, Rgb([0, 0, 0]));
            }
        }

        canvas
    }

    #[cfg(test)]
    pub fn to_str(&self, quiet_zone: usize) -> String {
        let total_sz = quiet_zone + self.w + quiet_zone;
        let qz = quiet_zone as i16;

        let mut canvas = String::with_capacity(total_sz * (total_sz + 1));
        for i in 0..total_sz as i16 {
            for j in 0..total_sz as i16 {
                let (r, c) = (i - qz, j - qz);
                let w = self.w as i16;
                let inside = (0..w).contains(&r) && (0..w).contains(&c);
                let dark = inside && self.get(r, c).is_dark();
                canvas.push(if dark { '█' } else { ' ' });
            }
            canvas.push('\n');
        }

        canvas
    }
}
