//! Classification of module-grid coordinates into finder, alignment and data modules.
//!
//! Coordinates are `(x, y)` = `(column, row)` in content-module space, i.e. the quiet zone is
//! not part of the grid. Every predicate is total: coordinates outside `[0, module_count)`
//! are never part of a pattern and return `false`.

use super::metadata::Version;

// Side of the square reserved around each finder: 7x7 finder plus 1 module separator
pub const FINDER_ZONE: i32 = 8;

// Alignment patterns are 5x5, i.e. everything within 2 modules of the centre
pub const ALIGNMENT_RADIUS: i32 = 2;

fn in_grid(x: i32, y: i32, module_count: i32) -> bool {
    0 <= x && x < module_count && 0 <= y && y < module_count
}

// Finder pattern
//------------------------------------------------------------------------------

/// Returns true if `(x, y)` lies in one of the three 8x8 finder zones (finder plus separator)
/// anchored at the top-left, top-right and bottom-left corners of the grid.
pub fn is_finder(x: i32, y: i32, module_count: i32) -> bool {
    if !in_grid(x, y, module_count) {
        return false;
    }

    let far = module_count - FINDER_ZONE;
    (x < FINDER_ZONE && y < FINDER_ZONE)
        || (x >= far && y < FINDER_ZONE)
        || (x < FINDER_ZONE && y >= far)
}

// Alignment pattern
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlignmentCenter {
    pub x: i32,
    pub y: i32,
}

/// Centres of every alignment pattern of a symbol with `module_count` modules per side.
///
/// Pairs every position of the version table with every other (rows outer, columns inner)
/// and drops the pairs that fall inside a finder zone. Version 1 and non-standard module
/// counts have no alignment patterns.
pub fn alignment_centers(module_count: i32) -> Vec<AlignmentCenter> {
    let ver = match usize::try_from(module_count).ok().and_then(Version::from_width) {
        Some(v) => v,
        None => return Vec::new(),
    };

    let poses = ver.alignment_pattern();
    let mut centers = Vec::with_capacity(poses.len() * poses.len());
    for &r in poses {
        for &c in poses {
            let (x, y) = (c as i32, r as i32);
            if !is_finder(x, y, module_count) {
                centers.push(AlignmentCenter { x, y });
            }
        }
    }
    centers
}

/// Returns true if `(x, y)` lies within the 5x5 block of any alignment pattern.
pub fn is_alignment(x: i32, y: i32, module_count: i32) -> bool {
    if !in_grid(x, y, module_count) {
        return false;
    }

    alignment_centers(module_count)
        .iter()
        .any(|c| (x - c.x).abs() <= ALIGNMENT_RADIUS && (y - c.y).abs() <= ALIGNMENT_RADIUS)
}

// Module kind
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Finder,
    Alignment,
    Data,
}

impl ModuleKind {
    /// Finder zones take precedence over alignment blocks, which never overlap them anyway.
    pub fn classify(x: i32, y: i32, module_count: i32) -> Self {
        if is_finder(x, y, module_count) {
            Self::Finder
        } else if is_alignment(x, y, module_count) {
            Self::Alignment
        } else {
            Self::Data
        }
    }

    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::Data)
    }
}

// Pattern map
//------------------------------------------------------------------------------

// Precomputed kinds for every module of a grid. Renderers query each module on every
// redraw; building the map once per module count avoids recomputing the alignment table
// for each of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMap {
    kinds: Vec<ModuleKind>,
    w: usize,
}

impl PatternMap {
    pub fn new(module_count: usize) -> Self {
        let w = module_count;
        let mut kinds = vec![ModuleKind::Data; w * w];

        let m = w as i32;
        for y in 0..m {
            for x in 0..m {
                if is_finder(x, y, m) {
                    kinds[y as usize * w + x as usize] = ModuleKind::Finder;
                }
            }
        }

        for c in alignment_centers(m) {
            for y in c.y - ALIGNMENT_RADIUS..=c.y + ALIGNMENT_RADIUS {
                for x in c.x - ALIGNMENT_RADIUS..=c.x + ALIGNMENT_RADIUS {
                    kinds[y as usize * w + x as usize] = ModuleKind::Alignment;
                }
            }
        }

        Self { kinds, w }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn get(&self, x: usize, y: usize) -> Option<ModuleKind> {
        if x >= self.w || y >= self.w {
            return None;
        }
        Some(self.kinds[y * self.w + x])
    }

    pub fn count(&self, kind: ModuleKind) -> usize {
        self.kinds.iter().filter(|&&k| k == kind).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let mut res = String::with_capacity(self.w * (self.w + 1) + 1);
        res.push('\n');
        for row in self.kinds.chunks(self.w) {
            for k in row {
                res.push(match k {
                    ModuleKind::Finder => 'f',
                    ModuleKind::Alignment => 'a',
                    ModuleKind::Data => '.',
                });
            }
            res.push('\n');
        }
        res
    }
}
