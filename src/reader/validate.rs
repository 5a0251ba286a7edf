use std::cmp::Ordering;

use crate::metadata::{standard_sizes, Color};

use super::{binarize::BinaryImage, bounds::BoundingBox};

// Colors read across the middle row of a finder: 1:1:3:1:1 sampled once per module
pub const FINDER_SIGNATURE: [Color; 7] = [
    Color::Dark,
    Color::Light,
    Color::Dark,
    Color::Dark,
    Color::Dark,
    Color::Light,
    Color::Dark,
];

pub const MAX_SCORE: u8 = 3;

// Finder validation
//------------------------------------------------------------------------------

// Module coordinates of the top-left corner of each finder: TL, TR, BL
fn finder_origins(size: usize) -> [(usize, usize); 3] {
    [(0, 0), (size - 7, 0), (0, size - 7)]
}

// Samples the centre of each module along the middle row of the finder whose top-left module
// is (fx, fy), assuming the content box holds `size` modules per side. Pixels outside the
// image read as light.
fn read_finder_row(
    img: &BinaryImage,
    bounds: &BoundingBox,
    mod_sz: f64,
    fx: usize,
    fy: usize,
) -> [Color; 7] {
    let y = (bounds.min_y as f64 + mod_sz * (fy as f64 + 3.5)).floor() as u32;
    let mut res = [Color::Light; 7];
    for (i, px) in res.iter_mut().enumerate() {
        let x = (bounds.min_x as f64 + mod_sz * ((fx + i) as f64 + 0.5)).floor() as u32;
        *px = img.get(x, y).unwrap_or(Color::Light);
    }
    res
}

// Number of finders (0-3) that read the 1:1:3:1:1 signature when the content box is split
// into `size` modules per side
pub fn validate_size(img: &BinaryImage, bounds: &BoundingBox, size: usize) -> u8 {
    debug_assert!(size >= 7, "Size {size} too small to hold a finder");

    let mod_sz = bounds.width() as f64 / size as f64;
    finder_origins(size)
        .iter()
        .filter(|&&(fx, fy)| read_finder_row(img, bounds, mod_sz, fx, fy) == FINDER_SIGNATURE)
        .count() as u8
}

// Candidate search
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub size: usize,
    pub score: u8,
    pub dist: usize,
}

impl Candidate {
    pub fn new(size: usize, score: u8, raw: usize) -> Self {
        Self { size, score, dist: size.abs_diff(raw) }
    }

    // Higher score wins, then proximity to the raw estimate. Equal candidates compare equal, so
    // the one seen first is kept.
    pub fn rank(&self, other: &Self) -> Ordering {
        self.score.cmp(&other.score).then_with(|| other.dist.cmp(&self.dist))
    }
}

// Standard sizes within `radius` of `raw`, in ascending order
pub fn candidates_within(raw: usize, radius: usize) -> impl Iterator<Item = usize> {
    standard_sizes().filter(move |s| s.abs_diff(raw) <= radius)
}

// Keeps `best` unless a candidate ranks strictly higher
pub fn select_best(
    sizes: impl IntoIterator<Item = usize>,
    raw: usize,
    best: Option<Candidate>,
    mut score: impl FnMut(usize) -> u8,
) -> Option<Candidate> {
    sizes.into_iter().fold(best, |best, size| {
        let cand = Candidate::new(size, score(size), raw);
        log::trace!("Candidate size {size}: score {}/{MAX_SCORE}", cand.score);
        match best {
            Some(b) if cand.rank(&b) != Ordering::Greater => Some(b),
            _ => Some(cand),
        }
    })
}

// Standard size closest to the raw estimate, the smaller one on ties
pub fn closest_standard_size(raw: usize) -> usize {
    standard_sizes().min_by_key(|s| s.abs_diff(raw)).unwrap_or(21)
}
