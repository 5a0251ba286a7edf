use std::fmt::{Display, Error, Formatter};
use std::ops::Deref;

use super::version_db::ALIGNMENT_PATTERN_POSITIONS;

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Color {
    Dark,
    Light,
}

impl Color {
    pub fn select<T>(&self, dark: T, light: T) -> T {
        match self {
            Self::Dark => dark,
            Self::Light => light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl From<bool> for Color {
    fn from(is_dark: bool) -> Self {
        if is_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

// Version
//------------------------------------------------------------------------------

pub const MIN_VERSION: u8 = 1;
pub const MAX_VERSION: u8 = 40;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Deref for Version {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "{}", self.0)
    }
}

impl Version {
    pub fn new(ver: u8) -> Option<Self> {
        (MIN_VERSION..=MAX_VERSION).contains(&ver).then_some(Self(ver))
    }

    pub fn from_width(w: usize) -> Option<Self> {
        if !(21..=177).contains(&w) || (w - 17) % 4 != 0 {
            return None;
        }
        Some(Self(((w - 17) / 4) as u8))
    }

    pub fn all() -> impl Iterator<Item = Version> {
        (MIN_VERSION..=MAX_VERSION).map(Self)
    }

    pub const fn width(self) -> usize {
        self.0 as usize * 4 + 17
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[self.0 as usize - 1]
    }
}

// Every standard module count, from version 1 (21) to version 40 (177)
pub fn standard_sizes() -> impl Iterator<Item = usize> {
    Version::all().map(Version::width)
}

pub fn is_standard_size(w: usize) -> bool {
    Version::from_width(w).is_some()
}
