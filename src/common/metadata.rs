use std::ops::{Deref, Not};

use super::{
    codec::Mode,
    error::{QRError, QRResult},
    mask::MaskPattern,
};

// Version
//------------------------------------------------------------------------------

/// QR model 2 symbol version. Version `v` is a `17 + 4v` module square.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub fn new(version: usize) -> QRResult<Self> {
        match version {
            1..=40 => Ok(Self(version)),
            _ => Err(QRError::InvalidVersion),
        }
    }

    /// Every version, smallest first.
    pub fn all() -> impl Iterator<Item = Version> {
        (*Self::MIN..=*Self::MAX).map(Version)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    pub fn mode_bits(self) -> usize {
        4
    }

    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        let tier = match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match mode {
            Mode::Numeric => [10, 12, 14][tier],
            Mode::Alphanumeric => [9, 11, 13][tier],
            Mode::Byte => [8, 16, 16][tier],
            Mode::Kanji => [8, 10, 12][tier],
        }
    }

    // 6 bit version number followed by 12 bit BCH(18, 6) remainder
    pub fn info(self) -> u32 {
        debug_assert!(self.0 >= 7, "Version info is only defined for versions 7 and up");
        let data = self.0 as u32;
        (data << 12) | bch_remainder(data << 12, VERSION_INFO_GENERATOR)
    }
}

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}


// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    #[default]
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    // Format info encodes L, M, Q, H as 01, 00, 11, 10
    pub fn format_bits(self) -> u32 {
        (self as u32) ^ 1
    }
}

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl From<bool> for Color {
    fn from(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

// Format info
//------------------------------------------------------------------------------

pub fn format_info(ecl: ECLevel, mask: MaskPattern) -> u32 {
    let data = (ecl.format_bits() << 3) | *mask as u32;
    ((data << 10) | bch_remainder(data << 10, FORMAT_INFO_GENERATOR)) ^ FORMAT_INFO_MASK
}

// Remainder of polynomial division over GF(2)
fn bch_remainder(mut value: u32, generator: u32) -> u32 {
    let gen_len = u32::BITS - generator.leading_zeros();
    loop {
        let len = u32::BITS - value.leading_zeros();
        if len < gen_len {
            return value;
        }
        value ^= generator << (len - gen_len);
    }
}


// Global constants
//------------------------------------------------------------------------------

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const VERSION_INFO_BIT_LEN: usize = 18;

const FORMAT_INFO_GENERATOR: u32 = 0x537;

const FORMAT_INFO_MASK: u32 = 0x5412;

const VERSION_INFO_GENERATOR: u32 = 0x1F25;

// Coordinates as (row, col), most significant bit first. Negative values count from the
// bottom or right edge.
pub static FORMAT_INFO_COORDS_MAIN: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

pub static FORMAT_INFO_COORDS_SIDE: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

pub static VERSION_INFO_COORDS_TR: [(i16, i16); VERSION_INFO_BIT_LEN] = [
    (5, -9), (5, -10), (5, -11), (4, -9), (4, -10), (4, -11),
    (3, -9), (3, -10), (3, -11), (2, -9), (2, -10), (2, -11),
    (1, -9), (1, -10), (1, -11), (0, -9), (0, -10), (0, -11),
];

pub static VERSION_INFO_COORDS_BL: [(i16, i16); VERSION_INFO_BIT_LEN] = [
    (-9, 5), (-10, 5), (-11, 5), (-9, 4), (-10, 4), (-11, 4),
    (-9, 3), (-10, 3), (-11, 3), (-9, 2), (-10, 2), (-11, 2),
    (-9, 1), (-10, 1), (-11, 1), (-9, 0), (-10, 0), (-11, 0),
];
