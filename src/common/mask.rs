use std::ops::Deref;

use tracing::trace;

use super::{
    error::{QRError, QRResult},
    metadata::Color,
};
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern < 8 {
            Ok(Self(pattern))
        } else {
            Err(QRError::InvalidMaskPattern)
        }
    }

    /// All eight patterns in index order.
    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Every function takes (row, col) and returns true where the data module must be flipped
mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (p & 1) + (p % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        ((p & 1) + (p % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        ((((r + c) & 1) as i32) + (p % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Invalid pattern"),
        }
    }
}

#[cfg(test)]
mod mask_pattern_tests {
    use super::MaskPattern;
    use crate::common::error::QRError;

    #[test]
    fn test_new() {
        assert_eq!(*MaskPattern::new(0).unwrap(), 0);
        assert_eq!(*MaskPattern::new(7).unwrap(), 7);
        assert_eq!(MaskPattern::new(8), Err(QRError::InvalidMaskPattern));
    }

    #[test]
    fn test_mask_functions() {
        let f = |m: u8| MaskPattern::new(m).unwrap().mask_functions();
        assert!(f(0)(0, 0) && !f(0)(0, 1) && f(0)(1, 1));
        assert!(f(1)(0, 5) && !f(1)(1, 0) && f(1)(2, 3));
        assert!(f(2)(5, 0) && !f(2)(0, 1) && f(2)(1, 3));
        assert!(f(3)(1, 2) && !f(3)(1, 1) && f(3)(0, 3));
        assert!(f(4)(0, 0) && f(4)(1, 2) && !f(4)(2, 0) && !f(4)(0, 3));
        assert!(f(5)(0, 7) && f(5)(6, 1) && !f(5)(1, 1) && !f(5)(2, 1));
        assert!(f(6)(0, 0) && f(6)(1, 1) && !f(6)(1, 4) && !f(6)(3, 1));
        assert!(f(7)(0, 0) && f(7)(1, 3) && !f(7)(0, 1) && !f(7)(1, 1));
    }
}

// Mask selection
//------------------------------------------------------------------------------

/// Evaluates every pattern on a scratch copy of the symbol (format info included) and applies
/// the one with the lowest penalty. Ties go to the lower pattern index.
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let (best_mask, penalty) = MaskPattern::all()
        .map(|m| {
            let mut scratch = qr.clone();
            scratch.apply_mask(m);
            let penalty = compute_total_penalty(&scratch);
            trace!("Mask {} penalty {}", *m, penalty);
            (m, penalty)
        })
        .min_by_key(|(_, penalty)| *penalty)
        .unwrap_or((MaskPattern(0), 0));
    trace!("Best mask {} with penalty {}", *best_mask, penalty);
    qr.apply_mask(best_mask);
    best_mask
}

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen =
        compute_finder_pattern_penalty(qr, true) + compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen + bal_pen
}

// N1: runs of 5 or more same colored modules in a row or column
fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let w = qr.width() as i16;
    let mut pen = 0;
    for is_hor in [true, false] {
        for i in 0..w {
            let clr_at = |j| if is_hor { *qr.get(i, j) } else { *qr.get(j, i) };
            let mut last = clr_at(0);
            let mut run = 1;
            for j in 1..w {
                let clr = clr_at(j);
                if clr == last {
                    run += 1;
                    continue;
                }
                if run >= 5 {
                    pen += run - 2;
                }
                last = clr;
                run = 1;
            }
            if run >= 5 {
                pen += run - 2;
            }
        }
    }
    pen
}

// N2: 2x2 blocks of the same color
fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *qr.get(r, c);
            if clr == *qr.get(r + 1, c) && clr == *qr.get(r, c + 1) && clr == *qr.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// N3: 1:1:3:1:1 finder-like runs flanked by 4 light modules on either side. Modules outside
// the symbol count as light.
fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    static PATTERN: [Color; 7] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
    ];

    let mut pen = 0;
    let w = qr.width() as i16;
    for i in 0..w {
        let clr_at = |j: i16| {
            if !(0..w).contains(&j) {
                Color::Light
            } else if is_hor {
                *qr.get(i, j)
            } else {
                *qr.get(j, i)
            }
        };
        for j in 0..w - 6 {
            if (j..j + 7).map(clr_at).ne(PATTERN.iter().copied()) {
                continue;
            }
            if (j - 4..j).all(|k| clr_at(k) == Color::Light) {
                pen += 40;
            }
            if (j + 7..j + 11).all(|k| clr_at(k) == Color::Light) {
                pen += 40;
            }
        }
    }
    pen
}

// N4: 10 points for every full 5% the exact dark ratio deviates from 50%
fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark_cnt = qr.count_dark_modules();
    let w = qr.width();
    let tot = w * w;
    let k = (dark_cnt * 20).abs_diff(tot * 10) / tot;
    (k * 10) as u32
}
