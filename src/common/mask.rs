use std::ops::Deref;

use super::{
    error::{QRError, QRResult},
    metadata::Color,
};
use crate::builder::QR;

// Mask pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern >= 8 {
            return Err(QRError::ValueOutOfRange);
        }
        Ok(Self(pattern))
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Mask functions take the column x and row y
mod mask_functions {
    pub fn checkerboard(x: i32, y: i32) -> bool {
        (x + y) & 1 == 0
    }

    pub fn horizontal_lines(_: i32, y: i32) -> bool {
        y & 1 == 0
    }

    pub fn vertical_lines(x: i32, _: i32) -> bool {
        x % 3 == 0
    }

    pub fn diagonal_lines(x: i32, y: i32) -> bool {
        (x + y) % 3 == 0
    }

    pub fn large_checkerboard(x: i32, y: i32) -> bool {
        ((y >> 1) + (x / 3)) & 1 == 0
    }

    pub fn fields(x: i32, y: i32) -> bool {
        ((x * y) & 1) + ((x * y) % 3) == 0
    }

    pub fn diamonds(x: i32, y: i32) -> bool {
        (((x * y) & 1) + ((x * y) % 3)) & 1 == 0
    }

    pub fn meadow(x: i32, y: i32) -> bool {
        (((x + y) & 1) + ((x * y) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i32, i32) -> bool {
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

// Mask evaluation
//------------------------------------------------------------------------------

// Scores all 8 masks on clones of the QR and applies the best one. Penalties
// are compared after the format info is drawn, so the score reflects the
// final symbol. Ties resolve to the lowest pattern number
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let best_mask = (0..8)
        .min_by_key(|m| {
            let mut qr = qr.clone();
            qr.apply_mask(MaskPattern(*m));
            compute_total_penalty(&qr)
        })
        .expect("Should return at least 1 mask");
    let best_mask = MaskPattern(best_mask);
    qr.apply_mask(best_mask);
    best_mask
}

pub fn compute_total_penalty(qr: &QR) -> u32 {
    compute_adjacent_penalty(qr)
        + compute_block_penalty(qr)
        + compute_finder_pattern_penalty(qr, true)
        + compute_finder_pattern_penalty(qr, false)
        + compute_balance_penalty(qr)
}

// A run of 5 same colored modules in a row or column costs 3, every extra
// module in the run costs 1 more
fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width();
    let mut cols = vec![(Color::Light, 0_u32); w];
    for r in 0..w {
        let mut row = (Color::Light, 0_u32);
        for (c, col) in cols.iter_mut().enumerate() {
            let clr = *qr.get(r as i16, c as i16);
            for run in [&mut row, col] {
                if run.0 != clr {
                    *run = (clr, 1);
                } else {
                    run.1 += 1;
                    if run.1 == 5 {
                        pen += 3;
                    } else if run.1 > 5 {
                        pen += 1;
                    }
                }
            }
        }
    }
    pen
}

// Every 2x2 block of same colored modules costs 3; blocks overlap
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

// The 1:1:3:1:1 finder core with 4 light modules on either side
const FINDER_LEFT_QZ: u16 = 0b00001011101;
const FINDER_RIGHT_QZ: u16 = 0b10111010000;

// A finder lookalike in a row or column costs 40. An 11 module window slides
// along each line and is compared against both orientations
fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for i in 0..w {
        let mut bits = 0_u16;
        for j in 0..w {
            let (r, c) = if is_hor { (i, j) } else { (j, i) };
            let dark = *qr.get(r, c) == Color::Dark;
            bits = ((bits << 1) & 0x7FF) | dark as u16;
            if j >= 10 && (bits == FINDER_LEFT_QZ || bits == FINDER_RIGHT_QZ) {
                pen += 40;
            }
        }
    }
    pen
}

// Every 5% deviation of the dark module ratio from 50% costs 10
fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark = qr.count_dark_modules();
    let total = qr.width() * qr.width();
    let mut k = 0;
    while dark * 20 < (9 - k) * total || dark * 20 > (11 + k) * total {
        k += 1;
    }
    (k * 10) as u32
}

#[cfg(test)]
mod mask_tests {
    use super::{
        compute_adjacent_penalty, compute_balance_penalty, compute_block_penalty,
        compute_finder_pattern_penalty, compute_total_penalty, mask_functions, MaskPattern,
    };
    use crate::builder::{Module, QR};
    use crate::common::{
        error::QRError,
        metadata::{Color, ECLevel, Version},
    };

    #[test]
    fn test_mask_pattern_bounds() {
        assert!(MaskPattern::new(0).is_ok());
        assert!(MaskPattern::new(7).is_ok());
        assert_eq!(MaskPattern::new(8), Err(QRError::ValueOutOfRange));
    }

    #[test]
    fn test_mask_functions() {
        assert!(mask_functions::checkerboard(0, 0));
        assert!(!mask_functions::checkerboard(2, 3));
        assert!(mask_functions::horizontal_lines(5, 2));
        assert!(!mask_functions::horizontal_lines(5, 3));
        assert!(mask_functions::vertical_lines(3, 9));
        assert!(!mask_functions::vertical_lines(4, 9));
        assert!(mask_functions::diagonal_lines(1, 2));
        assert!(!mask_functions::diagonal_lines(1, 1));
        assert!(mask_functions::large_checkerboard(3, 2));
        assert!(!mask_functions::large_checkerboard(0, 2));
        assert!(mask_functions::fields(2, 3));
        assert!(!mask_functions::fields(3, 3));
        assert!(mask_functions::diamonds(2, 3));
        assert!(!mask_functions::diamonds(3, 3));
        assert!(mask_functions::meadow(0, 0));
        assert!(!mask_functions::meadow(2, 1));
    }

    fn uniform_qr(clr: Color) -> QR {
        let mut qr = QR::new(Version::new(1).unwrap(), ECLevel::L);
        let w = qr.width() as i16;
        for r in 0..w {
            for c in 0..w {
                qr.set(r, c, Module::Data(clr));
            }
        }
        qr
    }

    fn checkerboard_qr() -> QR {
        let mut qr = QR::new(Version::new(1).unwrap(), ECLevel::L);
        let w = qr.width() as i16;
        for r in 0..w {
            for c in 0..w {
                let clr = if (r + c) & 1 == 0 { Color::Dark } else { Color::Light };
                qr.set(r, c, Module::Data(clr));
            }
        }
        qr
    }

    // Each uniform line of 21 modules costs 3 + 16, over 21 rows and 21
    // columns
    #[test]
    fn test_adjacent_penalty() {
        let qr = uniform_qr(Color::Light);
        assert_eq!(compute_adjacent_penalty(&qr), 2 * 21 * 19);

        let qr = checkerboard_qr();
        assert_eq!(compute_adjacent_penalty(&qr), 0);
    }

    #[test]
    fn test_block_penalty() {
        let qr = uniform_qr(Color::Dark);
        assert_eq!(compute_block_penalty(&qr), 20 * 20 * 3);

        let qr = checkerboard_qr();
        assert_eq!(compute_block_penalty(&qr), 0);
    }

    #[test]
    fn test_finder_pattern_penalty() {
        let qr = uniform_qr(Color::Light);
        assert_eq!(compute_finder_pattern_penalty(&qr, true), 0);
        assert_eq!(compute_finder_pattern_penalty(&qr, false), 0);

        // Core at columns 4 to 10 of row 5: the window matches once with
        // the leading and once with the trailing light run
        let mut qr = uniform_qr(Color::Light);
        for (i, clr) in [
            Color::Dark,
            Color::Light,
            Color::Dark,
            Color::Dark,
            Color::Dark,
            Color::Light,
            Color::Dark,
        ]
        .iter()
        .enumerate()
        {
            qr.set(5, 4 + i as i16, Module::Data(*clr));
        }
        assert_eq!(compute_finder_pattern_penalty(&qr, true), 80);
        assert_eq!(compute_finder_pattern_penalty(&qr, false), 0);
    }

    #[test]
    fn test_balance_penalty() {
        assert_eq!(compute_balance_penalty(&uniform_qr(Color::Light)), 90);
        assert_eq!(compute_balance_penalty(&uniform_qr(Color::Dark)), 90);
        assert_eq!(compute_balance_penalty(&checkerboard_qr()), 0);
    }

    #[test]
    fn test_total_penalty() {
        let total = compute_total_penalty(&uniform_qr(Color::Light));
        assert_eq!(total, 2 * 21 * 19 + 20 * 20 * 3 + 90);
    }
}
