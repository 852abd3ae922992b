use std::ops::{Deref, Not};

use super::{
    codec::Mode,
    error::{QRError, QRResult},
    mask::MaskPattern,
};

// Color of a module
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Color {
    Light,
    Dark,
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

impl Color {
    pub fn select<T>(&self, dark: T, light: T) -> T {
        match self {
            Self::Dark => dark,
            Self::Light => light,
        }
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    // 2-bit value stored in the format info. Not ordered by robustness
    pub fn format_bits(self) -> u32 {
        (self as u32) ^ 1
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct Version(pub(crate) usize);

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub fn new(version: usize) -> QRResult<Self> {
        if !(1..=40).contains(&version) {
            return Err(QRError::ValueOutOfRange);
        }
        Ok(Self(version))
    }

    pub fn width(self) -> usize {
        debug_assert!((1..=40).contains(&self.0), "Invalid version");

        self.0 * 4 + 17
    }

    // Count of modules available for codewords and remainder bits, i.e. all
    // modules minus function patterns and format/version info
    fn raw_modules(self) -> usize {
        let v = self.0;
        let w = self.width();
        let mut total = w * w - 192 - 31 - (w - 16) * 2;
        if v >= 2 {
            let num_align = v / 7 + 2;
            total -= (num_align - 1) * (num_align - 1) * 25 + (num_align - 2) * 2 * 20;
            if v >= 7 {
                total -= 36;
            }
        }
        total
    }

    pub fn total_codewords(self) -> usize {
        self.raw_modules() >> 3
    }

    // 0-7 leftover modules in the encoding region after all codewords are placed
    pub fn remainder_bits(self) -> usize {
        self.raw_modules() & 7
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        ECC_CODEWORDS_PER_BLOCK[ecl as usize][self.0]
    }

    pub fn num_blocks(self, ecl: ECLevel) -> usize {
        NUM_ERROR_CORRECTION_BLOCKS[ecl as usize][self.0]
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        self.total_codewords() - self.ecc_per_block(ecl) * self.num_blocks(ecl)
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    // Width of the char count field for the given mode
    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        let bucket = match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            27..=40 => 2,
            _ => unreachable!("Invalid version"),
        };
        match mode {
            Mode::Numeric => [10, 12, 14][bucket],
            Mode::Alphanumeric => [9, 11, 13][bucket],
            Mode::Byte => [8, 16, 16][bucket],
            Mode::Kanji => [8, 10, 12][bucket],
            Mode::Eci => 0,
        }
    }

    // Center row/column indices of the alignment patterns. The step between
    // consecutive centers is even and chosen so the first gap may differ;
    // version 32 doesn't follow the rounding rule
    pub fn alignment_pattern(self) -> Vec<i16> {
        let v = self.0;
        if v == 1 {
            return Vec::new();
        }
        let num_align = v / 7 + 2;
        let step =
            if v == 32 { 26 } else { (v * 4 + num_align * 2 + 1) / (num_align * 2 - 2) * 2 };
        let mut positions = vec![6i16; num_align];
        let mut pos = (v * 4 + 10) as i16;
        for slot in positions.iter_mut().skip(1).rev() {
            *slot = pos;
            pos -= step as i16;
        }
        positions
    }

    // 18-bit version info: 6-bit version with 12-bit bch error correction
    pub fn info(self) -> u32 {
        debug_assert!(self.0 >= 7, "Version info doesn't exist below version 7");

        let ver = self.0 as u32;
        let mut rem = ver;
        for _ in 0..12 {
            rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
        }
        (ver << 12) | rem
    }
}

// Format info
//------------------------------------------------------------------------------

// 15-bit format info: 2-bit ec level and 3-bit mask pattern with 10-bit bch
// error correction, xored with the format mask
pub fn generate_format_info_qr(ecl: ECLevel, mask: MaskPattern) -> u32 {
    let data = (ecl.format_bits() << 3) | (*mask as u32);
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * 0x537);
    }
    ((data << 10) | rem) ^ FORMAT_MASK
}

// Global constants
//------------------------------------------------------------------------------

pub const MAX_QR_SIZE: usize = 177 * 177;

pub const FORMAT_MASK: u32 = 0x5412;

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const VERSION_INFO_BIT_LEN: usize = 18;

// Coords are listed most significant bit first. Negative indices wrap around
// the grid edge
pub static FORMAT_INFO_COORDS_QR_MAIN: [(i16, i16); 15] = [
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

pub static FORMAT_INFO_COORDS_QR_SIDE: [(i16, i16); 15] = [
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

pub static VERSION_INFO_COORDS_TR: [(i16, i16); 18] = [
    (5, -9),
    (5, -10),
    (5, -11),
    (4, -9),
    (4, -10),
    (4, -11),
    (3, -9),
    (3, -10),
    (3, -11),
    (2, -9),
    (2, -10),
    (2, -11),
    (1, -9),
    (1, -10),
    (1, -11),
    (0, -9),
    (0, -10),
    (0, -11),
];

pub static VERSION_INFO_COORDS_BL: [(i16, i16); 18] = [
    (-9, 5),
    (-10, 5),
    (-11, 5),
    (-9, 4),
    (-10, 4),
    (-11, 4),
    (-9, 3),
    (-10, 3),
    (-11, 3),
    (-9, 2),
    (-10, 2),
    (-11, 2),
    (-9, 1),
    (-10, 1),
    (-11, 1),
    (-9, 0),
    (-10, 0),
    (-11, 0),
];

// Ecc codewords per block, indexed by ec level and version. Index 0 of each
// row is a filler; valid versions begin at 1
static ECC_CODEWORDS_PER_BLOCK: [[usize; 41]; 4] = [
    // L
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    // M
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ],
    // Q
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    // H
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
];

// Error correction block count, indexed by ec level and version. Index 0 of
// each row is a filler; valid versions begin at 1
static NUM_ERROR_CORRECTION_BLOCKS: [[usize; 41]; 4] = [
    // L
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    // M
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    // Q
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    // H
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];

#[cfg(test)]
mod metadata_tests {
    use test_case::test_case;

    use super::{generate_format_info_qr, ECLevel, Version};
    use crate::common::mask::MaskPattern;

    #[test]
    fn test_version_validation() {
        assert!(Version::new(0).is_err());
        assert!(Version::new(41).is_err());
        assert_eq!(Version::new(1), Ok(Version::MIN));
        assert_eq!(Version::new(40), Ok(Version::MAX));
    }

    #[test_case(Version(1), 21)]
    #[test_case(Version(7), 45)]
    #[test_case(Version(14), 73)]
    #[test_case(Version(40), 177)]
    fn test_width(ver: Version, exp_width: usize) {
        assert_eq!(ver.width(), exp_width);
    }

    #[test]
    fn test_total_codewords() {
        let expected: [usize; 40] = [
            26, 44, 70, 100, 134, 172, 196, 242, 292, 346, 404, 466, 532, 581, 655, 733, 815, 901,
            991, 1085, 1156, 1258, 1364, 1474, 1588, 1706, 1828, 1921, 2051, 2185, 2323, 2465,
            2611, 2761, 2876, 3034, 3196, 3362, 3532, 3706,
        ];
        for (v, exp) in (1..=40).zip(expected) {
            assert_eq!(Version(v).total_codewords(), exp, "Mismatch for version {v}");
        }
    }

    #[test_case(Version(1), 0)]
    #[test_case(Version(2), 7)]
    #[test_case(Version(6), 7)]
    #[test_case(Version(7), 0)]
    #[test_case(Version(14), 3)]
    #[test_case(Version(21), 4)]
    #[test_case(Version(28), 3)]
    #[test_case(Version(35), 0)]
    #[test_case(Version(40), 0)]
    fn test_remainder_bits(ver: Version, exp_bits: usize) {
        assert_eq!(ver.remainder_bits(), exp_bits);
    }

    #[test_case(Version(1), ECLevel::L, 19)]
    #[test_case(Version(1), ECLevel::M, 16)]
    #[test_case(Version(1), ECLevel::Q, 13)]
    #[test_case(Version(1), ECLevel::H, 9)]
    #[test_case(Version(2), ECLevel::M, 28)]
    #[test_case(Version(5), ECLevel::Q, 62)]
    #[test_case(Version(40), ECLevel::H, 1276)]
    fn test_data_codewords(ver: Version, ecl: ECLevel, exp_codewords: usize) {
        assert_eq!(ver.data_codewords(ecl), exp_codewords);
    }

    #[test]
    fn test_data_capacity_is_monotonic() {
        for ecl in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
            for v in 2..=40 {
                assert!(
                    Version(v).data_bit_capacity(ecl) > Version(v - 1).data_bit_capacity(ecl),
                    "Capacity shrunk from version {} to {} at {ecl:?}",
                    v - 1,
                    v
                );
            }
        }
    }

    #[test_case(Version(1), Vec::new())]
    #[test_case(Version(2), vec![6, 18])]
    #[test_case(Version(7), vec![6, 22, 38])]
    #[test_case(Version(32), vec![6, 34, 60, 86, 112, 138])]
    #[test_case(Version(40), vec![6, 30, 58, 86, 114, 142, 170])]
    fn test_alignment_pattern(ver: Version, exp_positions: Vec<i16>) {
        assert_eq!(ver.alignment_pattern(), exp_positions);
    }

    #[test]
    fn test_version_info() {
        assert_eq!(Version(7).info(), 0x07C94);
        assert_eq!(Version(8).info(), 0x085BC);
        for v in 7..=40 {
            assert_eq!(Version(v).info() >> 12, v as u32);
        }
    }

    #[test]
    fn test_format_info() {
        assert_eq!(generate_format_info_qr(ECLevel::M, MaskPattern::new(0).unwrap()), 0x5412);
        assert_eq!(generate_format_info_qr(ECLevel::L, MaskPattern::new(0).unwrap()), 0x77C4);

        let mut seen = Vec::new();
        for ecl in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
            for m in 0..8 {
                let f = generate_format_info_qr(ecl, MaskPattern::new(m).unwrap());
                assert!(f < (1 << 15));
                assert!(!seen.contains(&f), "Duplicate format info {f:#x}");
                seen.push(f);
            }
        }
    }

    #[test]
    fn test_format_bits() {
        assert_eq!(ECLevel::L.format_bits(), 1);
        assert_eq!(ECLevel::M.format_bits(), 0);
        assert_eq!(ECLevel::Q.format_bits(), 3);
        assert_eq!(ECLevel::H.format_bits(), 2);
    }
}
