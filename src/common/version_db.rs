use super::metadata::{ECLevel, Version};

// Version specific lookups
//------------------------------------------------------------------------------

impl Version {
    pub fn total_codewords(self) -> usize {
        TOTAL_CODEWORDS[*self]
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        EC_CODEWORDS_PER_BLOCK[*self][ecl as usize]
    }

    pub fn block_count(self, ecl: ECLevel) -> usize {
        EC_BLOCK_COUNT[*self][ecl as usize]
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        self.total_codewords() - self.ecc_per_block(ecl) * self.block_count(ecl)
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    // Returns (group 1 block size, group 1 block count, group 2 block size, group 2 block count).
    // Group 2 blocks carry one extra data codeword.
    pub fn data_codewords_per_block(self, ecl: ECLevel) -> (usize, usize, usize, usize) {
        let total = self.total_codewords();
        let blocks = self.block_count(ecl);
        let ecc = self.ecc_per_block(ecl);

        let long_count = total % blocks;
        let short_count = blocks - long_count;
        let short_size = total / blocks - ecc;

        if long_count == 0 {
            (short_size, short_count, 0, 0)
        } else {
            (short_size, short_count, short_size + 1, long_count)
        }
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[*self]
    }

    pub fn remainder_bits(self) -> usize {
        match *self {
            1 | 7..=13 | 35..=40 => 0,
            2..=6 => 7,
            14..=20 | 28..=34 => 3,
            21..=27 => 4,
            _ => unreachable!("Invalid version"),
        }
    }
}

#[cfg(test)]
mod version_db_tests {
    use test_case::test_case;

    use crate::common::metadata::{ECLevel, Version};

    #[test_case(1, ECLevel::L, 19)]
    #[test_case(1, ECLevel::M, 16)]
    #[test_case(1, ECLevel::Q, 13)]
    #[test_case(1, ECLevel::H, 9)]
    #[test_case(5, ECLevel::Q, 62)]
    #[test_case(10, ECLevel::M, 216)]
    #[test_case(40, ECLevel::L, 2956)]
    #[test_case(40, ECLevel::H, 1276)]
    fn test_data_codewords(ver: usize, ecl: ECLevel, exp: usize) {
        assert_eq!(Version::new(ver).unwrap().data_codewords(ecl), exp);
    }

    #[test]
    fn test_data_codewords_per_block() {
        let v5 = Version::new(5).unwrap();
        assert_eq!(v5.data_codewords_per_block(ECLevel::Q), (15, 2, 16, 2));
        let v1 = Version::new(1).unwrap();
        assert_eq!(v1.data_codewords_per_block(ECLevel::M), (16, 1, 0, 0));
    }

    #[test]
    fn test_block_layout_is_consistent() {
        for ver in Version::all() {
            for ecl in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
                let (s1, c1, s2, c2) = ver.data_codewords_per_block(ecl);
                assert_eq!(c1 + c2, ver.block_count(ecl), "version {}", *ver);
                assert_eq!(s1 * c1 + s2 * c2, ver.data_codewords(ecl), "version {}", *ver);
                assert!(s2 == 0 || s2 == s1 + 1);
            }
        }
    }

    #[test]
    fn test_alignment_pattern() {
        assert!(Version::new(1).unwrap().alignment_pattern().is_empty());
        assert_eq!(Version::new(2).unwrap().alignment_pattern(), &[6, 18]);
        assert_eq!(Version::new(7).unwrap().alignment_pattern(), &[6, 22, 38]);
        assert_eq!(Version::new(13).unwrap().alignment_pattern(), &[6, 34, 62]);
        assert_eq!(Version::new(32).unwrap().alignment_pattern(), &[6, 34, 60, 86, 112, 138]);
        assert_eq!(
            Version::new(40).unwrap().alignment_pattern(),
            &[6, 30, 58, 86, 114, 142, 170]
        );
    }

    #[test]
    fn test_alignment_pattern_ends_at_edge() {
        for ver in Version::all().skip(1) {
            let last = *ver.alignment_pattern().last().unwrap() as usize;
            assert_eq!(last, ver.width() - 7);
        }
    }

    #[test_case(1, 0)]
    #[test_case(2, 7)]
    #[test_case(7, 0)]
    #[test_case(14, 3)]
    #[test_case(21, 4)]
    #[test_case(28, 3)]
    #[test_case(40, 0)]
    fn test_remainder_bits(ver: usize, exp: usize) {
        assert_eq!(Version::new(ver).unwrap().remainder_bits(), exp);
    }
}

// Global constants
//------------------------------------------------------------------------------

pub(crate) static TOTAL_CODEWORDS: [usize; 41] = [
    0, 26, 44, 70, 100, 134, 172, 196, 242, 292,
    346, 404, 466, 532, 581, 655, 733, 815, 901, 991,
    1085, 1156, 1258, 1364, 1474, 1588, 1706, 1828, 1921, 2051,
    2185, 2323, 2465, 2611, 2761, 2876, 3034, 3196, 3362, 3532,
    3706,
];
pub(crate) static EC_CODEWORDS_PER_BLOCK: [[usize; 4]; 41] = [
    [0, 0, 0, 0],
    [7, 10, 13, 17],
    [10, 16, 22, 28],
    [15, 26, 18, 22],
    [20, 18, 26, 16],
    [26, 24, 18, 22],
    [18, 16, 24, 28],
    [20, 18, 18, 26],
    [24, 22, 22, 26],
    [30, 22, 20, 24],
    [18, 26, 24, 28],
    [20, 30, 28, 24],
    [24, 22, 26, 28],
    [26, 22, 24, 22],
    [30, 24, 20, 24],
    [22, 24, 30, 24],
    [24, 28, 24, 30],
    [28, 28, 28, 28],
    [30, 26, 28, 28],
    [28, 26, 26, 26],
    [28, 26, 30, 28],
    [28, 26, 28, 30],
    [28, 28, 30, 24],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [26, 28, 30, 30],
    [28, 28, 28, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
];
pub(crate) static EC_BLOCK_COUNT: [[usize; 4]; 41] = [
    [0, 0, 0, 0],
    [1, 1, 1, 1],
    [1, 1, 1, 1],
    [1, 1, 2, 2],
    [1, 2, 2, 4],
    [1, 2, 4, 4],
    [2, 4, 4, 4],
    [2, 4, 6, 5],
    [2, 4, 6, 6],
    [2, 5, 8, 8],
    [4, 5, 8, 8],
    [4, 5, 8, 11],
    [4, 8, 10, 11],
    [4, 9, 12, 16],
    [4, 9, 16, 16],
    [6, 10, 12, 18],
    [6, 10, 17, 16],
    [6, 11, 16, 19],
    [6, 13, 18, 21],
    [7, 14, 21, 25],
    [8, 16, 20, 25],
    [8, 17, 23, 25],
    [9, 17, 23, 34],
    [9, 18, 25, 30],
    [10, 20, 27, 32],
    [12, 21, 29, 35],
    [12, 23, 34, 37],
    [12, 25, 34, 40],
    [13, 26, 35, 42],
    [14, 28, 38, 45],
    [15, 29, 40, 48],
    [16, 31, 43, 51],
    [17, 33, 45, 54],
    [18, 35, 48, 57],
    [19, 37, 51, 60],
    [19, 38, 53, 63],
    [20, 40, 56, 66],
    [21, 43, 59, 70],
    [22, 45, 62, 74],
    [24, 47, 65, 77],
    [25, 49, 68, 81],
];
pub(crate) static ALIGNMENT_PATTERN_POSITIONS: [&[i16]; 41] = [
    &[],
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];
