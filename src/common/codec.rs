use std::borrow::Cow;

use encoding_rs::SHIFT_JIS;

pub use encode::*;

use super::{
    error::{QRError, QRResult},
    metadata::{ECLevel, Version},
};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
    Kanji = 0b1000,
}

impl Mode {
    /// Picks the most compact single mode that represents every character of `content`.
    /// Kanji is never picked automatically.
    pub fn classify(content: &str) -> Mode {
        [Mode::Numeric, Mode::Alphanumeric]
            .into_iter()
            .find(|m| content.chars().all(|c| m.contains(c)))
            .unwrap_or(Mode::Byte)
    }

    pub fn contains(&self, ch: char) -> bool {
        match self {
            Self::Numeric => ch.is_ascii_digit(),
            Self::Alphanumeric => {
                ch.is_ascii_digit() || ch.is_ascii_uppercase() || " $%*+-./:".contains(ch)
            }
            Self::Byte => true,
            Self::Kanji => Self::shift_jis_code(ch).is_some(),
        }
    }

    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(char.is_ascii_digit(), "Invalid numeric data: {char}");
        (char - b'0') as u16
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        match char {
            b'0'..=b'9' => (char - b'0') as u16,
            b'A'..=b'Z' => (char - b'A' + 10) as u16,
            b' ' => 36,
            b'$' => 37,
            b'%' => 38,
            b'*' => 39,
            b'+' => 40,
            b'-' => 41,
            b'.' => 42,
            b'/' => 43,
            b':' => 44,
            _ => unreachable!("Invalid alphanumeric {char}"),
        }
    }

    // Double byte Shift JIS code of a character, if it lies in the ranges kanji mode covers
    fn shift_jis_code(ch: char) -> Option<u16> {
        let mut buf = [0; 4];
        let (bytes, _, had_errors) = SHIFT_JIS.encode(ch.encode_utf8(&mut buf));
        if had_errors || bytes.len() != 2 {
            return None;
        }
        match u16::from_be_bytes([bytes[0], bytes[1]]) {
            code @ (0x8140..=0x9FFC | 0xE040..=0xEBBF) => Some(code),
            _ => None,
        }
    }

    fn kanji_value(code: u16) -> u16 {
        let offset = match code {
            0x8140..=0x9FFC => code - 0x8140,
            0xE040..=0xEBBF => code - 0xC140,
            _ => unreachable!("Invalid kanji code {code:#06x}"),
        };
        (offset >> 8) * 0xC0 + (offset & 0xFF)
    }

    pub fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conversion: {len}");
                data[0] as u16
            }
            Self::Kanji => {
                debug_assert!(len == 2, "Kanji is encoded from exactly 2 bytes: {len}");
                Self::kanji_value(u16::from_be_bytes([data[0], data[1]]))
            }
        }
    }

    // Bit length of the packed payload for `len` characters
    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10 + 2) / 3,
            Self::Alphanumeric => (len * 11 + 1) / 2,
            Self::Byte => len * 8,
            Self::Kanji => len * 13,
        }
    }
}

#[cfg(test)]
mod mode_tests {
    use test_case::test_case;

    use super::Mode;
    use super::Mode::*;

    #[test_case("12345", Numeric)]
    #[test_case("0", Numeric)]
    #[test_case("ABC-123", Alphanumeric)]
    #[test_case("HELLO WORLD", Alphanumeric)]
    #[test_case("$%*+-./: ", Alphanumeric)]
    #[test_case("abc123", Byte)]
    #[test_case("Hello, world!", Byte)]
    #[test_case("点茗荷", Byte)]
    #[test_case("🌎", Byte)]
    fn test_classify(content: &str, exp: Mode) {
        assert_eq!(Mode::classify(content), exp);
    }

    #[test]
    fn test_numeric_digit() {
        assert_eq!(Mode::numeric_digit(b'0'), 0);
        assert_eq!(Mode::numeric_digit(b'9'), 9);
    }

    #[test]
    fn test_alphanumeric_digit() {
        assert_eq!(Mode::alphanumeric_digit(b'0'), 0);
        assert_eq!(Mode::alphanumeric_digit(b'9'), 9);
        assert_eq!(Mode::alphanumeric_digit(b'A'), 10);
        assert_eq!(Mode::alphanumeric_digit(b'Z'), 35);
        assert_eq!(Mode::alphanumeric_digit(b' '), 36);
        assert_eq!(Mode::alphanumeric_digit(b':'), 44);
    }

    #[test]
    #[should_panic]
    fn test_invalid_alphanumeric_digit() {
        Mode::alphanumeric_digit(b'a');
    }

    #[test]
    fn test_numeric_encoding() {
        assert_eq!(Numeric.encode_chunk("012".as_bytes()), 0b0000001100);
        assert_eq!(Numeric.encode_chunk("345".as_bytes()), 0b0101011001);
        assert_eq!(Numeric.encode_chunk("901".as_bytes()), 0b1110000101);
        assert_eq!(Numeric.encode_chunk("67".as_bytes()), 0b1000011);
        assert_eq!(Numeric.encode_chunk("8".as_bytes()), 0b1000);
    }

    #[test]
    fn test_alphanumeric_encoding() {
        assert_eq!(Alphanumeric.encode_chunk("AC".as_bytes()), 0b00111001110);
        assert_eq!(Alphanumeric.encode_chunk("-4".as_bytes()), 0b11100111001);
        assert_eq!(Alphanumeric.encode_chunk("2".as_bytes()), 0b000010);
    }

    #[test]
    fn test_kanji_encoding() {
        assert_eq!(Kanji.encode_chunk(&[0x93, 0x5F]), 0x0D9F);
        assert_eq!(Kanji.encode_chunk(&[0xE4, 0xAA]), 0x1AAA);
        assert_eq!(Kanji.encode_chunk(&[0x89, 0xD7]), 0x0697);
    }

    #[test]
    fn test_is_numeric() {
        assert!(Numeric.contains('0'));
        assert!(Numeric.contains('9'));
        assert!(!Numeric.contains('A'));
        assert!(!Numeric.contains(' '));
        assert!(!Numeric.contains('٣'));
    }

    #[test]
    fn test_is_alphanumeric() {
        assert!(Alphanumeric.contains('0'));
        assert!(Alphanumeric.contains('Z'));
        assert!(Alphanumeric.contains(' '));
        assert!(Alphanumeric.contains(':'));
        assert!(!Alphanumeric.contains('a'));
        assert!(!Alphanumeric.contains('@'));
        assert!(!Alphanumeric.contains('('));
    }

    #[test]
    fn test_is_kanji() {
        assert!(Kanji.contains('点'));
        assert!(Kanji.contains('茗'));
        assert!(Kanji.contains('Ω'));
        assert!(!Kanji.contains('A'));
        assert!(!Kanji.contains('ｱ'));
        assert!(!Kanji.contains('🌎'));
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(Numeric.encoded_len(3), 10);
        assert_eq!(Numeric.encoded_len(2), 7);
        assert_eq!(Numeric.encoded_len(1), 4);
        assert_eq!(Alphanumeric.encoded_len(2), 11);
        assert_eq!(Alphanumeric.encoded_len(1), 6);
        assert_eq!(Byte.encoded_len(1), 8);
        assert_eq!(Kanji.encoded_len(2), 26);
    }
}

// Segment
//------------------------------------------------------------------------------

/// A payload validated for a single mode. Kanji payloads hold their Shift JIS bytes, every
/// other mode borrows the UTF-8 bytes of the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    mode: Mode,
    char_cnt: usize,
    data: Cow<'a, [u8]>,
}

impl<'a> Segment<'a> {
    pub fn new(mode: Mode, content: &'a str) -> QRResult<Self> {
        match mode {
            Mode::Kanji => {
                let mut data = Vec::with_capacity(content.len());
                for ch in content.chars() {
                    let code = Mode::shift_jis_code(ch).ok_or(QRError::UnsupportedCharacter)?;
                    data.extend_from_slice(&code.to_be_bytes());
                }
                Ok(Self { mode, char_cnt: data.len() >> 1, data: Cow::Owned(data) })
            }
            Mode::Byte => {
                let data = content.as_bytes();
                Ok(Self { mode, char_cnt: data.len(), data: Cow::Borrowed(data) })
            }
            Mode::Numeric | Mode::Alphanumeric => {
                if !content.chars().all(|c| mode.contains(c)) {
                    return Err(QRError::UnsupportedCharacter);
                }
                let data = content.as_bytes();
                Ok(Self { mode, char_cnt: data.len(), data: Cow::Borrowed(data) })
            }
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn char_cnt(&self) -> usize {
        self.char_cnt
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn bit_len(&self, ver: Version) -> usize {
        let encoded_bits = self.mode.encoded_len(self.char_cnt);
        ver.mode_bits() + ver.char_cnt_bits(self.mode) + encoded_bits
    }

    // Whether the char count indicator of the version can represent the char count
    fn fits_char_cnt(&self, ver: Version) -> bool {
        self.char_cnt < 1 << ver.char_cnt_bits(self.mode)
    }

    pub fn fits(&self, ver: Version, ecl: ECLevel) -> bool {
        self.fits_char_cnt(ver) && self.bit_len(ver) <= ver.data_bit_capacity(ecl)
    }
}


// Writer for encoded data
//------------------------------------------------------------------------------

mod writer {
    use crate::common::{bit_utils::BitStream, codec::PADDING_CODEWORDS, error::QRResult};

    use super::{Mode, Segment, Version};

    pub fn push_segment(seg: &Segment, ver: Version, out: &mut BitStream) -> QRResult<()> {
        push_header(seg, ver, out)?;
        match seg.mode() {
            Mode::Numeric => push_numeric_data(seg.data(), out),
            Mode::Alphanumeric => push_alphanumeric_data(seg.data(), out),
            Mode::Byte => push_byte_data(seg.data(), out),
            Mode::Kanji => push_kanji_data(seg.data(), out),
        }
    }

    fn push_header(seg: &Segment, ver: Version, out: &mut BitStream) -> QRResult<()> {
        let len_bits = ver.char_cnt_bits(seg.mode());
        let char_cnt = seg.char_cnt();
        debug_assert!(
            char_cnt < (1 << len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {len_bits}"
        );
        out.push_bits(seg.mode() as u8, ver.mode_bits())?;
        out.push_bits(char_cnt as u16, len_bits)
    }

    fn push_numeric_data(data: &[u8], out: &mut BitStream) -> QRResult<()> {
        for chunk in data.chunks(3) {
            let len = Mode::Numeric.encoded_len(chunk.len());
            out.push_bits(Mode::Numeric.encode_chunk(chunk), len)?;
        }
        Ok(())
    }

    fn push_alphanumeric_data(data: &[u8], out: &mut BitStream) -> QRResult<()> {
        for chunk in data.chunks(2) {
            let len = Mode::Alphanumeric.encoded_len(chunk.len());
            out.push_bits(Mode::Alphanumeric.encode_chunk(chunk), len)?;
        }
        Ok(())
    }

    fn push_byte_data(data: &[u8], out: &mut BitStream) -> QRResult<()> {
        for b in data {
            out.push_bits(*b, 8)?;
        }
        Ok(())
    }

    fn push_kanji_data(data: &[u8], out: &mut BitStream) -> QRResult<()> {
        for chunk in data.chunks(2) {
            out.push_bits(Mode::Kanji.encode_chunk(chunk), 13)?;
        }
        Ok(())
    }

    pub fn push_terminator(out: &mut BitStream) -> QRResult<()> {
        let term_len = std::cmp::min(4, out.remaining());
        out.push_bits(0, term_len)
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) -> QRResult<()> {
        push_padding_bits(out)?;
        push_padding_codewords(out)
    }

    fn push_padding_bits(out: &mut BitStream) -> QRResult<()> {
        let offset = out.len() & 7;
        if offset > 0 {
            out.push_bits(0, 8 - offset)?;
        }
        Ok(())
    }

    fn push_padding_codewords(out: &mut BitStream) -> QRResult<()> {
        let offset = out.len() & 7;
        debug_assert!(offset == 0, "Bit offset should be zero before padding codewords: {offset}");

        let remain_byte_capacity = out.remaining() >> 3;
        for pc in PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity) {
            out.push_bits(pc, 8)?;
        }
        Ok(())
    }

}

// Encoder
//------------------------------------------------------------------------------

mod encode {
    use tracing::trace;

    use crate::common::{
        bit_utils::BitStream,
        error::{QRError, QRResult},
        metadata::{ECLevel, Version},
    };

    use super::{
        writer::{pad_remaining_capacity, push_segment, push_terminator},
        Segment,
    };

    /// Smallest version that holds the segment at the given error correction level.
    pub fn find_version(seg: &Segment, ecl: ECLevel) -> QRResult<Version> {
        Version::all().find(|v| seg.fits(*v, ecl)).ok_or(QRError::PayloadTooLarge)
    }

    /// Writes header, payload, terminator & padding so that the stream fills the data capacity
    /// of the version exactly.
    pub fn encode_segment(seg: &Segment, ver: Version, ecl: ECLevel) -> QRResult<BitStream> {
        if !seg.fits(ver, ecl) {
            return Err(QRError::PayloadTooLarge);
        }

        let mut bs = BitStream::new(ver.data_bit_capacity(ecl));
        push_segment(seg, ver, &mut bs)?;
        let encoded_len = bs.len();
        push_terminator(&mut bs)?;
        pad_remaining_capacity(&mut bs)?;

        if bs.len() != ver.data_bit_capacity(ecl) {
            return Err(QRError::InternalInvariantViolation(
                "encoded data does not fill the data capacity",
            ));
        }

        trace!("Encoded {} bits, padded to {} data codewords", encoded_len, bs.len() >> 3);
        Ok(bs)
    }

}

// Global constants
//------------------------------------------------------------------------------

static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];
