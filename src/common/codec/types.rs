use crate::common::{
    bit_utils::BitStream,
    error::{QRError, QRResult},
};

// Mode
//------------------------------------------------------------------------------

// Discriminants are the 4-bit mode indicators from the segment header
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
    Kanji = 0b1000,
    Eci = 0b0111,
}

impl Mode {
    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
        (char - b'0') as u16
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
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

    pub(crate) fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric chunk: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric chunk: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte chunk: {len}");
                data[0] as u16
            }
            Self::Kanji | Self::Eci => unreachable!("Chunks are only packed for text modes"),
        }
    }

    // Byte-level charset check; Kanji can't be classified per byte and ECI has
    // no characters, so both report false
    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => {
                matches!(byte, b'0'..=b'9' | b'A'..=b'Z' | b' ' | b'$' | b'%' | b'*' | b'+' | b'-' | b'.' | b'/' | b':')
            }
            Self::Byte => true,
            Self::Kanji | Self::Eci => false,
        }
    }

    // Payload bits produced by encoding len characters in this mode
    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => len * 8,
            Self::Kanji => len * 13,
            Self::Eci => unreachable!("ECI payload width depends on the assignment value"),
        }
    }
}


// Segment
//------------------------------------------------------------------------------

// One run of payload encoded under a single mode. The payload bits are fixed
// at construction; the header (mode indicator and char count) is version
// dependent and written during assembly, so a segment is reusable across
// encode calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: Mode,
    char_count: usize,
    bits: BitStream,
}

impl Segment {
    // Admits segments encoded externally, e.g. Kanji from a Shift JIS aware
    // segmenter
    pub fn new(mode: Mode, char_count: usize, bits: BitStream) -> Self {
        debug_assert!(
            matches!(mode, Mode::Eci) || bits.len() == mode.encoded_len(char_count),
            "Payload length doesn't match char count: Bits {}, Chars {char_count}",
            bits.len()
        );

        Self { mode, char_count, bits }
    }

    pub fn numeric(data: &str) -> QRResult<Self> {
        let data = data.as_bytes();
        if !data.iter().all(|&b| Mode::Numeric.contains(b)) {
            return Err(QRError::InvalidCharacterSet);
        }
        Ok(Self::pack(Mode::Numeric, data))
    }

    pub fn alphanumeric(data: &str) -> QRResult<Self> {
        let data = data.as_bytes();
        if !data.iter().all(|&b| Mode::Alphanumeric.contains(b)) {
            return Err(QRError::InvalidCharacterSet);
        }
        Ok(Self::pack(Mode::Alphanumeric, data))
    }

    pub fn bytes(data: &[u8]) -> Self {
        let mut bits = BitStream::new(data.len() << 3);
        bits.extend(data);
        Self { mode: Mode::Byte, char_count: data.len(), bits }
    }

    pub fn eci(assignment: u32) -> QRResult<Self> {
        let mut bits = BitStream::new(24);
        if assignment < 1 << 7 {
            bits.push_bits(assignment, 8);
        } else if assignment < 1 << 14 {
            bits.push_bits(0b10u8, 2);
            bits.push_bits(assignment, 14);
        } else if assignment < 999_999 {
            bits.push_bits(0b110u8, 3);
            bits.push_bits(assignment, 21);
        } else {
            return Err(QRError::ValueOutOfRange);
        }
        Ok(Self { mode: Mode::Eci, char_count: 0, bits })
    }

    // Single segment in the tightest mode covering all of data; empty data
    // yields no segments
    pub fn auto(data: &[u8]) -> Vec<Self> {
        if data.is_empty() {
            Vec::new()
        } else if data.iter().all(|&b| Mode::Numeric.contains(b)) {
            vec![Self::pack(Mode::Numeric, data)]
        } else if data.iter().all(|&b| Mode::Alphanumeric.contains(b)) {
            vec![Self::pack(Mode::Alphanumeric, data)]
        } else {
            vec![Self::bytes(data)]
        }
    }

    fn pack(mode: Mode, data: &[u8]) -> Self {
        let chunk_len = match mode {
            Mode::Numeric => 3,
            Mode::Alphanumeric => 2,
            _ => unreachable!("Only text modes are chunk packed"),
        };
        let mut bits = BitStream::new(mode.encoded_len(data.len()));
        for chunk in data.chunks(chunk_len) {
            bits.push_bits(mode.encode_chunk(chunk), mode.encoded_len(chunk.len()));
        }
        Self { mode, char_count: data.len(), bits }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn char_count(&self) -> usize {
        self.char_count
    }

    pub fn bits(&self) -> &BitStream {
        &self.bits
    }
}


// Global constants
//------------------------------------------------------------------------------

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];
