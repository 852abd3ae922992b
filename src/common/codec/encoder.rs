pub use encode::*;

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use crate::common::{
        bit_utils::BitStream,
        codec::types::Segment,
        error::{QRError, QRResult},
        metadata::{ECLevel, Version},
    };

    use super::writer::{pad_remaining_capacity, push_segment, push_terminator};

    // Assembles the data bit stream at the smallest version in the range that
    // fits the segments: headers and payloads in order, then terminator and
    // padding up to the version capacity. Boosting raises the ec level to the
    // highest that still fits without changing the chosen version
    pub fn encode_segments(
        segs: &[Segment],
        ecl: ECLevel,
        min_version: Version,
        max_version: Version,
        boost_ecl: bool,
    ) -> QRResult<(BitStream, Version, ECLevel)> {
        let (ver, used) = find_min_version(segs, ecl, min_version, max_version)?;
        let ecl = if boost_ecl { boost_ec_level(used, ver, ecl) } else { ecl };

        let bcap = ver.data_bit_capacity(ecl);
        let mut bs = BitStream::new(bcap);
        for seg in segs {
            push_segment(seg, ver, &mut bs);
        }

        debug_assert!(bs.len() == used, "Bit count mismatch: Expected {used}, Pushed {}", bs.len());

        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);
        Ok((bs, ver, ecl))
    }

    // Header and payload bits the segments occupy at this version; None when
    // a char count overflows its header field
    pub fn total_bits(segs: &[Segment], ver: Version) -> Option<usize> {
        let mut total = 0_usize;
        for seg in segs {
            let ccbits = ver.char_cnt_bits(seg.mode());
            if seg.char_count() >= 1 << ccbits {
                return None;
            }
            total = total.checked_add(4 + ccbits + seg.bits().len())?;
        }
        Some(total)
    }

    fn find_min_version(
        segs: &[Segment],
        ecl: ECLevel,
        min_version: Version,
        max_version: Version,
    ) -> QRResult<(Version, usize)> {
        if min_version > max_version {
            return Err(QRError::ValueOutOfRange);
        }

        for v in *min_version..=*max_version {
            let ver = Version(v);
            let bcap = ver.data_bit_capacity(ecl);
            match total_bits(segs, ver) {
                Some(used) if used <= bcap => return Ok((ver, used)),
                Some(used) if v == *max_version => {
                    return Err(QRError::DataTooLong { used, capacity: bcap })
                }
                None if v == *max_version => return Err(QRError::SegmentTooLong),
                _ => (),
            }
        }
        unreachable!("Version range is never empty")
    }

    fn boost_ec_level(used: usize, ver: Version, mut ecl: ECLevel) -> ECLevel {
        for new_ecl in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
            if used <= ver.data_bit_capacity(new_ecl) {
                ecl = ecl.max(new_ecl);
            }
        }
        ecl
    }

}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use crate::common::{
        bit_utils::BitStream,
        codec::types::{Segment, PADDING_CODEWORDS},
        metadata::Version,
    };

    pub fn push_segment(seg: &Segment, ver: Version, out: &mut BitStream) {
        push_header(seg, ver, out);
        out.append(seg.bits());
    }

    // Mode indicator followed by the char count. The count field width is
    // version dependent and zero for eci, whose payload follows the indicator
    // directly
    fn push_header(seg: &Segment, ver: Version, out: &mut BitStream) {
        out.push_bits(seg.mode() as u8, 4);
        let char_cnt = seg.char_count();
        let len_bits = ver.char_cnt_bits(seg.mode());
        debug_assert!(
            len_bits == 0 || char_cnt < (1 << len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {len_bits}"
        );
        out.push_bits(char_cnt as u16, len_bits);
    }

    pub fn push_terminator(out: &mut BitStream) {
        let bit_len = out.len();
        let bit_capacity = out.capacity();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0_u8, term_len);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            let padding_bits_len = 8 - offset;
            out.push_bits(0_u8, padding_bits_len);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        let offset = out.len() & 7;
        debug_assert!(
            offset == 0,
            "Bit offset should be zero before padding codewords: {}",
            offset
        );

        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

}
