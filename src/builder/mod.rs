mod qr;

pub use qr::{Module, QR};

use std::ops::Deref;

use crate::common::{
    codec::{encode_segments, Segment},
    ec::{ecc_per_block, generator_poly},
    error::QRResult,
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
    BitStream,
};

// QR builder
//------------------------------------------------------------------------------

pub struct QRBuilder<'a> {
    data: &'a [u8],
    segments: Option<Vec<Segment>>,
    ec_level: ECLevel,
    min_version: Version,
    max_version: Version,
    mask: Option<MaskPattern>,
    boost_ecl: bool,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            segments: None,
            ec_level: ECLevel::M,
            min_version: Version::MIN,
            max_version: Version::MAX,
            mask: None,
            boost_ecl: true,
        }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    // Explicit segments take precedence over data, which lets callers mix
    // modes or inject eci and kanji segments
    pub fn segments(&mut self, segments: Vec<Segment>) -> &mut Self {
        self.segments = Some(segments);
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.min_version = version;
        self.max_version = version;
        self
    }

    pub fn version_range(&mut self, min: Version, max: Version) -> &mut Self {
        self.min_version = min;
        self.max_version = max;
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.min_version = Version::MIN;
        self.max_version = Version::MAX;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn boost_ecl(&mut self, boost_ecl: bool) -> &mut Self {
        self.boost_ecl = boost_ecl;
        self
    }

    pub fn metadata(&self) -> String {
        if self.min_version == self.max_version {
            format!(
                "{{ Version: {}, Ec level: {:?}, Boost ecl: {} }}",
                *self.min_version, self.ec_level, self.boost_ecl
            )
        } else {
            format!(
                "{{ Version: {}-{}, Ec level: {:?}, Boost ecl: {} }}",
                *self.min_version, *self.max_version, self.ec_level, self.boost_ecl
            )
        }
    }
}

#[cfg(test)]
mod qrbuilder_util_tests {
    use super::QRBuilder;
    use crate::common::{ECLevel, Version};

    #[test]
    fn test_metadata() {
        let data = "Hello, world!".as_bytes();
        let mut qr_builder = QRBuilder::new(data);
        qr_builder.version(Version::new(1).unwrap()).ec_level(ECLevel::L);
        assert_eq!(qr_builder.metadata(), "{ Version: 1, Ec level: L, Boost ecl: true }");
        qr_builder.unset_version().boost_ecl(false);
        assert_eq!(qr_builder.metadata(), "{ Version: 1-40, Ec level: L, Boost ecl: false }");
    }
}

impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        let segs = match &self.segments {
            Some(segs) => segs.clone(),
            None => Segment::auto(self.data),
        };

        let (encoded_data, version, ec_level) = encode_segments(
            &segs,
            self.ec_level,
            self.min_version,
            self.max_version,
            self.boost_ecl,
        )?;

        // Compute the ecc of every block and interleave both into the payload
        let mut payload = BitStream::new(version.total_codewords() << 3);
        let (data_blocks, ecc_blocks) = Self::compute_ecc(encoded_data.data(), version, ec_level);
        payload.extend(&Self::interleave(&data_blocks));
        payload.extend(&Self::interleave(&ecc_blocks));

        let mut qr = QR::new(version, ec_level);
        qr.draw_all_function_patterns();
        qr.draw_encoding_region(payload);

        match self.mask {
            Some(m) => qr.apply_mask(m),
            None => {
                apply_best_mask(&mut qr);
            }
        }

        Ok(qr)
    }

    fn compute_ecc(data: &[u8], version: Version, ec_level: ECLevel) -> (Vec<&[u8]>, Vec<Vec<u8>>) {
        let data_blocks = Self::blockify(data, version, ec_level);

        let gen_poly = generator_poly(version.ecc_per_block(ec_level));
        let ecc_blocks =
            data_blocks.iter().map(|b| ecc_per_block(b, &gen_poly)).collect::<Vec<_>>();

        (data_blocks, ecc_blocks)
    }

    // Data codewords split into contiguous blocks: the shorter blocks first,
    // followed by the blocks carrying one extra codeword
    pub(crate) fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
        let num_blocks = version.num_blocks(ec_level);
        let data_codewords = version.data_codewords(ec_level);
        let short_size = data_codewords / num_blocks;
        let long_count = data_codewords % num_blocks;
        let short_count = num_blocks - long_count;

        debug_assert!(
            data_codewords == data.len(),
            "Data len doesn't match data codewords: Data len {}, Data codewords {data_codewords}",
            data.len(),
        );

        let total_short_size = short_size * short_count;
        let mut data_blocks = Vec::with_capacity(num_blocks);
        data_blocks.extend(data[..total_short_size].chunks(short_size));
        if long_count > 0 {
            data_blocks.extend(data[total_short_size..].chunks(short_size + 1));
        }
        data_blocks
    }

    pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().expect("Blocks is empty");
        let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut res = Vec::with_capacity(total_size);
        for i in 0..max_block_size {
            for b in blocks {
                if i < b.len() {
                    res.push(b[i]);
                }
            }
        }
        res
    }
}

#[cfg(test)]
mod builder_tests {
    use test_case::test_case;

    use super::QRBuilder;
    use crate::common::{
        generate_format_info_qr, Color, ECLevel, Version, FORMAT_INFO_COORDS_QR_MAIN,
        FORMAT_INFO_COORDS_QR_SIDE,
    };

    #[test]
    fn test_add_ec_simple() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let expected_ecc = [b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17"];
        let (_, ecc) = QRBuilder::compute_ecc(msg, Version::new(1).unwrap(), ECLevel::M);
        assert_eq!(&*ecc, expected_ecc);
    }

    #[test]
    fn test_add_ec_complex() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let expected_ec = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let (_, ecc) = QRBuilder::compute_ecc(msg, Version::new(5).unwrap(), ECLevel::Q);
        assert_eq!(&*ecc, &expected_ec[..]);
    }

    // Version 5-Q splits 62 data codewords into blocks of 15, 15, 16 and 16
    #[test]
    fn test_blockify() {
        let data: Vec<u8> = (0..62).collect();
        let blocks = QRBuilder::blockify(&data, Version::new(5).unwrap(), ECLevel::Q);
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0], &data[..15]);
        assert_eq!(blocks[1], &data[15..30]);
        assert_eq!(blocks[2], &data[30..46]);
        assert_eq!(blocks[3], &data[46..62]);
    }

    #[test]
    fn test_interleave() {
        let blocks = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9, 0]];
        let interleaved = QRBuilder::interleave(&blocks);
        let exp_interleaved = vec![1, 4, 7, 2, 5, 8, 3, 6, 9, 0];
        assert_eq!(interleaved, exp_interleaved);
    }

    fn read_format_info(qr: &super::QR, coords: &[(i16, i16)]) -> u32 {
        let mut info = 0;
        for &(r, c) in coords {
            info = (info << 1) | (*qr.get(r, c) == Color::Dark) as u32;
        }
        info
    }

    #[test_case("Hello, world!🌎".to_string(), 1, ECLevel::L)]
    #[test_case("TEST".to_string(), 1, ECLevel::M)]
    #[test_case("12345".to_string(), 1, ECLevel::Q)]
    #[test_case("OK".to_string(), 1, ECLevel::H)]
    #[test_case("A11111111111111".repeat(11).to_string(), 7, ECLevel::M)]
    #[test_case("aAAAAAA1111111111111AAAAAAa".repeat(3).to_string(), 7, ECLevel::Q)]
    #[test_case("1234567890".repeat(15).to_string(), 7, ECLevel::H)]
    #[test_case("A11111111111111".repeat(20).to_string(), 10, ECLevel::M)]
    #[test_case("1234567890".repeat(28).to_string(), 10, ECLevel::H)]
    #[test_case("A111111111111111".repeat(100).to_string(), 27, ECLevel::M)]
    #[test_case("1234567890".repeat(145).to_string(), 27, ECLevel::H)]
    #[test_case("A111111111111111".repeat(97).to_string(), 40, ECLevel::M)]
    #[test_case("1234567890".repeat(305).to_string(), 40, ECLevel::H)]
    fn test_builder(data: String, version: usize, ec_level: ECLevel) {
        let version = Version::new(version).unwrap();
        let qr = QRBuilder::new(data.as_bytes())
            .version(version)
            .ec_level(ec_level)
            .boost_ecl(false)
            .build()
            .unwrap();

        assert_eq!(qr.version(), version);
        assert_eq!(qr.ec_level(), ec_level);

        // Both format info copies must encode the ec level and the chosen
        // mask
        let mask = qr.mask().unwrap();
        let exp_info = generate_format_info_qr(ec_level, mask);
        assert_eq!(read_format_info(&qr, &FORMAT_INFO_COORDS_QR_MAIN), exp_info);
        assert_eq!(read_format_info(&qr, &FORMAT_INFO_COORDS_QR_SIDE), exp_info);
        assert_eq!(*qr.get(-8, 8), Color::Dark);
    }

    #[test]
    #[should_panic]
    fn test_builder_data_overflow() {
        let data = "1234567890".repeat(306).to_string();

        QRBuilder::new(data.as_bytes())
            .version(Version::new(40).unwrap())
            .ec_level(ECLevel::H)
            .build()
            .unwrap();
    }
}
