use std::ops::Deref;

use crate::common::{
    bit_utils::BitStream,
    ec::*,
    error::{QRError, QRResult},
    metadata::{ECLevel, Version},
};

/// Splits the data codewords into blocks and computes the error correction codewords of each.
pub fn ecc(data: &[u8], ver: Version, ecl: ECLevel) -> QRResult<(Vec<&[u8]>, Vec<Vec<u8>>)> {
    let data_blocks = blockify(data, ver, ecl)?;

    let ecc_size_per_block = ver.ecc_per_block(ecl);
    let ecc_blocks =
        data_blocks.iter().map(|b| ecc_per_block(b, ecc_size_per_block)).collect::<Vec<_>>();

    Ok((data_blocks, ecc_blocks))
}

/// Final codeword sequence: interleaved data codewords followed by interleaved ec codewords.
pub fn build_payload(data: &[u8], ver: Version, ecl: ECLevel) -> QRResult<BitStream> {
    let (data_blocks, ecc_blocks) = ecc(data, ver, ecl)?;
    let mut payload = BitStream::new(ver.total_codewords() << 3);
    payload.extend(&interleave(&data_blocks))?;
    payload.extend(&interleave(&ecc_blocks))?;
    if payload.remaining() != 0 {
        return Err(QRError::InternalInvariantViolation("payload does not fill the symbol"));
    }
    Ok(payload)
}

pub fn blockify(data: &[u8], ver: Version, ecl: ECLevel) -> QRResult<Vec<&[u8]>> {
    let (block1_size, block1_count, block2_size, block2_count) = ver.data_codewords_per_block(ecl);

    let total_block1_size = block1_size * block1_count;
    let total_size = total_block1_size + block2_size * block2_count;
    if total_size != data.len() {
        return Err(QRError::InternalInvariantViolation(
            "data length does not match block layout",
        ));
    }

    let mut data_blocks = Vec::with_capacity(block1_count + block2_count);
    data_blocks.extend(data[..total_block1_size].chunks(block1_size));
    if block2_size > 0 {
        data_blocks.extend(data[total_block1_size..].chunks(block2_size));
    }
    Ok(data_blocks)
}

// Remainder of the block polynomial, shifted by ecc_count, divided by the generator polynomial
fn ecc_per_block(block: &[u8], ecc_count: usize) -> Vec<u8> {
    let len = block.len();
    let gen_poly = &GENERATOR_POLYNOMIALS[ecc_count][..ecc_count];

    let mut res = block.to_vec();
    res.resize(len + ecc_count, 0);

    for i in 0..len {
        let lead_coeff = res[i] as usize;
        if lead_coeff == 0 {
            continue;
        }

        let log_lead_coeff = LOG_TABLE[lead_coeff] as usize;
        for (u, v) in res[i + 1..].iter_mut().zip(gen_poly.iter()) {
            *u ^= EXP_TABLE[(*v as usize + log_lead_coeff) % 255];
        }
    }

    res.split_off(len)
}

/// Takes one codeword from every block in turn. Shorter blocks drop out once exhausted.
pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
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

/// Number of codeword errors the symbol can correct. A few small symbols reserve
/// misdecode protection codewords which are not available for correction.
pub fn error_correction_capacity(ver: Version, ecl: ECLevel) -> usize {
    let p = match (*ver, ecl) {
        (1, ECLevel::L) => 3,
        (2, ECLevel::L) | (1, ECLevel::M) => 2,
        (1, _) | (3, ECLevel::L) => 1,
        _ => 0,
    };

    let ec_bytes = ver.block_count(ecl) * ver.ecc_per_block(ecl);

    (ec_bytes - p) / 2
}

#[cfg(test)]
mod ec_tests {
    use test_case::test_case;

    use crate::{
        builder::ec::{
            blockify, build_payload, ecc, ecc_per_block, error_correction_capacity, interleave,
        },
        common::{
            error::QRError,
            metadata::{ECLevel, Version},
        },
    };

    #[test]
    fn test_poly_mod_1() {
        let res = ecc_per_block(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11", 10);
        assert_eq!(&*res, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_poly_mod_2() {
        let res = ecc_per_block(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec", 13);
        assert_eq!(&*res, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_poly_mod_3() {
        let res = ecc_per_block(b"CUF\x86W&U\xc2w2\x06\x12\x06g&", 18);
        assert_eq!(&*res, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test]
    fn test_ecc_hello_world() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let (data, ecc) = ecc(msg, Version::new(1).unwrap(), ECLevel::M).unwrap();
        assert_eq!(data, vec![&msg[..]]);
        assert_eq!(&*ecc, [b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17"]);
    }

    #[test]
    fn test_ecc_two_block_groups() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let expected_ec = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let (data, ecc) = ecc(msg, Version::new(5).unwrap(), ECLevel::Q).unwrap();
        assert_eq!(data.iter().map(|b| b.len()).collect::<Vec<_>>(), vec![15, 15, 16, 16]);
        assert_eq!(&*ecc, &expected_ec[..]);
    }

    #[test]
    fn test_blockify_length_mismatch() {
        let res = blockify(&[0; 15], Version::new(1).unwrap(), ECLevel::M);
        assert!(matches!(res, Err(QRError::InternalInvariantViolation(_))));
    }

    #[test]
    fn test_interleave() {
        let blocks = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9, 0]];
        let interleaved = interleave(&blocks);
        let exp_interleaved = vec![1, 4, 7, 2, 5, 8, 3, 6, 9, 0];
        assert_eq!(interleaved, exp_interleaved);
        assert!(interleave::<u8, Vec<u8>>(&[]).is_empty());
    }

    #[test]
    fn test_build_payload() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let payload = build_payload(msg, Version::new(1).unwrap(), ECLevel::M).unwrap();
        assert_eq!(payload.len(), 26 * 8);
        assert_eq!(&payload.data()[..16], msg);
        assert_eq!(&payload.data()[16..], b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17");
    }

    #[test]
    fn test_build_payload_interleaves_blocks() {
        let msg = (0..62).collect::<Vec<u8>>();
        let payload = build_payload(&msg, Version::new(5).unwrap(), ECLevel::Q).unwrap();
        assert_eq!(payload.len(), 134 * 8);
        assert_eq!(&payload.data()[..8], &[0, 15, 30, 46, 1, 16, 31, 47]);
        // Only the two long blocks carry a 16th codeword
        assert_eq!(&payload.data()[56..62], &[14, 29, 44, 60, 45, 61]);
    }

    #[test_case(1, ECLevel::L, 2)]
    #[test_case(1, ECLevel::M, 4)]
    #[test_case(1, ECLevel::Q, 6)]
    #[test_case(1, ECLevel::H, 8)]
    #[test_case(2, ECLevel::L, 4)]
    #[test_case(3, ECLevel::L, 7)]
    #[test_case(5, ECLevel::Q, 36)]
    #[test_case(40, ECLevel::H, 1215)]
    fn test_error_correction_capacity(ver: usize, ecl: ECLevel, exp: usize) {
        assert_eq!(error_correction_capacity(Version::new(ver).unwrap(), ecl), exp);
    }
}
