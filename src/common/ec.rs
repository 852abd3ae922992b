// Reed-Solomon error correction over GF(256)
//------------------------------------------------------------------------------

// Carry-less multiplication in GF(2^8) with primitive polynomial 0x11D
pub fn gf_mul(x: u8, y: u8) -> u8 {
    let (x, y) = (x as u32, y as u32);
    let mut z: u32 = 0;
    for i in (0..8).rev() {
        z = (z << 1) ^ ((z >> 7) * 0x11D);
        z ^= ((y >> i) & 1) * x;
    }

    debug_assert!(z >> 8 == 0, "Product overflowed the field: {z}");

    z as u8
}

// Builds the divisor polynomial as the product of (x - r^i) for
// i = 0..degree, where r = 0x02. The leading term is monic and implicit; the
// returned coefficients are the lower-order terms from highest to lowest
pub fn generator_poly(degree: usize) -> Vec<u8> {
    debug_assert!((1..=255).contains(&degree), "Invalid generator degree: {degree}");

    let mut coeffs = vec![0u8; degree];
    coeffs[degree - 1] = 1;

    let mut root: u8 = 1;
    for _ in 0..degree {
        for j in 0..degree {
            coeffs[j] = gf_mul(coeffs[j], root);
            if j + 1 < degree {
                coeffs[j] ^= coeffs[j + 1];
            }
        }
        root = gf_mul(root, 0x02);
    }
    coeffs
}

// Computes the remainder of the block polynomial divided by the generator
// polynomial; the remainder coefficients are the ecc codewords
pub fn ecc_per_block(block: &[u8], gen_poly: &[u8]) -> Vec<u8> {
    let degree = gen_poly.len();
    let mut rem = vec![0u8; degree];

    for &b in block {
        let factor = b ^ rem[0];
        rem.rotate_left(1);
        rem[degree - 1] = 0;
        for (r, &g) in rem.iter_mut().zip(gen_poly) {
            *r ^= gf_mul(g, factor);
        }
    }
    rem
}
