// GF(256) arithmetic tables over the primitive polynomial x^8 + x^4 + x^3 + x^2 + 1.
// Everything here is evaluated at compile time.

use super::MAX_EC_SIZE;

const PRIMITIVE_POLY: u16 = 0x11D;

// Antilog table: EXP_TABLE[i] = α^i. Index 255 wraps to α^0.
pub(crate) const EXP_TABLE: [u8; 256] = build_exp_table();

// LOG_TABLE[0] is meaningless and never read for zero operands.
pub(crate) const LOG_TABLE: [u8; 256] = build_log_table();

// Generator polynomials g(x) = (x - α^0)(x - α^1)...(x - α^(n-1)) in log form.
// Row n holds the n non-leading coefficients, highest degree first; the leading 1 is implicit.
pub(crate) static GENERATOR_POLYNOMIALS: [[u8; MAX_EC_SIZE]; MAX_EC_SIZE + 1] =
    build_generator_polynomials();

const fn build_exp_table() -> [u8; 256] {
    let mut table = [0; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE_POLY;
        }
        i += 1;
    }
    table[255] = table[0];
    table
}

const fn build_log_table() -> [u8; 256] {
    let exp = build_exp_table();
    let mut table = [0; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

pub(crate) const fn gf_mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let log_sum = LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize;
    EXP_TABLE[log_sum % 255]
}

const fn build_generator_polynomials() -> [[u8; MAX_EC_SIZE]; MAX_EC_SIZE + 1] {
    let mut res = [[0; MAX_EC_SIZE]; MAX_EC_SIZE + 1];
    let mut poly = [0; MAX_EC_SIZE + 1];
    poly[0] = 1;

    let mut deg = 0;
    while deg < MAX_EC_SIZE {
        // Multiply by (x - α^deg)
        let root = EXP_TABLE[deg];
        let mut j = deg + 1;
        while j > 0 {
            poly[j] ^= gf_mul(poly[j - 1], root);
            j -= 1;
        }
        deg += 1;

        let mut k = 0;
        while k < deg {
            res[deg][k] = LOG_TABLE[poly[k + 1] as usize];
            k += 1;
        }
    }
    res
}
