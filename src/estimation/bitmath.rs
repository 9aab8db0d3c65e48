//! Fixed-point binary logarithm.
//!
//! The entropy estimate for a timing interval is its binary logarithm,
//! computed entirely in 32-bit integer arithmetic so the estimator has
//! no floating-point dependence and identical results on every host.

/// Fractional bits carried by fixed-point bit counts (1/16-bit units).
pub const FRAC_BITS: u32 = 4;

/// Fixed-point scale factor, `1 << FRAC_BITS`.
pub const SCALE: u32 = 1 << FRAC_BITS;

/// Computes `log2(value)` as a fixed-point quantity with [`FRAC_BITS`]
/// fractional bits.
///
/// The integer part comes from a halving scan over mask widths 16, 8,
/// 4, 2, 1: each step either credits the width to the bit count or
/// left-shifts the remainder, so the remainder ends normalized with
/// bit 31 set. The fractional part is then refined by the standard
/// bit-doubling algorithm: shift the normalized remainder right 16 bits
/// (so its square fits in 32-bit arithmetic), square it, and read the
/// next fraction bit off bit 31, renormalizing when it is clear.
///
/// The 16-bit pre-shift and the four iterations are load-bearing: the
/// derating constant applied downstream is calibrated to exactly this
/// precision.
///
/// Returns 0 for `value == 0`, which callers treat as "no information".
pub fn log2_fixed(value: u32) -> u32 {
    if value == 0 {
        return 0;
    }

    let mut x = value;
    let mut bits = 0u32;
    let mut mask = u32::MAX;
    let mut width = 16u32;
    while width != 0 {
        mask <<= width;
        if x & mask != 0 {
            bits += width;
        } else {
            x <<= width;
        }
        width >>= 1;
    }

    // x is now normalized with bit 31 set.
    for _ in 0..FRAC_BITS {
        bits <<= 1;
        x >>= 16;
        x *= x;
        if x & 0x8000_0000 != 0 {
            bits += 1;
        } else {
            x <<= 1;
        }
    }

    bits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_input() {
        assert_eq!(log2_fixed(0), 0);
    }

    #[test]
    fn test_exact_powers_of_two() {
        for k in 0..32 {
            assert_eq!(log2_fixed(1 << k), k * SCALE, "log2(2^{k})");
        }
    }

    #[test]
    fn test_known_values() {
        // log2(3) = 1.585 -> 25.36 in sixteenths
        assert_eq!(log2_fixed(3), 25);
        // log2(1000) = 9.966 -> 159.45
        assert_eq!(log2_fixed(1000), 159);
        // log2(u32::MAX) = 32 - epsilon -> all fraction bits set
        assert_eq!(log2_fixed(u32::MAX), 511);
    }

    #[test]
    fn test_monotonic() {
        let mut prev = 0;
        for v in 1..4096u32 {
            let cur = log2_fixed(v);
            assert!(cur >= prev, "log2_fixed not monotonic at {v}");
            prev = cur;
        }
    }

    #[test]
    fn test_within_a_sixteenth_of_float_log2() {
        for &v in &[2u32, 5, 17, 100, 999, 4242, 65535, 1 << 20, u32::MAX] {
            let fixed = log2_fixed(v) as f64 / SCALE as f64;
            let float = (v as f64).log2();
            let err = float - fixed;
            // Truncating refinement: never above the true value, and
            // never more than two fraction units below it.
            assert!(
                (0.0..2.0 / SCALE as f64).contains(&err),
                "log2_fixed({v}) = {fixed}, want {float}"
            );
        }
    }
}
