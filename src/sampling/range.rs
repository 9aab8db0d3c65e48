//! Unbiased uniform sampling over small integer ranges.
//!
//! Naive reduction modulo `range` over-represents low values whenever
//! 256 (or 65536) is not a multiple of `range`. Dividing the draw space
//! into equal buckets and redrawing on the overflow bucket is exact.

use crate::pool::RandomPool;
use thiserror::Error;

/// Largest range accepted by [`sample_range`].
pub const MAX_RANGE: u32 = 1 << 16;

/// Errors from range sampling.
#[derive(Debug, Clone, Error)]
pub enum RangeError {
    /// The requested range exceeds the sampler's 16-bit draw space.
    #[error("range {range} exceeds the 16-bit sampler limit of 65536")]
    TooLarge {
        /// The rejected range.
        range: u32,
    },
}

/// Returns a value uniformly distributed over `[0, range)`.
///
/// Ranges of 0 or 1 are degenerate and return 0 without consuming any
/// pool bytes. Ranges up to 256 draw one byte per attempt, larger
/// ranges up to [`MAX_RANGE`] draw two (big-endian); each draw is
/// bucketed by integer division and redrawn if it lands in the
/// incomplete overflow bucket, so no bucket is over-represented.
///
/// Ranges above [`MAX_RANGE`] are out of contract and rejected with
/// [`RangeError::TooLarge`]. The scratch bytes holding the consumed
/// sample are zeroed before return.
pub fn sample_range<P: RandomPool>(pool: &mut P, range: u32) -> Result<u32, RangeError> {
    if range > MAX_RANGE {
        return Err(RangeError::TooLarge { range });
    }
    if range <= 1 {
        return Ok(0);
    }

    let value = if range <= 256 {
        let div = 256 / range;
        let mut buf = [0u8; 1];
        let r = loop {
            pool.get_bytes(&mut buf);
            let r = u32::from(buf[0]) / div;
            if r < range {
                break r;
            }
        };
        // Scrub the consumed sample so it cannot linger in memory.
        buf.fill(0);
        r
    } else {
        let div = 65536 / range;
        let mut buf = [0u8; 2];
        let r = loop {
            pool.get_bytes(&mut buf);
            let r = u32::from(u16::from_be_bytes(buf)) / div;
            if r < range {
                break r;
            }
        };
        buf.fill(0);
        r
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{ChaChaPool, MockPool};
    use proptest::prelude::*;

    fn test_pool(tag: u8) -> ChaChaPool {
        ChaChaPool::from_seed_for_testing([tag; 32], 256)
    }

    #[test]
    fn test_degenerate_ranges_return_zero() {
        let mut pool = test_pool(1);
        for _ in 0..10 {
            assert_eq!(sample_range(&mut pool, 0).unwrap(), 0);
            assert_eq!(sample_range(&mut pool, 1).unwrap(), 0);
        }
    }

    #[test]
    fn test_degenerate_range_consumes_no_bytes() {
        let mut pool = MockPool::new(vec![0xFF]);
        sample_range(&mut pool, 1).unwrap();
        let mut probe = [0u8; 1];
        pool.get_bytes(&mut probe);
        // First scripted byte is still unconsumed.
        assert_eq!(probe[0], 0xFF);
    }

    #[test]
    fn test_overflow_bucket_is_redrawn() {
        // range 100, div = 2: a draw of 255 buckets to 127 >= 100 and
        // must be rejected; the next draw of 42 buckets to 21.
        let mut pool = MockPool::new(vec![255, 42]);
        assert_eq!(sample_range(&mut pool, 100).unwrap(), 21);
    }

    #[test]
    fn test_two_byte_path_big_endian() {
        // range 1000, div = 65536 / 1000 = 65: draw 0x0410 = 1040,
        // 1040 / 65 = 16.
        let mut pool = MockPool::new(vec![0x04, 0x10]);
        assert_eq!(sample_range(&mut pool, 1000).unwrap(), 16);
    }

    #[test]
    fn test_range_above_limit_rejected() {
        let mut pool = test_pool(2);
        assert!(matches!(
            sample_range(&mut pool, MAX_RANGE + 1),
            Err(RangeError::TooLarge { range }) if range == MAX_RANGE + 1
        ));
        // The limit itself is in contract.
        assert!(sample_range(&mut pool, MAX_RANGE).is_ok());
    }

    #[test]
    fn test_chi_squared_uniformity() {
        // Deterministic seed keeps this statistical check stable.
        let mut pool = test_pool(7);
        let range = 10u32;
        let trials = 20_000usize;
        let mut counts = [0usize; 10];

        for _ in 0..trials {
            let v = sample_range(&mut pool, range).unwrap() as usize;
            counts[v] += 1;
        }

        let expected = trials as f64 / range as f64;
        let chi2: f64 = counts
            .iter()
            .map(|&c| {
                let d = c as f64 - expected;
                d * d / expected
            })
            .sum();

        // 9 degrees of freedom; 33.7 is the 0.9999 quantile.
        assert!(chi2 < 33.7, "chi-squared too high: {chi2}");
    }

    proptest! {
        #[test]
        fn prop_samples_stay_in_range(range in 2u32..=65536, tag in any::<u8>()) {
            let mut pool = test_pool(tag);
            for _ in 0..32 {
                let v = sample_range(&mut pool, range).unwrap();
                prop_assert!(v < range);
            }
        }
    }
}
