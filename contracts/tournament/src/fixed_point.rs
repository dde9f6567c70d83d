//! Deterministic fixed-point arithmetic for distribution weights.
//!
//! Values are `i128` scaled by [`SCALE`] (10^12). Every routine uses a fixed
//! number of series terms and integer truncation only, so the same inputs give
//! the same bits on every host. Fractional powers are evaluated as
//! `x^(k + f) = x^k * exp(f * ln x)` with the integer part `k` exact.

pub const SCALE: i128 = 1_000_000_000_000;

/// ln(2) * SCALE, rounded to nearest.
const LN_2: i128 = 693_147_180_560;

const LN_SERIES_TERMS: i128 = 16;
const EXP_SERIES_TERMS: i128 = 20;

/// Largest left shift `exp` will apply after range reduction. The reduced
/// series value stays below 2 * SCALE (< 2^41), so 2^80 leaves ample room.
const MAX_EXP_SHIFT: i128 = 80;

fn mul(a: i128, b: i128) -> Option<i128> {
    a.checked_mul(b).map(|v| v / SCALE)
}

/// `numerator / denominator` as a scaled value.
pub fn ratio(numerator: u32, denominator: u32) -> Option<i128> {
    if denominator == 0 {
        return None;
    }
    (numerator as i128)
        .checked_mul(SCALE)
        .map(|v| v / denominator as i128)
}

/// Natural logarithm of a positive scaled value.
pub fn ln(x: i128) -> Option<i128> {
    if x <= 0 {
        return None;
    }

    // Normalize into [1, 2) and remember the power of two.
    let mut k: i128 = 0;
    let mut m = x;
    while m >= 2 * SCALE {
        m /= 2;
        k += 1;
    }
    while m < SCALE {
        m *= 2;
        k -= 1;
    }

    // ln(m) = 2 * atanh(s), s = (m - 1) / (m + 1), 0 <= s < 1/3
    let s = (m - SCALE) * SCALE / (m + SCALE);
    let s2 = s * s / SCALE;
    let mut term = s;
    let mut sum: i128 = 0;
    for i in 0..LN_SERIES_TERMS {
        sum += term / (2 * i + 1);
        term = term * s2 / SCALE;
    }

    k.checked_mul(LN_2)?.checked_add(2 * sum)
}

/// e^y for a scaled exponent.
pub fn exp(y: i128) -> Option<i128> {
    // y = k * ln2 + r with |r| < ln2
    let k = y / LN_2;
    let r = y - k * LN_2;

    let mut term = SCALE;
    let mut sum = SCALE;
    for i in 1..=EXP_SERIES_TERMS {
        term = term * r / SCALE / i;
        sum += term;
    }

    if k >= 0 {
        if k > MAX_EXP_SHIFT {
            return None;
        }
        Some(sum << k)
    } else if -k >= 127 {
        Some(0)
    } else {
        Some(sum >> (-k))
    }
}

/// `x^(tenths / 10)` for a scaled `x` in `[0, SCALE]`.
pub fn pow_tenths(x: i128, tenths: u32) -> Option<i128> {
    if tenths == 0 {
        return Some(SCALE);
    }
    if x <= 0 {
        return Some(0);
    }

    let whole = tenths / 10;
    let frac = tenths % 10;

    let mut result = SCALE;
    for _ in 0..whole {
        result = mul(result, x)?;
    }
    if frac > 0 {
        let factor = exp(ln(x)?.checked_mul(frac as i128)? / 10)?;
        result = mul(result, factor)?;
    }
    Some(result)
}

/// `base^(tenths / 10)` for an integer base, returned scaled. The integer part
/// of the exponent is computed without scaling so large bases do not overflow
/// intermediate products.
pub fn int_pow_tenths(base: u32, tenths: u32) -> Option<i128> {
    if tenths == 0 {
        return Some(SCALE);
    }
    if base == 0 {
        return Some(0);
    }

    let whole = tenths / 10;
    let frac = tenths % 10;

    let mut integral: i128 = 1;
    for _ in 0..whole {
        integral = integral.checked_mul(base as i128)?;
    }
    if frac == 0 {
        return integral.checked_mul(SCALE);
    }

    let ln_base = ln((base as i128).checked_mul(SCALE)?)?;
    let factor = exp(ln_base.checked_mul(frac as i128)? / 10)?;
    integral.checked_mul(factor)
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_close(actual: i128, expected: i128, tolerance: i128) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tolerance,
            "actual {} expected {} (diff {})",
            actual,
            expected,
            diff
        );
    }

    #[test]
    fn test_ln_known_values() {
        assert_eq!(ln(SCALE), Some(0));
        assert_close(ln(2 * SCALE).unwrap(), LN_2, 2);
        // ln(10) = 2.302585092994
        assert_close(ln(10 * SCALE).unwrap(), 2_302_585_092_994, 1_000);
        // ln(0.5) = -ln(2)
        assert_close(ln(SCALE / 2).unwrap(), -LN_2, 2);
        assert_eq!(ln(0), None);
        assert_eq!(ln(-SCALE), None);
    }

    #[test]
    fn test_exp_known_values() {
        assert_eq!(exp(0), Some(SCALE));
        // e = 2.718281828459
        assert_close(exp(SCALE).unwrap(), 2_718_281_828_459, 1_000);
        // e^-1 = 0.367879441171
        assert_close(exp(-SCALE).unwrap(), 367_879_441_171, 1_000);
        assert_close(exp(LN_2).unwrap(), 2 * SCALE, 10);
    }

    #[test]
    fn test_exp_ln_inverse() {
        for v in [3i128, 7, 42, 999] {
            let x = v * SCALE;
            let back = exp(ln(x).unwrap()).unwrap();
            // relative error under 1e-9
            assert_close(back, x, x / 1_000_000_000);
        }
    }

    #[test]
    fn test_integer_powers_are_exact() {
        assert_eq!(int_pow_tenths(3, 10), Some(3 * SCALE));
        assert_eq!(int_pow_tenths(3, 20), Some(9 * SCALE));
        assert_eq!(int_pow_tenths(1_000, 50), Some(1_000_000_000_000_000 * SCALE));
        assert_eq!(int_pow_tenths(7, 0), Some(SCALE));
        assert_eq!(pow_tenths(SCALE / 2, 20), Some(SCALE / 4));
    }

    #[test]
    fn test_fractional_powers() {
        // 2^1.5 = 2.828427124746
        assert_close(int_pow_tenths(2, 15).unwrap(), 2_828_427_124_746, 10_000);
        // 10^0.5 = 3.162277660168
        assert_close(int_pow_tenths(10, 5).unwrap(), 3_162_277_660_168, 10_000);
        // 0.5^0.5 = 0.707106781187
        assert_close(pow_tenths(SCALE / 2, 5).unwrap(), 707_106_781_187, 10_000);
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(1, 4), Some(SCALE / 4));
        assert_eq!(ratio(3, 3), Some(SCALE));
        assert_eq!(ratio(1, 0), None);
    }
}
