//! The four exported operations.
//!
//! Integer results follow the C `int` contract: 32-bit two's-complement with
//! silent wraparound. The `checked_*` variants report overflow instead.

use tracing::debug;

use crate::{FfiMathError, Result};

const WRAPS_TO_ZERO_FROM: i32 = 34;

/// Sum of `a` and `b`, wrapping on overflow.
pub fn add(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

/// IEEE-754 product. NaN and infinities propagate as usual.
pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// `n!`, wrapping on overflow.
///
/// Returns [`FfiMathError::NegativeInput`] for `n < 0`. The C export maps that
/// error to `-1`.
///
/// ```
/// assert_eq!(ffimath::factorial(5).unwrap(), 120);
/// assert!(ffimath::factorial(-1).is_err());
/// ```
pub fn factorial(n: i32) -> Result<i32> {
    reject_negative("factorial", n)?;
    // 2^32 divides 34!, so every larger factorial wraps to 0.
    if n >= WRAPS_TO_ZERO_FROM {
        return Ok(0);
    }
    Ok((2..=n).fold(1i32, |acc, k| acc.wrapping_mul(k)))
}

/// `n!`, failing with [`FfiMathError::Overflow`] once the result leaves `i32`.
pub fn checked_factorial(n: i32) -> Result<i32> {
    reject_negative("factorial", n)?;
    (2..=n).try_fold(1i32, |acc, k| acc.checked_mul(k)).ok_or_else(|| {
        debug!(n, "factorial overflowed");
        FfiMathError::Overflow { op: "factorial", n }
    })
}

/// The `n`th Fibonacci number (0-based), computed iteratively.
///
/// `fibonacci(0) == 0`, `fibonacci(1) == 1`, and any `n <= 0` yields 0.
pub fn fibonacci(n: i32) -> i32 {
    if n <= 0 {
        return 0;
    }

    let (mut a, mut b) = (0i32, 1i32);
    for _ in 1..n {
        let next = a.wrapping_add(b);
        a = b;
        b = next;
    }
    b
}

/// Naive exponential-time Fibonacci.
///
/// Produces exactly what [`fibonacci`] produces and is kept as a reference
/// for it. Not exported over the C ABI.
pub fn fibonacci_recursive(n: i32) -> i32 {
    match n {
        n if n <= 0 => 0,
        1 => 1,
        n => fibonacci_recursive(n - 1).wrapping_add(fibonacci_recursive(n - 2)),
    }
}

/// Iterative Fibonacci that fails with [`FfiMathError::Overflow`] past `i32`.
pub fn checked_fibonacci(n: i32) -> Result<i32> {
    if n <= 0 {
        return Ok(0);
    }

    let (mut a, mut b) = (0i32, 1i32);
    for _ in 1..n {
        let next = a.checked_add(b).ok_or_else(|| {
            debug!(n, "fibonacci overflowed");
            FfiMathError::Overflow { op: "fibonacci", n }
        })?;
        a = b;
        b = next;
    }
    Ok(b)
}

fn reject_negative(op: &'static str, n: i32) -> Result<()> {
    if n < 0 {
        debug!(op, n, "rejecting negative input");
        return Err(FfiMathError::NegativeInput { op, n });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorial_wraps_like_c_int() {
        // 13! = 6227020800, truncated to 32 bits
        assert_eq!(factorial(13).unwrap(), 6_227_020_800u64 as u32 as i32);
    }

    #[test]
    fn factorial_wraps_to_zero_from_34() {
        assert_ne!(factorial(33).unwrap(), 0);
        let slow = (2..=WRAPS_TO_ZERO_FROM).fold(1i32, |acc, k| acc.wrapping_mul(k));
        assert_eq!(slow, 0);
        assert_eq!(factorial(34).unwrap(), 0);
        assert_eq!(factorial(i32::MAX).unwrap(), 0);
    }

    #[test]
    fn fibonacci_wraps_past_46() {
        assert_eq!(fibonacci(46), 1_836_311_903);
        assert_eq!(fibonacci(47), 2_971_215_073u32 as i32);
    }
}
