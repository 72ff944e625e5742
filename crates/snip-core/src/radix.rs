//! Conversion between integers and digit sequences in an arbitrary radix.
//!
//! Digits are ordered least-significant first, so `6` in binary is `[0, 1, 1]`
//! and `20` in hexadecimal is `[4, 1]`.

use crate::error::{CoreError, Result};

fn check_radix(radix: u32) -> Result<()> {
    if radix < 2 {
        return Err(CoreError::invalid(format!(
            "radix must be at least 2, got {}",
            radix
        )));
    }
    Ok(())
}

/// Converts `n` into its digit values in base `radix`, least-significant first.
///
/// Zero converts to a single zero digit.
///
/// # Examples
///
/// ```
/// use snip_core::radix::to_digits;
///
/// assert_eq!(to_digits(6, 2).unwrap(), vec![0, 1, 1]);
/// assert_eq!(to_digits(20, 16).unwrap(), vec![4, 1]);
/// assert_eq!(to_digits(0, 16).unwrap(), vec![0]);
/// ```
pub fn to_digits(n: u64, radix: u32) -> Result<Vec<u32>> {
    check_radix(radix)?;

    let radix = u64::from(radix);
    let mut digits = Vec::new();
    let mut rest = n;
    loop {
        // remainder is always < radix, which came from a u32
        digits.push((rest % radix) as u32);
        rest /= radix;
        if rest == 0 {
            return Ok(digits);
        }
    }
}

/// Folds least-significant-first digits back into an integer.
///
/// Trailing zero digits (high-order padding) are accepted.
pub fn from_digits(digits: &[u32], radix: u32) -> Result<u64> {
    check_radix(radix)?;

    let mut value: u64 = 0;
    for &digit in digits.iter().rev() {
        if digit >= radix {
            return Err(CoreError::invalid(format!(
                "digit {} is out of range for radix {}",
                digit, radix
            )));
        }
        value = value
            .checked_mul(u64::from(radix))
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or(CoreError::CapacityExceeded {
                value: u64::MAX,
                capacity: u64::MAX,
            })?;
    }
    Ok(value)
}
