//! Per-value formulas of the score transformations.
//!
//! The sigmoid-family formulas treat a division by zero or an overflowing
//! power of ten as a fault and return `None`; callers substitute `0.0` for
//! that element only.

use crate::constants::{DEFAULT_COEF_DIV, DEFAULT_COEF_SE, DEFAULT_COEF_SI};

/// Coefficients of the double sigmoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleSigmoidCoefficients {
    pub coef_div: f64,
    pub coef_si: f64,
    pub coef_se: f64,
}

impl Default for DoubleSigmoidCoefficients {
    fn default() -> Self {
        Self {
            coef_div: DEFAULT_COEF_DIV,
            coef_si: DEFAULT_COEF_SI,
            coef_se: DEFAULT_COEF_SE,
        }
    }
}

#[inline]
fn checked_div(a: f64, b: f64) -> Option<f64> {
    if b == 0.0 {
        None
    } else {
        Some(a / b)
    }
}

/// `10^x`, or `None` when a finite exponent overflows.
#[inline]
fn checked_pow10(x: f64) -> Option<f64> {
    let r = 10f64.powf(x);
    if r.is_infinite() && x.is_finite() {
        None
    } else {
        Some(r)
    }
}

#[inline]
pub fn right_step(value: f64, low: f64) -> f32 {
    if value >= low {
        1.0
    } else {
        0.0
    }
}

#[inline]
pub fn step(value: f64, low: f64, high: f64) -> f32 {
    if low <= value && value <= high {
        1.0
    } else {
        0.0
    }
}

/// `1 / (1 + 10^(10k(value - mid) / (low - high)))`
///
/// Rises from 0 at `low` to 1 at `high` when `low < high`.
pub fn sigmoid(value: f64, low: f64, high: f64, k: f64) -> Option<f64> {
    let exponent = checked_div(10.0 * k * (value - (low + high) * 0.5), low - high)?;
    let p = checked_pow10(exponent)?;
    checked_div(1.0, 1.0 + p)
}

/// `1 / (1 + 10^(k(value - mid) * 10 / (high - low)))`
///
/// Falls from 1 at `low` to 0 at `high` when `low < high`.
pub fn reverse_sigmoid(value: f64, low: f64, high: f64, k: f64) -> Option<f64> {
    let exponent = checked_div(k * (value - (high + low) / 2.0) * 10.0, high - low)?;
    let p = checked_pow10(exponent)?;
    checked_div(1.0, 1.0 + p)
}

/// Plateau of height ~1 between `low` and `high`.
pub fn double_sigmoid(
    value: f64,
    low: f64,
    high: f64,
    coefs: DoubleSigmoidCoefficients,
) -> Option<f64> {
    let DoubleSigmoidCoefficients {
        coef_div,
        coef_si,
        coef_se,
    } = coefs;
    let a = checked_pow10(coef_se * checked_div(value, coef_div)?)?;
    let b = a + checked_pow10(coef_se * checked_div(low, coef_div)?)?;
    let si_value = checked_pow10(coef_si * checked_div(value, coef_div)?)?;
    let si_high = checked_pow10(coef_si * checked_div(high, coef_div)?)?;
    let c = checked_div(si_value, si_value + si_high)?;
    Some(checked_div(a, b)? - c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_steps() {
        assert_eq!(right_step(5.0, 5.0), 1.0);
        assert_eq!(right_step(4.9, 5.0), 0.0);
        assert_eq!(step(4.0, 4.0, 9.0), 1.0);
        assert_eq!(step(9.0, 4.0, 9.0), 1.0);
        assert_eq!(step(9.1, 4.0, 9.0), 0.0);
        assert_eq!(right_step(f64::NAN, 0.0), 0.0);
    }

    #[test]
    fn test_sigmoid_midpoint() {
        assert!(approx(sigmoid(5.0, 0.0, 10.0, 0.5).unwrap(), 0.5));
        assert!(approx(reverse_sigmoid(5.0, 0.0, 10.0, 0.5).unwrap(), 0.5));
    }

    #[test]
    fn test_sigmoid_orientation() {
        assert!(sigmoid(10.0, 0.0, 10.0, 0.5).unwrap() > 0.99);
        assert!(sigmoid(0.0, 0.0, 10.0, 0.5).unwrap() < 0.01);
        assert!(reverse_sigmoid(10.0, 0.0, 10.0, 0.5).unwrap() < 0.01);
        assert!(reverse_sigmoid(0.0, 0.0, 10.0, 0.5).unwrap() > 0.99);
    }

    #[test]
    fn test_sigmoid_faults() {
        assert_eq!(sigmoid(1.0, 3.0, 3.0, 0.5), None);
        assert_eq!(reverse_sigmoid(1.0, 3.0, 3.0, 0.5), None);
        assert_eq!(reverse_sigmoid(1e6, 0.0, 1.0, 1.0), None);
        // underflow is not a fault
        assert_eq!(reverse_sigmoid(-1e6, 0.0, 1.0, 1.0), Some(1.0));
    }

    #[test]
    fn test_double_sigmoid_plateau() {
        let c = DoubleSigmoidCoefficients::default();
        assert!(double_sigmoid(5.0, 2.0, 8.0, c).unwrap() > 0.99);
        assert!(double_sigmoid(-5.0, 2.0, 8.0, c).unwrap() < 0.01);
        assert!(double_sigmoid(15.0, 2.0, 8.0, c).unwrap() < 0.01);
    }

    #[test]
    fn test_double_sigmoid_low_equals_high() {
        let c = DoubleSigmoidCoefficients::default();
        assert!(approx(double_sigmoid(4.0, 4.0, 4.0, c).unwrap(), 0.0));
        assert_eq!(double_sigmoid(1000.0, 4.0, 4.0, c), None);
    }

    #[test]
    fn test_double_sigmoid_zero_divisor() {
        let c = DoubleSigmoidCoefficients {
            coef_div: 0.0,
            ..Default::default()
        };
        assert_eq!(double_sigmoid(1.0, 0.0, 2.0, c), None);
    }
}
