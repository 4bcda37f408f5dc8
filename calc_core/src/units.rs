//! # Unit Types
//!
//! Type-safe wrappers for cord lengths. Catalog data and results are metric,
//! but paracord is usually sold by the foot, so conversions to inches and
//! feet are provided for display.
//!
//! All wrappers serialize as bare numbers.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Centimeters, Feet};
//!
//! let cord = Centimeters(30.48);
//! let feet: Feet = cord.into();
//! assert!((feet.0 - 1.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Sub};

/// Centimeters per inch (exact)
pub const CM_PER_INCH: f64 = 2.54;

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

impl From<Centimeters> for Inches {
    fn from(cm: Centimeters) -> Self {
        Inches(cm.0 / CM_PER_INCH)
    }
}

impl From<Inches> for Centimeters {
    fn from(inches: Inches) -> Self {
        Centimeters(inches.0 * CM_PER_INCH)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / INCHES_PER_FOOT)
    }
}

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * INCHES_PER_FOOT)
    }
}

impl From<Centimeters> for Feet {
    fn from(cm: Centimeters) -> Self {
        Inches::from(cm).into()
    }
}

/// Round to 2 decimal places, correctly rounded with ties to even.
///
/// The decision is made on the exact binary value, so `1.115` (stored as
/// `1.11499999...`) rounds down and the exact tie `6.625` goes to `6.62`.
pub fn round_hundredths(value: f64) -> f64 {
    // Larger values are returned unchanged
    const LIMIT: f64 = 1e13;

    if !value.is_finite() || value == 0.0 || value.abs() >= LIMIT {
        return value;
    }

    let bits = value.abs().to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exponent - 1075)
    };

    // |value| < 2^44, so exponent <= -9 and value = mantissa / 2^shift
    let shift = -exponent;
    if shift > 120 {
        return 0.0_f64.copysign(value);
    }

    let scaled = u128::from(mantissa) * 100;
    let denominator = 1u128 << shift;
    let mut quotient = scaled >> shift;
    let twice_remainder = (scaled & (denominator - 1)) * 2;

    if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 == 1) {
        quotient += 1;
    }

    // quotient < 2^53, so both operands are exact and the division is correctly rounded
    (quotient as f64 / 100.0).copysign(value)
}

impl fmt::Display for Centimeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} cm", self.0)
    }
}

impl fmt::Display for Feet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} ft", self.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|v| v.0).sum())
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }

            /// Round to 2 decimal places (see [`round_hundredths`])
            pub fn round_hundredths(self) -> Self {
                Self(round_hundredths(self.0))
            }
        }
    };
}

impl_arithmetic!(Centimeters);
impl_arithmetic!(Inches);
impl_arithmetic!(Feet);
