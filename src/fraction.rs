#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when converting the score to a float for difficulty scaling
    clippy::cast_precision_loss
)]

//! Exact rational arithmetic for the score.
//!
//! Scores are kept as numerator/denominator pairs in lowest terms so that a
//! run made of sixteenth, eighth, quarter, half and whole rests always adds
//! up exactly.

use std::fmt;
use std::ops::{Add, Sub};

/// Greatest common divisor, always non-negative. `gcd(0, d) == |d|`.
#[must_use]
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Reduces `n/d` to lowest terms, keeping the sign of `n` and a positive denominator.
#[must_use]
pub fn simplify(n: i64, d: i64) -> (i64, i64) {
    let divisor = gcd(n, d);
    if divisor == 0 {
        // Only reachable for 0/0; treat it as zero
        return (0, 1);
    }
    let (n, d) = (n / divisor, d / divisor);
    if d < 0 { (-n, -d) } else { (n, d) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: i64,
    denominator: i64,
}

impl Fraction {
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    /// Builds a fraction already reduced to lowest terms.
    ///
    /// # Panics
    ///
    /// Panics if `denominator` is zero.
    #[must_use]
    pub fn new(numerator: i64, denominator: i64) -> Self {
        assert!(denominator != 0, "fraction denominator must be non-zero");
        let (numerator, denominator) = simplify(numerator, denominator);
        Self {
            numerator,
            denominator,
        }
    }

    #[must_use]
    pub fn numerator(self) -> i64 {
        self.numerator
    }

    #[must_use]
    pub fn denominator(self) -> i64 {
        self.denominator
    }

    /// Floating point value, used by the difficulty ramp.
    #[must_use]
    pub fn value(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// True once the numerator has dropped to zero or below.
    #[must_use]
    pub fn is_depleted(self) -> bool {
        self.numerator <= 0
    }

    /// Whole part of a mixed number, rounded toward negative infinity.
    #[must_use]
    pub fn whole_part(self) -> i64 {
        self.numerator.div_euclid(self.denominator)
    }

    /// Numerator of the fractional remainder of a mixed number.
    #[must_use]
    pub fn remainder(self) -> i64 {
        self.numerator.rem_euclid(self.denominator)
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Fraction {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.numerator * rhs.denominator + rhs.numerator * self.denominator,
            self.denominator * rhs.denominator,
        )
    }
}

impl Sub for Fraction {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.numerator * rhs.denominator - rhs.numerator * self.denominator,
            self.denominator * rhs.denominator,
        )
    }
}

// Mixed-number form: "2", "1 1/8", "0 3/4". Negative scores only show up for
// the frame that ends a run and are printed as a plain signed fraction.
impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.numerator < 0 {
            return write!(f, "{}/{}", self.numerator, self.denominator);
        }
        let whole = self.whole_part();
        let remainder = self.remainder();
        if remainder == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole} {remainder}/{}", self.denominator)
        }
    }
}
