// ============================================================================
// Integers
// Sign plus Natural magnitude; floor-division convention
// ============================================================================

use crate::error::{NumericError, NumericResult};
use crate::natural::Natural;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Sign of an integer. Zero always carries `Positive` (no signed zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    #[inline]
    fn flip(self) -> Sign {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }

    #[inline]
    fn combine(self, other: Sign) -> Sign {
        if self == other {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// Arbitrary-precision signed integer.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Integer {
    sign: Sign,
    magnitude: Natural,
}

impl Integer {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Wraps a sign and magnitude, normalizing the sign of zero.
    pub fn new(sign: Sign, magnitude: Natural) -> Self {
        let sign = if magnitude.is_zero() { Sign::Positive } else { sign };
        Self { sign, magnitude }
    }

    pub fn zero() -> Self {
        Self::new(Sign::Positive, Natural::zero())
    }

    pub fn one() -> Self {
        Self::new(Sign::Positive, Natural::one())
    }

    pub fn from_natural(n: Natural) -> Self {
        Self::new(Sign::Positive, n)
    }

    pub fn from_i64(n: i64) -> Self {
        let sign = if n < 0 { Sign::Negative } else { Sign::Positive };
        Self::new(sign, Natural::from_u64(n.unsigned_abs()))
    }

    pub fn from_i128(n: i128) -> Self {
        let sign = if n < 0 { Sign::Negative } else { Sign::Positive };
        Self::new(sign, Natural::from_u128(n.unsigned_abs()))
    }

    /// Exactly converts an integral double (`x.fract() == 0`) by decomposing
    /// the IEEE-754 representation into mantissa and binary exponent.
    ///
    /// # Errors
    /// Returns `InvalidNumeral` if `x` is not finite or not integral.
    pub fn from_f64(x: f64) -> NumericResult<Self> {
        if !x.is_finite() || x.fract() != 0.0 {
            return Err(NumericError::InvalidNumeral);
        }
        let sign = if x.is_sign_negative() { Sign::Negative } else { Sign::Positive };
        let x = x.abs();
        if x < 9_007_199_254_740_992.0 {
            // Below 2^53 the value fits a machine word exactly
            return Ok(Self::new(sign, Natural::from_u64(x as u64)));
        }
        let bits = x.to_bits();
        let exponent = ((bits >> 52) & 0x7FF) as i64 - 1023;
        let mantissa = (1u64 << 52) | (bits & ((1u64 << 52) - 1));
        // x integral and >= 2^53 implies exponent >= 52
        let shift = (exponent - 52) as u32;
        let two = Natural::from_u64(2);
        let magnitude = Natural::from_u64(mantissa).prod(&two.ipow(shift));
        Ok(Self::new(sign, magnitude))
    }

    /// Parses a decimal numeral with an optional leading `+` or `-`.
    ///
    /// # Errors
    /// Returns `InvalidNumeral` on a malformed digit string.
    pub fn from_str_radix(s: &str, base: u32) -> NumericResult<Self> {
        let (sign, digits) = match s.as_bytes().first() {
            Some(b'+') => (Sign::Positive, &s[1..]),
            Some(b'-') => (Sign::Negative, &s[1..]),
            _ => (Sign::Positive, s),
        };
        Ok(Self::new(sign, Natural::from_str_radix(digits, base)?))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.sign == Sign::Positive && self.magnitude.eq_digit(1)
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Negative
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    #[inline]
    pub fn magnitude(&self) -> &Natural {
        &self.magnitude
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    pub fn negate(&self) -> Integer {
        Integer::new(self.sign.flip(), self.magnitude.clone())
    }

    pub fn abs(&self) -> Integer {
        Integer::new(Sign::Positive, self.magnitude.clone())
    }

    /// Computes `self + other` by sign bookkeeping over Natural operations.
    pub fn sum(&self, other: &Integer) -> Integer {
        if self.sign == other.sign {
            return Integer::new(self.sign, self.magnitude.sum(&other.magnitude));
        }
        match self.magnitude.cmp(&other.magnitude) {
            Ordering::Greater => Integer::new(self.sign, self.magnitude.diff(&other.magnitude)),
            Ordering::Less => Integer::new(other.sign, other.magnitude.diff(&self.magnitude)),
            Ordering::Equal => Integer::zero(),
        }
    }

    /// Computes `self - other`.
    pub fn diff(&self, other: &Integer) -> Integer {
        if self.sign != other.sign {
            return Integer::new(self.sign, self.magnitude.sum(&other.magnitude));
        }
        match self.magnitude.cmp(&other.magnitude) {
            Ordering::Greater => Integer::new(self.sign, self.magnitude.diff(&other.magnitude)),
            Ordering::Less => Integer::new(self.sign.flip(), other.magnitude.diff(&self.magnitude)),
            Ordering::Equal => Integer::zero(),
        }
    }

    pub fn prod(&self, other: &Integer) -> Integer {
        Integer::new(
            self.sign.combine(other.sign),
            self.magnitude.prod(&other.magnitude),
        )
    }

    /// Floor division: the quotient rounds toward negative infinity and the
    /// remainder takes the divisor's sign, so that
    /// `quotient * divisor + remainder == dividend` exactly.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `other` is zero.
    pub fn div_rem(&self, other: &Integer) -> NumericResult<(Integer, Integer)> {
        let (q, r) = self.magnitude.div_rem(&other.magnitude)?;
        if self.sign == other.sign {
            Ok((
                Integer::new(Sign::Positive, q),
                Integer::new(other.sign, r),
            ))
        } else if r.is_zero() {
            Ok((Integer::new(Sign::Negative, q), Integer::zero()))
        } else {
            // Signs disagree and the division is inexact: shift the quotient
            // one step down and complement the remainder against the divisor
            Ok((
                Integer::new(Sign::Negative, q.sum(&Natural::one())),
                Integer::new(other.sign, other.magnitude.diff(&r)),
            ))
        }
    }

    /// Computes `self^e` for a machine-integer exponent; an even exponent
    /// always yields a non-negative result.
    pub fn ipow(&self, e: u32) -> Integer {
        let sign = if e % 2 == 0 { Sign::Positive } else { self.sign };
        Integer::new(sign, self.magnitude.ipow(e))
    }

    /// Greatest common divisor of the magnitudes; always non-negative.
    pub fn gcd(&self, other: &Integer) -> Integer {
        Integer::new(Sign::Positive, self.magnitude.gcd(&other.magnitude))
    }

    /// Computes `self!`.
    ///
    /// # Errors
    /// Returns `NegativeOperand` for negative values.
    pub fn factorial(&self) -> NumericResult<Integer> {
        if self.is_negative() {
            return Err(NumericError::NegativeOperand);
        }
        Ok(Integer::new(Sign::Positive, self.magnitude.factorial()))
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    pub fn to_string_radix(&self, base: u32) -> String {
        let digits = self.magnitude.to_string_radix(base);
        match self.sign {
            Sign::Positive => digits,
            Sign::Negative => format!("-{}", digits),
        }
    }

    /// Scientific-notation string with the given number of significant
    /// digits (truncating, not rounding; fewer digits are not padded).
    pub fn to_precision(&self, digits: usize) -> String {
        let s = self.magnitude.to_string_radix(10);
        let exp = s.len() - 1;
        let s = &s[..s.len().min(digits.max(1))];
        let sign = if self.is_negative() { "-" } else { "" };
        let mut out = format!("{}{}", sign, &s[..1]);
        if s.len() > 1 {
            out.push('.');
            out.push_str(&s[1..]);
        }
        if exp > 0 {
            out.push_str(&format!("e+{}", exp));
        }
        out
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sign, other.sign) {
            (Sign::Positive, Sign::Negative) => Ordering::Greater,
            (Sign::Negative, Sign::Positive) => Ordering::Less,
            (Sign::Positive, Sign::Positive) => self.magnitude.cmp(&other.magnitude),
            (Sign::Negative, Sign::Negative) => other.magnitude.cmp(&self.magnitude),
        }
    }
}

impl Default for Integer {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_radix(10))
    }
}

impl std::str::FromStr for Integer {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Integer::from_str_radix(s, 10)
    }
}

impl From<i64> for Integer {
    fn from(n: i64) -> Self {
        Integer::from_i64(n)
    }
}

impl From<Natural> for Integer {
    fn from(n: Natural) -> Self {
        Integer::from_natural(n)
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        self.negate()
    }
}

impl Add for &Integer {
    type Output = Integer;

    fn add(self, rhs: &Integer) -> Integer {
        self.sum(rhs)
    }
}

impl Sub for &Integer {
    type Output = Integer;

    fn sub(self, rhs: &Integer) -> Integer {
        self.diff(rhs)
    }
}

impl Mul for &Integer {
    type Output = Integer;

    fn mul(self, rhs: &Integer) -> Integer {
        self.prod(rhs)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Integer {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Integer {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
