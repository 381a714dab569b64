// ============================================================================
// Tower Values
// Closed sum type over the numeric tower with an explicit promotion ladder
// ============================================================================

use crate::error::{NumericError, NumericResult};
use crate::integer::Integer;
use crate::natural::Natural;
use crate::rational::Rational;
use crate::real::Real;

/// A value of any tower layer.
///
/// The promotion ladder is Natural -> Integer -> Rational -> Real; mixed
/// operands are promoted to the least common layer before an operation is
/// dispatched. Naturals always promote at least to Integer at dispatch, so
/// subtraction never underflows.
#[derive(Debug, Clone)]
pub enum Value {
    Natural(Natural),
    Integer(Integer),
    Rational(Rational),
    Real(Real),
}

/// A pair of operands promoted to the same layer.
pub(crate) enum Promoted {
    Integers(Integer, Integer),
    Rationals(Rational, Rational),
    Reals(Real, Real),
}

impl Value {
    fn rank(&self) -> u8 {
        match self {
            Value::Natural(_) => 0,
            Value::Integer(_) => 1,
            Value::Rational(_) => 2,
            Value::Real(_) => 3,
        }
    }

    /// One step up the ladder; identity at the top.
    fn step_up(self) -> Value {
        match self {
            Value::Natural(n) => Value::Integer(Integer::from_natural(n)),
            Value::Integer(n) => Value::Rational(Rational::from_integer(n)),
            Value::Rational(q) => Value::Real(Real::from_rational(q)),
            Value::Real(r) => Value::Real(r),
        }
    }

    fn promote(mut self, rank: u8) -> Value {
        while self.rank() < rank {
            self = self.step_up();
        }
        self
    }

    /// Promotes a lone operand to at least the Integer layer.
    pub(crate) fn lift(self) -> Value {
        self.promote(1)
    }

    /// Promotes both operands to their least common layer (Integer at
    /// minimum) and pairs them up.
    pub(crate) fn promote_pair(a: Value, b: Value) -> Promoted {
        let rank = a.rank().max(b.rank()).max(1);
        if a.rank() != rank || b.rank() != rank {
            tracing::debug!(rank, "promoting tower operands");
        }
        match (a.promote(rank), b.promote(rank)) {
            (Value::Integer(a), Value::Integer(b)) => Promoted::Integers(a, b),
            (Value::Rational(a), Value::Rational(b)) => Promoted::Rationals(a, b),
            (Value::Real(a), Value::Real(b)) => Promoted::Reals(a, b),
            // promote() returns exactly the requested rank for rank >= 1
            _ => unreachable!("operands promoted to different layers"),
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Canonical digit string in the given base.
    ///
    /// # Errors
    /// Returns `TypeMismatch` for a Real, which has no finite canonical
    /// digit string.
    pub fn to_string_radix(&self, base: u32) -> NumericResult<String> {
        match self {
            Value::Natural(n) => Ok(n.to_string_radix(base)),
            Value::Integer(n) => Ok(n.to_string_radix(base)),
            Value::Rational(q) => Ok(q.to_string_radix(base)),
            Value::Real(_) => Err(NumericError::TypeMismatch),
        }
    }

    /// Fixed-point decimal string with the given number of fractional
    /// digits.
    pub fn to_fixed(&self, digits: usize) -> NumericResult<String> {
        match self {
            Value::Natural(n) => Ok(Rational::from_natural(n.clone()).to_fixed(digits)),
            Value::Integer(n) => Ok(Rational::from_integer(n.clone()).to_fixed(digits)),
            Value::Rational(q) => Ok(q.to_fixed(digits)),
            Value::Real(r) => r.to_fixed(digits),
        }
    }

    /// Scientific-notation string with the given number of significant
    /// digits.
    ///
    /// # Errors
    /// Returns `TypeMismatch` for a Real.
    pub fn to_precision(&self, digits: usize) -> NumericResult<String> {
        match self {
            Value::Natural(n) => Ok(Integer::from_natural(n.clone()).to_precision(digits)),
            Value::Integer(n) => Ok(n.to_precision(digits)),
            Value::Rational(q) => Ok(q.to_precision(digits)),
            Value::Real(_) => Err(NumericError::TypeMismatch),
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<Natural> for Value {
    fn from(n: Natural) -> Self {
        Value::Natural(n)
    }
}

impl From<Integer> for Value {
    fn from(n: Integer) -> Self {
        Value::Integer(n)
    }
}

impl From<Rational> for Value {
    fn from(q: Rational) -> Self {
        Value::Rational(q)
    }
}

impl From<Real> for Value {
    fn from(r: Real) -> Self {
        Value::Real(r)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Natural(Natural::from_u64(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(Integer::from_i64(n))
    }
}

impl TryFrom<f64> for Value {
    type Error = NumericError;

    /// Integral doubles become Integers; fractional ones become the exact
    /// Rational reconstruction of the double.
    fn try_from(x: f64) -> NumericResult<Self> {
        if !x.is_finite() {
            return Err(NumericError::InvalidNumeral);
        }
        if x.fract() == 0.0 {
            Ok(Value::Integer(Integer::from_f64(x)?))
        } else {
            Ok(Value::Rational(Rational::from_f64(x)?))
        }
    }
}

impl std::str::FromStr for Value {
    type Err = NumericError;

    /// A numeral with a `/` separator parses as a Rational, anything else
    /// as an Integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains('/') {
            Ok(Value::Rational(s.parse()?))
        } else {
            Ok(Value::Integer(s.parse()?))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
