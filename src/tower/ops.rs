// ============================================================================
// Dispatch Operations
// Promote operands to the least common layer and delegate
// ============================================================================

use super::value::{Promoted, Value};
use crate::error::{NumericError, NumericResult};
use crate::rational::Rational;
use std::cmp::Ordering;

/// `a + b` at the operands' least common layer.
pub fn sum(a: impl Into<Value>, b: impl Into<Value>) -> NumericResult<Value> {
    match Value::promote_pair(a.into(), b.into()) {
        Promoted::Integers(a, b) => Ok(a.sum(&b).into()),
        Promoted::Rationals(a, b) => Ok(a.sum(&b).into()),
        Promoted::Reals(a, b) => Ok(a.sum(&b).into()),
    }
}

/// `a - b` at the operands' least common layer.
pub fn diff(a: impl Into<Value>, b: impl Into<Value>) -> NumericResult<Value> {
    match Value::promote_pair(a.into(), b.into()) {
        Promoted::Integers(a, b) => Ok(a.diff(&b).into()),
        Promoted::Rationals(a, b) => Ok(a.diff(&b).into()),
        Promoted::Reals(a, b) => Ok(a.diff(&b).into()),
    }
}

/// `-a`.
pub fn negate(a: impl Into<Value>) -> NumericResult<Value> {
    match a.into().lift() {
        Value::Natural(_) => unreachable!("naturals lift to integers"),
        Value::Integer(n) => Ok(n.negate().into()),
        Value::Rational(q) => Ok(q.negate().into()),
        Value::Real(r) => Ok(r.negate().into()),
    }
}

/// `|a|`.
pub fn abs(a: impl Into<Value>) -> NumericResult<Value> {
    match a.into().lift() {
        Value::Natural(_) => unreachable!("naturals lift to integers"),
        Value::Integer(n) => Ok(n.abs().into()),
        Value::Rational(q) => Ok(q.abs().into()),
        Value::Real(r) => Ok(r.abs().into()),
    }
}

/// `a * b` at the operands' least common layer.
pub fn prod(a: impl Into<Value>, b: impl Into<Value>) -> NumericResult<Value> {
    match Value::promote_pair(a.into(), b.into()) {
        Promoted::Integers(a, b) => Ok(a.prod(&b).into()),
        Promoted::Rationals(a, b) => Ok(a.prod(&b).into()),
        Promoted::Reals(a, b) => Ok(a.prod(&b).into()),
    }
}

/// Floor division with remainder; exact layers only.
///
/// # Errors
/// `TypeMismatch` when either operand promotes past Integer;
/// `DivisionByZero` for a zero divisor.
pub fn div_rem(a: impl Into<Value>, b: impl Into<Value>) -> NumericResult<(Value, Value)> {
    match Value::promote_pair(a.into(), b.into()) {
        Promoted::Integers(a, b) => {
            let (q, r) = a.div_rem(&b)?;
            Ok((q.into(), r.into()))
        },
        Promoted::Rationals(..) | Promoted::Reals(..) => Err(NumericError::TypeMismatch),
    }
}

/// `a / b`; exact integer operands promote to Rational.
pub fn quot(a: impl Into<Value>, b: impl Into<Value>) -> NumericResult<Value> {
    match Value::promote_pair(a.into(), b.into()) {
        Promoted::Integers(a, b) => Ok(Rational::from_integer(a)
            .quot(&Rational::from_integer(b))?
            .into()),
        Promoted::Rationals(a, b) => Ok(a.quot(&b)?.into()),
        Promoted::Reals(a, b) => Ok(a.quot(&b).into()),
    }
}

/// `1 / a`; an exact integer operand promotes to Rational.
pub fn recip(a: impl Into<Value>) -> NumericResult<Value> {
    match a.into().lift() {
        Value::Natural(_) => unreachable!("naturals lift to integers"),
        Value::Integer(n) => Ok(Rational::from_integer(n).recip()?.into()),
        Value::Rational(q) => Ok(q.recip()?.into()),
        Value::Real(r) => Ok(r.recip().into()),
    }
}

/// Greatest common divisor; exact integer layers only.
pub fn gcd(a: impl Into<Value>, b: impl Into<Value>) -> NumericResult<Value> {
    match Value::promote_pair(a.into(), b.into()) {
        Promoted::Integers(a, b) => Ok(a.gcd(&b).into()),
        Promoted::Rationals(..) | Promoted::Reals(..) => Err(NumericError::TypeMismatch),
    }
}

/// `a^e` for a machine-integer exponent; a negative exponent promotes an
/// integer base to Rational.
pub fn ipow(a: impl Into<Value>, e: i32) -> NumericResult<Value> {
    match a.into().lift() {
        Value::Natural(_) => unreachable!("naturals lift to integers"),
        Value::Integer(n) => {
            if e < 0 {
                Ok(Rational::from_integer(n).ipow(e)?.into())
            } else {
                Ok(n.ipow(e as u32).into())
            }
        },
        Value::Rational(q) => Ok(q.ipow(e)?.into()),
        Value::Real(_) => Err(NumericError::TypeMismatch),
    }
}

/// `a!`; exact non-negative integers only.
pub fn factorial(a: impl Into<Value>) -> NumericResult<Value> {
    match a.into().lift() {
        Value::Natural(_) => unreachable!("naturals lift to integers"),
        Value::Integer(n) => Ok(n.factorial()?.into()),
        Value::Rational(_) | Value::Real(_) => Err(NumericError::TypeMismatch),
    }
}

/// Three-way comparison; exact layers only (a Real cannot be compared
/// exactly in finite time).
pub fn compare(a: impl Into<Value>, b: impl Into<Value>) -> NumericResult<Ordering> {
    match Value::promote_pair(a.into(), b.into()) {
        Promoted::Integers(a, b) => Ok(a.cmp(&b)),
        Promoted::Rationals(a, b) => Ok(a.cmp(&b)),
        Promoted::Reals(..) => Err(NumericError::TypeMismatch),
    }
}

// ============================================================================
// Tests
// ============================================================================
