// ============================================================================
// Rationals
// Exact fractions kept reduced with a positive denominator
// ============================================================================

use crate::error::{NumericError, NumericResult};
use crate::integer::{Integer, Sign};
use crate::natural::Natural;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Exact rational number: a numerator/denominator pair of Integers.
///
/// Every value produced by an arithmetic operation is reduced
/// (gcd(|numerator|, denominator) == 1) and has a strictly positive
/// denominator. Raw construction may bypass reduction, but never the
/// denominator-sign normalization.
#[derive(Clone)]
pub struct Rational {
    numerator: Integer,
    denominator: Integer,
}

impl Rational {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Wraps numerator and denominator without reducing, normalizing the
    /// sign so the denominator is positive. Callers guarantee a non-zero
    /// denominator.
    fn raw(numerator: Integer, denominator: Integer) -> Self {
        debug_assert!(!denominator.is_zero());
        if denominator.is_negative() {
            Self {
                numerator: numerator.negate(),
                denominator: denominator.negate(),
            }
        } else {
            Self { numerator, denominator }
        }
    }

    /// Reduces `num/den` by their gcd. The denominator must already be
    /// positive and non-zero.
    fn reduce(numerator: Integer, denominator: Integer) -> Self {
        debug_assert!(!denominator.is_zero() && !denominator.is_negative());
        let g = numerator.gcd(&denominator);
        let (num, _) = numerator.div_rem(&g).expect("gcd is non-zero");
        let (den, _) = denominator.div_rem(&g).expect("gcd is non-zero");
        Self { numerator: num, denominator: den }
    }

    /// Creates `numerator/denominator` without reducing.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero denominator.
    pub fn new(numerator: Integer, denominator: Integer) -> NumericResult<Self> {
        if denominator.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Self::raw(numerator, denominator))
    }

    /// Creates the reduced form of `numerator/denominator`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero denominator.
    pub fn reduced(numerator: Integer, denominator: Integer) -> NumericResult<Self> {
        let raw = Self::new(numerator, denominator)?;
        Ok(Self::reduce(raw.numerator, raw.denominator))
    }

    pub fn zero() -> Self {
        Self::from_integer(Integer::zero())
    }

    pub fn one() -> Self {
        Self::from_integer(Integer::one())
    }

    pub fn from_integer(n: Integer) -> Self {
        Self { numerator: n, denominator: Integer::one() }
    }

    pub fn from_natural(n: Natural) -> Self {
        Self::from_integer(Integer::from_natural(n))
    }

    pub fn from_i64(n: i64) -> Self {
        Self::from_integer(Integer::from_i64(n))
    }

    /// Reconstructs the exact rational value of an IEEE-754 double.
    ///
    /// The double is decomposed into sign, unbiased binary exponent, and
    /// mantissa in [1, 2). A mantissa of exactly 1 is the fraction 1/1;
    /// otherwise a Stern-Brocot mediant search bounded by denominator 2^53
    /// finds the unique simplest fraction equal to the mantissa (doubles
    /// carry 53 mantissa bits, so the bounded search always terminates with
    /// an exact match). The result is then scaled by 2^exponent. This is the
    /// double's exact value, not an approximation.
    ///
    /// # Errors
    /// Returns `InvalidNumeral` for NaN or infinities.
    pub fn from_f64(x: f64) -> NumericResult<Self> {
        if !x.is_finite() {
            return Err(NumericError::InvalidNumeral);
        }
        if x.fract() == 0.0 {
            return Ok(Self::from_integer(Integer::from_f64(x)?));
        }
        let sign = if x < 0.0 { Sign::Negative } else { Sign::Positive };
        let bits = x.abs().to_bits();
        let exp_field = (bits >> 52) & 0x7FF;
        let frac = bits & ((1u64 << 52) - 1);
        let (mantissa, exponent) = if exp_field == 0 {
            // Subnormal: renormalize the fraction so bit 52 is set
            let shift = frac.leading_zeros() - 11;
            (frac << shift, -1022 - shift as i64)
        } else {
            ((1u64 << 52) | frac, exp_field as i64 - 1023)
        };
        let (num, den) = if mantissa == 1u64 << 52 {
            (1, 1)
        } else {
            mediant_search(mantissa)
        };
        let fraction = Self::raw(
            Integer::new(sign, Natural::from_u64(num)),
            Integer::from_natural(Natural::from_u64(den)),
        );
        let scale = Self::from_i64(2).ipow(exponent as i32)?;
        Ok(scale.prod(&fraction))
    }

    /// Exactly converts a `rust_decimal::Decimal` (mantissa over a power of
    /// ten). Intended for API boundaries.
    pub fn from_decimal(d: rust_decimal::Decimal) -> Self {
        let numerator = Integer::from_i128(d.mantissa());
        let denominator = pow10(d.scale() as usize);
        Self::reduce(numerator, denominator)
    }

    /// Parses `"n"` or `"n/d"` with optional signs on either part.
    ///
    /// # Errors
    /// Returns `InvalidNumeral` for malformed numerals or more than one
    /// separator, and `DivisionByZero` for a zero denominator.
    pub fn from_str_radix(s: &str, base: u32) -> NumericResult<Self> {
        let mut parts = s.split('/');
        let num = parts.next().ok_or(NumericError::InvalidNumeral)?;
        match (parts.next(), parts.next()) {
            (None, _) => Ok(Self::from_integer(Integer::from_str_radix(num, base)?)),
            (Some(den), None) => Self::reduced(
                Integer::from_str_radix(num, base)?,
                Integer::from_str_radix(den, base)?,
            ),
            (Some(_), Some(_)) => Err(NumericError::InvalidNumeral),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn numerator(&self) -> &Integer {
        &self.numerator
    }

    #[inline]
    pub fn denominator(&self) -> &Integer {
        &self.denominator
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        !self.numerator.is_zero() && !self.numerator.is_negative()
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Computes `self + other` over the common denominator `den * den`,
    /// reduced.
    pub fn sum(&self, other: &Rational) -> Rational {
        let num = self
            .numerator
            .prod(&other.denominator)
            .sum(&other.numerator.prod(&self.denominator));
        let den = self.denominator.prod(&other.denominator);
        Self::reduce(num, den)
    }

    pub fn diff(&self, other: &Rational) -> Rational {
        let num = self
            .numerator
            .prod(&other.denominator)
            .diff(&other.numerator.prod(&self.denominator));
        let den = self.denominator.prod(&other.denominator);
        Self::reduce(num, den)
    }

    pub fn prod(&self, other: &Rational) -> Rational {
        Self::reduce(
            self.numerator.prod(&other.numerator),
            self.denominator.prod(&other.denominator),
        )
    }

    /// Computes `self / other`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `other` is zero.
    pub fn quot(&self, other: &Rational) -> NumericResult<Rational> {
        if other.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let raw = Self::raw(
            self.numerator.prod(&other.denominator),
            self.denominator.prod(&other.numerator),
        );
        Ok(Self::reduce(raw.numerator, raw.denominator))
    }

    /// Computes `1 / self`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `self` is zero.
    pub fn recip(&self) -> NumericResult<Rational> {
        if self.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Self::raw(self.denominator.clone(), self.numerator.clone()))
    }

    pub fn negate(&self) -> Rational {
        Self {
            numerator: self.numerator.negate(),
            denominator: self.denominator.clone(),
        }
    }

    pub fn abs(&self) -> Rational {
        Self {
            numerator: self.numerator.abs(),
            denominator: self.denominator.clone(),
        }
    }

    /// Computes `self^e`; a negative exponent inverts the fraction.
    ///
    /// # Errors
    /// Returns `DivisionByZero` when raising zero to a negative exponent.
    pub fn ipow(&self, e: i32) -> NumericResult<Rational> {
        if e < 0 {
            if self.is_zero() {
                return Err(NumericError::DivisionByZero);
            }
            let e = e.unsigned_abs();
            Ok(Self::raw(self.denominator.ipow(e), self.numerator.ipow(e)))
        } else {
            Ok(Self::raw(
                self.numerator.ipow(e as u32),
                self.denominator.ipow(e as u32),
            ))
        }
    }

    /// Halves the value; a convenience for error-budget splitting.
    pub(crate) fn half(&self) -> Rational {
        self.prod(&Self::raw(Integer::one(), Integer::from_i64(2)))
    }

    pub fn min(a: &Rational, b: &Rational) -> Rational {
        if a.cmp(b) == Ordering::Greater {
            b.clone()
        } else {
            a.clone()
        }
    }

    pub fn max(a: &Rational, b: &Rational) -> Rational {
        if a.cmp(b) == Ordering::Less {
            b.clone()
        } else {
            a.clone()
        }
    }

    /// Splits the value into its integer part (floor) and fractional part
    /// in [0, 1).
    pub fn ifrac(&self) -> (Integer, Rational) {
        let (ip, rem) = self
            .numerator
            .div_rem(&self.denominator)
            .expect("denominator is non-zero");
        (ip, Self::raw(rem, self.denominator.clone()))
    }

    /// Continued-fraction expansion: repeatedly extract the integer part and
    /// recurse on the reciprocal of the fractional part until it is exactly
    /// zero. The empty expansion is zero.
    pub fn continued_fraction(&self) -> Vec<Integer> {
        let mut terms = Vec::new();
        let mut q = self.clone();
        while !q.is_zero() {
            let (ip, fp) = q.ifrac();
            terms.push(ip);
            if fp.is_zero() {
                break;
            }
            q = Self::raw(fp.denominator.clone(), fp.numerator.clone());
        }
        terms
    }

    /// Rebuilds a rational from continued-fraction terms by a right-to-left
    /// fold: starting from the last term, take the reciprocal of the
    /// accumulator and add the next term.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if an intermediate accumulator is zero.
    pub fn from_continued_fraction(terms: &[Integer]) -> NumericResult<Rational> {
        let Some(last) = terms.last() else {
            return Ok(Self::zero());
        };
        let mut acc = Self::from_integer(last.clone());
        for term in terms.iter().rev().skip(1) {
            acc = Self::from_integer(term.clone()).sum(&acc.recip()?);
        }
        Ok(acc)
    }

    /// Generalized binomial coefficient C(self, e) for a machine-integer
    /// exponent, as the iterative product of `(self - i) / (e - i)` terms.
    /// Valid for non-integer `self`.
    pub fn choose(&self, e: u32) -> Rational {
        let mut acc = Self::one();
        let mut a = self.clone();
        let mut b = Self::from_i64(e as i64);
        while !b.is_zero() {
            let term = a.quot(&b).expect("exponent term is non-zero");
            acc = term.prod(&acc);
            a = a.diff(&Self::one());
            b = b.diff(&Self::one());
        }
        acc
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    pub fn to_string_radix(&self, base: u32) -> String {
        if self.denominator.is_one() {
            self.numerator.to_string_radix(base)
        } else {
            format!(
                "{}/{}",
                self.numerator.to_string_radix(base),
                self.denominator.to_string_radix(base)
            )
        }
    }

    /// Fixed-point decimal string with the given number of fractional
    /// digits, truncating toward zero.
    pub fn to_fixed(&self, digits: usize) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let q = self.abs();
        let (ip, mut fp) = q.ifrac();
        let mut out = format!("{}{}", sign, ip);
        if digits > 0 {
            out.push('.');
            let ten = Self::from_i64(10);
            for _ in 0..digits {
                let (d, f) = fp.prod(&ten).ifrac();
                out.push_str(&d.to_string());
                fp = f;
            }
        }
        out
    }

    /// Scientific-notation string with the given number of significant
    /// digits (truncating). The exponent suffix is omitted when it is zero.
    pub fn to_precision(&self, digits: usize) -> String {
        let digits = digits.max(1);
        if self.is_zero() {
            let mut out = String::from("0");
            if digits > 1 {
                out.push('.');
                out.push_str(&"0".repeat(digits - 1));
            }
            return out;
        }
        let sign = if self.is_negative() { "-" } else { "" };
        let q = self.abs();
        let (ip, _) = q.ifrac();
        let (mut scaled, mut exp) = if !ip.is_zero() {
            let exp = ip.to_string().len() as i64 - 1;
            let down = Self::raw(Integer::one(), pow10(exp as usize));
            (q.prod(&down), exp)
        } else {
            // Value below one: estimate the decade from the reciprocal's
            // integer part, scale up, and correct exact powers of ten
            let recip = Self::raw(q.denominator.clone(), q.numerator.clone());
            let (rip, _) = recip.ifrac();
            let k = rip.to_string().len() as i64;
            let up = Self::from_integer(pow10(k as usize));
            (q.prod(&up), -k)
        };
        let ten = Self::from_i64(10);
        if scaled.cmp(&ten) != Ordering::Less {
            scaled = scaled.prod(&Self::raw(Integer::one(), pow10(1)));
            exp += 1;
        }
        let mut s = String::new();
        let mut cur = scaled;
        for _ in 0..digits {
            let (d, f) = cur.ifrac();
            s.push_str(&d.to_string());
            cur = f.prod(&ten);
        }
        let mut out = format!("{}{}", sign, &s[..1]);
        if s.len() > 1 {
            out.push('.');
            out.push_str(&s[1..]);
        }
        match exp.cmp(&0) {
            Ordering::Greater => out.push_str(&format!("e+{}", exp)),
            Ordering::Less => out.push_str(&format!("e{}", exp)),
            Ordering::Equal => {},
        }
        out
    }
}

/// 10^k as an Integer.
fn pow10(k: usize) -> Integer {
    Integer::from_natural(Natural::from_u64(10).ipow(k as u32))
}

/// Stern-Brocot mediant search for the simplest fraction equal to
/// `mantissa / 2^52`, over the open interval (1, 2). Comparisons are exact
/// cross-multiplications in `u128`, so the search terminates on the target
/// itself rather than on a nearby fraction that merely rounds to it.
///
/// Runs of same-direction mediant steps are taken in one batch (the run
/// length falls out of an exact division), since a mantissa sitting next to
/// a much simpler fraction would otherwise need one step per unit of a
/// continued-fraction term. Every frame visited is an ancestor of the
/// target, so denominators never leave the 2^53 search bound.
fn mediant_search(mantissa: u64) -> (u64, u64) {
    let n = mantissa as u128;
    let scale = 1u128 << 52;
    // Lower frame a/b < target < upper frame c/d
    let (mut a, mut b) = (1u128, 1u128);
    let (mut c, mut d) = (2u128, 1u128);
    loop {
        let num = a + c;
        let den = b + d;
        match (n * den).cmp(&(num * scale)) {
            Ordering::Equal => return (num as u64, den as u64),
            Ordering::Greater => {
                // Target above the mediant: batch the whole rightward run.
                // k steps stay right of the target while over > k * under.
                let over = n * b - scale * a;
                let under = scale * c - n * d;
                let k = over / under;
                if over % under == 0 {
                    return ((a + k * c) as u64, (b + k * d) as u64);
                }
                a += k * c;
                b += k * d;
            },
            Ordering::Less => {
                let over = scale * c - n * d;
                let under = n * b - scale * a;
                let k = over / under;
                if over % under == 0 {
                    return ((k * a + c) as u64, (k * b + d) as u64);
                }
                c += k * a;
                d += k * b;
            },
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

// Equality and ordering are value-based (cross-multiplied), so an unreduced
// raw construction still compares equal to its reduced form.
impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rational {}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        self.numerator
            .prod(&other.denominator)
            .cmp(&other.numerator.prod(&self.denominator))
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({})", self)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_radix(10))
    }
}

impl std::str::FromStr for Rational {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rational::from_str_radix(s, 10)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Rational::from_i64(n)
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Rational::from_integer(n)
    }
}

impl From<rust_decimal::Decimal> for Rational {
    fn from(d: rust_decimal::Decimal) -> Self {
        Rational::from_decimal(d)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        self.negate()
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: &Rational) -> Rational {
        self.sum(rhs)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: &Rational) -> Rational {
        self.diff(rhs)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: &Rational) -> Rational {
        self.prod(rhs)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Rational {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Rational {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(s: &str) -> Rational {
        s.parse().unwrap()
    }

    #[test]
    fn test_denominator_sign_normalized() {
        let q = Rational::new("1".parse().unwrap(), "-2".parse().unwrap()).unwrap();
        assert!(q.is_negative());
        assert!(!q.denominator().is_negative());
        assert_eq!(q, rat("-1/2"));
    }

    #[test]
    fn test_reduced() {
        let q = Rational::reduced("4".parse().unwrap(), "6".parse().unwrap()).unwrap();
        assert_eq!(q.numerator(), &"2".parse().unwrap());
        assert_eq!(q.denominator(), &"3".parse().unwrap());
    }

    #[test]
    fn test_zero_denominator_rejected() {
        assert_eq!(
            Rational::new(Integer::one(), Integer::zero()),
            Err(NumericError::DivisionByZero)
        );
        assert_eq!("1/0".parse::<Rational>(), Err(NumericError::DivisionByZero));
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(rat("3"), Rational::from_i64(3));
        assert_eq!(rat("-3/6"), Rational::from_i64(-1).quot(&Rational::from_i64(2)).unwrap());
        assert_eq!("1/2/3".parse::<Rational>(), Err(NumericError::InvalidNumeral));
    }

    #[test]
    fn test_sum_diff() {
        assert_eq!(rat("1/2").sum(&rat("1/3")), rat("5/6"));
        assert_eq!(rat("1/2").diff(&rat("1/3")), rat("1/6"));
        assert_eq!(rat("1/2").sum(&rat("-1/2")), Rational::zero());
    }

    #[test]
    fn test_prod_quot() {
        assert_eq!(rat("2/3").prod(&rat("3/4")), rat("1/2"));
        assert_eq!(rat("2/3").quot(&rat("4/3")).unwrap(), rat("1/2"));
        assert_eq!(
            rat("1/2").quot(&Rational::zero()),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_recip() {
        assert_eq!(rat("2/3").recip().unwrap(), rat("3/2"));
        assert_eq!(rat("-2/3").recip().unwrap(), rat("-3/2"));
        assert_eq!(Rational::zero().recip(), Err(NumericError::DivisionByZero));
    }

    #[test]
    fn test_ipow() {
        assert_eq!(rat("2/3").ipow(3).unwrap(), rat("8/27"));
        assert_eq!(rat("2/3").ipow(-2).unwrap(), rat("9/4"));
        assert_eq!(rat("-1/2").ipow(-3).unwrap(), rat("-8"));
        assert_eq!(rat("5").ipow(0).unwrap(), Rational::one());
        assert_eq!(Rational::zero().ipow(-1), Err(NumericError::DivisionByZero));
    }

    #[test]
    fn test_ordering_and_min_max() {
        assert!(rat("1/3") < rat("1/2"));
        assert!(rat("-1/2") < rat("-1/3"));
        assert_eq!(Rational::min(&rat("1/3"), &rat("1/2")), rat("1/3"));
        assert_eq!(Rational::max(&rat("1/3"), &rat("1/2")), rat("1/2"));
    }

    #[test]
    fn test_value_equality_ignores_reduction() {
        let unreduced = Rational::new("2".parse().unwrap(), "4".parse().unwrap()).unwrap();
        assert_eq!(unreduced, rat("1/2"));
    }

    #[test]
    fn test_ifrac() {
        let (ip, fp) = rat("7/2").ifrac();
        assert_eq!(ip, "3".parse().unwrap());
        assert_eq!(fp, rat("1/2"));
        // Floor semantics for negatives: -7/2 = -4 + 1/2
        let (ip, fp) = rat("-7/2").ifrac();
        assert_eq!(ip, "-4".parse().unwrap());
        assert_eq!(fp, rat("1/2"));
    }

    #[test]
    fn test_continued_fraction() {
        let terms = rat("355/113").continued_fraction();
        let rendered: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
        assert_eq!(rendered, ["3", "7", "16"]);
        assert_eq!(Rational::from_continued_fraction(&terms).unwrap(), rat("355/113"));
    }

    #[test]
    fn test_continued_fraction_zero_and_integer() {
        assert!(Rational::zero().continued_fraction().is_empty());
        assert_eq!(Rational::from_continued_fraction(&[]).unwrap(), Rational::zero());
        let terms = rat("5").continued_fraction();
        assert_eq!(terms.len(), 1);
        assert_eq!(Rational::from_continued_fraction(&terms).unwrap(), rat("5"));
    }

    #[test]
    fn test_generalized_choose() {
        // C(1/2, 2) = (1/2)(-1/2)/2 = -1/8
        assert_eq!(rat("1/2").choose(2), rat("-1/8"));
        // Integer case agrees with the Natural-level result
        assert_eq!(rat("5").choose(2), rat("10"));
        assert_eq!(rat("7/3").choose(0), Rational::one());
    }

    #[test]
    fn test_from_f64_exact_tenth() {
        // The IEEE-754 double 0.1 is exactly 3602879701896397 / 2^55
        let q = Rational::from_f64(0.1).unwrap();
        assert_eq!(q.numerator(), &"3602879701896397".parse().unwrap());
        assert_eq!(q.denominator(), &"36028797018963968".parse().unwrap());
    }

    #[test]
    fn test_from_f64_dyadic_values() {
        assert_eq!(Rational::from_f64(0.5).unwrap(), rat("1/2"));
        assert_eq!(Rational::from_f64(-0.75).unwrap(), rat("-3/4"));
        assert_eq!(Rational::from_f64(0.125).unwrap(), rat("1/8"));
        assert_eq!(Rational::from_f64(3.0).unwrap(), rat("3"));
    }

    #[test]
    fn test_from_f64_third_roundtrip() {
        // The closest double to 1/3 is not 1/3; the reconstruction must
        // recover the double's own value exactly
        let q = Rational::from_f64(1.0 / 3.0).unwrap();
        assert_ne!(q, rat("1/3"));
        assert_eq!(q.numerator(), &"6004799503160661".parse().unwrap());
        assert_eq!(q.denominator(), &"18014398509481984".parse().unwrap());
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert_eq!(Rational::from_f64(f64::NAN), Err(NumericError::InvalidNumeral));
        assert_eq!(Rational::from_f64(f64::INFINITY), Err(NumericError::InvalidNumeral));
    }

    #[test]
    fn test_from_decimal() {
        use rust_decimal::Decimal;
        let q = Rational::from_decimal(Decimal::new(12345, 2)); // 123.45
        assert_eq!(q, rat("2469/20"));
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(rat("1/3").to_fixed(5), "0.33333");
        assert_eq!(rat("-7/2").to_fixed(3), "-3.500");
        assert_eq!(rat("5").to_fixed(0), "5");
        assert_eq!(rat("22/7").to_fixed(6), "3.142857");
    }

    #[test]
    fn test_to_precision() {
        assert_eq!(rat("12345").to_precision(3), "1.23e+4");
        assert_eq!(rat("1/2").to_precision(3), "5.00e-1");
        assert_eq!(rat("22/7").to_precision(4), "3.142");
        assert_eq!(rat("-1/200").to_precision(2), "-5.0e-3");
        assert_eq!(Rational::zero().to_precision(3), "0.00");
    }

    #[test]
    fn test_to_precision_exact_powers_of_ten() {
        assert_eq!(rat("1/10").to_precision(3), "1.00e-1");
        assert_eq!(rat("1/100").to_precision(2), "1.0e-2");
        assert_eq!(rat("10").to_precision(2), "1.0e+1");
    }

    #[test]
    fn test_display() {
        assert_eq!(rat("1/2").to_string(), "1/2");
        assert_eq!(rat("4/2").to_string(), "2");
        assert_eq!(rat("-1/2").to_string(), "-1/2");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn rational_strategy() -> impl Strategy<Value = Rational> {
            (any::<i32>(), 1i32..).prop_map(|(n, d)| {
                Rational::new(Integer::from_i64(n as i64), Integer::from_i64(d as i64)).unwrap()
            })
        }

        proptest! {
            /// Reduction is idempotent.
            #[test]
            fn prop_reduce_idempotent(q in rational_strategy()) {
                let once = Rational::reduced(q.numerator().clone(), q.denominator().clone()).unwrap();
                let twice =
                    Rational::reduced(once.numerator().clone(), once.denominator().clone()).unwrap();
                prop_assert_eq!(once.numerator(), twice.numerator());
                prop_assert_eq!(once.denominator(), twice.denominator());
            }

            /// Every arithmetic result has a strictly positive denominator
            /// and is fully reduced.
            #[test]
            fn prop_arithmetic_results_canonical(a in rational_strategy(), b in rational_strategy()) {
                for q in [a.sum(&b), a.diff(&b), a.prod(&b)] {
                    prop_assert!(!q.denominator().is_negative() && !q.denominator().is_zero());
                    let g = q.numerator().gcd(q.denominator());
                    prop_assert!(g.is_one() || q.numerator().is_zero());
                }
            }

            /// (a + b) - b == a.
            #[test]
            fn prop_sum_diff_roundtrip(a in rational_strategy(), b in rational_strategy()) {
                prop_assert_eq!(a.sum(&b).diff(&b), a);
            }

            /// Continued fractions round-trip.
            #[test]
            fn prop_cfrac_roundtrip(q in rational_strategy()) {
                let terms = q.continued_fraction();
                prop_assert_eq!(Rational::from_continued_fraction(&terms).unwrap(), q);
            }

            /// Double reconstruction is exact: the mediant result agrees
            /// with the direct dyadic decomposition of the double.
            #[test]
            fn prop_from_f64_exact(x in -1.0e15f64..1.0e15) {
                prop_assume!(x.is_normal());
                let q = Rational::from_f64(x).unwrap();
                prop_assert_eq!(q.is_negative(), x < 0.0);
                // Verify against the direct dyadic decomposition
                let bits = x.abs().to_bits();
                let exponent = ((bits >> 52) & 0x7FF) as i32 - 1023;
                let mantissa = (1u64 << 52) | (bits & ((1u64 << 52) - 1));
                let direct = Rational::reduced(
                    Integer::from_natural(Natural::from_u64(mantissa)),
                    Integer::one(),
                )
                .unwrap()
                .prod(&Rational::from_i64(2).ipow(exponent - 52).unwrap());
                prop_assert_eq!(q.abs(), direct);
            }
        }
    }
}
