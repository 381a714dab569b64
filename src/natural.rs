// ============================================================================
// Natural Numbers
// Canonical arbitrary-precision non-negative integers over digit buffers
// ============================================================================

use crate::error::{NumericError, NumericResult};
use crate::kernel::{ops, radix, Digit, DIGIT_BASE};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Sub};
use std::sync::OnceLock;

/// Arbitrary-precision non-negative integer.
///
/// Owns a little-endian base-65536 digit buffer together with an active
/// length. The buffer may be longer than the active length (allocation
/// size and value size are kept distinct); the digit at `len - 1` is always
/// non-zero, and zero is represented by an active length of 0. Buffers are
/// never shared between two `Natural` instances.
#[derive(Clone)]
pub struct Natural {
    digits: SmallVec<[Digit; 4]>,
    len: usize,
}

/// Size of the precomputed small-value table.
const SMALL_TABLE_LEN: usize = 256;

static SMALL: OnceLock<Vec<Natural>> = OnceLock::new();

fn small_table() -> &'static [Natural] {
    SMALL.get_or_init(|| (0..SMALL_TABLE_LEN as u64).map(Natural::from_u64_raw).collect())
}

impl Natural {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Wraps a digit buffer, culling leading zero digits.
    pub(crate) fn from_digits(digits: SmallVec<[Digit; 4]>) -> Self {
        let mut len = digits.len();
        while len > 0 && digits[len - 1] == 0 {
            len -= 1;
        }
        Self { digits, len }
    }

    fn from_u64_raw(mut n: u64) -> Self {
        let mut digits: SmallVec<[Digit; 4]> = SmallVec::new();
        while n > 0 {
            digits.push((n & 0xFFFF) as Digit);
            n >>= 16;
        }
        let len = digits.len();
        Self { digits, len }
    }

    /// Returns the shared precomputed value for small numbers.
    pub(crate) fn small(n: usize) -> Self {
        small_table()[n].clone()
    }

    pub fn zero() -> Self {
        Self::small(0)
    }

    pub fn one() -> Self {
        Self::small(1)
    }

    pub fn from_u64(n: u64) -> Self {
        if n < SMALL_TABLE_LEN as u64 {
            return Self::small(n as usize);
        }
        Self::from_u64_raw(n)
    }

    pub fn from_u128(mut n: u128) -> Self {
        let mut digits: SmallVec<[Digit; 4]> = SmallVec::new();
        while n > 0 {
            digits.push((n & 0xFFFF) as Digit);
            n >>= 16;
        }
        Self::from_digits(digits)
    }

    /// Parses a numeral string in the given base (2 to 36, alphabet `0-9a-z`).
    ///
    /// # Errors
    /// Returns `InvalidNumeral` for an empty string, a character outside the
    /// alphabet, or a digit not valid in `base`.
    pub fn from_str_radix(s: &str, base: u32) -> NumericResult<Self> {
        Ok(Self::from_digits(radix::parse(s, base)?))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The active digits, least-significant first.
    #[inline]
    pub(crate) fn digits(&self) -> &[Digit] {
        &self.digits[..self.len]
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.len == 0
    }

    /// True when the value fits in a single digit.
    #[inline]
    pub fn is_small(&self) -> bool {
        self.len <= 1
    }

    /// True when the value equals the given single digit.
    #[inline]
    pub fn eq_digit(&self, d: Digit) -> bool {
        if d == 0 {
            self.len == 0
        } else {
            self.len == 1 && self.digits[0] == d
        }
    }

    /// Number of active base-65536 digits.
    #[inline]
    pub fn digit_len(&self) -> usize {
        self.len
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Computes `self + other`.
    pub fn sum(&self, other: &Natural) -> Natural {
        let mut digits: SmallVec<[Digit; 4]> = SmallVec::new();
        digits.resize(self.len.max(other.len) + 1, 0);
        ops::copy(&mut digits, self.digits(), 0);
        let dest_len = digits.len();
        ops::add(&mut digits, other.digits(), 0, dest_len);
        Natural::from_digits(digits)
    }

    /// Computes `self - other`. Requires `other <= self`; the difference is
    /// undefined otherwise and the internal consistency check aborts.
    pub fn diff(&self, other: &Natural) -> Natural {
        let mut digits: SmallVec<[Digit; 4]> = SmallVec::new();
        digits.resize(self.len, 0);
        ops::copy(&mut digits, self.digits(), 0);
        let borrow = ops::sub(&mut digits, other.digits(), 0);
        assert_eq!(borrow, 0, "natural subtraction underflow");
        Natural::from_digits(digits)
    }

    fn prod_small(&self, m: Digit) -> Natural {
        let mut digits: SmallVec<[Digit; 4]> = SmallVec::new();
        digits.resize(self.len + 1, 0);
        ops::mul_add(&mut digits, self.digits(), m, 0);
        Natural::from_digits(digits)
    }

    /// Computes `self * other` by schoolbook multiplication: one scaled
    /// multiply-accumulate pass per digit of the second operand.
    /// O(len(a) * len(b)).
    pub fn prod(&self, other: &Natural) -> Natural {
        if other.is_small() {
            return self.prod_small(if other.len == 0 { 0 } else { other.digits[0] });
        }
        if self.is_small() {
            return other.prod_small(if self.len == 0 { 0 } else { self.digits[0] });
        }
        let mut digits: SmallVec<[Digit; 4]> = SmallVec::new();
        digits.resize(self.len + other.len, 0);
        for (i, &d) in other.digits().iter().enumerate() {
            ops::mul_add(&mut digits, self.digits(), d, i);
        }
        Natural::from_digits(digits)
    }

    /// Computes `self^e` by binary exponentiation (square-and-multiply).
    pub fn ipow(&self, e: u32) -> Natural {
        let mut acc = Natural::one();
        let mut base = self.clone();
        let mut e = e;
        while e > 0 {
            if e & 1 == 1 {
                acc = acc.prod(&base);
            }
            e >>= 1;
            if e > 0 {
                base = base.prod(&base);
            }
        }
        acc
    }

    fn div_rem_small(&self, d: Digit) -> (Natural, Natural) {
        let mut digits: SmallVec<[Digit; 4]> = SmallVec::new();
        digits.resize(self.len, 0);
        let rem = ops::div_small(&mut digits, self.digits(), d, self.len);
        (Natural::from_digits(digits), Natural::from_u64(rem as u64))
    }

    /// Multi-digit long division, Knuth Algorithm D (TAOCP 4.3.1).
    /// Requires `self > other` and `other` at least two digits long.
    fn div_rem_knuth(&self, other: &Natural) -> (Natural, Natural) {
        let n = other.len;
        let m = self.len - n;
        debug_assert!(n >= 2);

        let mut q: SmallVec<[Digit; 4]> = SmallVec::new();
        q.resize(m + 1, 0);

        // D1: normalize so the divisor's leading digit has its high bit set,
        // which bounds the quotient-digit estimation error below.
        let shift = other.digits[n - 1].leading_zeros();
        let d = (1u32 << shift) as Digit;
        let mut u: Vec<Digit> = vec![0; n + m + 1];
        let v: Vec<Digit>;
        if d != 1 {
            ops::mul_add(&mut u, self.digits(), d, 0);
            let mut vbuf = vec![0; n];
            ops::mul_add(&mut vbuf, other.digits(), d, 0);
            v = vbuf;
        } else {
            ops::copy(&mut u, self.digits(), 0);
            v = other.digits().to_vec();
        }

        let bot = v[n - 1] as u32;
        // D2..D7: one quotient digit per window position, most-significant first
        for j in (0..=m).rev() {
            // D3: estimate the quotient digit from the top two digits of the
            // remainder window over the divisor's leading digit, then correct
            // downward against the second digit (at most once, per Knuth).
            let top = ((u[j + n] as u32) << 16) + u[j + n - 1] as u32;
            let mut qhat = top / bot;
            let mut rhat = top % bot;
            loop {
                if qhat == DIGIT_BASE
                    || qhat as u64 * v[n - 2] as u64 > ((rhat as u64) << 16) + u[j + n - 2] as u64
                {
                    qhat -= 1;
                    rhat += bot;
                    if rhat < DIGIT_BASE {
                        continue;
                    }
                }
                break;
            }

            // D4: multiply and subtract from the remainder window
            let borrow = ops::mul_sub(&mut u, &v, qhat as Digit, j, j + n + 1);

            // D5: store the digit
            q[j] = qhat as Digit;

            if borrow > 0 {
                // D6: estimate overshot by one; add the divisor back
                tracing::trace!(position = j, "long division add-back");
                q[j] -= 1;
                ops::add(&mut u, &v, j, n + j + 1);
            }
            assert_eq!(u[n + j], 0, "long division window not cleared");
        }

        // D8: denormalize the remainder
        let mut rem: SmallVec<[Digit; 4]> = SmallVec::new();
        rem.resize(n, 0);
        if d != 1 {
            ops::div_small(&mut rem, &u, d, n);
        } else {
            rem.copy_from_slice(&u[..n]);
        }
        (Natural::from_digits(q), Natural::from_digits(rem))
    }

    /// Computes the quotient and remainder of `self / other`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `other` is zero.
    pub fn div_rem(&self, other: &Natural) -> NumericResult<(Natural, Natural)> {
        if other.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        match self.cmp(other) {
            Ordering::Less => Ok((Natural::zero(), self.clone())),
            Ordering::Equal => Ok((Natural::one(), Natural::zero())),
            Ordering::Greater => {
                if other.is_small() {
                    Ok(self.div_rem_small(other.digits[0]))
                } else {
                    Ok(self.div_rem_knuth(other))
                }
            },
        }
    }

    /// Greatest common divisor by the iterative Euclidean algorithm.
    /// `gcd(a, 0) == a`.
    pub fn gcd(&self, other: &Natural) -> Natural {
        let (mut a, mut b) = if self < other {
            (other.clone(), self.clone())
        } else {
            (self.clone(), other.clone())
        };
        while !b.is_zero() {
            let (_, r) = a.div_rem(&b).expect("divisor checked non-zero");
            a = b;
            b = r;
        }
        a
    }

    /// Computes `self!` as an iterative product counting down to 1.
    pub fn factorial(&self) -> Natural {
        let one = Natural::one();
        let mut p = Natural::one();
        let mut n = self.clone();
        while !n.is_zero() {
            p = p.prod(&n);
            n = n.diff(&one);
        }
        p
    }

    /// Binomial coefficient C(self, r) via the factorial quotient.
    /// The division is exact; a non-zero remainder is an internal
    /// consistency failure and aborts.
    ///
    /// # Errors
    /// Returns `NegativeOperand` if `r > self`.
    pub fn choose(&self, r: &Natural) -> NumericResult<Natural> {
        if r.cmp(self) == Ordering::Greater {
            return Err(NumericError::NegativeOperand);
        }
        let denom = r.factorial().prod(&self.diff(r).factorial());
        let (quot, rem) = self.factorial().div_rem(&denom)?;
        assert!(rem.is_zero(), "binomial coefficient division not exact");
        Ok(quot)
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Canonical digit string in the given base (2 to 36).
    pub fn to_string_radix(&self, base: u32) -> String {
        radix::render(self.digits(), base)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl PartialEq for Natural {
    fn eq(&self, other: &Self) -> bool {
        self.digits() == other.digits()
    }
}

impl Eq for Natural {}

impl PartialOrd for Natural {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Natural {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.len != other.len {
            return self.len.cmp(&other.len);
        }
        for i in (0..self.len).rev() {
            if self.digits[i] != other.digits[i] {
                return self.digits[i].cmp(&other.digits[i]);
            }
        }
        Ordering::Equal
    }
}

impl Hash for Natural {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.digits().hash(state);
    }
}

impl Default for Natural {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for Natural {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Natural({})", self)
    }
}

impl fmt::Display for Natural {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_radix(10))
    }
}

impl std::str::FromStr for Natural {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Natural::from_str_radix(s, 10)
    }
}

impl From<u64> for Natural {
    fn from(n: u64) -> Self {
        Natural::from_u64(n)
    }
}

// Infallible operator sugar (subtraction aborts on underflow; use `diff`
// only when the ordering invariant is established)
impl Add for &Natural {
    type Output = Natural;

    fn add(self, rhs: &Natural) -> Natural {
        self.sum(rhs)
    }
}

impl Sub for &Natural {
    type Output = Natural;

    fn sub(self, rhs: &Natural) -> Natural {
        self.diff(rhs)
    }
}

impl Mul for &Natural {
    type Output = Natural;

    fn mul(self, rhs: &Natural) -> Natural {
        self.prod(rhs)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Natural {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Natural {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
