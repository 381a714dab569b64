// ============================================================================
// Computable Reals
// Error-bound generators over exact rationals, with combinator nodes
// ============================================================================
//
// A Real stands for a value that can be approximated to any requested
// positive rational error bound: evaluating at bound r yields a Rational
// within r of the true value, and for any bounds r >= s > 0 the two
// approximations differ by less than r. Combinators build new generators
// from child generators while splitting the caller's error budget so the
// contract provably holds for the composite.

use crate::error::NumericResult;
use crate::integer::Integer;
use crate::natural::Natural;
use crate::rational::Rational;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// A computable real number.
///
/// Holds shared, read-only ownership of a combinator node; cloning is cheap
/// and shares the node (and its memo slot). Not safe for concurrent use:
/// the memo slot is the one piece of mutable state in the tower.
#[derive(Clone)]
pub struct Real {
    node: Rc<RealNode>,
}

struct RealNode {
    kind: RealKind,
    /// Most recent (bound, approximation) pair; a request at a bound no
    /// tighter than the cached one reuses the cached answer, which the
    /// generator contract already guarantees to be valid.
    memo: RefCell<Option<Memo>>,
}

struct Memo {
    bound: Rational,
    value: Rational,
}

/// Combinator tag plus child operands. Helper bounds (`upper`/`lower` of
/// the children) are built once at construction so their own memo slots
/// persist across evaluations.
enum RealKind {
    Constant(Rational),
    Sum(Real, Real),
    Difference(Real, Real),
    Negate(Real),
    Abs(Real),
    Upper(Real),
    Lower(Real),
    Min(Real, Real),
    Max(Real, Real),
    Product {
        lhs: Real,
        rhs: Real,
        lhs_upper: Real,
        rhs_upper: Real,
    },
    Quotient {
        lhs: Real,
        rhs: Real,
        lhs_upper: Real,
        rhs_upper: Real,
        rhs_lower: Real,
    },
    Reciprocal {
        arg: Real,
        arg_lower: Real,
    },
    Sqrt(Rational),
}

impl Real {
    fn new(kind: RealKind) -> Self {
        Self {
            node: Rc::new(RealNode {
                kind,
                memo: RefCell::new(None),
            }),
        }
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// A Real that is exactly the given rational; evaluation is
    /// bound-independent.
    pub fn from_rational(q: Rational) -> Self {
        Self::new(RealKind::Constant(q))
    }

    pub fn from_integer(n: Integer) -> Self {
        Self::from_rational(Rational::from_integer(n))
    }

    /// The square root of a non-negative rational, as a generator that
    /// refines a Newton iteration until the enclosing interval is narrower
    /// than the requested bound.
    ///
    /// # Errors
    /// Returns `NegativeOperand` for negative input.
    pub fn sqrt(q: &Rational) -> NumericResult<Self> {
        if q.is_negative() {
            return Err(crate::error::NumericError::NegativeOperand);
        }
        Ok(Self::new(RealKind::Sqrt(q.clone())))
    }

    // ========================================================================
    // Combinators
    // ========================================================================

    /// `self + other`; each operand is evaluated at half the requested
    /// bound, so the triangle inequality bounds the total error.
    pub fn sum(&self, other: &Real) -> Real {
        Real::new(RealKind::Sum(self.clone(), other.clone()))
    }

    pub fn diff(&self, other: &Real) -> Real {
        Real::new(RealKind::Difference(self.clone(), other.clone()))
    }

    pub fn negate(&self) -> Real {
        Real::new(RealKind::Negate(self.clone()))
    }

    pub fn abs(&self) -> Real {
        Real::new(RealKind::Abs(self.clone()))
    }

    /// An upper bound for `|self|`: evaluates to `|a(r)| + r`, which cannot
    /// fall below the true magnitude.
    pub fn upper(&self) -> Real {
        Real::new(RealKind::Upper(self.clone()))
    }

    /// A strictly positive lower bound for `|self|`.
    ///
    /// Evaluation refines its trial bound (halving against both the bound
    /// and the current estimate) until the estimate clears zero. If the
    /// true value is exactly zero this never terminates; that is a known
    /// limitation of the combinator, not guarded against here. Callers
    /// needing a timeout must wrap evaluation externally.
    pub fn lower(&self) -> Real {
        Real::new(RealKind::Lower(self.clone()))
    }

    /// The smaller of two reals, by direct comparison of the two
    /// approximations at the requested bound. Values closer together than
    /// twice the bound may be misresolved; that is inherent to
    /// resolution-based comparison.
    pub fn min(&self, other: &Real) -> Real {
        Real::new(RealKind::Min(self.clone(), other.clone()))
    }

    /// The larger of two reals; see `min` for the resolution caveat.
    pub fn max(&self, other: &Real) -> Real {
        Real::new(RealKind::Max(self.clone(), other.clone()))
    }

    /// `self * other`. Upper bounds for both magnitudes are fixed at
    /// construction; evaluation splits the budget as `(r/2)/Y` and
    /// `(r/2)/X` so the multiplicative error propagation stays under `r`.
    pub fn prod(&self, other: &Real) -> Real {
        Real::new(RealKind::Product {
            lhs: self.clone(),
            rhs: other.clone(),
            lhs_upper: self.upper(),
            rhs_upper: other.upper(),
        })
    }

    /// `self / other`. In addition to the upper bounds, a strictly positive
    /// lower bound on `|other|` scales the sub-bounds by its square so the
    /// quotient error stays under `r` as the denominator approximation
    /// approaches its bound. Inherits `lower`'s non-termination when
    /// `other` is exactly zero.
    pub fn quot(&self, other: &Real) -> Real {
        Real::new(RealKind::Quotient {
            lhs: self.clone(),
            rhs: other.clone(),
            lhs_upper: self.upper(),
            rhs_upper: other.upper(),
            rhs_lower: other.lower(),
        })
    }

    /// `1 / self`; a quotient with constant numerator one, guarded against
    /// near-zero denominators by `lower`.
    pub fn recip(&self) -> Real {
        Real::new(RealKind::Reciprocal {
            arg: self.clone(),
            arg_lower: self.lower(),
        })
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Evaluates to a rational within `tolerance` of the true value.
    /// `tolerance` must be strictly positive.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if a quotient's denominator approximation
    /// collapses to exactly zero at the chosen sub-bound.
    pub fn eval(&self, tolerance: &Rational) -> NumericResult<Rational> {
        if let Some(memo) = self.node.memo.borrow().as_ref() {
            if tolerance.cmp(&memo.bound) != Ordering::Less {
                return Ok(memo.value.clone());
            }
        }
        let value = self.compute(tolerance)?;
        *self.node.memo.borrow_mut() = Some(Memo {
            bound: tolerance.clone(),
            value: value.clone(),
        });
        Ok(value)
    }

    fn compute(&self, tolerance: &Rational) -> NumericResult<Rational> {
        match &self.node.kind {
            RealKind::Constant(q) => Ok(q.clone()),
            RealKind::Sum(a, b) => {
                let half = tolerance.half();
                Ok(a.eval(&half)?.sum(&b.eval(&half)?))
            },
            RealKind::Difference(a, b) => {
                let half = tolerance.half();
                Ok(a.eval(&half)?.diff(&b.eval(&half)?))
            },
            RealKind::Negate(a) => Ok(a.eval(tolerance)?.negate()),
            RealKind::Abs(a) => Ok(a.eval(tolerance)?.abs()),
            RealKind::Upper(a) => Ok(a.eval(tolerance)?.abs().sum(tolerance)),
            RealKind::Lower(a) => {
                let (estimate, radius) = refine(a, tolerance)?;
                Ok(estimate.diff(&radius))
            },
            RealKind::Min(a, b) => {
                let av = a.eval(tolerance)?;
                let bv = b.eval(tolerance)?;
                Ok(if av.cmp(&bv) != Ordering::Greater { av } else { bv })
            },
            RealKind::Max(a, b) => {
                let av = a.eval(tolerance)?;
                let bv = b.eval(tolerance)?;
                Ok(if av.cmp(&bv) != Ordering::Less { av } else { bv })
            },
            RealKind::Product { lhs, rhs, lhs_upper, rhs_upper } => {
                let half = tolerance.half();
                let x = lhs_upper.eval(&half)?;
                let y = rhs_upper.eval(&half)?;
                let rx = half.quot(&y)?;
                let ry = half.quot(&x)?;
                Ok(lhs.eval(&rx)?.prod(&rhs.eval(&ry)?))
            },
            RealKind::Quotient { lhs, rhs, lhs_upper, rhs_upper, rhs_lower } => {
                let half = tolerance.half();
                let x = lhs_upper.eval(&half)?;
                let y = rhs_upper.eval(&half)?;
                let yl = rhs_lower.eval(&half)?;
                let scaled = half.prod(&yl.prod(&yl));
                let rx = scaled.quot(&y)?;
                let ry = scaled.quot(&x)?;
                lhs.eval(&rx)?.quot(&rhs.eval(&ry)?)
            },
            RealKind::Reciprocal { arg, arg_lower } => {
                let half = tolerance.half();
                let xl = arg_lower.eval(&half)?;
                let rx = half.prod(&xl.prod(&xl));
                Rational::one().quot(&arg.eval(&rx)?)
            },
            RealKind::Sqrt(q) => sqrt_approx(q, tolerance),
        }
    }

    /// A pair `(estimate, radius)` with `0 < estimate - radius` and the
    /// true magnitude inside `(estimate - radius, estimate + radius)`.
    /// Shares `lower`'s refinement loop and its non-termination on an
    /// exactly-zero value.
    pub fn bound(&self, tolerance: &Rational) -> NumericResult<(Rational, Rational)> {
        refine(self, tolerance)
    }

    /// Fixed-point decimal rendering with the given number of fractional
    /// digits, evaluated at a bound one decimal place finer.
    pub fn to_fixed(&self, digits: usize) -> NumericResult<String> {
        let bound = Rational::from_i64(10).ipow(-(digits as i32) - 1)?;
        Ok(self.eval(&bound)?.to_fixed(digits))
    }
}

/// Shrinks a trial bound until the child's approximation clears zero,
/// halving against both the bound and the current estimate. Runs forever
/// when the child's true value is exactly zero.
fn refine(child: &Real, tolerance: &Rational) -> NumericResult<(Rational, Rational)> {
    let mut radius = tolerance.clone();
    loop {
        let estimate = child.eval(&radius)?.abs();
        if estimate.diff(&radius).is_positive() {
            return Ok((estimate, radius));
        }
        tracing::trace!("refinement estimate within radius of zero, tightening");
        radius = Rational::min(&radius.half(), &estimate.half());
    }
}

/// Newton iteration from above: for `x >= sqrt(q)` the true root lies in
/// `(q/x, x)`, so the interval width `x - q/x` bounds the error and the
/// iteration stops once it drops under the requested bound.
fn sqrt_approx(q: &Rational, tolerance: &Rational) -> NumericResult<Rational> {
    if q.is_zero() {
        return Ok(Rational::zero());
    }
    let one = Rational::one();
    let mut x = if q.cmp(&one) == Ordering::Less { one } else { q.clone() };
    loop {
        let inverse = q.quot(&x)?;
        let width = x.diff(&inverse);
        if width.cmp(tolerance) == Ordering::Less {
            return Ok(x);
        }
        x = x.sum(&inverse).half();
    }
}

impl fmt::Debug for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match &self.node.kind {
            RealKind::Constant(q) => return write!(f, "Real({})", q),
            RealKind::Sum(..) => "sum",
            RealKind::Difference(..) => "difference",
            RealKind::Negate(..) => "negate",
            RealKind::Abs(..) => "abs",
            RealKind::Upper(..) => "upper",
            RealKind::Lower(..) => "lower",
            RealKind::Min(..) => "min",
            RealKind::Max(..) => "max",
            RealKind::Product { .. } => "product",
            RealKind::Quotient { .. } => "quotient",
            RealKind::Reciprocal { .. } => "reciprocal",
            RealKind::Sqrt(..) => "sqrt",
        };
        write!(f, "Real(<{}>)", tag)
    }
}

impl From<Rational> for Real {
    fn from(q: Rational) -> Self {
        Real::from_rational(q)
    }
}

impl From<Integer> for Real {
    fn from(n: Integer) -> Self {
        Real::from_integer(n)
    }
}

impl From<Natural> for Real {
    fn from(n: Natural) -> Self {
        Real::from_rational(Rational::from_natural(n))
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

    fn tol(s: &str) -> Rational {
        s.parse().unwrap()
    }

    #[test]
    fn test_constant_is_bound_independent() {
        let r = Real::from_rational(rat("22/7"));
        for bound in ["1", "1/10", "1/1000000000000"] {
            assert_eq!(r.eval(&tol(bound)).unwrap(), rat("22/7"));
        }
    }

    #[test]
    fn test_sum_of_constants_is_exact() {
        let a = Real::from_rational(rat("1/3"));
        let b = Real::from_rational(rat("1/6"));
        assert_eq!(a.sum(&b).eval(&tol("1/1000")).unwrap(), rat("1/2"));
        assert_eq!(a.diff(&b).eval(&tol("1/1000")).unwrap(), rat("1/6"));
    }

    #[test]
    fn test_negate_abs() {
        let a = Real::from_rational(rat("-3/4"));
        assert_eq!(a.negate().eval(&tol("1/10")).unwrap(), rat("3/4"));
        assert_eq!(a.abs().eval(&tol("1/10")).unwrap(), rat("3/4"));
    }

    #[test]
    fn test_upper_and_lower_bounds() {
        let a = Real::from_rational(rat("3"));
        assert_eq!(a.upper().eval(&tol("1")).unwrap(), rat("4"));
        assert_eq!(a.lower().eval(&tol("1")).unwrap(), rat("2"));
        // Lower tightens its own radius when the first trial is too coarse
        let small = Real::from_rational(rat("1/100"));
        let low = small.lower().eval(&tol("1")).unwrap();
        assert!(low.is_positive());
        assert!(low < rat("1/100"));
    }

    #[test]
    fn test_min_max() {
        let a = Real::from_rational(rat("1/3"));
        let b = Real::from_rational(rat("1/2"));
        assert_eq!(a.min(&b).eval(&tol("1/1000")).unwrap(), rat("1/3"));
        assert_eq!(a.max(&b).eval(&tol("1/1000")).unwrap(), rat("1/2"));
    }

    #[test]
    fn test_bound_pair_encloses_magnitude() {
        let a = Real::from_rational(rat("-5/7"));
        let (estimate, radius) = a.bound(&tol("1/100")).unwrap();
        assert!(estimate.diff(&radius).is_positive());
        assert!(estimate.diff(&radius) < rat("5/7"));
        assert!(rat("5/7") < estimate.sum(&radius));
    }

    #[test]
    fn test_sqrt_two_digits() {
        let root = Real::sqrt(&rat("2")).unwrap();
        assert_eq!(root.to_fixed(10).unwrap(), "1.4142135623");
    }

    #[test]
    fn test_sqrt_exact_and_edge_inputs() {
        let root = Real::sqrt(&rat("1")).unwrap();
        assert_eq!(root.eval(&tol("1/1000")).unwrap(), Rational::one());
        let zero = Real::sqrt(&Rational::zero()).unwrap();
        assert_eq!(zero.eval(&tol("1/1000")).unwrap(), Rational::zero());
        assert!(Real::sqrt(&rat("-1")).is_err());
    }

    #[test]
    fn test_sqrt_below_one() {
        let root = Real::sqrt(&rat("1/4")).unwrap();
        let v = root.eval(&tol("1/100000")).unwrap();
        assert!(v.diff(&rat("1/2")).abs() < rat("1/100000"));
    }

    #[test]
    fn test_product_squares_sqrt() {
        let root = Real::sqrt(&rat("2")).unwrap();
        let square = root.prod(&root);
        let v = square.eval(&tol("1/10000000000")).unwrap();
        assert!(v.diff(&rat("2")).abs() < rat("1/10000000000"));
    }

    #[test]
    fn test_quotient_of_equal_values() {
        let root = Real::sqrt(&rat("2")).unwrap();
        let ratio = root.quot(&root);
        let v = ratio.eval(&tol("1/1000000")).unwrap();
        assert!(v.diff(&Rational::one()).abs() < rat("1/1000000"));
    }

    #[test]
    fn test_reciprocal() {
        let root = Real::sqrt(&rat("2")).unwrap();
        let inv = root.recip();
        // 1/sqrt(2) times sqrt(2) is 1
        let product = inv.prod(&root);
        let v = product.eval(&tol("1/1000000")).unwrap();
        assert!(v.diff(&Rational::one()).abs() < rat("1/1000000"));
    }

    #[test]
    fn test_memo_reuses_tighter_answer() {
        let root = Real::sqrt(&rat("2")).unwrap();
        let tight = root.eval(&tol("1/1000000000000")).unwrap();
        // A looser request must return the cached tighter approximation
        let loose = root.eval(&tol("1/10")).unwrap();
        assert_eq!(tight, loose);
    }

    #[test]
    fn test_memo_recomputes_on_tighter_bound() {
        let root = Real::sqrt(&rat("3")).unwrap();
        let loose = root.eval(&tol("1/10")).unwrap();
        let tight = root.eval(&tol("1/100000000")).unwrap();
        // The tighter answer is at least as close to sqrt(3)
        let three = rat("3");
        let loose_err = loose.prod(&loose).diff(&three).abs();
        let tight_err = tight.prod(&tight).diff(&three).abs();
        assert!(tight_err <= loose_err);
    }

    #[test]
    fn test_composite_expression() {
        // (sqrt(2) + sqrt(3)) * (sqrt(3) - sqrt(2)) == 1
        let a = Real::sqrt(&rat("2")).unwrap();
        let b = Real::sqrt(&rat("3")).unwrap();
        let expr = b.sum(&a).prod(&b.diff(&a));
        let v = expr.eval(&tol("1/100000000")).unwrap();
        assert!(v.diff(&Rational::one()).abs() < rat("1/100000000"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// A Real built from an exact rational evaluates to that
            /// rational at every positive bound.
            #[test]
            fn prop_constant_real_bound_independent(n in -1000i64..1000, d in 1i64..1000, b in 1i64..10000) {
                let q = Rational::new(Integer::from_i64(n), Integer::from_i64(d)).unwrap();
                let bound = Rational::new(Integer::one(), Integer::from_i64(b)).unwrap();
                let r = Real::from_rational(q.clone());
                prop_assert_eq!(r.eval(&bound).unwrap(), q);
            }

            /// Sums of constant reals stay within the requested bound of
            /// the exact rational sum (they are in fact exact).
            #[test]
            fn prop_sum_within_bound(
                a in -100i64..100, b in 1i64..100,
                c in -100i64..100, d in 1i64..100,
            ) {
                let qa = Rational::new(Integer::from_i64(a), Integer::from_i64(b)).unwrap();
                let qc = Rational::new(Integer::from_i64(c), Integer::from_i64(d)).unwrap();
                let bound = "1/1000000".parse::<Rational>().unwrap();
                let v = Real::from_rational(qa.clone())
                    .sum(&Real::from_rational(qc.clone()))
                    .eval(&bound)
                    .unwrap();
                prop_assert!(v.diff(&qa.sum(&qc)).abs() < bound);
            }

            /// sqrt(q)^2 is within the requested bound of q.
            #[test]
            fn prop_sqrt_squares_back(n in 1i64..500, d in 1i64..500) {
                let q = Rational::new(Integer::from_i64(n), Integer::from_i64(d)).unwrap();
                let bound = "1/100000000".parse::<Rational>().unwrap();
                let root = Real::sqrt(&q).unwrap();
                let v = root.prod(&root).eval(&bound).unwrap();
                prop_assert!(v.diff(&q).abs() < bound);
            }
        }
    }
}
