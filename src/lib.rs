// ============================================================================
// Numeric Tower Library
// Arbitrary-precision naturals, integers, rationals, and computable reals
// ============================================================================

//! # Numeric Tower
//!
//! Exact arithmetic beyond machine-word range: a layered numeric tower of
//! arbitrary-precision naturals, signed integers, exact rationals, and
//! computable reals (values approximable to any requested rational error
//! bound).
//!
//! ## Features
//!
//! - **Base-65536 digit kernel** with carry/borrow primitives and Knuth
//!   Algorithm D long division
//! - **Exact rationals** kept reduced, with exact IEEE-754 double
//!   reconstruction via a Stern-Brocot mediant search
//! - **Computable reals** whose combinators provably propagate error bounds
//! - **Type-promoting dispatch** over a closed Natural/Integer/Rational/Real
//!   sum type
//!
//! ## Example
//!
//! ```rust
//! use numeric_tower::prelude::*;
//!
//! // Exact integer arithmetic beyond machine range
//! let f = factorial(20i64)?;
//! assert_eq!(f.to_string_radix(10)?, "2432902008176640000");
//!
//! // Exact rationals with automatic promotion
//! let q = sum("1/3".parse::<Value>()?, "1/6".parse::<Value>()?)?;
//! assert_eq!(q.to_string_radix(10)?, "1/2");
//!
//! // Computable reals: sqrt(2) to 12 fixed digits
//! let root = Real::sqrt(&"2".parse()?)?;
//! assert_eq!(root.to_fixed(12)?, "1.414213562373");
//! # Ok::<(), numeric_tower::NumericError>(())
//! ```

pub mod error;
pub mod integer;
pub mod kernel;
pub mod natural;
pub mod rational;
pub mod real;
pub mod tower;

pub use error::{NumericError, NumericResult};

// Re-exports for convenience
pub mod prelude {
    pub use crate::error::{NumericError, NumericResult};
    pub use crate::integer::{Integer, Sign};
    pub use crate::natural::Natural;
    pub use crate::rational::Rational;
    pub use crate::real::Real;
    pub use crate::tower::{
        abs, compare, diff, div_rem, factorial, gcd, ipow, negate, prod, quot, recip, sum, Value,
    };
}
