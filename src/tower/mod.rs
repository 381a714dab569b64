// ============================================================================
// Tower Dispatcher
// Type promotion over the numeric tower and promoting operations
// ============================================================================

mod ops;
mod value;

pub use ops::{
    abs, compare, diff, div_rem, factorial, gcd, ipow, negate, prod, quot, recip, sum,
};
pub use value::Value;
