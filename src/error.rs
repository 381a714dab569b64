// ============================================================================
// Numeric Errors
// Error types for arbitrary-precision arithmetic operations
// ============================================================================

use std::fmt;

/// Errors that can occur during tower arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Attempted division by zero
    DivisionByZero,
    /// Numeral string contains an invalid digit, or a digit outside the
    /// stated base, or the value is not representable (NaN, infinity)
    InvalidNumeral,
    /// No sensible promotion exists for the requested operand types
    TypeMismatch,
    /// A non-negative operand was required (factorial, binomial exponent)
    NegativeOperand,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::InvalidNumeral => {
                write!(f, "invalid numeral: could not parse value")
            },
            NumericError::TypeMismatch => {
                write!(f, "type mismatch: no common type for operands")
            },
            NumericError::NegativeOperand => {
                write!(f, "negative operand: operation requires a non-negative value")
            },
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
