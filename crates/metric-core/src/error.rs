//! Error type shared by arithmetic, powering and parsing

use thiserror::Error;

use crate::types::Unit;

/// Errors raised by unit operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// Addition, subtraction or ordering of units with different dimensions
    #[error("units {lhs} and {rhs} are incomparable")]
    IncomparableUnits { lhs: Unit, rhs: Unit },

    /// A fractional power would leave a non-integer exponent on some base unit
    #[error("cannot raise {unit} to the power {power}: only integer exponents are allowed")]
    DimensionSplit { unit: Unit, power: f64 },

    /// A power that would push some exponent past the supported range
    #[error(
        "cannot raise {unit} to the power {power}: exponents are limited to ±{max}",
        max = crate::types::MAX_POWER
    )]
    ExponentOverflow { unit: Unit, power: f64 },

    /// A symbol that is neither a base unit nor a derived unit
    #[error("unknown unit: '{0}'")]
    UnknownSymbol(String),

    /// Malformed unit expression or numeric literal
    #[error("invalid unit expression: {0}")]
    Format(String),
}
