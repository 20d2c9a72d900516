//! metric-core: SI dimensional algebra for metric
//!
//! This crate provides values with SI dimensions, arithmetic that keeps
//! prefixes and magnitudes consistent, recognition of derived units for
//! display, and a parser for the text the formatter produces. It has no I/O
//! and can be used from a CLI or any other front end.
//!
//! # Example
//!
//! ```
//! use metric_core::{parse, Unit};
//!
//! let force: Unit = "12 kg*m/s^2".parse().unwrap();
//! assert_eq!(force.to_string(), "12N");
//!
//! // Multiplication always succeeds; dimensions simply combine
//! let power = force * parse("3 m/s").unwrap();
//! assert_eq!(power.format("c"), "36W");
//!
//! // Addition needs matching dimensions
//! assert!(force.try_add(&power).is_err());
//! ```

pub mod catalog;
pub mod decompose;
pub mod error;
pub mod ext;
pub mod format;
pub mod parser;
pub mod types;

pub use catalog::DerivedUnit;
pub use error::UnitError;
pub use ext::UnitExt;
pub use format::FormatFlags;
pub use types::{BaseUnit, Dimension, Prefix, ScaleError, Unit, MAX_POWER};

/// Parse a unit expression: `"5 kN·m"`, `"5kN*m"`, `"9.81m/s^2"`
pub fn parse(text: &str) -> Result<Unit, UnitError> {
    parser::parse_unit(text)
}

/// Format a unit; see [`FormatFlags`] for the flag letters
pub fn format(unit: &Unit, flags: &str) -> String {
    unit.format(flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_then_format() {
        let u = parse("1000 kg*m^2*s^-3").unwrap();
        assert_eq!(format(&u, ""), "1kW");
        assert_eq!(format(&u, "b"), "1000kg·m²·s⁻³");
    }

    #[test]
    fn test_arithmetic_on_parsed_units() {
        let a = parse("1km").unwrap();
        let b = parse("250m").unwrap();
        let sum = (a + b).unwrap();
        assert_eq!(sum, parse("1250m").unwrap());
        assert!(a > b);
    }

    #[test]
    fn test_errors_surface() {
        assert!(matches!(parse("5 furlong"), Err(UnitError::UnknownSymbol(_))));
        assert!(matches!(parse(""), Err(UnitError::Format(_))));
    }
}
