//! Text rendering of units
//!
//! Flags are single letters and can be combined in any order and case:
//!
//! | flag | effect                                              |
//! |------|-----------------------------------------------------|
//! | `c`  | plain ASCII: `*` between terms, `^n` for powers     |
//! | `d`  | negative powers go after a `/`                      |
//! | `b`  | base units only, no derived unit recognition        |
//! | `i`  | leave out the magnitude                             |
//!
//! Without flags the output uses `·` and superscripts: `12kN·s⁻¹`.

use crate::decompose::{self, Term};
use crate::types::Unit;

/// Superscript forms of `0`–`9`
pub(crate) const SUPERSCRIPT_DIGITS: [char; 10] =
    ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
pub(crate) const SUPERSCRIPT_MINUS: char = '⁻';
pub(crate) const SUPERSCRIPT_PLUS: char = '⁺';

/// Significant digits kept when printing a magnitude
const SIGNIFICANT_DIGITS: usize = 15;

/// Rendering options, usually parsed from a flag string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags {
    /// `c`: ASCII separators and powers
    pub plain: bool,
    /// `d`: negative powers after a `/`
    pub divisor: bool,
    /// `b`: skip derived unit recognition
    pub base_only: bool,
    /// `i`: omit the magnitude
    pub ignore_quantity: bool,
}

impl FormatFlags {
    /// Read flags from a string; unknown letters are ignored
    pub fn parse(flags: &str) -> Self {
        let mut parsed = Self::default();
        for c in flags.chars() {
            match c.to_ascii_lowercase() {
                'c' => parsed.plain = true,
                'd' => parsed.divisor = true,
                'b' => parsed.base_only = true,
                'i' => parsed.ignore_quantity = true,
                _ => {}
            }
        }
        parsed
    }

    fn separator(&self) -> &'static str {
        if self.plain {
            "*"
        } else {
            "·"
        }
    }
}

/// Render `unit` according to `flags`
pub fn format(unit: &Unit, flags: FormatFlags) -> String {
    let decomposition = if flags.base_only {
        decompose::base_only(unit)
    } else {
        decompose::decompose(unit)
    };

    let (numerator, denominator): (Vec<Term>, Vec<Term>) = if flags.divisor {
        let (num, den): (Vec<Term>, Vec<Term>) =
            decomposition.terms.iter().partition(|t| t.power > 0);
        (num, den.into_iter().map(Term::reciprocal).collect())
    } else {
        (decomposition.terms, Vec::new())
    };

    let mut out = String::new();
    if !flags.ignore_quantity {
        out.push_str(&format_quantity(decomposition.quantity));
    }
    out.push_str(&join_terms(&numerator, flags));
    if !denominator.is_empty() {
        out.push('/');
        out.push_str(&join_terms(&denominator, flags));
    }
    out
}

fn join_terms(terms: &[Term], flags: FormatFlags) -> String {
    terms
        .iter()
        .map(|t| render_term(t, flags.plain))
        .collect::<Vec<_>>()
        .join(flags.separator())
}

fn render_term(term: &Term, plain: bool) -> String {
    let mut out = format!("{}{}", term.prefix, term.symbol);
    if term.power != 1 {
        if plain {
            out.push('^');
            out.push_str(&term.power.to_string());
        } else {
            out.push_str(&superscript(term.power));
        }
    }
    out
}

/// `-12` → `⁻¹²`
pub fn superscript(n: i32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '-' => SUPERSCRIPT_MINUS,
            d => d
                .to_digit(10)
                .map(|d| SUPERSCRIPT_DIGITS[d as usize])
                .unwrap_or(d),
        })
        .collect()
}

/// Shortest decimal form after rounding away binary noise: `0.1 + 0.2`
/// prints as `0.3`.
pub fn format_quantity(quantity: f64) -> String {
    let rounded = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, quantity)
        .parse::<f64>()
        .unwrap_or(quantity);
    // avoid "-0"
    if rounded == 0.0 {
        return "0".to_string();
    }
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::types::{BaseUnit, Prefix};

    fn speed() -> Unit {
        Unit::prefixed(1.0, Prefix::Kilo, BaseUnit::Metre, 1)
            * Unit::powered(1.0, BaseUnit::Second, -1)
    }

    #[test]
    fn test_parse_flags() {
        let flags = FormatFlags::parse("Cdx");
        assert!(flags.plain);
        assert!(flags.divisor);
        assert!(!flags.base_only);
        assert!(!flags.ignore_quantity);
        assert_eq!(FormatFlags::parse(""), FormatFlags::default());
    }

    #[test]
    fn test_fancy_and_plain() {
        assert_eq!(format(&speed(), FormatFlags::default()), "1km·s⁻¹");
        assert_eq!(format(&speed(), FormatFlags::parse("c")), "1km*s^-1");
        assert_eq!(format(&speed(), FormatFlags::parse("cd")), "1km/s");
        assert_eq!(format(&speed(), FormatFlags::parse("d")), "1km/s");
    }

    #[test]
    fn test_divisor_without_numerator() {
        let hertz = Unit::powered(50.0, BaseUnit::Second, -1);
        assert_eq!(format(&hertz, FormatFlags::parse("d")), "50/s");
        assert_eq!(format(&hertz, FormatFlags::parse("di")), "/s");
    }

    #[test]
    fn test_base_only_skips_derived() {
        let newton = catalog::find("N").unwrap().unit * 12.0;
        assert_eq!(format(&newton, FormatFlags::default()), "12N");
        assert_eq!(format(&newton, FormatFlags::parse("cb")), "12m*kg*s^-2");
        assert_eq!(format(&newton, FormatFlags::parse("cbi")), "m*kg*s^-2");
    }

    #[test]
    fn test_dimensionless() {
        assert_eq!(format(&Unit::scalar(2.5), FormatFlags::default()), "2.5");
    }

    #[test]
    fn test_superscript() {
        assert_eq!(superscript(2), "²");
        assert_eq!(superscript(-12), "⁻¹²");
        assert_eq!(superscript(0), "⁰");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(0.1 + 0.2), "0.3");
        assert_eq!(format_quantity(12.0), "12");
        assert_eq!(format_quantity(-0.0), "0");
        assert_eq!(format_quantity(16.25), "16.25");
        assert_eq!(format_quantity(1e-5), "0.00001");
    }
}
