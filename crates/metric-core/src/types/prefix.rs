//! Decimal SI prefixes
//!
//! A prefix is a power of ten attached to one base unit of a dimension.
//! Only the values in `PREFIXES` exist: multiples of three from 10⁻²⁴ to
//! 10²⁴ plus centi, deci, deca and hecto.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An SI prefix, represented by its power of ten.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[repr(i8)]
pub enum Prefix {
    Yocto = -24,
    Zepto = -21,
    Atto = -18,
    Femto = -15,
    Pico = -12,
    Nano = -9,
    Micro = -6,
    Milli = -3,
    Centi = -2,
    Deci = -1,
    /// No prefix (10⁰)
    #[default]
    Unity = 0,
    Deca = 1,
    Hecto = 2,
    Kilo = 3,
    Mega = 6,
    Giga = 9,
    Tera = 12,
    Peta = 15,
    Exa = 18,
    Zetta = 21,
    Yotta = 24,
}

/// Prefix metadata
pub struct PrefixDef {
    pub prefix: Prefix,
    /// Display symbol
    pub symbol: &'static str,
    /// Additional spellings accepted by the parser
    pub aliases: &'static [&'static str],
}

/// Registry of all prefixes, ascending by exponent.
pub static PREFIXES: &[PrefixDef] = &[
    PrefixDef {
        prefix: Prefix::Yocto,
        symbol: "y",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Zepto,
        symbol: "z",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Atto,
        symbol: "a",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Femto,
        symbol: "f",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Pico,
        symbol: "p",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Nano,
        symbol: "n",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Micro,
        symbol: "μ",
        aliases: &["µ", "u"],
    },
    PrefixDef {
        prefix: Prefix::Milli,
        symbol: "m",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Centi,
        symbol: "c",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Deci,
        symbol: "d",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Unity,
        symbol: "",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Deca,
        symbol: "da",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Hecto,
        symbol: "h",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Kilo,
        symbol: "k",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Mega,
        symbol: "M",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Giga,
        symbol: "G",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Tera,
        symbol: "T",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Peta,
        symbol: "P",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Exa,
        symbol: "E",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Zetta,
        symbol: "Z",
        aliases: &[],
    },
    PrefixDef {
        prefix: Prefix::Yotta,
        symbol: "Y",
        aliases: &[],
    },
];

impl Prefix {
    /// Power of ten represented by this prefix
    pub fn exponent(self) -> i32 {
        self as i8 as i32
    }

    pub fn def(self) -> &'static PrefixDef {
        PREFIXES
            .iter()
            .find(|d| d.prefix == self)
            .expect("All prefixes must have definitions")
    }

    pub fn symbol(self) -> &'static str {
        self.def().symbol
    }

    /// Prefix with exactly this exponent, if it is on the lattice
    pub fn from_exponent(exponent: i32) -> Option<Prefix> {
        PREFIXES
            .iter()
            .find(|d| d.prefix.exponent() == exponent)
            .map(|d| d.prefix)
    }

    /// Parse a prefix symbol (case-sensitive: `m` is milli, `M` is mega).
    /// The empty string is not a prefix.
    pub fn parse(s: &str) -> Option<Prefix> {
        if s.is_empty() {
            return None;
        }
        PREFIXES
            .iter()
            .find(|d| d.symbol == s || d.aliases.contains(&s))
            .map(|d| d.prefix)
    }

    /// Closest prefix at or below a power of ten.
    ///
    /// Exact for lattice members; other values round down (10⁴ → k,
    /// 10⁻⁴ → μ). Anything beyond ±24 clamps to Y or y.
    pub fn nearest(power_of_ten: i32) -> Prefix {
        PREFIXES
            .iter()
            .rev()
            .find(|d| d.prefix.exponent() <= power_of_ten)
            .map(|d| d.prefix)
            .unwrap_or(Prefix::Yocto)
    }

    /// Common prefix for adding two quantities: the mean exponent rounded
    /// toward −∞, snapped down onto the lattice.
    pub fn average(a: Prefix, b: Prefix) -> Prefix {
        Prefix::nearest((a.exponent() + b.exponent()).div_euclid(2))
    }

    /// Iterator over all prefixes, ascending
    pub fn all() -> impl Iterator<Item = Prefix> {
        PREFIXES.iter().map(|d| d.prefix)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Multiply `quantity` by 10^`exponent`.
///
/// Positive exponents multiply and negative ones divide by an exact power
/// of ten, so decimal magnitudes such as 0.001 × 10³ come back exact.
pub(crate) fn scale10(quantity: f64, exponent: i32) -> f64 {
    if exponent >= 0 {
        quantity * 10f64.powi(exponent)
    } else {
        quantity / 10f64.powi(-exponent)
    }
}
