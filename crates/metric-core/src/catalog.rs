//! Derived SI units
//!
//! To add a derived unit, add an entry to `DERIVED_DEFS`. Parsing,
//! formatting and decomposition pick it up automatically. Declaration
//! order matters: when two units explain the same amount of a dimension
//! the one declared first is chosen for display.

use once_cell::sync::Lazy;

use crate::types::BaseUnit::{Ampere, Candela, Gram, Metre, Mole, Second};
use crate::types::Prefix::{Kilo, Unity};
use crate::types::{BaseUnit, Prefix, Unit};

/// Definition of a derived unit as a product of base units
struct DerivedDef {
    symbol: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
    /// `(prefix, base unit, power)` factors
    factors: &'static [(Prefix, BaseUnit, i32)],
}

/// A derived unit with its equivalent base-unit value
#[derive(Debug, Clone, Copy)]
pub struct DerivedUnit {
    pub symbol: &'static str,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// One of this unit in base units
    pub unit: Unit,
}

static DERIVED_DEFS: &[DerivedDef] = &[
    DerivedDef {
        symbol: "Ω",
        name: "ohm",
        aliases: &["ohm"],
        factors: &[(Kilo, Gram, 1), (Unity, Metre, 2), (Unity, Second, -3), (Unity, Ampere, -2)],
    },
    DerivedDef {
        symbol: "V",
        name: "volt",
        aliases: &[],
        factors: &[(Kilo, Gram, 1), (Unity, Metre, 2), (Unity, Second, -3), (Unity, Ampere, -1)],
    },
    DerivedDef {
        symbol: "H",
        name: "henry",
        aliases: &[],
        factors: &[(Kilo, Gram, 1), (Unity, Metre, 2), (Unity, Second, -2), (Unity, Ampere, -2)],
    },
    DerivedDef {
        symbol: "Wb",
        name: "weber",
        aliases: &[],
        factors: &[(Kilo, Gram, 1), (Unity, Metre, 2), (Unity, Second, -2), (Unity, Ampere, -1)],
    },
    DerivedDef {
        symbol: "F",
        name: "farad",
        aliases: &[],
        factors: &[(Kilo, Gram, -1), (Unity, Metre, -2), (Unity, Second, 4), (Unity, Ampere, 2)],
    },
    DerivedDef {
        symbol: "S",
        name: "siemens",
        aliases: &[],
        factors: &[(Kilo, Gram, -1), (Unity, Metre, -2), (Unity, Second, 3), (Unity, Ampere, 2)],
    },
    DerivedDef {
        symbol: "W",
        name: "watt",
        aliases: &[],
        factors: &[(Kilo, Gram, 1), (Unity, Metre, 2), (Unity, Second, -3)],
    },
    DerivedDef {
        symbol: "J",
        name: "joule",
        aliases: &[],
        factors: &[(Kilo, Gram, 1), (Unity, Metre, 2), (Unity, Second, -2)],
    },
    DerivedDef {
        symbol: "N",
        name: "newton",
        aliases: &[],
        factors: &[(Kilo, Gram, 1), (Unity, Metre, 1), (Unity, Second, -2)],
    },
    DerivedDef {
        symbol: "Pa",
        name: "pascal",
        aliases: &[],
        factors: &[(Kilo, Gram, 1), (Unity, Metre, -1), (Unity, Second, -2)],
    },
    DerivedDef {
        symbol: "T",
        name: "tesla",
        aliases: &[],
        factors: &[(Kilo, Gram, 1), (Unity, Second, -2), (Unity, Ampere, -1)],
    },
    DerivedDef {
        symbol: "C",
        name: "coulomb",
        aliases: &[],
        factors: &[(Unity, Second, 1), (Unity, Ampere, 1)],
    },
    DerivedDef {
        symbol: "Gy",
        name: "gray",
        aliases: &[],
        factors: &[(Unity, Metre, 2), (Unity, Second, -2)],
    },
    DerivedDef {
        symbol: "lx",
        name: "lux",
        aliases: &[],
        factors: &[(Unity, Metre, -2), (Unity, Candela, 1)],
    },
    DerivedDef {
        symbol: "kat",
        name: "katal",
        aliases: &[],
        factors: &[(Unity, Second, -1), (Unity, Mole, 1)],
    },
];

/// All derived units in declaration order.
///
/// Built on first use by multiplying base units together, so the unit
/// arithmetic must not itself depend on the catalog.
pub static DERIVED_UNITS: Lazy<Vec<DerivedUnit>> = Lazy::new(|| {
    DERIVED_DEFS
        .iter()
        .map(|def| DerivedUnit {
            symbol: def.symbol,
            name: def.name,
            aliases: def.aliases,
            unit: def
                .factors
                .iter()
                .map(|&(prefix, base, power)| Unit::prefixed(1.0, prefix, base, power))
                .fold(Unit::scalar(1.0), |acc, factor| acc * factor),
        })
        .collect()
});

/// Look up a derived unit by symbol or alias (case-sensitive)
pub fn find(symbol: &str) -> Option<&'static DerivedUnit> {
    DERIVED_UNITS
        .iter()
        .find(|d| d.symbol == symbol || d.aliases.contains(&symbol))
}

/// Iterator over derived units in declaration order
pub fn all() -> impl Iterator<Item = &'static DerivedUnit> {
    DERIVED_UNITS.iter()
}

/// All symbols the parser understands (for UI highlighting)
pub fn all_symbols() -> impl Iterator<Item = &'static str> {
    BaseUnit::all()
        .map(BaseUnit::symbol)
        .chain(all().flat_map(|d| std::iter::once(d.symbol).chain(d.aliases.iter().copied())))
}
