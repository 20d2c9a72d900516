//! SI base units
//!
//! The registry below is the single source of truth for symbols and
//! ordering. The order of `BASE_UNITS` is the index order used by
//! [`Dimension`](super::Dimension) and the order base terms are printed in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The seven SI base units. Mass is carried by the gram, so `kg` is a
/// prefixed gram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BaseUnit {
    Metre,
    Gram,
    Second,
    Ampere,
    Kelvin,
    Candela,
    Mole,
}

/// Base unit metadata
pub struct BaseUnitDef {
    pub unit: BaseUnit,
    /// Symbol used for parsing and display
    pub symbol: &'static str,
    /// Physical quantity measured by this unit
    pub quantity: &'static str,
}

/// Registry of base units in dimension-vector order.
pub static BASE_UNITS: &[BaseUnitDef] = &[
    BaseUnitDef {
        unit: BaseUnit::Metre,
        symbol: "m",
        quantity: "length",
    },
    BaseUnitDef {
        unit: BaseUnit::Gram,
        symbol: "g",
        quantity: "mass",
    },
    BaseUnitDef {
        unit: BaseUnit::Second,
        symbol: "s",
        quantity: "time",
    },
    BaseUnitDef {
        unit: BaseUnit::Ampere,
        symbol: "A",
        quantity: "electric current",
    },
    BaseUnitDef {
        unit: BaseUnit::Kelvin,
        symbol: "K",
        quantity: "temperature",
    },
    BaseUnitDef {
        unit: BaseUnit::Candela,
        symbol: "cd",
        quantity: "luminous intensity",
    },
    BaseUnitDef {
        unit: BaseUnit::Mole,
        symbol: "mol",
        quantity: "amount of substance",
    },
];

impl BaseUnit {
    /// Number of base units (length of every dimension vector)
    pub const COUNT: usize = 7;

    /// Position of this unit in a dimension vector
    pub fn index(self) -> usize {
        self as usize
    }

    /// Base unit at a dimension-vector position
    pub fn from_index(index: usize) -> Option<BaseUnit> {
        BASE_UNITS.get(index).map(|d| d.unit)
    }

    pub fn def(self) -> &'static BaseUnitDef {
        &BASE_UNITS[self.index()]
    }

    pub fn symbol(self) -> &'static str {
        self.def().symbol
    }

    /// Look up a base unit by its exact (case-sensitive) symbol
    pub fn parse(symbol: &str) -> Option<BaseUnit> {
        BASE_UNITS
            .iter()
            .find(|d| d.symbol == symbol)
            .map(|d| d.unit)
    }

    /// Iterator over all base units in dimension-vector order
    pub fn all() -> impl Iterator<Item = BaseUnit> {
        BASE_UNITS.iter().map(|d| d.unit)
    }
}

impl fmt::Display for BaseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
