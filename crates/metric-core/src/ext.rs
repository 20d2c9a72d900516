//! Shorthand constructors on plain numbers: `5.0_f64.kilograms()`

use crate::catalog;
use crate::error::UnitError;
use crate::parser::resolve_symbol;
use crate::types::{BaseUnit, Prefix, Unit};

pub trait UnitExt {
    fn metres(self) -> Unit;
    fn grams(self) -> Unit;
    fn kilograms(self) -> Unit;
    fn seconds(self) -> Unit;
    fn amperes(self) -> Unit;
    fn kelvins(self) -> Unit;
    fn candelas(self) -> Unit;
    fn moles(self) -> Unit;

    fn newtons(self) -> Unit;
    fn joules(self) -> Unit;
    fn watts(self) -> Unit;
    fn pascals(self) -> Unit;
    fn coulombs(self) -> Unit;
    fn volts(self) -> Unit;
    fn ohms(self) -> Unit;
    fn hertz(self) -> Unit;

    /// `self` of a prefixed base unit: `3.0_f64.prefixed(Prefix::Kilo, BaseUnit::Metre)`
    fn prefixed(self, prefix: Prefix, base: BaseUnit) -> Unit;

    /// `self` of a prefixed base unit raised to `power`:
    /// `2.0_f64.powered(Prefix::Centi, BaseUnit::Metre, 2)` is 2 cm²
    fn powered(self, prefix: Prefix, base: BaseUnit, power: i32) -> Unit;

    /// `self` of any single, possibly prefixed, symbol: `2.0_f64.of("kN")`
    fn of(self, symbol: &str) -> Result<Unit, UnitError>;
}

impl UnitExt for f64 {
    fn metres(self) -> Unit {
        Unit::new(self, BaseUnit::Metre)
    }

    fn grams(self) -> Unit {
        Unit::new(self, BaseUnit::Gram)
    }

    fn kilograms(self) -> Unit {
        self.prefixed(Prefix::Kilo, BaseUnit::Gram)
    }

    fn seconds(self) -> Unit {
        Unit::new(self, BaseUnit::Second)
    }

    fn amperes(self) -> Unit {
        Unit::new(self, BaseUnit::Ampere)
    }

    fn kelvins(self) -> Unit {
        Unit::new(self, BaseUnit::Kelvin)
    }

    fn candelas(self) -> Unit {
        Unit::new(self, BaseUnit::Candela)
    }

    fn moles(self) -> Unit {
        Unit::new(self, BaseUnit::Mole)
    }

    fn newtons(self) -> Unit {
        derived(self, "N")
    }

    fn joules(self) -> Unit {
        derived(self, "J")
    }

    fn watts(self) -> Unit {
        derived(self, "W")
    }

    fn pascals(self) -> Unit {
        derived(self, "Pa")
    }

    fn coulombs(self) -> Unit {
        derived(self, "C")
    }

    fn volts(self) -> Unit {
        derived(self, "V")
    }

    fn ohms(self) -> Unit {
        derived(self, "Ω")
    }

    fn hertz(self) -> Unit {
        self.powered(Prefix::Unity, BaseUnit::Second, -1)
    }

    fn prefixed(self, prefix: Prefix, base: BaseUnit) -> Unit {
        self.powered(prefix, base, 1)
    }

    fn powered(self, prefix: Prefix, base: BaseUnit, power: i32) -> Unit {
        Unit::prefixed(self, prefix, base, power)
    }

    fn of(self, symbol: &str) -> Result<Unit, UnitError> {
        Ok(resolve_symbol(symbol)? * self)
    }
}

fn derived(quantity: f64, symbol: &str) -> Unit {
    catalog::find(symbol)
        .map(|d| d.unit * quantity)
        .expect("shorthand symbols must be in the catalog")
}
