//! Derived unit recognition
//!
//! Rewrites a unit as a product of derived units plus whatever base units
//! are left over: `kg·m²·s⁻³·A⁻¹` becomes `V`, `kg·m·s⁻³` becomes `N·s⁻¹`.
//!
//! The search is greedy. Each step takes the catalog entry that explains
//! the largest share of the remaining exponents and never revisits that
//! choice, so some dimensions get a longer decomposition than the best
//! possible one.

use tracing::trace;

use crate::catalog::{self, DerivedUnit};
use crate::types::prefix::scale10;
use crate::types::{BaseUnit, Prefix, Unit};

/// Tolerance applied in log₁₀ space before snapping to a prefix
const LOG_EPSILON: f64 = 1e-9;

/// One factor of a decomposed unit: `prefix symbol ^ power`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    pub prefix: Prefix,
    pub symbol: &'static str,
    pub power: i32,
}

impl Term {
    /// The same term with the power negated
    pub fn reciprocal(self) -> Term {
        Term {
            power: -self.power,
            ..self
        }
    }
}

/// A magnitude with the terms it multiplies
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub quantity: f64,
    pub terms: Vec<Term>,
}

/// Express `unit` with derived units where possible.
///
/// Derived terms come first, in the order they were found, followed by
/// the remaining base units in dimension order.
pub fn decompose(unit: &Unit) -> Decomposition {
    let mut terms = Vec::new();
    let quantity = find_derived_units(*unit, &mut terms);
    Decomposition { quantity, terms }
}

/// Express `unit` with base units only
pub fn base_only(unit: &Unit) -> Decomposition {
    Decomposition {
        quantity: unit.quantity(),
        terms: base_terms(unit).collect(),
    }
}

fn find_derived_units(remainder: Unit, terms: &mut Vec<Term>) -> f64 {
    let Some((derived, power)) = best_candidate(&remainder) else {
        terms.extend(base_terms(&remainder));
        return remainder.quantity();
    };

    let quotient = remainder / derived.unit.powi(power);
    let prefix = best_fit_prefix(quotient.quantity(), power);
    let quantity = scale10(quotient.quantity(), -prefix.exponent() * power);
    trace!(symbol = derived.symbol, power, %prefix, "matched derived unit");

    terms.push(Term {
        prefix,
        symbol: derived.symbol,
        power,
    });
    find_derived_units(quotient.with_quantity(quantity), terms)
}

/// Catalog entry explaining the most exponents of `unit`, with its power.
/// Ties go to the entry declared first.
fn best_candidate(unit: &Unit) -> Option<(&'static DerivedUnit, i32)> {
    let mut best = None;
    let mut best_score = 0;
    for derived in catalog::all() {
        let power = unit.has_factor(&derived.unit);
        if power == 0 {
            continue;
        }
        let score = derived.unit.dimension().total_power() * power.abs();
        if score > best_score {
            best = Some((derived, power));
            best_score = score;
        }
    }
    best
}

fn base_terms(unit: &Unit) -> impl Iterator<Item = Term> + '_ {
    BaseUnit::all()
        .filter(|&base| unit.power(base) != 0)
        .map(|base| Term {
            prefix: unit.prefix(base),
            symbol: base.symbol(),
            power: unit.power(base),
        })
}

/// Engineering prefix for a derived term raised to `power` that leaves
/// `quantity` with a mantissa in `[1, 1000)`.
///
/// An exact ±1 or ±2 power of ten keeps deca, hecto, deci or centi, so
/// `1hN` and `1daN` come back the way they were written.
pub fn best_fit_prefix(quantity: f64, power: i32) -> Prefix {
    if quantity == 0.0 || !quantity.is_finite() || power == 0 {
        return Prefix::Unity;
    }
    let exponent = quantity.abs().log10() / power as f64;
    let rounded = exponent.round();
    if (exponent - rounded).abs() < LOG_EPSILON && matches!(rounded.abs() as i32, 1 | 2) {
        if let Some(prefix) = Prefix::from_exponent(rounded as i32) {
            return prefix;
        }
    }
    let steps = exponent / 3.0;
    let steps = if power > 0 {
        (steps + LOG_EPSILON).floor()
    } else {
        (steps - LOG_EPSILON).ceil()
    };
    Prefix::nearest((steps as i32).saturating_mul(3).clamp(-24, 24))
}
