//! Prefix merging for binary operations
//!
//! Combining two dimensions has to pick one prefix per base unit. The
//! operands' magnitudes are then shifted by the powers of ten between their
//! own prefixes and the chosen ones, which keeps the quantity exact.

use super::dimension::{Dimension, Prefixes, Powers};
use super::prefix::scale10;
use super::{BaseUnit, Prefix};

/// Binary operations between units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Result of merging two dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrefixMerge {
    pub op: Operation,
    /// Exponents and chosen prefixes of the result
    pub dimension: Dimension,
    /// Powers of ten applied to the left magnitude
    pub lhs_shift: i32,
    /// Powers of ten applied to the right magnitude
    pub rhs_shift: i32,
}

impl PrefixMerge {
    /// Merge for multiplication.
    ///
    /// Per base unit: exponents that cancel reset the prefix; otherwise the
    /// left prefix wins unless it is empty.
    pub fn product(lhs: &Dimension, rhs: &Dimension) -> Self {
        Self::multiplicative(lhs, rhs, lhs.multiply_powers(rhs), 1, Operation::Multiply)
    }

    /// Merge for division; the right exponents count negatively.
    pub fn quotient(lhs: &Dimension, rhs: &Dimension) -> Self {
        Self::multiplicative(lhs, rhs, lhs.divide_powers(rhs), -1, Operation::Divide)
    }

    fn multiplicative(
        lhs: &Dimension,
        rhs: &Dimension,
        powers: Powers,
        sign: i32,
        op: Operation,
    ) -> Self {
        let mut prefixes = Prefixes::default();
        let mut lhs_shift = 0;
        let mut rhs_shift = 0;

        for base in BaseUnit::all() {
            let i = base.index();
            let (pre1, pre2) = (lhs.prefix(base), rhs.prefix(base));
            let chosen = if powers[i] == 0 {
                Prefix::Unity
            } else if pre1 != Prefix::Unity {
                pre1
            } else {
                pre2
            };
            prefixes[i] = chosen;
            lhs_shift += (pre1.exponent() - chosen.exponent()) * lhs.power(base);
            rhs_shift += (pre2.exponent() - chosen.exponent()) * rhs.power(base) * sign;
        }

        Self {
            op,
            dimension: Dimension::from_parts(powers, prefixes),
            lhs_shift,
            rhs_shift,
        }
    }

    /// Merge for addition or subtraction.
    ///
    /// `None` unless both dimensions have the same exponents. Each base
    /// unit gets the average of the two prefixes.
    pub fn additive(lhs: &Dimension, rhs: &Dimension, op: Operation) -> Option<Self> {
        if !lhs.is_comparable(rhs) {
            return None;
        }

        let mut prefixes = Prefixes::default();
        let mut lhs_shift = 0;
        let mut rhs_shift = 0;

        for base in BaseUnit::all() {
            let power = lhs.power(base);
            if power == 0 {
                continue;
            }
            let (pre1, pre2) = (lhs.prefix(base), rhs.prefix(base));
            let chosen = Prefix::average(pre1, pre2);
            prefixes[base.index()] = chosen;
            lhs_shift += (pre1.exponent() - chosen.exponent()) * power;
            rhs_shift += (pre2.exponent() - chosen.exponent()) * power;
        }

        Some(Self {
            op,
            dimension: Dimension::from_parts(*lhs.powers(), prefixes),
            lhs_shift,
            rhs_shift,
        })
    }

    /// Combine two magnitudes expressed against the operands' prefixes into
    /// one expressed against the merged prefixes.
    pub fn quantity(&self, lhs: f64, rhs: f64) -> f64 {
        let lhs = scale10(lhs, self.lhs_shift);
        match self.op {
            Operation::Add => lhs + scale10(rhs, self.rhs_shift),
            Operation::Subtract => lhs - scale10(rhs, self.rhs_shift),
            Operation::Multiply => scale10(lhs * rhs, self.rhs_shift),
            Operation::Divide => scale10(lhs / rhs, self.rhs_shift),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(prefix: Prefix, base: BaseUnit, power: i32) -> Dimension {
        Dimension::base(prefix, base, power)
    }

    #[test]
    fn test_product_keeps_left_prefix() {
        let km = unit(Prefix::Kilo, BaseUnit::Metre, 1);
        let m = unit(Prefix::Unity, BaseUnit::Metre, 1);
        let merge = PrefixMerge::product(&km, &m);
        assert_eq!(merge.dimension.prefix(BaseUnit::Metre), Prefix::Kilo);
        assert_eq!(merge.dimension.power(BaseUnit::Metre), 2);
        assert_eq!(merge.lhs_shift, 0);
        assert_eq!(merge.rhs_shift, -3);
        // 1 km · 1 m = 1000 m² = 0.001 km²
        assert_eq!(merge.quantity(1.0, 1.0), 0.001);
    }

    #[test]
    fn test_product_takes_right_prefix_when_left_is_empty() {
        let m = unit(Prefix::Unity, BaseUnit::Metre, 1);
        let km = unit(Prefix::Kilo, BaseUnit::Metre, 1);
        let merge = PrefixMerge::product(&m, &km);
        assert_eq!(merge.dimension.prefix(BaseUnit::Metre), Prefix::Kilo);
        assert_eq!(merge.lhs_shift, -3);
        assert_eq!(merge.rhs_shift, 0);
    }

    #[test]
    fn test_cancellation_resets_prefix() {
        let km = unit(Prefix::Kilo, BaseUnit::Metre, 1);
        let per_mm = unit(Prefix::Milli, BaseUnit::Metre, -1);
        let merge = PrefixMerge::product(&km, &per_mm);
        assert!(merge.dimension.is_dimensionless());
        // 1 km / 1 mm = 10⁶
        assert_eq!(merge.quantity(1.0, 1.0), 1e6);
    }

    #[test]
    fn test_quotient_cancels_equal_powers() {
        let km = unit(Prefix::Kilo, BaseUnit::Metre, 1);
        let mm = unit(Prefix::Milli, BaseUnit::Metre, 1);
        let merge = PrefixMerge::quotient(&km, &mm);
        assert!(merge.dimension.is_dimensionless());
        assert_eq!(merge.quantity(1.0, 1.0), 1e6);
    }

    #[test]
    fn test_additive_requires_comparable() {
        let m = unit(Prefix::Unity, BaseUnit::Metre, 1);
        let s = unit(Prefix::Unity, BaseUnit::Second, 1);
        assert!(PrefixMerge::additive(&m, &s, Operation::Add).is_none());
    }

    #[test]
    fn test_additive_averages_prefixes() {
        let km = unit(Prefix::Kilo, BaseUnit::Metre, 1);
        let mm = unit(Prefix::Milli, BaseUnit::Metre, 1);
        let merge = PrefixMerge::additive(&km, &mm, Operation::Add).unwrap();
        assert_eq!(merge.dimension.prefix(BaseUnit::Metre), Prefix::Unity);
        assert_eq!(merge.quantity(1.0, 1.0), 1000.001);

        let merge = PrefixMerge::additive(&km, &mm, Operation::Subtract).unwrap();
        assert_eq!(merge.quantity(1.0, 1.0), 999.999);
    }
}
