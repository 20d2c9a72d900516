//! Dimension vectors: one exponent and one prefix per base unit

use serde::{Deserialize, Serialize};

use super::merge::{Operation, PrefixMerge};
use super::{BaseUnit, Prefix};

/// Exponent of every base unit, indexed by [`BaseUnit::index`]
pub type Powers = [i32; BaseUnit::COUNT];

/// Prefix of every base unit, indexed by [`BaseUnit::index`]
pub type Prefixes = [Prefix; BaseUnit::COUNT];

/// Largest denominator tried when resolving a fractional power
const MAX_ROOT: i32 = 12;

/// Largest exponent magnitude a base unit can carry
pub const MAX_POWER: i32 = i8::MAX as i32;

/// Why a dimension cannot be raised to a power
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleError {
    /// Some exponent would become fractional
    Split,
    /// Some exponent would leave `±MAX_POWER`
    Overflow,
}

/// The shape of a unit: `m²·kg·s⁻³` is `[2, 1, -3, 0, 0, 0, 0]` with the
/// kilo prefix on the gram slot.
///
/// A slot whose exponent is 0 always carries [`Prefix::Unity`], and every
/// exponent lies within `±MAX_POWER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RawDimension")]
pub struct Dimension {
    powers: Powers,
    prefixes: Prefixes,
}

impl Dimension {
    /// The empty dimension of a plain number
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// A single base unit raised to `power`
    pub fn base(prefix: Prefix, base: BaseUnit, power: i32) -> Self {
        let mut powers = Powers::default();
        let mut prefixes = Prefixes::default();
        powers[base.index()] = power;
        prefixes[base.index()] = prefix;
        Self::from_parts(powers, prefixes)
    }

    /// Build from raw vectors, dropping prefixes on zero exponents.
    /// Exponents beyond `±MAX_POWER` saturate.
    pub(crate) fn from_parts(powers: Powers, mut prefixes: Prefixes) -> Self {
        let powers = powers.map(|p| p.clamp(-MAX_POWER, MAX_POWER));
        for (prefix, power) in prefixes.iter_mut().zip(powers) {
            if power == 0 {
                *prefix = Prefix::Unity;
            }
        }
        Self { powers, prefixes }
    }

    pub fn powers(&self) -> &Powers {
        &self.powers
    }

    pub fn prefixes(&self) -> &Prefixes {
        &self.prefixes
    }

    pub fn power(&self, base: BaseUnit) -> i32 {
        self.powers[base.index()]
    }

    pub fn prefix(&self, base: BaseUnit) -> Prefix {
        self.prefixes[base.index()]
    }

    pub fn is_dimensionless(&self) -> bool {
        self.powers.iter().all(|&p| p == 0)
    }

    /// Comparable dimensions have identical exponents; prefixes may differ.
    pub fn is_comparable(&self, other: &Dimension) -> bool {
        self.powers == other.powers
    }

    /// Sum of absolute exponents
    pub fn total_power(&self) -> i32 {
        self.powers.iter().map(|p| p.abs()).sum()
    }

    /// Elementwise exponent sum (unit multiplication), saturating at
    /// `±MAX_POWER`
    pub fn multiply_powers(&self, other: &Dimension) -> Powers {
        self.raw_powers(other, 1).map(|p| p.clamp(-MAX_POWER, MAX_POWER))
    }

    /// Elementwise exponent difference (unit division), saturating at
    /// `±MAX_POWER`
    pub fn divide_powers(&self, other: &Dimension) -> Powers {
        self.raw_powers(other, -1).map(|p| p.clamp(-MAX_POWER, MAX_POWER))
    }

    /// Whether multiplying by `other` (`sign` 1) or dividing by it (`sign`
    /// -1) keeps every exponent within `±MAX_POWER`
    pub fn fits(&self, other: &Dimension, sign: i32) -> bool {
        self.raw_powers(other, sign)
            .iter()
            .all(|p| p.abs() <= MAX_POWER)
    }

    /// Both operands are bounded by `MAX_POWER`, so this cannot overflow
    fn raw_powers(&self, other: &Dimension, sign: i32) -> Powers {
        std::array::from_fn(|i| self.powers[i] + sign * other.powers[i])
    }

    /// Merge with `other` under `op`.
    ///
    /// Additive operations need comparable dimensions and return `None`
    /// otherwise; multiplicative operations always succeed.
    pub fn combine(&self, other: &Dimension, op: Operation) -> Option<PrefixMerge> {
        match op {
            Operation::Add | Operation::Subtract => PrefixMerge::additive(self, other, op),
            Operation::Multiply => Some(PrefixMerge::product(self, other)),
            Operation::Divide => Some(PrefixMerge::quotient(self, other)),
        }
    }

    /// Multiply every exponent by `power`.
    ///
    /// Fractional powers are resolved to `n/d`. Fails with
    /// [`ScaleError::Split`] when some exponent is not divisible by `d` (the
    /// square root of `m³`) or the power has no small rational form, and
    /// with [`ScaleError::Overflow`] when an exponent would leave
    /// `±MAX_POWER`. Prefixes stay attached to their slots.
    pub fn scale(&self, power: f64) -> Result<Dimension, ScaleError> {
        if self.is_dimensionless() {
            return Ok(*self);
        }
        let (numerator, denominator) = rational(power)?;
        let mut powers = Powers::default();
        for (scaled, &exp) in powers.iter_mut().zip(&self.powers) {
            let product = exp.checked_mul(numerator).ok_or(ScaleError::Overflow)?;
            if product % denominator != 0 {
                return Err(ScaleError::Split);
            }
            *scaled = product / denominator;
            if scaled.abs() > MAX_POWER {
                return Err(ScaleError::Overflow);
            }
        }
        Ok(Self::from_parts(powers, self.prefixes))
    }

    /// Integer scaling, which can never split a dimension. Exponents
    /// saturate at `±MAX_POWER`.
    pub(crate) fn scale_int(&self, power: i32) -> Dimension {
        Self::from_parts(self.powers.map(|p| p.saturating_mul(power)), self.prefixes)
    }

    /// How many times `candidate` divides this dimension.
    ///
    /// Returns the integer `k` of smallest magnitude such that every
    /// exponent of `candidate^k` has the sign of the matching exponent here
    /// and does not exceed it. Returns 0 when the candidate is missing from
    /// some slot, the quotients disagree in sign, or the candidate is
    /// dimensionless. `kg·m·s⁻²` has `s` with factor -2.
    pub fn has_factor(&self, candidate: &Dimension) -> i32 {
        let mut factor: Option<i32> = None;
        for (&own, &theirs) in self.powers.iter().zip(&candidate.powers) {
            if theirs == 0 {
                continue;
            }
            let quotient = own / theirs;
            if quotient == 0 {
                return 0;
            }
            match factor {
                Some(f) if f.signum() != quotient.signum() => return 0,
                Some(f) if f.abs() <= quotient.abs() => {}
                _ => factor = Some(quotient),
            }
        }
        factor.unwrap_or(0)
    }

    /// Powers of ten separating this dimension's prefixes from `other`'s
    /// over the slots both use.
    pub fn power10_difference(&self, other: &Dimension) -> i32 {
        (0..BaseUnit::COUNT)
            .filter(|&i| self.powers[i] != 0 && other.powers[i] != 0)
            .map(|i| {
                self.prefixes[i].exponent() * self.powers[i]
                    - other.prefixes[i].exponent() * other.powers[i]
            })
            .sum()
    }

    /// Same exponents with one prefix replaced
    pub(crate) fn with_prefix(&self, base: BaseUnit, prefix: Prefix) -> Dimension {
        let mut prefixes = self.prefixes;
        prefixes[base.index()] = prefix;
        Self::from_parts(self.powers, prefixes)
    }
}

/// Serialized form; deserializing goes through [`Dimension::from_parts`]
#[derive(Deserialize)]
struct RawDimension {
    powers: Powers,
    prefixes: Prefixes,
}

impl From<RawDimension> for Dimension {
    fn from(raw: RawDimension) -> Self {
        Self::from_parts(raw.powers, raw.prefixes)
    }
}

/// Resolve a power to `(numerator, denominator)` with a small denominator
fn rational(power: f64) -> Result<(i32, i32), ScaleError> {
    if power.is_nan() {
        return Err(ScaleError::Split);
    }
    if power.abs() > MAX_POWER as f64 {
        return Err(ScaleError::Overflow);
    }
    (1..=MAX_ROOT)
        .find_map(|denominator| {
            let numerator = power * denominator as f64;
            let rounded = numerator.round();
            ((numerator - rounded).abs() < 1e-9).then_some((rounded as i32, denominator))
        })
        .ok_or(ScaleError::Split)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn newton() -> Dimension {
        Dimension::from_parts(
            [1, 1, -2, 0, 0, 0, 0],
            [
                Prefix::Unity,
                Prefix::Kilo,
                Prefix::Unity,
                Prefix::Unity,
                Prefix::Unity,
                Prefix::Unity,
                Prefix::Unity,
            ],
        )
    }

    fn second() -> Dimension {
        Dimension::base(Prefix::Unity, BaseUnit::Second, 1)
    }

    #[test]
    fn test_zero_power_drops_prefix() {
        let d = Dimension::base(Prefix::Kilo, BaseUnit::Metre, 0);
        assert_eq!(d.prefix(BaseUnit::Metre), Prefix::Unity);
        assert!(d.is_dimensionless());
    }

    #[test]
    fn test_multiply_and_divide_powers() {
        let n = newton();
        let s = second();
        assert_eq!(n.multiply_powers(&s), [1, 1, -1, 0, 0, 0, 0]);
        assert_eq!(n.divide_powers(&s), [1, 1, -3, 0, 0, 0, 0]);
    }

    #[test]
    fn test_has_factor() {
        let n = newton();
        assert_eq!(n.has_factor(&second()), -2);
        assert_eq!(n.scale_int(2).has_factor(&n), 2);
        assert_eq!(n.has_factor(&n.scale_int(-1)), -1);
        assert_eq!(n.has_factor(&Dimension::dimensionless()), 0);
    }

    #[test]
    fn test_has_factor_rejects_sign_conflict() {
        // kg·m⁻¹·s⁻² (pascal) inside kg·m·s⁻²: mass says 1, length says -1
        let pascal = Dimension::from_parts([-1, 1, -2, 0, 0, 0, 0], Prefixes::default());
        assert_eq!(newton().has_factor(&pascal), 0);
    }

    #[test]
    fn test_has_factor_missing_slot() {
        let metre = Dimension::base(Prefix::Unity, BaseUnit::Metre, 1);
        assert_eq!(second().has_factor(&metre), 0);
    }

    #[test]
    fn test_scale_fractional() {
        let area = Dimension::base(Prefix::Kilo, BaseUnit::Metre, 2);
        let side = area.scale(0.5).unwrap();
        assert_eq!(side.power(BaseUnit::Metre), 1);
        assert_eq!(side.prefix(BaseUnit::Metre), Prefix::Kilo);

        let length = Dimension::base(Prefix::Unity, BaseUnit::Metre, 1);
        assert_eq!(length.scale(0.5), Err(ScaleError::Split));
        assert_eq!(length.scale(f64::NAN), Err(ScaleError::Split));
    }

    #[test]
    fn test_scale_rational() {
        let volume = Dimension::base(Prefix::Unity, BaseUnit::Metre, 3);
        assert_eq!(volume.scale(2.0 / 3.0).unwrap().power(BaseUnit::Metre), 2);
        assert_eq!(volume.scale(1.5), Err(ScaleError::Split));
    }

    #[test]
    fn test_scale_overflow() {
        let length = Dimension::base(Prefix::Unity, BaseUnit::Metre, 1);
        assert_eq!(length.scale(1e10), Err(ScaleError::Overflow));
        assert_eq!(length.scale(f64::INFINITY), Err(ScaleError::Overflow));
        assert_eq!(length.scale(200.0), Err(ScaleError::Overflow));
        let area = Dimension::base(Prefix::Unity, BaseUnit::Metre, 2);
        assert_eq!(area.scale(64.0), Err(ScaleError::Overflow));
        assert_eq!(area.scale(63.0).unwrap().power(BaseUnit::Metre), 126);
        assert_eq!(Dimension::dimensionless().scale(1e10), Ok(Dimension::dimensionless()));
    }

    #[test]
    fn test_powers_saturate() {
        let big = Dimension::base(Prefix::Kilo, BaseUnit::Metre, i32::MAX);
        assert_eq!(big.power(BaseUnit::Metre), MAX_POWER);
        assert_eq!(big.multiply_powers(&big)[0], MAX_POWER);
        assert_eq!(big.scale_int(i32::MIN).power(BaseUnit::Metre), -MAX_POWER);
        assert!(!big.fits(&big, 1));
        assert!(big.fits(&big, -1));
    }

    #[test]
    fn test_deserialize_restores_invariants() {
        let json = r#"{"powers":[0,1,0,0,0,0,500],"prefixes":["Kilo","Milli","Unity","Unity","Unity","Unity","Unity"]}"#;
        let d: Dimension = serde_json::from_str(json).unwrap();
        assert_eq!(d.prefix(BaseUnit::Metre), Prefix::Unity);
        assert_eq!(d.prefix(BaseUnit::Gram), Prefix::Milli);
        assert_eq!(d.power(BaseUnit::Mole), MAX_POWER);
        let mut prefixes = Prefixes::default();
        prefixes[BaseUnit::Gram.index()] = Prefix::Milli;
        assert_eq!(d, Dimension::from_parts([0, 1, 0, 0, 0, 0, MAX_POWER], prefixes));
    }

    #[test]
    fn test_power10_difference() {
        let km = Dimension::base(Prefix::Kilo, BaseUnit::Metre, 1);
        let m = Dimension::base(Prefix::Unity, BaseUnit::Metre, 1);
        assert_eq!(m.power10_difference(&km), -3);
        assert_eq!(km.scale_int(2).power10_difference(&m.scale_int(2)), 6);
    }
}
