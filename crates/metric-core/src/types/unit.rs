//! Physical quantities: a magnitude together with its dimension
//!
//! A [`Unit`] is an immutable value. Every operation returns a new one and
//! keeps `quantity` expressed against the prefixes stored in the dimension.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use super::dimension::{Dimension, ScaleError};
use super::merge::{Operation, PrefixMerge};
use super::prefix::scale10;
use super::{BaseUnit, Prefix, MAX_POWER};
use crate::catalog;
use crate::error::UnitError;
use crate::format::FormatFlags;

/// Relative tolerance used when comparing magnitudes
const TOLERANCE: f64 = 1e-12;

/// A magnitude with an SI dimension, e.g. `12 kg·m·s⁻²`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Unit {
    quantity: f64,
    dimension: Dimension,
}

impl Unit {
    /// `quantity` of an unprefixed base unit
    pub fn new(quantity: f64, base: BaseUnit) -> Self {
        Self::prefixed(quantity, Prefix::Unity, base, 1)
    }

    /// `quantity` of an unprefixed base unit raised to `power`
    pub fn powered(quantity: f64, base: BaseUnit, power: i32) -> Self {
        Self::prefixed(quantity, Prefix::Unity, base, power)
    }

    /// `quantity` of a prefixed base unit raised to `power`: `(1, k, g, 1)`
    /// is one kilogram.
    pub fn prefixed(quantity: f64, prefix: Prefix, base: BaseUnit, power: i32) -> Self {
        Self {
            quantity,
            dimension: Dimension::base(prefix, base, power),
        }
    }

    /// A plain number
    pub fn scalar(quantity: f64) -> Self {
        Self {
            quantity,
            dimension: Dimension::dimensionless(),
        }
    }

    pub(crate) fn from_parts(quantity: f64, dimension: Dimension) -> Self {
        Self {
            quantity,
            dimension,
        }
    }

    /// Whether `symbol` names a base or derived unit
    pub fn exists(symbol: &str) -> bool {
        BaseUnit::parse(symbol).is_some() || catalog::find(symbol).is_some()
    }

    /// One of the unit named by `symbol`
    pub fn create(symbol: &str) -> Result<Unit, UnitError> {
        Self::create_prefixed(Prefix::Unity, symbol)
    }

    /// One of the unit named by `symbol` carrying `prefix`.
    ///
    /// For derived units the prefix moves onto the first base unit whose
    /// exponent divides it and where the result is still a valid prefix
    /// (`mV` puts milli on the kilogram, giving gram). When no slot fits the
    /// prefix goes into the magnitude instead (`mGy` is `0.001 m²·s⁻²`).
    pub fn create_prefixed(prefix: Prefix, symbol: &str) -> Result<Unit, UnitError> {
        if let Some(base) = BaseUnit::parse(symbol) {
            return Ok(Unit::prefixed(1.0, prefix, base, 1));
        }

        let derived = catalog::find(symbol)
            .ok_or_else(|| UnitError::UnknownSymbol(symbol.to_string()))?;
        let unit = derived.unit;
        if prefix == Prefix::Unity {
            return Ok(unit);
        }

        for base in BaseUnit::all() {
            let power = unit.power(base);
            if power == 0 || prefix.exponent() % power != 0 {
                continue;
            }
            let target = unit.prefix(base).exponent() + prefix.exponent() / power;
            if let Some(moved) = Prefix::from_exponent(target) {
                return Ok(Unit::from_parts(
                    unit.quantity,
                    unit.dimension.with_prefix(base, moved),
                ));
            }
        }

        Ok(unit.with_quantity(scale10(unit.quantity, prefix.exponent())))
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    pub fn prefix(&self, base: BaseUnit) -> Prefix {
        self.dimension.prefix(base)
    }

    pub fn power(&self, base: BaseUnit) -> i32 {
        self.dimension.power(base)
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// Units are comparable when their exponents match, whatever their
    /// prefixes.
    pub fn is_comparable(&self, other: &Unit) -> bool {
        self.dimension.is_comparable(&other.dimension)
    }

    /// Power of `factor` contained in this unit; 0 if it is not a factor.
    /// `m/s²` has `s` with factor -2.
    pub fn has_factor(&self, factor: &Unit) -> i32 {
        self.dimension.has_factor(&factor.dimension)
    }

    /// Same dimension, different magnitude
    pub fn with_quantity(&self, quantity: f64) -> Unit {
        Unit::from_parts(quantity, self.dimension)
    }

    /// Raise to `power`.
    ///
    /// Fails with [`UnitError::DimensionSplit`] when some exponent would
    /// become fractional: `m².pow(0.5)` is `m`, `m.pow(0.5)` is an error.
    /// Exponents beyond [`MAX_POWER`](super::MAX_POWER) fail with
    /// [`UnitError::ExponentOverflow`].
    pub fn pow(&self, power: f64) -> Result<Unit, UnitError> {
        let dimension = self.dimension.scale(power).map_err(|e| match e {
            ScaleError::Split => UnitError::DimensionSplit { unit: *self, power },
            ScaleError::Overflow => UnitError::ExponentOverflow { unit: *self, power },
        })?;
        let quantity = if power.fract() == 0.0 {
            self.quantity.powi(power as i32)
        } else {
            self.quantity.powf(power)
        };
        Ok(Unit::from_parts(quantity, dimension))
    }

    /// Integer power; exponents saturate at `±MAX_POWER`
    pub(crate) fn powi(&self, power: i32) -> Unit {
        Unit::from_parts(self.quantity.powi(power), self.dimension.scale_int(power))
    }

    /// Integer power, or `None` if some exponent would leave `±MAX_POWER`
    pub fn checked_powi(&self, power: i32) -> Option<Unit> {
        self.dimension
            .powers()
            .iter()
            .all(|p| p.checked_mul(power).is_some_and(|p| p.abs() <= MAX_POWER))
            .then(|| self.powi(power))
    }

    /// Replace the prefix of one base unit, rescaling the magnitude so the
    /// value is unchanged. Base units with exponent 0 are left alone.
    pub fn change_prefix(&self, prefix: Prefix, base: BaseUnit) -> Unit {
        let power = self.power(base);
        if power == 0 {
            return *self;
        }
        let difference = (self.prefix(base).exponent() - prefix.exponent()) * power;
        Unit::from_parts(
            scale10(self.quantity, difference),
            self.dimension.with_prefix(base, prefix),
        )
    }

    /// Product, or `None` if some exponent would leave `±MAX_POWER`
    pub fn checked_mul(&self, rhs: &Unit) -> Option<Unit> {
        self.dimension.fits(&rhs.dimension, 1).then(|| *self * *rhs)
    }

    /// Quotient, or `None` if some exponent would leave `±MAX_POWER`
    pub fn checked_div(&self, rhs: &Unit) -> Option<Unit> {
        self.dimension.fits(&rhs.dimension, -1).then(|| *self / *rhs)
    }

    /// Sum of two comparable units
    pub fn try_add(&self, other: &Unit) -> Result<Unit, UnitError> {
        self.combine(other, Operation::Add)
    }

    /// Difference of two comparable units
    pub fn try_sub(&self, other: &Unit) -> Result<Unit, UnitError> {
        self.combine(other, Operation::Subtract)
    }

    fn combine(&self, other: &Unit, op: Operation) -> Result<Unit, UnitError> {
        let merge = self.dimension.combine(&other.dimension, op).ok_or(
            UnitError::IncomparableUnits {
                lhs: *self,
                rhs: *other,
            },
        )?;
        Ok(Unit::from_parts(
            merge.quantity(self.quantity, other.quantity),
            merge.dimension,
        ))
    }

    /// Order two comparable units by value.
    ///
    /// `999 m` is less than `1 km`. Units with different dimensions fail
    /// with [`UnitError::IncomparableUnits`].
    pub fn compare(&self, other: &Unit) -> Result<Ordering, UnitError> {
        if !self.is_comparable(other) {
            return Err(UnitError::IncomparableUnits {
                lhs: *self,
                rhs: *other,
            });
        }
        let lhs = self.rescaled_to(other);
        let rhs = other.quantity;
        if approx_eq(lhs, rhs) {
            return Ok(Ordering::Equal);
        }
        Ok(lhs.partial_cmp(&rhs).unwrap_or_else(|| lhs.total_cmp(&rhs)))
    }

    /// This magnitude expressed against `other`'s prefixes
    fn rescaled_to(&self, other: &Unit) -> f64 {
        scale10(
            self.quantity,
            self.dimension.power10_difference(&other.dimension),
        )
    }

    /// The base units of this unit with their exponents and prefixes, in
    /// dimension order. The magnitude is not included.
    pub fn factors(&self) -> impl Iterator<Item = Unit> + '_ {
        BaseUnit::all()
            .filter(|&base| self.power(base) != 0)
            .map(|base| Unit::prefixed(1.0, self.prefix(base), base, self.power(base)))
    }

    /// Render with the given flags (see [`FormatFlags`])
    pub fn format(&self, flags: &str) -> String {
        crate::format::format(self, FormatFlags::parse(flags))
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= TOLERANCE * a.abs().max(b.abs())
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.is_comparable(other) && approx_eq(self.rescaled_to(other), other.quantity)
    }
}

impl PartialOrd for Unit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(""))
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_unit(s)
    }
}

impl From<f64> for Unit {
    fn from(quantity: f64) -> Self {
        Unit::scalar(quantity)
    }
}

impl Neg for Unit {
    type Output = Unit;

    fn neg(self) -> Unit {
        self.with_quantity(-self.quantity)
    }
}

impl Add for Unit {
    type Output = Result<Unit, UnitError>;

    fn add(self, rhs: Unit) -> Self::Output {
        self.try_add(&rhs)
    }
}

impl Sub for Unit {
    type Output = Result<Unit, UnitError>;

    fn sub(self, rhs: Unit) -> Self::Output {
        self.try_sub(&rhs)
    }
}

/// Exponents saturate at `±MAX_POWER`; see [`Unit::checked_mul`]
impl Mul for Unit {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        let merge = PrefixMerge::product(&self.dimension, &rhs.dimension);
        Unit::from_parts(merge.quantity(self.quantity, rhs.quantity), merge.dimension)
    }
}

/// Exponents saturate at `±MAX_POWER`; see [`Unit::checked_div`]
impl Div for Unit {
    type Output = Unit;

    fn div(self, rhs: Unit) -> Unit {
        let merge = PrefixMerge::quotient(&self.dimension, &rhs.dimension);
        Unit::from_parts(merge.quantity(self.quantity, rhs.quantity), merge.dimension)
    }
}

impl Add<f64> for Unit {
    type Output = Unit;

    fn add(self, rhs: f64) -> Unit {
        self.with_quantity(self.quantity + rhs)
    }
}

impl Add<Unit> for f64 {
    type Output = Unit;

    fn add(self, rhs: Unit) -> Unit {
        rhs + self
    }
}

impl Sub<f64> for Unit {
    type Output = Unit;

    fn sub(self, rhs: f64) -> Unit {
        self.with_quantity(self.quantity - rhs)
    }
}

impl Sub<Unit> for f64 {
    type Output = Unit;

    fn sub(self, rhs: Unit) -> Unit {
        rhs.with_quantity(self - rhs.quantity)
    }
}

impl Mul<f64> for Unit {
    type Output = Unit;

    fn mul(self, rhs: f64) -> Unit {
        self.with_quantity(self.quantity * rhs)
    }
}

impl Mul<Unit> for f64 {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        rhs * self
    }
}

impl Div<f64> for Unit {
    type Output = Unit;

    fn div(self, rhs: f64) -> Unit {
        self.with_quantity(self.quantity / rhs)
    }
}

impl Div<Unit> for f64 {
    type Output = Unit;

    fn div(self, rhs: Unit) -> Unit {
        rhs.powi(-1).with_quantity(self / rhs.quantity)
    }
}
