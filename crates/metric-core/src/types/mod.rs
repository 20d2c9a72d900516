//! Value types for metric calculations

pub mod base;
pub mod dimension;
pub mod merge;
pub mod prefix;
mod unit;

pub use base::{BaseUnit, BaseUnitDef, BASE_UNITS};
pub use dimension::{Dimension, Powers, Prefixes, ScaleError, MAX_POWER};
pub use merge::{Operation, PrefixMerge};
pub use prefix::{Prefix, PrefixDef, PREFIXES};
pub use unit::Unit;
