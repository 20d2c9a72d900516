//! Property-based tests for unit arithmetic, parsing and formatting

use metric_core::{format, parse, BaseUnit, Prefix, Unit, MAX_POWER};
use proptest::prelude::*;
use proptest::sample::select;

fn prefix() -> impl Strategy<Value = Prefix> {
    select(Prefix::all().collect::<Vec<_>>())
}

fn base_unit() -> impl Strategy<Value = BaseUnit> {
    select(BaseUnit::all().collect::<Vec<_>>())
}

/// Prefixes up to 10^±12, so repeated merging stays well inside f64 range
fn moderate_prefix() -> impl Strategy<Value = Prefix> {
    select(
        Prefix::all()
            .filter(|p| p.exponent().abs() <= 12)
            .collect::<Vec<_>>(),
    )
}

/// Products of up to four prefixed base units with small exponents
fn unit() -> impl Strategy<Value = Unit> {
    (
        -1e6f64..1e6,
        prop::collection::vec((moderate_prefix(), base_unit(), -3i32..=3), 1..5),
    )
        .prop_map(|(quantity, factors)| {
            factors
                .into_iter()
                .fold(Unit::scalar(quantity), |acc, (prefix, base, power)| {
                    acc * Unit::prefixed(1.0, prefix, base, power)
                })
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn product_then_quotient_restores_dimension(a in unit(), b in unit()) {
        prop_assume!(b.quantity() != 0.0);
        let back = (a * b) / b;
        prop_assert!(back.is_comparable(&a));
        prop_assert_eq!(back, a);
    }

    #[test]
    fn change_prefix_is_reversible(u in unit(), p in prefix(), base in base_unit()) {
        let original = u.prefix(base);
        let back = u.change_prefix(p, base).change_prefix(original, base);
        prop_assert_eq!(back, u);
        prop_assert_eq!(u.change_prefix(p, base), u);
    }

    #[test]
    fn sum_is_comparable_and_ordered(u in unit(), extra in 1.0f64..1e3) {
        prop_assume!(u.quantity() > 0.0);
        let bigger = u * (1.0 + extra);
        let sum = u.try_add(&bigger).unwrap();
        prop_assert!(sum.is_comparable(&u));
        prop_assert!(u < bigger);
        prop_assert!(sum > bigger);
    }

    #[test]
    fn base_only_plain_output_round_trips(u in unit(), flags in select(vec!["cb", "cdb"])) {
        let text = format(&u, flags);
        let parsed = parse(&text).unwrap();
        prop_assert_eq!(format(&parsed, flags), text);
    }

    #[test]
    fn parser_never_panics(source in ".*") {
        let _ = parse(&source);
    }

    #[test]
    fn large_exponents_stay_in_range(
        source in "1(m|kN|F)\\^-?[0-9]{1,10}([*/](m|kN|F)\\^-?[0-9]{1,10}){0,3}"
    ) {
        if let Ok(unit) = parse(&source) {
            for base in BaseUnit::all() {
                prop_assert!(unit.power(base).abs() <= MAX_POWER);
            }
            let _ = unit.pow(3.0);
            let _ = format(&unit, "c");
        }
    }
}
