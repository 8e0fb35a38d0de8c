use proptest::prelude::*;

use crate::options::{
    Arithmetic, Bound, DropSpec, Modifiers, ReplaceRule, RerollSpec, RollOptions, Unique,
};

/// Bounds with at least one criterion, so they always render.
pub(crate) fn bound_strategy() -> impl Strategy<Value = Bound> {
    (
        prop::option::of(0..30i64),
        prop::option::of(0..30i64),
        prop::collection::vec(0..30i64, 0..3),
    )
        .prop_filter("bound must have a criterion", |(gt, lt, exact)| {
            gt.is_some() || lt.is_some() || !exact.is_empty()
        })
        .prop_map(|(greater_than, less_than, exact)| Bound {
            greater_than,
            less_than,
            exact,
        })
}

fn drop_strategy() -> impl Strategy<Value = DropSpec> {
    (
        prop::option::of(1..5u32),
        prop::option::of(1..5u32),
        prop::option::of(bound_strategy()),
    )
        .prop_filter("drop must do something", |(h, l, b)| {
            h.is_some() || l.is_some() || b.is_some()
        })
        .prop_map(|(highest, lowest, bound)| DropSpec {
            bound: bound.unwrap_or_default(),
            highest,
            lowest,
        })
}

fn unique_strategy() -> impl Strategy<Value = Unique> {
    prop_oneof![
        Just(Unique::Enabled(true)),
        prop::collection::vec(1..20i64, 1..3).prop_map(|not_unique| Unique::Except { not_unique }),
    ]
}

/// Replace rules that render one item each.
fn replace_strategy() -> impl Strategy<Value = ReplaceRule> {
    prop_oneof![
        (0..30i64, 0..30i64).prop_map(|(from, to)| ReplaceRule::exact(from, to)),
        (0..30i64, 0..30i64).prop_map(|(gt, to)| ReplaceRule::matching(Bound::greater_than(gt), to)),
        (0..30i64, 0..30i64).prop_map(|(lt, to)| ReplaceRule::matching(Bound::less_than(lt), to)),
    ]
}

pub(crate) fn modifiers_strategy() -> impl Strategy<Value = Modifiers> {
    (
        prop::option::of(bound_strategy()),
        prop::option::of(drop_strategy()),
        prop::option::of((bound_strategy(), prop::option::of(1..5u32))),
        prop::option::of(Just(true)),
        prop::option::of(unique_strategy()),
        prop::option::of(prop::collection::vec(replace_strategy(), 1..3)),
        prop::option::of(0..50u32),
        prop::option::of(0..50u32),
    )
        .prop_map(
            |(cap, drop, reroll, explode, unique, replace, plus, minus)| Modifiers {
                cap,
                drop,
                reroll: reroll.map(|(bound, max)| RerollSpec { bound, max }),
                explode,
                unique,
                replace,
                plus,
                minus,
            },
        )
}

/// Numeric-sided options whose notation parses back to the same options.
pub(crate) fn options_strategy() -> impl Strategy<Value = RollOptions> {
    (0..20u32, 1..100u32, any::<bool>(), modifiers_strategy()).prop_map(
        |(quantity, sides, subtract, modifiers)| RollOptions {
            arithmetic: if subtract {
                Arithmetic::Subtract
            } else {
                Arithmetic::Add
            },
            ..RollOptions::new(sides).quantity(quantity).modifiers(modifiers)
        },
    )
}
