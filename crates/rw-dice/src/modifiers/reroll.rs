//! Reroll matching dice.

use crate::dice::DieSource;
use crate::options::RerollSpec;

/// Attempts per die before the last rolled value is kept.
pub const MAX_REROLL_ATTEMPTS: u32 = 99;

/// Reroll each value matching the bound until it no longer matches.
///
/// At most `max` dice are rerolled; later matches are left as rolled. A die
/// that still matches after [`MAX_REROLL_ATTEMPTS`] keeps its last value.
pub fn reroll(
    rolls: Vec<i64>,
    spec: &RerollSpec,
    sides: u32,
    source: &mut dyn DieSource,
) -> Vec<i64> {
    let mut rerolled = 0;
    rolls
        .into_iter()
        .map(|value| {
            if !spec.bound.matches(value) || spec.max.is_some_and(|max| rerolled >= max) {
                return value;
            }
            rerolled += 1;
            let mut value = source.roll_die(sides);
            let mut attempts = 1;
            while spec.bound.matches(value) && attempts < MAX_REROLL_ATTEMPTS {
                value = source.roll_die(sides);
                attempts += 1;
            }
            tracing::trace!("rerolled die to {value} after {attempts} attempts");
            value
        })
        .collect()
}
