//! Force distinct values.

use std::collections::HashSet;

use crate::dice::DieSource;
use crate::options::Unique;

/// Reroll repeated values, left to right, until each is new or allowed to
/// repeat.
///
/// Each repeat gets `sides * 10` attempts; after that the duplicate stays.
pub fn unique(
    rolls: Vec<i64>,
    unique: &Unique,
    sides: u32,
    source: &mut dyn DieSource,
) -> Vec<i64> {
    let allowed = unique.allowed_repeats();
    let limit = sides.saturating_mul(10);
    let mut seen = HashSet::new();

    rolls
        .into_iter()
        .map(|mut value| {
            let mut attempts = 0;
            while seen.contains(&value) && !allowed.contains(&value) && attempts < limit {
                value = source.roll_die(sides);
                attempts += 1;
            }
            seen.insert(value);
            value
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedSource;

    #[test]
    fn repeats_are_rerolled() {
        let mut source = ScriptedSource::new([3, 3, 5]);
        assert_eq!(
            unique(vec![3, 3, 4], &Unique::Enabled(true), 6, &mut source),
            vec![3, 5, 4]
        );
    }

    #[test]
    fn allowed_values_may_repeat() {
        let mut source = ScriptedSource::new([2]);
        let except = Unique::Except {
            not_unique: vec![6],
        };
        assert_eq!(unique(vec![6, 6, 1, 1], &except, 6, &mut source), vec![6, 6, 1, 2]);
    }

    #[test]
    fn gives_up_after_ceiling() {
        let mut source = ScriptedSource::new([1]);
        assert_eq!(
            unique(vec![1, 1], &Unique::Enabled(true), 2, &mut source),
            vec![1, 1]
        );
        assert_eq!(source.calls(), 20);
    }
}
