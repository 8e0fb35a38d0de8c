//! Rolling a single dice group.

use super::DieSource;
use super::roll::{DieGroupResult, RollResult};
use crate::error::DiceResult;
use crate::modifiers::{apply_modifiers, saturating_sum};
use crate::notation::to_description;
use crate::options::RollOptions;

/// Roll one group: draw `quantity` dice, then run the modifier pipeline.
///
/// Groups without modifiers skip the pipeline and produce no logs.
///
/// # Errors
/// - [`crate::DiceError::InvalidOptions`] for zero sides, an empty face list,
///   or more than [`crate::MAX_QUANTITY`] dice.
/// - [`crate::DiceError::UnsatisfiableUniqueness`] from the `unique` modifier.
pub fn roll_group<S: DieSource>(options: &RollOptions, source: &mut S) -> DiceResult<RollResult> {
    options.check()?;
    let sides = options.side_count();
    let initial_rolls: Vec<i64> = (0..options.quantity)
        .map(|_| source.roll_die(sides))
        .collect();

    if options.modifiers.is_empty() {
        let total = saturating_sum(initial_rolls.iter().copied());
        tracing::debug!("rolled {}d{sides}: {initial_rolls:?} = {total}", options.quantity);
        return Ok(RollResult {
            modified_rolls: initial_rolls.clone(),
            initial_rolls,
            total,
            logs: Vec::new(),
        });
    }

    let (state, logs) = apply_modifiers(
        initial_rolls.clone(),
        options,
        Some(source as &mut dyn DieSource),
    )?;
    let total = state.total();
    tracing::debug!(
        "rolled {}d{sides}: {initial_rolls:?} -> {:?} = {total}",
        options.quantity,
        state.rolls
    );
    Ok(RollResult {
        initial_rolls,
        modified_rolls: state.rolls,
        total,
        logs,
    })
}

impl DieGroupResult {
    /// Roll `options` and package the result for display.
    ///
    /// # Errors
    /// Propagates errors from [`roll_group`].
    pub fn roll<S: DieSource>(options: RollOptions, source: &mut S) -> DiceResult<Self> {
        let RollResult {
            initial_rolls,
            modified_rolls,
            total,
            logs,
        } = roll_group(&options, source)?;

        let custom_results = options.sides.faces().map(|_| {
            modified_rolls
                .iter()
                .map(|&value| {
                    options
                        .sides
                        .label(value)
                        .map_or_else(|| value.to_string(), str::to_string)
                })
                .collect()
        });

        Ok(Self {
            applied_total: total.saturating_mul(options.arithmetic.sign()),
            description: to_description(&options).join(", "),
            rolls: modified_rolls,
            initial_rolls,
            custom_results,
            total,
            logs,
            parameters: options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedSource;
    use crate::error::DiceError;
    use crate::notation::parse_single_group;
    use crate::options::{Arithmetic, DropSpec, Modifiers, Unique};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn roll(notation: &str, script: &[i64]) -> DiceResult<RollResult> {
        let options = parse_single_group(notation)?;
        roll_group(&options, &mut ScriptedSource::new(script))
    }

    #[test]
    fn plain_roll_has_no_logs() {
        let result = roll("2d6", &[3, 5]).unwrap();
        assert_eq!(result.total, 8);
        assert_eq!(result.modified_rolls, vec![3, 5]);
        assert_eq!(result.initial_rolls, vec![3, 5]);
        assert!(result.logs.is_empty());
    }

    #[test]
    fn flat_bonus_adds_to_total() {
        let result = roll("1d20+5", &[10]).unwrap();
        assert_eq!(result.total, 15);
        assert_eq!(result.modified_rolls, vec![10]);
    }

    #[test]
    fn drop_highest_scenario() {
        let result = roll("4d6H1", &[2, 4, 6, 1]).unwrap();
        assert_eq!(result.modified_rolls, vec![2, 4, 1]);
        assert_eq!(result.total, 7);
        assert_eq!(result.logs.len(), 1);
        assert_eq!(result.logs[0].removed, vec![6]);
    }

    #[test]
    fn explode_and_reroll_draw_from_the_source() {
        let result = roll("3d6R{1}!", &[1, 6, 4, 3, 2]).unwrap();
        // 1 is rerolled to 3, then the 6 explodes into a 2.
        assert_eq!(result.initial_rolls, vec![1, 6, 4]);
        assert_eq!(result.modified_rolls, vec![3, 6, 4, 2]);
        assert_eq!(result.total, 15);
    }

    #[test]
    fn unique_with_too_many_dice_fails() {
        let options = RollOptions::new(6).quantity(7).modifiers(Modifiers {
            unique: Some(Unique::Enabled(true)),
            ..Modifiers::default()
        });
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            roll_group(&options, &mut rng),
            Err(DiceError::UnsatisfiableUniqueness {
                quantity: 7,
                sides: 6
            })
        );
    }

    #[test]
    fn zero_sides_are_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            roll_group(&RollOptions::new(0), &mut rng),
            Err(DiceError::InvalidOptions(_))
        ));
    }

    #[test]
    fn huge_quantities_are_rejected_before_rolling() {
        let options = parse_single_group("4000000000d6").unwrap();
        let mut source = ScriptedSource::new([1]);
        assert!(matches!(
            roll_group(&options, &mut source),
            Err(DiceError::InvalidOptions(_))
        ));
    }

    #[test]
    fn subtracting_group_negates_applied_total() {
        let options = parse_single_group("-2d4").unwrap();
        assert_eq!(options.arithmetic, Arithmetic::Subtract);
        let group = DieGroupResult::roll(options, &mut ScriptedSource::new([1, 3])).unwrap();
        assert_eq!(group.total, 4);
        assert_eq!(group.applied_total, -4);
        assert_eq!(
            group.description,
            "Roll 2 4-sided dice, and Subtract the result"
        );
    }

    #[test]
    fn labelled_dice_report_custom_results() {
        let options = RollOptions::faces(["H", "T"]).quantity(3);
        let group = DieGroupResult::roll(options, &mut ScriptedSource::new([2, 1, 2])).unwrap();
        assert_eq!(group.rolls, vec![2, 1, 2]);
        assert_eq!(
            group.custom_results,
            Some(vec!["T".to_string(), "H".to_string(), "T".to_string()])
        );
    }

    proptest! {
        #[test]
        fn drop_highest_removes_one_maximum(
            quantity in 1..12u32,
            sides in 1..20u32,
            seed in any::<u64>(),
        ) {
            let options = RollOptions::new(sides).quantity(quantity).modifiers(Modifiers {
                drop: Some(DropSpec::highest(1)),
                ..Modifiers::default()
            });
            let result = roll_group(&options, &mut StdRng::seed_from_u64(seed)).unwrap();
            prop_assert_eq!(result.modified_rolls.len(), result.initial_rolls.len() - 1);
            let removed = &result.logs[0].removed;
            prop_assert_eq!(removed.len(), 1);
            prop_assert!(result.modified_rolls.iter().all(|v| *v <= removed[0]));
        }

        #[test]
        fn explode_adds_one_die_per_max_face(
            quantity in 0..12u32,
            sides in 1..8u32,
            seed in any::<u64>(),
        ) {
            let options = RollOptions::new(sides).quantity(quantity).modifiers(Modifiers {
                explode: Some(true),
                ..Modifiers::default()
            });
            let result = roll_group(&options, &mut StdRng::seed_from_u64(seed)).unwrap();
            let max_faces = result
                .initial_rolls
                .iter()
                .filter(|v| **v == i64::from(sides))
                .count();
            prop_assert_eq!(
                result.modified_rolls.len(),
                result.initial_rolls.len() + max_faces
            );
        }

        #[test]
        fn plain_rolls_stay_on_the_die(
            quantity in 0..20u32,
            sides in 1..100u32,
            seed in any::<u64>(),
        ) {
            let options = RollOptions::new(sides).quantity(quantity);
            let result = roll_group(&options, &mut StdRng::seed_from_u64(seed)).unwrap();
            prop_assert_eq!(result.initial_rolls.len(), quantity as usize);
            prop_assert!(result.initial_rolls.iter().all(|v| (1..=i64::from(sides)).contains(v)));
            prop_assert_eq!(result.total, result.initial_rolls.iter().sum::<i64>());
        }
    }
}
