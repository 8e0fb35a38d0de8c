//! Rolling several groups into one result.

use serde::{Deserialize, Serialize};

use crate::argument::RollArgument;
use crate::dice::{DieGroupResult, DieSource};
use crate::error::DiceResult;
use crate::modifiers::saturating_sum;

/// The combined result of every group in a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    /// Per-group results, in input order.
    pub rolls: Vec<DieGroupResult>,
    /// Flattened display values across all groups.
    pub result: Vec<String>,
    /// Sum of every group's applied total.
    pub total: i64,
}

/// Parse and roll every argument, summing signed group totals.
///
/// `result` holds face labels when every group is a labelled die and the
/// numeric values otherwise.
///
/// # Errors
/// Fails on the first argument that does not parse or cannot be rolled.
pub fn roll_notation<I, S>(arguments: I, source: &mut S) -> DiceResult<AggregateResult>
where
    I: IntoIterator,
    I::Item: Into<RollArgument>,
    S: DieSource,
{
    let mut rolls = Vec::new();
    for argument in arguments {
        let argument: RollArgument = argument.into();
        for options in argument.into_groups()? {
            rolls.push(DieGroupResult::roll(options, source)?);
        }
    }

    let total = saturating_sum(rolls.iter().map(|group| group.applied_total));
    let labelled = !rolls.is_empty() && rolls.iter().all(|g| g.custom_results.is_some());
    let result = rolls
        .iter()
        .flat_map(|group| match (&group.custom_results, labelled) {
            (Some(labels), true) => labels.clone(),
            _ => group.rolls.iter().map(i64::to_string).collect(),
        })
        .collect();

    tracing::debug!("rolled {} groups for a total of {total}", rolls.len());
    Ok(AggregateResult {
        rolls,
        result,
        total,
    })
}

/// Roll a single argument with the thread-local RNG.
///
/// # Errors
/// See [`roll_notation`].
pub fn roll(argument: impl Into<RollArgument>) -> DiceResult<AggregateResult> {
    roll_notation([argument.into()], &mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedSource;
    use crate::error::DiceError;
    use crate::options::{Modifiers, ReplaceRule, RollOptions};

    #[test]
    fn groups_sum_with_their_sign() {
        let mut source = ScriptedSource::new([5, 2, 3]);
        let result = roll_notation(["2d6-1d4"], &mut source).unwrap();
        assert_eq!(result.rolls.len(), 2);
        assert_eq!(result.rolls[0].applied_total, 7);
        assert_eq!(result.rolls[1].applied_total, -3);
        assert_eq!(result.total, 4);
        assert_eq!(result.result, vec!["5", "2", "3"]);
    }

    #[test]
    fn flat_modifiers_count_toward_the_total() {
        let mut source = ScriptedSource::new([4, 4]);
        let result = roll_notation(["2d6+1d4-3"], &mut source).unwrap();
        assert_eq!(result.rolls[1].total, 1);
        assert_eq!(result.total, 9);
    }

    #[test]
    fn mixed_arguments() {
        let mut source = ScriptedSource::new([10, 3]);
        let arguments: Vec<RollArgument> = vec![20u32.into(), RollOptions::new(6).into()];
        let result = roll_notation(arguments, &mut source).unwrap();
        assert_eq!(result.total, 13);
    }

    #[test]
    fn labels_only_when_every_group_is_labelled() {
        let coin = || RollArgument::from(vec!["heads".to_string(), "tails".to_string()]);

        let mut source = ScriptedSource::new([2, 1]);
        let result = roll_notation([coin(), coin()], &mut source).unwrap();
        assert_eq!(result.result, vec!["tails", "heads"]);

        let mut source = ScriptedSource::new([2, 5]);
        let result = roll_notation([coin(), RollArgument::from(6u32)], &mut source).unwrap();
        assert_eq!(result.result, vec!["2", "5"]);
    }

    #[test]
    fn first_bad_argument_fails_the_roll() {
        let mut source = ScriptedSource::new([1]);
        assert!(matches!(
            roll_notation(["1d6", "banana"], &mut source),
            Err(DiceError::MalformedNotation { .. })
        ));
    }

    #[test]
    fn thread_rng_convenience() {
        let result = roll("3d6").unwrap();
        assert_eq!(result.rolls[0].rolls.len(), 3);
        assert!((3..=18).contains(&result.total));
    }

    #[test]
    fn huge_replacements_saturate_the_total() {
        let options = RollOptions::new(6).quantity(2).modifiers(Modifiers {
            replace: Some(vec![ReplaceRule::exact(1, i64::MAX)]),
            ..Modifiers::default()
        });
        let mut source = ScriptedSource::new([1, 1]);
        let result = roll_notation([options.clone(), options.subtract()], &mut source).unwrap();
        assert_eq!(result.rolls[0].total, i64::MAX);
        assert_eq!(result.rolls[1].applied_total, -i64::MAX);
        assert_eq!(result.total, 0);
    }
}
