//! The modifier pipeline.
//!
//! Modifiers run in a fixed order: cap, drop, reroll, explode, unique,
//! replace, plus, minus. Each step maps the current values to new values
//! and records a [`ModifierLog`] of what it added and removed.

pub mod cap;
pub mod drop;
pub mod explode;
pub mod reroll;
pub mod replace;
pub mod unique;

use serde::{Deserialize, Serialize};

use crate::dice::DieSource;
use crate::error::{DiceError, DiceResult};
use crate::options::{Modifier, RollOptions};

/// The running state of a roll as it passes through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollState {
    /// Current die values.
    pub rolls: Vec<i64>,
    /// Flat amount added to the sum of `rolls`.
    pub flat: i64,
}

impl RollState {
    /// The values plus the flat offset.
    ///
    /// Saturates at the `i64` bounds instead of overflowing.
    pub fn total(&self) -> i64 {
        saturating_sum(self.rolls.iter().copied()).saturating_add(self.flat)
    }
}

/// Sum `values`, saturating at the `i64` bounds.
pub(crate) fn saturating_sum(values: impl IntoIterator<Item = i64>) -> i64 {
    values.into_iter().fold(0, i64::saturating_add)
}

/// What one modifier step changed.
///
/// `added` and `removed` are a multiset difference between the values
/// entering and leaving the step, not a trace of individual operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierLog {
    /// Name of the modifier, e.g. `"drop"`.
    pub modifier: String,
    /// The modifier and its parameters.
    pub options: Modifier,
    /// Values present after the step but not before.
    pub added: Vec<i64>,
    /// Values present before the step but not after.
    pub removed: Vec<i64>,
}

impl ModifierLog {
    fn new(modifier: &Modifier, before: &[i64], after: &[i64]) -> Self {
        Self {
            modifier: modifier.name().to_string(),
            options: modifier.clone(),
            added: difference(after, before),
            removed: difference(before, after),
        }
    }
}

/// Values of `from` left over after removing one match per value of `other`.
fn difference(from: &[i64], other: &[i64]) -> Vec<i64> {
    let mut unmatched = other.to_vec();
    from.iter()
        .copied()
        .filter(|value| match unmatched.iter().position(|v| v == value) {
            Some(idx) => {
                unmatched.swap_remove(idx);
                false
            }
            None => true,
        })
        .collect()
}

/// Run every modifier of `options` over `rolls`.
///
/// `source` is only needed for reroll, explode, and unique.
///
/// # Errors
/// - [`DiceError::UnsatisfiableUniqueness`] if `unique` is requested with more
///   dice than sides.
/// - [`DiceError::MissingRollSource`] if a modifier needs to roll and `source`
///   is `None`.
pub fn apply_modifiers(
    rolls: Vec<i64>,
    options: &RollOptions,
    mut source: Option<&mut (dyn DieSource + '_)>,
) -> DiceResult<(RollState, Vec<ModifierLog>)> {
    let mut state = RollState { rolls, flat: 0 };
    let mut logs = Vec::new();

    for modifier in options.modifiers.iter() {
        let before = state.rolls.clone();
        state = apply(state, &modifier, options, source.as_deref_mut())?;
        let log = ModifierLog::new(&modifier, &before, &state.rolls);
        tracing::debug!(
            "applied {}: added {:?}, removed {:?}",
            log.modifier,
            log.added,
            log.removed
        );
        logs.push(log);
    }

    Ok((state, logs))
}

fn apply(
    state: RollState,
    modifier: &Modifier,
    options: &RollOptions,
    source: Option<&mut (dyn DieSource + '_)>,
) -> DiceResult<RollState> {
    let RollState { rolls, flat } = state;
    let sides = options.side_count();

    let rolls = match modifier {
        Modifier::Cap(bound) => cap::cap(rolls, bound, None),
        Modifier::Drop(spec) => drop::drop(rolls, spec),
        Modifier::Reroll(spec) => reroll::reroll(rolls, spec, sides, require(source, modifier)?),
        Modifier::Explode(true) => explode::explode(rolls, sides, require(source, modifier)?),
        Modifier::Explode(false) => rolls,
        Modifier::Unique(spec) if spec.is_active() => {
            if options.quantity > sides {
                return Err(DiceError::UnsatisfiableUniqueness {
                    quantity: options.quantity,
                    sides,
                });
            }
            unique::unique(rolls, spec, sides, require(source, modifier)?)
        }
        Modifier::Unique(_) => rolls,
        Modifier::Replace(rules) => replace::replace(rolls, rules),
        Modifier::Plus(n) => {
            return Ok(RollState {
                rolls,
                flat: flat.saturating_add(i64::from(*n)),
            });
        }
        Modifier::Minus(n) => {
            return Ok(RollState {
                rolls,
                flat: flat.saturating_sub(i64::from(*n)),
            });
        }
    };

    Ok(RollState { rolls, flat })
}

fn require<'a, 'b>(
    source: Option<&'a mut (dyn DieSource + 'b)>,
    modifier: &Modifier,
) -> DiceResult<&'a mut (dyn DieSource + 'b)> {
    source.ok_or(DiceError::MissingRollSource {
        modifier: modifier.name(),
    })
}
