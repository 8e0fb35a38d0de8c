//! Dice-notation engine for Rollwerk.
//!
//! Parses notation such as `"4d6H!+2"` into structured roll options,
//! rolls them through a fixed modifier pipeline with an injected random
//! source, and renders options back into canonical notation and plain
//! English descriptions.

pub mod aggregate;
pub mod argument;
pub mod dice;
pub mod error;
pub mod modifiers;
pub mod notation;
pub mod options;
pub mod validate;

pub use aggregate::{AggregateResult, roll, roll_notation};
pub use argument::RollArgument;
pub use dice::{DieGroupResult, DieSource, RollResult, ScriptedSource, roll_group};
pub use error::{DiceError, DiceResult};
pub use modifiers::{ModifierLog, RollState, apply_modifiers};
pub use notation::{
    is_dice_notation, parse_notation, parse_single_group, to_description, to_notation,
};
pub use options::{
    Arithmetic, Bound, DropSpec, MAX_QUANTITY, Modifier, Modifiers, ReplaceFrom, ReplaceRule,
    RerollSpec, RollOptions, Sides, Unique,
};
pub use validate::{Validation, validate};
