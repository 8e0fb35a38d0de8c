//! Structured roll specifications.
//!
//! A [`RollOptions`] describes one dice group: how many dice, how many
//! sides (or which face labels), whether the group adds to or subtracts
//! from the grand total, and which [`Modifiers`] apply to it.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DiceError, DiceResult};

/// The most dice a single group may roll before modifiers add more.
pub const MAX_QUANTITY: u32 = 10_000;

/// Whether a group's total is added to or subtracted from the grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Arithmetic {
    /// The group counts towards the total.
    #[default]
    Add,
    /// The group counts against the total.
    Subtract,
}

impl Arithmetic {
    /// `1` for [`Arithmetic::Add`], `-1` for [`Arithmetic::Subtract`].
    pub fn sign(self) -> i64 {
        match self {
            Self::Add => 1,
            Self::Subtract => -1,
        }
    }
}

impl std::fmt::Display for Arithmetic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Subtract => write!(f, "subtract"),
        }
    }
}

/// The faces of a die: a plain side count or an ordered list of labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sides {
    /// A numbered die with faces `1..=n`.
    Numeric(u32),
    /// A die whose faces carry labels; face `n` shows `labels[n - 1]`.
    Faces(Vec<String>),
}

impl Sides {
    /// Number of faces on the die.
    pub fn count(&self) -> u32 {
        match self {
            Self::Numeric(n) => *n,
            Self::Faces(labels) => u32::try_from(labels.len()).unwrap_or(u32::MAX),
        }
    }

    /// The face labels, if this is a labelled die.
    pub fn faces(&self) -> Option<&[String]> {
        match self {
            Self::Numeric(_) => None,
            Self::Faces(labels) => Some(labels),
        }
    }

    /// The label shown for a rolled value, if the die is labelled and the
    /// value lands on a face.
    pub fn label(&self, value: i64) -> Option<&str> {
        let index = usize::try_from(value.checked_sub(1)?).ok()?;
        self.faces()?.get(index).map(String::as_str)
    }
}

/// A value predicate: greater than, less than, or one of a set of values.
///
/// A value matches when any populated criterion matches. An empty bound
/// matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bound {
    /// Matches values strictly greater than this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than: Option<i64>,
    /// Matches values strictly less than this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than: Option<i64>,
    /// Matches these exact values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exact: Vec<i64>,
}

impl Bound {
    /// A bound matching values greater than `n`.
    pub fn greater_than(n: i64) -> Self {
        Self {
            greater_than: Some(n),
            ..Self::default()
        }
    }

    /// A bound matching values less than `n`.
    pub fn less_than(n: i64) -> Self {
        Self {
            less_than: Some(n),
            ..Self::default()
        }
    }

    /// A bound matching exactly the given values.
    pub fn exact(values: impl Into<Vec<i64>>) -> Self {
        Self {
            exact: values.into(),
            ..Self::default()
        }
    }

    /// True if no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.greater_than.is_none() && self.less_than.is_none() && self.exact.is_empty()
    }

    /// True if `value` satisfies any criterion.
    pub fn matches(&self, value: i64) -> bool {
        self.greater_than.is_some_and(|gt| value > gt)
            || self.less_than.is_some_and(|lt| value < lt)
            || self.exact.contains(&value)
    }
}

/// Which dice to remove from a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropSpec {
    /// Values matching this bound are removed first.
    #[serde(flatten)]
    pub bound: Bound,
    /// Remove this many of the highest remaining dice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest: Option<u32>,
    /// Remove this many of the lowest remaining dice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowest: Option<u32>,
}

impl DropSpec {
    /// Drop the `n` highest dice.
    pub fn highest(n: u32) -> Self {
        Self {
            highest: Some(n),
            ..Self::default()
        }
    }

    /// Drop the `n` lowest dice.
    pub fn lowest(n: u32) -> Self {
        Self {
            lowest: Some(n),
            ..Self::default()
        }
    }
}

/// Which dice to reroll, and how many positions may be rerolled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RerollSpec {
    /// Values matching this bound are rerolled.
    #[serde(flatten)]
    pub bound: Bound,
    /// Maximum number of dice that may be rerolled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

/// Uniqueness requirement for a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Unique {
    /// All values must differ when `true`; `false` disables the modifier.
    Enabled(bool),
    /// All values must differ, except these which may repeat.
    Except {
        /// Values allowed to appear more than once.
        #[serde(rename = "notUnique")]
        not_unique: Vec<i64>,
    },
}

impl Unique {
    /// True if the modifier does anything.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Enabled(false))
    }

    /// Values exempt from the uniqueness requirement.
    pub fn allowed_repeats(&self) -> &[i64] {
        match self {
            Self::Enabled(_) => &[],
            Self::Except { not_unique } => not_unique,
        }
    }
}

/// What a replace rule matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplaceFrom {
    /// A single value.
    Exact(i64),
    /// Every value matching the bound.
    Matching(Bound),
}

/// Substitutes matching values with a constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplaceRule {
    /// The values to replace.
    pub from: ReplaceFrom,
    /// The replacement value.
    pub to: i64,
}

impl ReplaceRule {
    /// Replace one exact value.
    pub fn exact(from: i64, to: i64) -> Self {
        Self {
            from: ReplaceFrom::Exact(from),
            to,
        }
    }

    /// Replace every value matching `bound`.
    pub fn matching(bound: Bound, to: i64) -> Self {
        Self {
            from: ReplaceFrom::Matching(bound),
            to,
        }
    }
}

/// The modifiers attached to a group, at most one of each kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifiers {
    /// Clamp values into a range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap: Option<Bound>,
    /// Remove dice by value or rank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop: Option<DropSpec>,
    /// Reroll matching dice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reroll: Option<RerollSpec>,
    /// Roll an extra die for every maximum face.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,
    /// Force distinct values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<Unique>,
    /// Substitute values.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "one_or_many"
    )]
    pub replace: Option<Vec<ReplaceRule>>,
    /// Flat amount added to the total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plus: Option<u32>,
    /// Flat amount subtracted from the total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minus: Option<u32>,
}

impl Modifiers {
    /// True if no modifier is present.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// The present modifiers in pipeline order: cap, drop, reroll, explode,
    /// unique, replace, plus, minus.
    pub fn iter(&self) -> impl Iterator<Item = Modifier> {
        [
            self.cap.clone().map(Modifier::Cap),
            self.drop.clone().map(Modifier::Drop),
            self.reroll.clone().map(Modifier::Reroll),
            self.explode.map(Modifier::Explode),
            self.unique.clone().map(Modifier::Unique),
            self.replace.clone().map(Modifier::Replace),
            self.plus.map(Modifier::Plus),
            self.minus.map(Modifier::Minus),
        ]
        .into_iter()
        .flatten()
    }
}

/// A single modifier with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Modifier {
    /// Clamp values into a range.
    Cap(Bound),
    /// Remove dice by value or rank.
    Drop(DropSpec),
    /// Reroll matching dice.
    Reroll(RerollSpec),
    /// Roll an extra die for every maximum face.
    Explode(bool),
    /// Force distinct values.
    Unique(Unique),
    /// Substitute values.
    Replace(Vec<ReplaceRule>),
    /// Flat amount added to the total.
    Plus(u32),
    /// Flat amount subtracted from the total.
    Minus(u32),
}

impl Modifier {
    /// The modifier's name as used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cap(_) => "cap",
            Self::Drop(_) => "drop",
            Self::Reroll(_) => "reroll",
            Self::Explode(_) => "explode",
            Self::Unique(_) => "unique",
            Self::Replace(_) => "replace",
            Self::Plus(_) => "plus",
            Self::Minus(_) => "minus",
        }
    }
}

/// One dice group: quantity, sides, modifiers, and sign.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollOptions {
    /// Number of dice rolled.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Die faces.
    pub sides: Sides,
    /// Modifiers applied after rolling.
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Whether the group adds to or subtracts from the grand total.
    #[serde(default)]
    pub arithmetic: Arithmetic,
    /// Caller-supplied or parser-assigned label for the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// The original input the group was built from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl RollOptions {
    /// One die with `sides` numbered faces.
    pub fn new(sides: u32) -> Self {
        Self {
            quantity: 1,
            sides: Sides::Numeric(sides),
            modifiers: Modifiers::default(),
            arithmetic: Arithmetic::Add,
            key: None,
            argument: None,
        }
    }

    /// One die with the given face labels.
    pub fn faces<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        Self {
            sides: Sides::Faces(labels.into_iter().map(Into::into).collect()),
            ..Self::new(0)
        }
    }

    /// Set the number of dice.
    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the modifiers.
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Make the group subtract from the grand total.
    pub fn subtract(mut self) -> Self {
        self.arithmetic = Arithmetic::Subtract;
        self
    }

    /// Set the group label.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Number of faces on each die.
    pub fn side_count(&self) -> u32 {
        self.sides.count()
    }

    /// Reject options that cannot be rolled.
    ///
    /// # Errors
    /// Returns [`DiceError::InvalidOptions`] for zero sides, an empty face
    /// list, or more than [`MAX_QUANTITY`] dice.
    pub fn check(&self) -> DiceResult<()> {
        if self.quantity > MAX_QUANTITY {
            return Err(DiceError::InvalidOptions(format!(
                "cannot roll {} dice, the limit is {MAX_QUANTITY}",
                self.quantity
            )));
        }
        match &self.sides {
            Sides::Numeric(0) => Err(DiceError::InvalidOptions(
                "a die needs at least one side".to_string(),
            )),
            Sides::Faces(labels) if labels.is_empty() => Err(DiceError::InvalidOptions(
                "a labelled die needs at least one face".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Accepts either a single replace rule or a list of them.
fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<ReplaceRule>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(ReplaceRule),
        Many(Vec<ReplaceRule>),
    }

    Ok(
        Option::<OneOrMany>::deserialize(deserializer)?.map(|rules| match rules {
            OneOrMany::One(rule) => vec![rule],
            OneOrMany::Many(rules) => rules,
        }),
    )
}
