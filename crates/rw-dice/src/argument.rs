//! Every form of input the roller accepts.

use serde::{Deserialize, Serialize};

use crate::error::DiceResult;
use crate::notation::parse_notation;
use crate::options::RollOptions;

/// One argument to [`crate::roll_notation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RollArgument {
    /// A bare number of sides: `20` rolls `1d20`.
    Sides(u32),
    /// Face labels for a single die.
    Faces(Vec<String>),
    /// Structured options.
    Options(RollOptions),
    /// Dice notation, or a numeric string treated like [`RollArgument::Sides`].
    Notation(String),
}

impl RollArgument {
    /// Expand the argument into the groups it describes.
    ///
    /// # Errors
    /// Returns [`crate::DiceError::MalformedNotation`] for invalid notation.
    pub fn into_groups(self) -> DiceResult<Vec<RollOptions>> {
        match self {
            Self::Sides(sides) => Ok(vec![numeric(sides, sides.to_string())]),
            Self::Faces(labels) => Ok(vec![RollOptions::faces(labels)]),
            Self::Options(options) => Ok(vec![options]),
            Self::Notation(text) => match text.trim().parse::<u32>() {
                Ok(sides) => Ok(vec![numeric(sides, text)]),
                Err(_) => parse_notation(&text),
            },
        }
    }
}

fn numeric(sides: u32, argument: String) -> RollOptions {
    let mut options = RollOptions::new(sides).key(format!("1d{sides}"));
    options.argument = Some(argument);
    options
}

impl From<&str> for RollArgument {
    fn from(text: &str) -> Self {
        Self::Notation(text.to_string())
    }
}

impl From<String> for RollArgument {
    fn from(text: String) -> Self {
        Self::Notation(text)
    }
}

impl From<u32> for RollArgument {
    fn from(sides: u32) -> Self {
        Self::Sides(sides)
    }
}

impl From<RollOptions> for RollArgument {
    fn from(options: RollOptions) -> Self {
        Self::Options(options)
    }
}

impl From<Vec<String>> for RollArgument {
    fn from(labels: Vec<String>) -> Self {
        Self::Faces(labels)
    }
}
