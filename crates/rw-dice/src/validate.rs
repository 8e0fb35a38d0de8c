//! Validate notation and describe what it would roll.

use serde::{Deserialize, Serialize};

use crate::notation::{parse_notation, to_description, to_notation};
use crate::options::RollOptions;

/// The outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    /// Whether the input parsed.
    pub valid: bool,
    /// The input as given.
    pub argument: String,
    /// Parsed groups.
    pub options: Vec<RollOptions>,
    /// Canonical notation per group.
    pub notation: Vec<String>,
    /// Description clauses per group.
    pub description: Vec<Vec<String>>,
}

impl Validation {
    fn invalid(argument: &str) -> Self {
        Self {
            valid: false,
            argument: argument.to_string(),
            options: Vec::new(),
            notation: Vec::new(),
            description: Vec::new(),
        }
    }
}

/// Parse `text` and report its groups, canonical notation, and descriptions.
///
/// Never fails: invalid input comes back with `valid: false`.
pub fn validate(text: &str) -> Validation {
    let Ok(options) = parse_notation(text) else {
        return Validation::invalid(text);
    };
    let notation: Result<Vec<String>, _> = options.iter().map(to_notation).collect();
    let Ok(notation) = notation else {
        return Validation::invalid(text);
    };
    let description = options.iter().map(to_description).collect();

    Validation {
        valid: true,
        argument: text.to_string(),
        options,
        notation,
        description,
    }
}
