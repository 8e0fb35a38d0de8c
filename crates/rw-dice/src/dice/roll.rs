//! Roll results for single groups.

use serde::{Deserialize, Serialize};

use crate::modifiers::ModifierLog;
use crate::options::RollOptions;

/// The outcome of rolling one group through the modifier pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollResult {
    /// Values as first rolled.
    pub initial_rolls: Vec<i64>,
    /// Values after every modifier.
    pub modified_rolls: Vec<i64>,
    /// Sum of `modified_rolls` plus flat modifiers.
    pub total: i64,
    /// One entry per applied modifier, in pipeline order.
    pub logs: Vec<ModifierLog>,
}

/// A rolled group with everything needed to display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DieGroupResult {
    /// The options the group was rolled with.
    pub parameters: RollOptions,
    /// Final die values.
    pub rolls: Vec<i64>,
    /// Die values before modifiers.
    pub initial_rolls: Vec<i64>,
    /// Face labels for the final values, for labelled dice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_results: Option<Vec<String>>,
    /// `total`, negated for subtracting groups.
    pub applied_total: i64,
    /// Sum of the final values plus flat modifiers.
    pub total: i64,
    /// Plain-English description of the group.
    pub description: String,
    /// Modifier change logs.
    pub logs: Vec<ModifierLog>,
}

impl DieGroupResult {
    /// Final values as display strings: face labels for labelled dice,
    /// numbers otherwise.
    pub fn display_values(&self) -> Vec<String> {
        match &self.custom_results {
            Some(labels) => labels.clone(),
            None => self.rolls.iter().map(i64::to_string).collect(),
        }
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.modified_rolls.iter().map(i64::to_string).collect();
        write!(f, "[{}] = {}", values.join(", "), self.total)
    }
}
