//! Substitute values.

use super::cap::cap;
use crate::options::{ReplaceFrom, ReplaceRule};

/// Apply each rule in order over the whole sequence.
pub fn replace(rolls: Vec<i64>, rules: &[ReplaceRule]) -> Vec<i64> {
    rules.iter().fold(rolls, |rolls, rule| match &rule.from {
        ReplaceFrom::Exact(from) => rolls
            .into_iter()
            .map(|value| if value == *from { rule.to } else { value })
            .collect(),
        ReplaceFrom::Matching(bound) => cap(rolls, bound, Some(rule.to))
            .into_iter()
            .map(|value| {
                if bound.exact.contains(&value) {
                    rule.to
                } else {
                    value
                }
            })
            .collect(),
    })
}
