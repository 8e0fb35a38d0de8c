//! Rendering roll options back into notation and plain English.

use std::fmt::Write;

use super::lexer::is_dice_notation;
use crate::error::{DiceError, DiceResult};
use crate::options::{Arithmetic, Bound, Modifier, ReplaceFrom, ReplaceRule, RollOptions, Unique};

/// Render `options` as canonical notation, e.g. `"4d6H!+2"`.
///
/// Modifiers are written in pipeline order. Face labels cannot be written
/// in notation, so labelled dice render with their face count as sides.
/// Modifiers that do nothing (an empty bound, `explode: false`) are omitted.
///
/// # Errors
/// Returns [`DiceError::RegenerationMismatch`] if the rendered string does not
/// lex as valid notation, e.g. because a bound holds a negative value.
pub fn to_notation(options: &RollOptions) -> DiceResult<String> {
    let mut notation = String::new();
    if options.arithmetic == Arithmetic::Subtract {
        notation.push('-');
    }
    let _ = write!(notation, "{}d{}", options.quantity, options.side_count());

    for modifier in options.modifiers.iter() {
        notation.push_str(&modifier_notation(&modifier));
    }

    if is_dice_notation(&notation) {
        Ok(notation)
    } else {
        Err(DiceError::RegenerationMismatch { notation })
    }
}

fn modifier_notation(modifier: &Modifier) -> String {
    match modifier {
        Modifier::Cap(bound) if !bound.is_empty() => format!("C{{{}}}", bound_items(bound)),
        Modifier::Cap(_) => String::new(),
        Modifier::Drop(drop) => {
            let mut out = String::new();
            if let Some(n) = drop.highest {
                out.push_str(&count_token('H', n));
            }
            if let Some(n) = drop.lowest {
                out.push_str(&count_token('L', n));
            }
            if !drop.bound.is_empty() {
                let _ = write!(out, "D{{{}}}", bound_items(&drop.bound));
            }
            out
        }
        Modifier::Reroll(reroll) if !reroll.bound.is_empty() => {
            let max = reroll.max.map(|n| n.to_string()).unwrap_or_default();
            format!("R{{{}}}{max}", bound_items(&reroll.bound))
        }
        Modifier::Reroll(_) => String::new(),
        Modifier::Explode(true) => "!".to_string(),
        Modifier::Explode(false) => String::new(),
        Modifier::Unique(Unique::Enabled(enabled)) => {
            if *enabled { "U".to_string() } else { String::new() }
        }
        Modifier::Unique(Unique::Except { not_unique }) if not_unique.is_empty() => {
            "U".to_string()
        }
        Modifier::Unique(Unique::Except { not_unique }) => format!("U{{{}}}", join(not_unique)),
        Modifier::Replace(rules) => {
            let items: Vec<String> = rules.iter().flat_map(replace_items).collect();
            if items.is_empty() {
                String::new()
            } else {
                format!("V{{{}}}", items.join(","))
            }
        }
        Modifier::Plus(n) => format!("+{n}"),
        Modifier::Minus(n) => format!("-{n}"),
    }
}

fn count_token(letter: char, n: u32) -> String {
    if n == 1 {
        letter.to_string()
    } else {
        format!("{letter}{n}")
    }
}

fn bound_items(bound: &Bound) -> String {
    let mut items = Vec::new();
    if let Some(gt) = bound.greater_than {
        items.push(format!(">{gt}"));
    }
    if let Some(lt) = bound.less_than {
        items.push(format!("<{lt}"));
    }
    items.extend(bound.exact.iter().map(i64::to_string));
    items.join(",")
}

fn replace_items(rule: &ReplaceRule) -> Vec<String> {
    let to = rule.to;
    match &rule.from {
        ReplaceFrom::Exact(from) => vec![format!("{from}={to}")],
        ReplaceFrom::Matching(bound) => {
            let mut items = Vec::new();
            if let Some(gt) = bound.greater_than {
                items.push(format!(">{gt}={to}"));
            }
            if let Some(lt) = bound.less_than {
                items.push(format!("<{lt}={to}"));
            }
            items.extend(bound.exact.iter().map(|v| format!("{v}={to}")));
            items
        }
    }
}

fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Describe `options` as plain-English clauses.
///
/// The first clause names the dice; each active modifier adds one clause
/// per criterion, in pipeline order. Subtracting groups end with
/// `"and Subtract the result"`.
pub fn to_description(options: &RollOptions) -> Vec<String> {
    let mut clauses = vec![base_clause(options)];
    for modifier in options.modifiers.iter() {
        clauses.extend(modifier_clauses(&modifier));
    }
    if options.arithmetic == Arithmetic::Subtract {
        clauses.push("and Subtract the result".to_string());
    }
    clauses
}

fn base_clause(options: &RollOptions) -> String {
    match options.sides.faces() {
        Some(labels) => format!(
            "Roll {} dice with the following sides: ({})",
            options.quantity,
            labels.join(", ")
        ),
        None if options.quantity == 1 => {
            format!("Roll 1 {}-sided die", options.side_count())
        }
        None => format!(
            "Roll {} {}-sided dice",
            options.quantity,
            options.side_count()
        ),
    }
}

fn modifier_clauses(modifier: &Modifier) -> Vec<String> {
    match modifier {
        Modifier::Cap(bound) => {
            let mut clauses = Vec::new();
            if let Some(gt) = bound.greater_than {
                clauses.push(format!("No Rolls greater than [{gt}]"));
            }
            if let Some(lt) = bound.less_than {
                clauses.push(format!("No Rolls less than [{lt}]"));
            }
            clauses
        }
        Modifier::Drop(drop) => {
            let mut clauses = Vec::new();
            if let Some(n) = drop.highest {
                clauses.push(ranked("Drop highest", n));
            }
            if let Some(n) = drop.lowest {
                clauses.push(ranked("Drop lowest", n));
            }
            if !drop.bound.exact.is_empty() {
                clauses.push(format!("Drop {}", values(&drop.bound.exact)));
            }
            if let Some(gt) = drop.bound.greater_than {
                clauses.push(format!("Drop greater than [{gt}]"));
            }
            if let Some(lt) = drop.bound.less_than {
                clauses.push(format!("Drop less than [{lt}]"));
            }
            clauses
        }
        Modifier::Reroll(reroll) => {
            let criteria = criteria(&reroll.bound);
            if criteria.is_empty() {
                return Vec::new();
            }
            let mut clause = format!("Reroll {}", and_join(&criteria));
            if let Some(max) = reroll.max {
                let _ = write!(clause, " (up to {max} {})", plural(max, "time", "times"));
            }
            vec![clause]
        }
        Modifier::Explode(true) => vec!["Exploding Dice".to_string()],
        Modifier::Explode(false) => Vec::new(),
        Modifier::Unique(unique) => match unique {
            Unique::Enabled(false) => Vec::new(),
            Unique::Enabled(true) => vec!["No Duplicate Rolls".to_string()],
            Unique::Except { not_unique } if not_unique.is_empty() => {
                vec!["No Duplicate Rolls".to_string()]
            }
            Unique::Except { not_unique } => {
                vec![format!("No Duplicates (except {})", values(not_unique))]
            }
        },
        Modifier::Replace(rules) => rules
            .iter()
            .flat_map(|rule| match &rule.from {
                ReplaceFrom::Exact(from) => vec![format!("Replace [{from}] with [{}]", rule.to)],
                ReplaceFrom::Matching(bound) => criteria(bound)
                    .into_iter()
                    .map(|c| format!("Replace {c} with [{}]", rule.to))
                    .collect(),
            })
            .collect(),
        Modifier::Plus(n) => vec![format!("Add {n}")],
        Modifier::Minus(n) => vec![format!("Subtract {n}")],
    }
}

fn ranked(prefix: &str, n: u32) -> String {
    if n == 1 {
        prefix.to_string()
    } else {
        format!("{prefix} {n}")
    }
}

/// Bound criteria as phrases: exact values first, then comparisons.
fn criteria(bound: &Bound) -> Vec<String> {
    let mut phrases = Vec::new();
    if !bound.exact.is_empty() {
        phrases.push(values(&bound.exact));
    }
    if let Some(gt) = bound.greater_than {
        phrases.push(format!("greater than [{gt}]"));
    }
    if let Some(lt) = bound.less_than {
        phrases.push(format!("less than [{lt}]"));
    }
    phrases
}

fn values(values: &[i64]) -> String {
    let bracketed: Vec<String> = values.iter().map(|v| format!("[{v}]")).collect();
    and_join(&bracketed)
}

/// `a`, `a and b`, `a, b and c`.
fn and_join(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

fn plural(n: u32, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 { one } else { many }
}
