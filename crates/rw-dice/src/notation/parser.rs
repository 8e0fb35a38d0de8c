//! Turning notation into roll options.

use std::ops::Range;

use super::lexer::{Token, TokenKind, compact, tokenize};
use crate::error::{DiceError, DiceResult};
use crate::options::{
    Arithmetic, Bound, DropSpec, Modifiers, ReplaceRule, RerollSpec, RollOptions, Unique,
};

/// Parse notation that may hold several groups, e.g. `"2d6+1d4-3"`.
///
/// Each dice token after the first starts a new group. The group boundary
/// is the nearest `+` or `-` between the previous dice token and this one
/// (a signed dice token is its own boundary); without a sign, the dice token
/// itself starts the group.
///
/// # Errors
/// Returns [`DiceError::MalformedNotation`] if the input is not valid notation.
pub fn parse_notation(text: &str) -> DiceResult<Vec<RollOptions>> {
    tokenize(text)?;
    let source = compact(text);
    let tokens = tokenize(&source)?;
    let dice: Vec<&Token> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Dice)
        .collect();

    if dice.len() <= 1 {
        return Ok(vec![parse_single_group(text)?]);
    }

    let mut starts = vec![0];
    for pair in dice.windows(2) {
        let (prev, token) = (pair[0], pair[1]);
        let start = if token.text.starts_with(['+', '-']) {
            token.span.start
        } else {
            source[prev.span.end..token.span.start]
                .rfind(['+', '-'])
                .map_or(token.span.start, |idx| prev.span.end + idx)
        };
        starts.push(start);
    }

    let mut groups = Vec::with_capacity(starts.len());
    for (idx, &start) in starts.iter().enumerate() {
        let end = starts.get(idx + 1).copied().unwrap_or(source.len());
        let mut group = parse_single_group(&source[start..end])?;
        group.argument = Some(text.to_string());
        groups.push(group);
    }
    Ok(groups)
}

/// Parse one dice group, e.g. `"4d6H1+2"`.
///
/// Only the first dice token is used. A negative quantity makes the group
/// subtract. Repeated `+n` and `-n` tokens accumulate; other repeated
/// modifiers merge, later tokens overriding earlier ones.
///
/// # Errors
/// Returns [`DiceError::MalformedNotation`] if the input is not valid notation
/// or a number does not fit.
pub fn parse_single_group(text: &str) -> DiceResult<RollOptions> {
    let tokens = tokenize(text)?;
    let mut options: Option<RollOptions> = None;
    let mut modifiers = Modifiers::default();

    for token in &tokens {
        match token.kind {
            TokenKind::Dice if options.is_none() => {
                options = Some(parse_dice(text, token)?);
            }
            TokenKind::Dice => {}
            _ => apply_token(text, token, &mut modifiers)?,
        }
    }

    let mut options = options.ok_or_else(|| malformed(text, None))?;
    options.modifiers = modifiers;
    options.key = Some(compact(text));
    options.argument = Some(text.to_string());
    Ok(options)
}

fn parse_dice(text: &str, token: &Token) -> DiceResult<RollOptions> {
    let (quantity, sides) = token
        .text
        .split_once(['d', 'D'])
        .ok_or_else(|| malformed(text, Some(token.span.clone())))?;
    let (arithmetic, quantity) = match quantity.strip_prefix('-') {
        Some(magnitude) => (Arithmetic::Subtract, magnitude),
        None => (Arithmetic::Add, quantity.trim_start_matches('+')),
    };
    let quantity: u32 = number(text, token, quantity)?;
    let sides: u32 = number(text, token, sides)?;

    Ok(RollOptions {
        quantity,
        arithmetic,
        ..RollOptions::new(sides)
    })
}

fn apply_token(text: &str, token: &Token, modifiers: &mut Modifiers) -> DiceResult<()> {
    let t = token.text.as_str();
    match token.kind {
        TokenKind::Dice => {}
        TokenKind::DropHighest => {
            let n = count_or_one(text, token, &t[1..])?;
            modifiers.drop.get_or_insert_with(DropSpec::default).highest = Some(n);
        }
        TokenKind::DropLowest => {
            let n = count_or_one(text, token, &t[1..])?;
            modifiers.drop.get_or_insert_with(DropSpec::default).lowest = Some(n);
        }
        TokenKind::DropFilter => {
            let bound = bound(text, token, brace_body(t))?;
            merge(
                &mut modifiers.drop.get_or_insert_with(DropSpec::default).bound,
                bound,
            );
        }
        TokenKind::Explode => modifiers.explode = Some(true),
        TokenKind::Unique => {
            modifiers.unique = Some(if t.len() == 1 {
                Unique::Enabled(true)
            } else {
                let not_unique = brace_body(t)
                    .split(',')
                    .map(|item| number(text, token, item))
                    .collect::<DiceResult<Vec<i64>>>()?;
                Unique::Except { not_unique }
            });
        }
        TokenKind::Replace => {
            let rules = brace_body(t)
                .split(',')
                .map(|item| replace_rule(text, token, item))
                .collect::<DiceResult<Vec<_>>>()?;
            modifiers.replace.get_or_insert_with(Vec::new).extend(rules);
        }
        TokenKind::Reroll => {
            let (spec, max) = t.split_at(t.rfind('}').map_or(t.len(), |close| close + 1));
            let reroll = modifiers.reroll.get_or_insert_with(RerollSpec::default);
            merge(&mut reroll.bound, bound(text, token, brace_body(spec))?);
            if !max.is_empty() {
                reroll.max = Some(number(text, token, max)?);
            }
        }
        TokenKind::Cap => {
            let bound = bound(text, token, brace_body(t))?;
            merge(modifiers.cap.get_or_insert_with(Bound::default), bound);
        }
        TokenKind::Plus => {
            let n: u32 = number(text, token, &t[1..])?;
            modifiers.plus = Some(modifiers.plus.unwrap_or(0).saturating_add(n));
        }
        TokenKind::Minus => {
            let n: u32 = number(text, token, &t[1..])?;
            modifiers.minus = Some(modifiers.minus.unwrap_or(0).saturating_add(n));
        }
    }
    Ok(())
}

/// The text between the first `{` and the last `}`.
fn brace_body(t: &str) -> &str {
    match (t.find('{'), t.rfind('}')) {
        (Some(open), Some(close)) if open < close => &t[open + 1..close],
        _ => "",
    }
}

fn bound(text: &str, token: &Token, body: &str) -> DiceResult<Bound> {
    let mut bound = Bound::default();
    for item in body.split(',').filter(|item| !item.is_empty()) {
        if let Some(n) = item.strip_prefix('>') {
            bound.greater_than = Some(number(text, token, n)?);
        } else if let Some(n) = item.strip_prefix('<') {
            bound.less_than = Some(number(text, token, n)?);
        } else {
            bound.exact.push(number(text, token, item)?);
        }
    }
    Ok(bound)
}

fn replace_rule(text: &str, token: &Token, item: &str) -> DiceResult<ReplaceRule> {
    let (from, to) = item
        .split_once('=')
        .ok_or_else(|| malformed(text, Some(token.span.clone())))?;
    let to = number(text, token, to)?;
    if from.starts_with(['>', '<']) {
        Ok(ReplaceRule::matching(bound(text, token, from)?, to))
    } else {
        Ok(ReplaceRule::exact(number(text, token, from)?, to))
    }
}

fn merge(into: &mut Bound, from: Bound) {
    if from.greater_than.is_some() {
        into.greater_than = from.greater_than;
    }
    if from.less_than.is_some() {
        into.less_than = from.less_than;
    }
    into.exact.extend(from.exact);
}

fn count_or_one(text: &str, token: &Token, digits: &str) -> DiceResult<u32> {
    if digits.is_empty() {
        Ok(1)
    } else {
        number(text, token, digits)
    }
}

fn number<T: std::str::FromStr>(text: &str, token: &Token, digits: &str) -> DiceResult<T> {
    digits
        .parse()
        .map_err(|_| malformed(text, Some(token.span.clone())))
}

fn malformed(text: &str, span: Option<Range<usize>>) -> DiceError {
    DiceError::MalformedNotation {
        notation: text.to_string(),
        span,
    }
}
