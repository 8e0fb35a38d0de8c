//! Tokens of dice notation.

use logos::{Lexer, Logos};
use std::fmt;
use std::ops::Range;

use crate::error::{DiceError, DiceResult};

/// Token kinds of dice notation.
///
/// Every token is matched case-insensitively on its letter. Brace bodies
/// are comma-separated items of `[<>]?\d+`; replace items carry `=\d+`.
/// Whitespace is removed before lexing, so `"2d6 + 1"` and `"2d6+1"` lex
/// identically. Numbers must fit their field: counts (quantity, sides,
/// drop and reroll counts, flat modifiers) fit `u32`, values inside braces
/// fit `i64`. A token with an oversized number is a lex error.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Quantity and sides, e.g. `4d6`, `-2d4`, `+1D20`.
    #[regex(r"[+-]?[0-9]+[dD][0-9]+", counts_fit)]
    Dice,

    /// Drop the highest dice, e.g. `H`, `H2`.
    #[regex(r"[hH][0-9]*", counts_fit)]
    DropHighest,

    /// Drop the lowest dice, e.g. `L`, `L2`.
    #[regex(r"[lL][0-9]*", counts_fit)]
    DropLowest,

    /// Drop dice by value, e.g. `D{>5,<2,3}`.
    #[regex(r"[dD]\{[<>]?[0-9]+(,[<>]?[0-9]+)*\}", values_fit)]
    DropFilter,

    /// Exploding dice `!`.
    #[token("!")]
    Explode,

    /// Unique values, e.g. `U`, `U{5,6}`.
    #[regex(r"[uU](\{[0-9]+(,[0-9]+)*\})?", values_fit)]
    Unique,

    /// Replace values, e.g. `V{1=2,>18=20}`.
    #[regex(r"[vV]\{[<>]?[0-9]+=[0-9]+(,[<>]?[0-9]+=[0-9]+)*\}", values_fit)]
    Replace,

    /// Reroll values with an optional attempt cap, e.g. `R{<3}2`.
    #[regex(r"[rR]\{[<>]?[0-9]+(,[<>]?[0-9]+)*\}[0-9]*", reroll_fits)]
    Reroll,

    /// Cap values, e.g. `C{>5,<2}`.
    #[regex(r"[cC]\{[<>]?[0-9]+(,[<>]?[0-9]+)*\}", values_fit)]
    Cap,

    /// Flat addition, e.g. `+3`.
    #[regex(r"\+[0-9]+", counts_fit)]
    Plus,

    /// Flat subtraction, e.g. `-3`.
    #[regex(r"-[0-9]+", counts_fit)]
    Minus,
}

/// Every run of ASCII digits in `text` parses as `T`.
fn digits_fit<T: std::str::FromStr>(text: &str) -> bool {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .all(|run| run.parse::<T>().is_ok())
}

fn counts_fit(lex: &mut Lexer<'_, TokenKind>) -> bool {
    digits_fit::<u32>(lex.slice())
}

fn values_fit(lex: &mut Lexer<'_, TokenKind>) -> bool {
    digits_fit::<i64>(lex.slice())
}

fn reroll_fits(lex: &mut Lexer<'_, TokenKind>) -> bool {
    let slice = lex.slice();
    let (body, max) = slice.split_at(slice.rfind('}').map_or(slice.len(), |close| close + 1));
    digits_fit::<i64>(body) && digits_fit::<u32>(max)
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dice => "dice",
            Self::DropHighest => "drop highest",
            Self::DropLowest => "drop lowest",
            Self::DropFilter => "drop filter",
            Self::Explode => "explode",
            Self::Unique => "unique",
            Self::Replace => "replace",
            Self::Reroll => "reroll",
            Self::Cap => "cap",
            Self::Plus => "plus",
            Self::Minus => "minus",
        };
        write!(f, "{name}")
    }
}

/// A recognized token with its text and its byte span in the original input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The matched text, whitespace removed.
    pub text: String,
    /// Byte range in the original (uncompacted) input.
    pub span: Range<usize>,
}

/// An unrecognized stretch of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// Byte range of the erroneous input in the original source.
    pub span: Range<usize>,
    /// Human-readable description of the error.
    pub message: String,
}

/// Remove all whitespace from `source`.
pub fn compact(source: &str) -> String {
    source.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Lex `source` into notation tokens.
///
/// Whitespace is dropped before matching; spans in the returned tokens and
/// errors refer to `source` as given. Lexing continues past unrecognized
/// input so every stray character is reported.
pub fn lex(source: &str) -> (Vec<Token>, Vec<LexError>) {
    // Byte offset in `source` of every byte of the compacted text.
    let mut offsets = Vec::with_capacity(source.len());
    let mut text = String::with_capacity(source.len());
    for (idx, c) in source.char_indices().filter(|(_, c)| !c.is_whitespace()) {
        text.push(c);
        offsets.extend(std::iter::repeat_n(idx, c.len_utf8()));
    }

    let original = |range: Range<usize>| -> Range<usize> {
        let start = offsets.get(range.start).copied().unwrap_or(source.len());
        let end = match range.end.checked_sub(1).and_then(|last| offsets.get(last)) {
            Some(&last) => last + source[last..].chars().next().map_or(1, char::len_utf8),
            None => start,
        };
        start..end
    };

    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = TokenKind::lexer(&text);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                text: lexer.slice().to_string(),
                span: original(span),
            }),
            Err(()) => errors.push(LexError {
                message: format!("unexpected input: {:?}", lexer.slice()),
                span: original(span),
            }),
        }
    }

    (tokens, errors)
}

/// True if `text` is entirely made of notation tokens and names at least
/// one dice group.
pub fn is_dice_notation(text: &str) -> bool {
    let (tokens, errors) = lex(text);
    errors.is_empty() && tokens.iter().any(|t| t.kind == TokenKind::Dice)
}

/// Lex `text`, rejecting anything that is not valid notation.
///
/// # Errors
/// Returns [`DiceError::MalformedNotation`] if any input is unrecognized or
/// no dice group is present.
pub fn tokenize(text: &str) -> DiceResult<Vec<Token>> {
    let (tokens, errors) = lex(text);
    if let Some(error) = errors.first() {
        return Err(DiceError::MalformedNotation {
            notation: text.to_string(),
            span: Some(error.span.clone()),
        });
    }
    if !tokens.iter().any(|t| t.kind == TokenKind::Dice) {
        return Err(DiceError::MalformedNotation {
            notation: text.to_string(),
            span: None,
        });
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::generate::to_notation;
    use crate::notation::strategies::options_strategy;
    use proptest::prelude::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let (tokens, errors) = lex(source);
        assert!(errors.is_empty(), "errors: {errors:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lex_every_modifier() {
        assert_eq!(
            kinds("4d20H1L1D{>5,<2,3}!U{5,6}V{1=2,>18=20}R{<3}2C{>5}+3-1"),
            vec![
                TokenKind::Dice,
                TokenKind::DropHighest,
                TokenKind::DropLowest,
                TokenKind::DropFilter,
                TokenKind::Explode,
                TokenKind::Unique,
                TokenKind::Replace,
                TokenKind::Reroll,
                TokenKind::Cap,
                TokenKind::Plus,
                TokenKind::Minus,
            ]
        );
    }

    #[test]
    fn signed_dice_beats_flat_modifier() {
        assert_eq!(
            kinds("2d6+1d4-3"),
            vec![TokenKind::Dice, TokenKind::Dice, TokenKind::Minus]
        );
        assert_eq!(kinds("-2d4"), vec![TokenKind::Dice]);
    }

    #[test]
    fn case_insensitive_letters() {
        assert_eq!(
            kinds("4D6h2l"),
            vec![TokenKind::Dice, TokenKind::DropHighest, TokenKind::DropLowest]
        );
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(
            kinds(" 2d6 + 1 "),
            vec![TokenKind::Dice, TokenKind::Plus]
        );
    }

    #[test]
    fn spans_refer_to_original_input() {
        let (tokens, _) = lex("2d6 + 1");
        assert_eq!(tokens[0].span, 0..3);
        assert_eq!(tokens[1].span, 4..7);
        assert_eq!(tokens[1].text, "+1");
    }

    #[test]
    fn stray_characters_are_errors() {
        let (_, errors) = lex("2d6x");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].span, 3..4);
    }

    #[test]
    fn valid_notation() {
        for notation in [
            "2d6", "1d20+5", "4d6H1", "-2d4", "1d6!", "3d6U", "2d6R{<3}2", "4D20H1L1",
            "10d10D{>8,1}", "2d20C{>18,<3}", "3d6V{1=6}", "1d8U{1,2}", "2d6+1d4-3",
        ] {
            assert!(is_dice_notation(notation), "{notation} should be valid");
            assert!(
                !is_dice_notation(&format!("{notation}x")),
                "{notation}x should be invalid"
            );
        }
    }

    #[test]
    fn invalid_notation() {
        for notation in ["", "garbage", "d6", "+5", "2d", "2d6D{}", "2d6R{}", "2d6V{1}", "H1"] {
            assert!(!is_dice_notation(notation), "{notation:?} should be invalid");
        }
    }

    #[test]
    fn tokenize_reports_first_error() {
        let err = tokenize("2d6?+1").unwrap_err();
        assert_eq!(
            err,
            DiceError::MalformedNotation {
                notation: "2d6?+1".to_string(),
                span: Some(3..4),
            }
        );
        assert!(matches!(
            tokenize("+5"),
            Err(DiceError::MalformedNotation { span: None, .. })
        ));
    }

    #[test]
    fn oversized_numbers_are_not_notation() {
        for notation in [
            "1d6C{>99999999999999999999}",
            "4294967296d6",
            "1d4294967296",
            "4d6H4294967296",
            "1d6+4294967296",
            "2d6R{1}4294967296",
            "1d6V{1=99999999999999999999}",
        ] {
            assert!(!is_dice_notation(notation), "{notation} should be invalid");
        }
        assert!(is_dice_notation("4294967295d6"));
        assert!(is_dice_notation("1d6C{>9223372036854775807}"));
        assert!(is_dice_notation("2d6R{9223372036854775807}4294967295"));

        let err = tokenize("1d6C{>99999999999999999999}").unwrap_err();
        assert!(matches!(
            err,
            DiceError::MalformedNotation { span: Some(span), .. } if span.start == 3
        ));
    }

    proptest! {
        #[test]
        fn generated_notation_is_valid_until_a_stray_char(options in options_strategy()) {
            let notation = to_notation(&options).unwrap();
            prop_assert!(is_dice_notation(&notation));
            let stray = format!("{notation}x");
            prop_assert!(!is_dice_notation(&stray));
        }
    }
}
