//! Dice notation: lexing, parsing, and rendering.
//!
//! A notation string such as `"4d6H!+2"` is one or more groups, each a
//! `NdS` base token followed by modifier tokens. Whitespace is ignored.

pub mod generate;
pub mod lexer;
pub mod parser;
#[cfg(test)]
pub(crate) mod strategies;

pub use generate::{to_description, to_notation};
pub use lexer::{LexError, Token, TokenKind, is_dice_notation, lex, tokenize};
pub use parser::{parse_notation, parse_single_group};
