//! Error types for the dice engine.

/// Errors that can occur while parsing, rolling, or generating notation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DiceError {
    /// The input is not entirely composed of recognized notation tokens.
    #[error("malformed dice notation: {notation:?}")]
    MalformedNotation {
        /// The rejected input, as given.
        notation: String,
        /// Byte range of the first unrecognized input, if one was found.
        span: Option<std::ops::Range<usize>>,
    },

    /// A `unique` modifier was requested with more dice than faces.
    #[error("cannot roll {quantity} unique values on a {sides}-sided die")]
    UnsatisfiableUniqueness {
        /// Number of dice in the group.
        quantity: u32,
        /// Number of faces on each die.
        sides: u32,
    },

    /// A modifier that rolls new dice was applied without a die source.
    #[error("modifier '{modifier}' needs a die source but none was supplied")]
    MissingRollSource {
        /// Name of the modifier that needed to roll.
        modifier: &'static str,
    },

    /// Generated notation failed to validate against the lexicon.
    #[error("generated notation {notation:?} is not valid dice notation")]
    RegenerationMismatch {
        /// The notation that was produced.
        notation: String,
    },

    /// Structured roll options are unusable (zero sides, empty face list, too many dice).
    #[error("invalid roll options: {0}")]
    InvalidOptions(String),
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = DiceError::UnsatisfiableUniqueness {
            quantity: 7,
            sides: 6,
        };
        assert_eq!(
            err.to_string(),
            "cannot roll 7 unique values on a 6-sided die"
        );

        let err = DiceError::MalformedNotation {
            notation: "garbage".to_string(),
            span: Some(0..1),
        };
        assert_eq!(err.to_string(), "malformed dice notation: \"garbage\"");
    }
}
