use std::ops::Range;

use ariadne::{Color, Label, Report, ReportKind, Source};
use rw_dice::DiceError;

const SOURCE_NAME: &str = "<notation>";

/// Render a notation error with ariadne, pointing at the offending span.
///
/// Errors without a span render as nothing; the caller still prints the
/// error message itself.
pub fn render_dice_error(error: &DiceError) -> String {
    match error {
        DiceError::MalformedNotation {
            notation,
            span: Some(span),
        } => render(notation, span.clone(), "not valid dice notation"),
        _ => String::new(),
    }
}

/// Render one error report over `source`. `span` is in bytes.
pub fn render(source: &str, span: Range<usize>, label: &str) -> String {
    let span = char_span(source, span);
    let mut output = Vec::new();

    Report::build(ReportKind::Error, (SOURCE_NAME, span.clone()))
        .with_message("invalid dice notation")
        .with_label(
            Label::new((SOURCE_NAME, span))
                .with_message(label)
                .with_color(Color::Red),
        )
        .finish()
        .write((SOURCE_NAME, Source::from(source)), &mut output)
        .ok();

    String::from_utf8(output).unwrap_or_default()
}

/// ariadne counts characters, not bytes.
fn char_span(source: &str, span: Range<usize>) -> Range<usize> {
    let to_chars = |byte: usize| {
        source
            .get(..byte.min(source.len()))
            .map_or(0, |prefix| prefix.chars().count())
    };
    to_chars(span.start)..to_chars(span.end)
}
