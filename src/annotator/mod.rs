pub mod lines;

use crate::{Misspelling, Result, ScribensError};

/// Annotate `text` with every misspelling, each followed by ` {correction}`.
///
/// Insertions lengthen their line, so corrections are applied from the
/// highest end position to the lowest: offsets still to be processed always
/// point at text that has not moved yet.
pub fn annotate(text: &str, misspellings: &[Misspelling]) -> Result<String> {
    let mut ordered: Vec<&Misspelling> = misspellings.iter().collect();
    ordered.sort_by(|a, b| b.span.end.cmp(&a.span.end));

    ordered
        .into_iter()
        .try_fold(text.to_string(), |working, misspelling| {
            apply_one(&working, misspelling)
        })
}

/// Insert the annotation of a single misspelling into `text`.
pub fn apply_one(text: &str, misspelling: &Misspelling) -> Result<String> {
    let line = lines::get_line(text, misspelling.line)?;
    let line_len = lines::utf16_len(line);
    let span = misspelling.span;

    let out_of_bounds = ScribensError::SpanOutOfBounds {
        line: misspelling.line,
        end: span.end,
        line_len,
    };
    if span.start > span.end {
        return Err(out_of_bounds);
    }

    let insertion = format!(" {{{}}}", display_text(misspelling));
    let corrected = lines::insert_after(line, span.end, &insertion).ok_or(out_of_bounds)?;
    let result = lines::replace_line(text, misspelling.line, &corrected)?;

    log::debug!(
        "line {} [{}..{}]: inserted {:?}",
        misspelling.line,
        span.start,
        span.end,
        insertion.trim_start()
    );

    Ok(result)
}

/// Text shown inside the braces: the suggestion when it is not blank,
/// otherwise the explanation.
pub fn display_text(misspelling: &Misspelling) -> String {
    match misspelling.suggestion.as_deref() {
        Some(suggestion) if !suggestion.trim().is_empty() => suggestion.to_lowercase(),
        _ => misspelling.annotation.to_lowercase(),
    }
}
