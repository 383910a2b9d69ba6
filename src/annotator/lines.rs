// Line helpers for the annotator. Lines are split on '\n' only, so a '\r'
// stays part of its line and trailing empty lines survive a round trip.

use crate::{Result, ScribensError};

pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Return line `index` of `text`
pub fn get_line(text: &str, index: usize) -> Result<&str> {
    text.split('\n')
        .nth(index)
        .ok_or_else(|| ScribensError::LineOutOfRange {
            line: index,
            line_count: line_count(text),
        })
}

/// Replace line `index` of `text` with `new_line`
pub fn replace_line(text: &str, index: usize, new_line: &str) -> Result<String> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    let line_count = lines.len();

    let slot = lines
        .get_mut(index)
        .ok_or(ScribensError::LineOutOfRange {
            line: index,
            line_count,
        })?;
    *slot = new_line;

    Ok(lines.join("\n"))
}

/// Length of `line` in UTF-16 code units, the unit of service positions
pub fn utf16_len(line: &str) -> usize {
    line.encode_utf16().count()
}

/// Insert `insertion` in `line` after its first `index` UTF-16 code units.
///
/// The service counts positions the way Java strings do, so a character
/// outside the BMP (an emoji, say) counts twice. Returns `None` when `index`
/// is past the end of the line or falls inside a surrogate pair.
pub fn insert_after(line: &str, index: usize, insertion: &str) -> Option<String> {
    let byte_index = utf16_to_byte_offset(line, index)?;

    let mut result = String::with_capacity(line.len() + insertion.len());
    result.push_str(&line[..byte_index]);
    result.push_str(insertion);
    result.push_str(&line[byte_index..]);
    Some(result)
}

fn utf16_to_byte_offset(line: &str, index: usize) -> Option<usize> {
    let mut units = 0;
    for (offset, ch) in line.char_indices() {
        if units == index {
            return Some(offset);
        }
        if units > index {
            return None;
        }
        units += ch.len_utf16();
    }
    (units == index).then_some(line.len())
}
