//! Quote line lookup
//!
//! Control lines refer to the nearest quote line around them. Both lookups
//! return `None` when the document boundary is reached without a match, so
//! callers decide what a missing quote means for their block.

use super::document::SourceLine;

/// Nearest quote line at a position `<= index - skip`, scanning backward
///
/// Control lines use `skip = 1`, which makes the previous line the first candidate.
#[must_use]
pub fn find_quote_before<'a>(
    lines: &'a [SourceLine],
    index: usize,
    skip: usize,
    quote_marker: &str,
) -> Option<&'a SourceLine> {
    let start = index.checked_sub(skip)?;
    let end = start.checked_add(1)?.min(lines.len());
    lines[..end]
        .iter()
        .rev()
        .find(|line| line.starts_with(quote_marker))
}

/// Nearest quote line at a position `>= index + skip`, scanning forward
#[must_use]
pub fn find_quote_after<'a>(
    lines: &'a [SourceLine],
    index: usize,
    skip: usize,
    quote_marker: &str,
) -> Option<&'a SourceLine> {
    let start = index.checked_add(skip)?;
    lines
        .get(start..)?
        .iter()
        .find(|line| line.starts_with(quote_marker))
}

/// Text of a quote line without its marker
///
/// Everything after the first occurrence of the marker's visible part
/// (`">"` for `"> "`) is kept and trimmed. Returns an empty string when
/// the marker does not occur at all.
#[must_use]
pub fn strip_quote<'a>(line: &'a str, quote_marker: &str) -> &'a str {
    let token = quote_marker.trim();
    if token.is_empty() {
        return line.trim();
    }
    line.split_once(token).map_or("", |(_, rest)| rest.trim())
}
