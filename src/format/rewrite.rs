//! Output blocks for classified lines
//!
//! Turns a [`Classification`] into the text it produces. Control lines pull
//! their content from the nearest quote line; when that quote is missing the
//! line yields a [`LineError`] instead of a block.

use crate::error::{Direction, LineError};
use crate::parser::{find_quote_after, find_quote_before, strip_quote, MarkerPatterns, SourceLine};

use super::classify::Classification;

/// Separator closing every emitted block
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Opening of an escaped comment block
const COMMENT_OPEN: &str = "%%%";

/// Open checklist item prefix
const TASK_OPEN: &str = "- [ ]";

/// Heading / hashtag character in the output
const HASH: char = '#';

/// Result of rewriting one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Text to append to the output, separator included
    Block(String),
    /// Keyword for the metadata line
    Keyword(String),
    /// Line produces nothing
    Skip,
}

/// Rewrite the line at `index` according to its classification
pub fn rewrite_line(
    lines: &[SourceLine],
    index: usize,
    class: Classification,
    patterns: &MarkerPatterns,
) -> Result<Rewrite, LineError> {
    let line = lines
        .get(index)
        .ok_or_else(|| LineError::Unexpected(format!("line index {index} out of range")))?;

    if !class.needs_quote_before() {
        return Ok(match class {
            Classification::Plain => Rewrite::Block(format!("{}{BLOCK_SEPARATOR}", line.text)),
            _ => Rewrite::Skip,
        });
    }

    let quote_before = find_quote_before(lines, index, 1, &patterns.quote).ok_or(
        LineError::MissingQuote {
            direction: Direction::Before,
        },
    )?;
    let quoted = strip_quote(&quote_before.text, &patterns.quote);

    let rewrite = match class {
        Classification::Comment => {
            let comment = line
                .text
                .split_once(patterns.comment.as_str())
                .map_or("", |(_, rest)| rest.trim());
            Rewrite::Block(format!(
                "{COMMENT_OPEN} {comment}\n{}{BLOCK_SEPARATOR}",
                quote_before.text
            ))
        }
        Classification::Merge => {
            let quote_after = find_quote_after(lines, index, 0, &patterns.quote).ok_or(
                LineError::MissingQuote {
                    direction: Direction::After,
                },
            )?;
            Rewrite::Block(format!(
                "{} {}{BLOCK_SEPARATOR}",
                quote_before.text,
                strip_quote(&quote_after.text, &patterns.quote)
            ))
        }
        Classification::Task => Rewrite::Block(format!("{TASK_OPEN} {quoted}{BLOCK_SEPARATOR}")),
        Classification::Heading(depth) => {
            let hashes = HASH.to_string().repeat(depth);
            Rewrite::Block(format!("{hashes} {quoted}{BLOCK_SEPARATOR}"))
        }
        Classification::Tag => Rewrite::Block(format!("{HASH}{quoted}{BLOCK_SEPARATOR}")),
        Classification::Keyword => Rewrite::Keyword(quoted.to_string()),
        Classification::Plain | Classification::Suppressed => Rewrite::Skip,
    };

    Ok(rewrite)
}
