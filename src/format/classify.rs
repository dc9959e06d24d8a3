//! Line classification
//!
//! Every line falls into exactly one [`Classification`]. Rules are tried in a
//! fixed order and the first match wins, since the control prefixes overlap
//! with each other and with the plain-line check.

use crate::error::LineError;
use crate::parser::{MarkerPatterns, SourceLine};

/// What a single line turns into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Emitted unchanged
    Plain,
    /// Comment text followed by the quote above it
    Comment,
    /// Quote above joined with the quote below
    Merge,
    /// Open checklist item
    Task,
    /// Heading of the given depth
    Heading(usize),
    /// Hashtag line
    Tag,
    /// Collected into the keyword metadata line
    Keyword,
    /// Consumed by a neighbouring control line, or an unknown control line
    Suppressed,
}

impl Classification {
    /// Whether the rewrite needs the quote line above the control line
    #[must_use]
    pub fn needs_quote_before(self) -> bool {
        !matches!(self, Classification::Plain | Classification::Suppressed)
    }
}

/// Classify the line at `index`
///
/// Only the line itself, its direct neighbours and (for headings) the heading
/// pattern are consulted.
pub fn classify(
    lines: &[SourceLine],
    index: usize,
    patterns: &MarkerPatterns,
) -> Result<Classification, LineError> {
    let line = lines
        .get(index)
        .ok_or_else(|| LineError::Unexpected(format!("line index {index} out of range")))?;
    let text = line.text.as_str();

    if is_plain(lines, index, patterns) {
        return Ok(Classification::Plain);
    }

    let class = if text.starts_with(patterns.comment.as_str()) {
        Classification::Comment
    } else if text.starts_with(patterns.merge.as_str()) {
        Classification::Merge
    } else if text.starts_with(patterns.task.as_str()) {
        Classification::Task
    } else if text.starts_with(patterns.heading.as_str()) {
        let depth = patterns
            .heading_depth(text)
            .ok_or(LineError::MalformedHeading)?;
        Classification::Heading(depth)
    } else if text.starts_with(patterns.tag.as_str()) {
        Classification::Tag
    } else if text.starts_with(patterns.keyword.as_str()) {
        Classification::Keyword
    } else {
        Classification::Suppressed
    };

    Ok(class)
}

/// A line is content when neither it nor its successor is a control line and
/// it does not directly follow a merge line
fn is_plain(lines: &[SourceLine], index: usize, patterns: &MarkerPatterns) -> bool {
    let Some(line) = lines.get(index) else {
        return false;
    };
    let next_is_control = lines
        .get(index + 1)
        .is_some_and(|next| patterns.is_control(&next.text));
    let follows_merge = index
        .checked_sub(1)
        .and_then(|prev| lines.get(prev))
        .is_some_and(|prev| prev.starts_with(&patterns.merge));

    !patterns.is_control(&line.text) && !next_is_control && !follows_merge
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::parser::Document;

    fn classify_all(input: &str) -> Vec<Classification> {
        let doc = Document::parse(input);
        let patterns = MarkerPatterns::new(&Config::default()).unwrap();
        (0..doc.len())
            .map(|i| classify(doc.lines(), i, &patterns).unwrap())
            .collect()
    }

    #[test]
    fn test_plain_lines() {
        assert_eq!(
            classify_all("just text\n# looks like markup\n> lonely quote"),
            vec![
                Classification::Plain,
                Classification::Plain,
                Classification::Plain
            ]
        );
    }

    #[test]
    fn test_quote_before_control_is_suppressed() {
        assert_eq!(
            classify_all("> Quoted text here\n- % Interesting"),
            vec![Classification::Suppressed, Classification::Comment]
        );
    }

    #[test]
    fn test_each_control_kind() {
        let classes = classify_all("> a\n- +\n> b\n- ?\n- ###\n- !\n- =");
        assert_eq!(
            classes,
            vec![
                Classification::Suppressed,
                Classification::Merge,
                Classification::Suppressed,
                Classification::Task,
                Classification::Heading(3),
                Classification::Tag,
                Classification::Keyword,
            ]
        );
    }

    #[test]
    fn test_comment_requires_trailing_space() {
        assert_eq!(
            classify_all("> q\n- %nospace"),
            vec![Classification::Suppressed, Classification::Suppressed]
        );
    }

    #[test]
    fn test_line_after_merge_is_not_plain() {
        // "> b" has no control successor but follows the merge line
        assert_eq!(
            classify_all("> a\n- +\n> b\ntext"),
            vec![
                Classification::Suppressed,
                Classification::Merge,
                Classification::Suppressed,
                Classification::Plain
            ]
        );
    }

    #[test]
    fn test_unknown_control_like_line_is_plain() {
        assert_eq!(
            classify_all("- plain bullet\n- another"),
            vec![Classification::Plain, Classification::Plain]
        );
    }

    #[test]
    fn test_text_before_control_line_is_suppressed() {
        assert_eq!(
            classify_all("not a quote\n- !"),
            vec![Classification::Suppressed, Classification::Tag]
        );
    }

    #[test]
    fn test_last_line_without_successor_is_plain() {
        assert_eq!(classify_all("only"), vec![Classification::Plain]);
    }

    #[test]
    fn test_index_out_of_range() {
        let doc = Document::parse("a");
        let patterns = MarkerPatterns::new(&Config::default()).unwrap();
        assert!(matches!(
            classify(doc.lines(), 4, &patterns),
            Err(LineError::Unexpected(_))
        ));
    }

    #[test]
    fn test_needs_quote_before() {
        assert!(Classification::Heading(2).needs_quote_before());
        assert!(Classification::Keyword.needs_quote_before());
        assert!(!Classification::Plain.needs_quote_before());
        assert!(!Classification::Suppressed.needs_quote_before());
    }
}
