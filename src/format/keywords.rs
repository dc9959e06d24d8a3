//! Keyword collection and metadata injection
//!
//! Keyword lines produce no block of their own. Their text is gathered in a
//! [`KeywordList`] and, once the rewrite pass is done, written as a single
//! `keywords:: a, b` line into the leading metadata block (or on top of the
//! output when there is none).

/// Keywords in the order their lines were seen; duplicates are kept
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordList {
    keywords: Vec<String>,
}

impl KeywordList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, keyword: impl Into<String>) {
        self.keywords.push(keyword.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// The metadata entry, framed by newlines: `"\n{key}:: a, b\n"`
    #[must_use]
    pub fn metadata_line(&self, key: &str) -> String {
        format!("\n{key}:: {}\n", self.keywords.join(", "))
    }
}

impl From<KeywordList> for Vec<String> {
    fn from(list: KeywordList) -> Self {
        list.keywords
    }
}

/// Position after the closing delimiter of a leading metadata block
///
/// Requires the first line to be the delimiter and a later line to match it.
fn metadata_block_end(lines: &[&str], delimiter: &str) -> Option<usize> {
    if lines.first() != Some(&delimiter) {
        return None;
    }
    lines[1..]
        .iter()
        .position(|line| *line == delimiter)
        .map(|pos| pos + 2)
}

/// Insert the keyword metadata line into rewritten output
///
/// Returns the output unchanged when there are no keywords.
#[must_use]
pub fn inject_keywords(output: &str, keywords: &KeywordList, delimiter: &str, key: &str) -> String {
    if keywords.is_empty() {
        return output.to_string();
    }

    let entry = keywords.metadata_line(key);
    let mut lines: Vec<&str> = output.split('\n').collect();
    let at = metadata_block_end(&lines, delimiter).unwrap_or(0);
    log::debug!("Inserting {} keyword(s) at output line {at}", keywords.len());
    lines.insert(at, &entry);
    lines.join("\n")
}
