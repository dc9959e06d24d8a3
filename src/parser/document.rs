//! Line normalization
//!
//! Splits raw input into the non-blank lines the classifier works on.
//! Each retained line keeps its 1-based position in the input so that
//! diagnostics can point back at the original text.

/// One non-blank input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number in the input text
    pub number: usize,
    /// Line content, unchanged apart from the stripped line terminator
    pub text: String,
}

impl SourceLine {
    #[must_use]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.text.starts_with(prefix)
    }
}

/// Ordered, immutable sequence of non-blank lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<SourceLine>,
}

impl Document {
    /// Build a document from raw text, dropping lines that are empty after trimming
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let lines = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| SourceLine {
                number: i + 1,
                text: line.to_string(),
            })
            .collect();
        Document { lines }
    }

    #[must_use]
    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SourceLine> {
        self.lines.get(index)
    }
}
