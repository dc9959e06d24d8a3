//! Two-phase formatting pipeline
//!
//! Implements the main formatting pipeline:
//! - Phase 1: Rewrite every line in document order, collecting keywords
//! - Phase 2: Inject the keyword metadata line into the rewritten output

use std::io::{BufRead, Read, Write};

use crate::config::Config;
use crate::error::{Diagnostic, LineError};
use crate::format::{
    classify, inject_keywords, rewrite_line, KeywordList, Rewrite, BLOCK_SEPARATOR,
};
use crate::parser::{Document, MarkerPatterns};
use crate::Result;

/// Result of formatting one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formatted {
    /// Final output text
    pub text: String,
    /// Keywords in the order they were found
    pub keywords: Vec<String>,
    /// Lines that could not be rewritten, in document order
    pub diagnostics: Vec<Diagnostic>,
}

impl Formatted {
    #[must_use]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Output of the rewrite phase, before keyword injection
struct RewritePass {
    output: String,
    keywords: KeywordList,
    diagnostics: Vec<Diagnostic>,
}

/// Formatter bound to one validated marker set
///
/// Building it is the only fallible step; [`Formatter::format`] itself always
/// returns a result, with per-line problems reported as diagnostics.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: Config,
    patterns: MarkerPatterns,
}

impl Formatter {
    pub fn new(config: &Config) -> Result<Self> {
        if let Some(error) = config.validate() {
            anyhow::bail!("Invalid configuration: {error}");
        }
        let patterns = MarkerPatterns::new(config)?;
        Ok(Formatter {
            config: config.clone(),
            patterns,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Format a whole document
    #[must_use]
    pub fn format(&self, content: &str) -> Formatted {
        let document = Document::parse(content);
        let pass = self.rewrite_pass(&document);

        let text = inject_keywords(
            &pass.output,
            &pass.keywords,
            &self.config.front_matter_delimiter,
            &self.config.keywords_key,
        );

        Formatted {
            text,
            keywords: pass.keywords.into(),
            diagnostics: pass.diagnostics,
        }
    }

    /// Classify and rewrite each line in order
    ///
    /// A failing line is recorded and skipped; the pass always runs to the end.
    /// A malformed heading line is kept as plain text.
    fn rewrite_pass(&self, document: &Document) -> RewritePass {
        let lines = document.lines();
        let mut output = String::new();
        let mut keywords = KeywordList::new();
        let mut diagnostics = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            let result = classify(lines, index, &self.patterns)
                .and_then(|class| rewrite_line(lines, index, class, &self.patterns));

            match result {
                Ok(Rewrite::Block(block)) => output.push_str(&block),
                Ok(Rewrite::Keyword(keyword)) => keywords.push(keyword),
                Ok(Rewrite::Skip) => {}
                Err(error) => {
                    if error == LineError::MalformedHeading {
                        output.push_str(&line.text);
                        output.push_str(BLOCK_SEPARATOR);
                    }
                    diagnostics.push(Diagnostic {
                        line_number: line.number,
                        line: line.text.clone(),
                        error,
                    });
                }
            }
        }

        RewritePass {
            output,
            keywords,
            diagnostics,
        }
    }
}

/// Format text with a marker configuration
///
/// Fails only for an invalid configuration.
pub fn format_document(content: &str, config: &Config) -> Result<Formatted> {
    Ok(Formatter::new(config)?.format(content))
}

/// Format text and return only the output text
pub fn format(content: &str, config: &Config) -> Result<String> {
    Ok(format_document(content, config)?.text)
}

/// Format a document read from `input` and write the result to `output`
///
/// Diagnostics are logged as warnings tagged with `filename` and also
/// returned to the caller.
pub fn format_file<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    config: &Config,
    filename: &str,
) -> Result<Formatted> {
    let mut content = String::new();
    input.read_to_string(&mut content)?;

    let formatted = Formatter::new(config)?.format(&content);
    for diagnostic in &formatted.diagnostics {
        log::warn!("{filename}: {diagnostic}");
    }
    log::debug!(
        "{filename}: {} keyword(s), {} diagnostic(s)",
        formatted.keywords.len(),
        formatted.diagnostics.len()
    );

    output.write_all(formatted.text.as_bytes())?;
    Ok(formatted)
}
