//! Integration tests for annofmt
//!
//! These tests verify that the components work together correctly

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use annofmt::error::Direction;
use annofmt::format::{classify, inject_keywords, Classification, KeywordList};
use annofmt::parser::{find_quote_after, find_quote_before, Document, MarkerPatterns};
use annofmt::{format, format_document, Config, Formatter, LineError};

fn patterns() -> MarkerPatterns {
    MarkerPatterns::new(&Config::default()).unwrap()
}

#[test]
fn test_classification_of_annotated_document() {
    let doc = Document::parse(
        "Chapter one\n> Stocks and flows\n- ###\n> first\n- +\n> second\n> stray\n- =\nclosing words\n",
    );
    let patterns = patterns();
    let classes: Vec<Classification> = (0..doc.len())
        .map(|i| classify(doc.lines(), i, &patterns).unwrap())
        .collect();

    assert_eq!(
        classes,
        vec![
            Classification::Plain,
            Classification::Suppressed,
            Classification::Heading(3),
            Classification::Suppressed,
            Classification::Merge,
            Classification::Suppressed,
            Classification::Suppressed,
            Classification::Keyword,
            Classification::Plain,
        ]
    );
}

#[test]
fn test_quote_lookups_share_document_lines() {
    let doc = Document::parse("> a\n- +\n\n> b\n");
    let lines = doc.lines();
    assert_eq!(find_quote_before(lines, 1, 1, "> ").unwrap().text, "> a");
    assert_eq!(find_quote_after(lines, 1, 0, "> ").unwrap().text, "> b");
    assert_eq!(find_quote_after(lines, 1, 0, "> ").unwrap().number, 4);
}

#[test]
fn test_plain_lines_keep_relative_order() {
    let input = "alpha\n> q1\n- !\nbeta\n> q2\n- ?\ngamma\n";
    let result = format(input, &Config::default()).unwrap();

    let positions: Vec<usize> = ["alpha\n\n", "beta\n\n", "gamma\n\n"]
        .iter()
        .map(|plain| result.find(plain).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_keyword_order_with_duplicates() {
    let words = ["zeta", "alpha", "zeta", "mu"];
    let input: String = words.iter().map(|w| format!("> {w}\n- =\n")).collect();
    let formatted = format_document(&input, &Config::default()).unwrap();

    assert_eq!(formatted.keywords, words);
    assert_eq!(formatted.text, "\nkeywords:: zeta, alpha, zeta, mu\n\n");
}

#[test]
fn test_keywords_injected_after_closing_delimiter() {
    let input = "---\na: 1\nb: 2\n---\nbody\n> k\n- =\n";
    let result = format(input, &Config::default()).unwrap();
    let lines: Vec<&str> = result.split('\n').collect();

    let closing = lines.iter().skip(1).position(|l| *l == "---").unwrap() + 1;
    assert_eq!(lines[closing + 1], "");
    assert_eq!(lines[closing + 2], "keywords:: k");
}

#[test]
fn test_quote_suppression() {
    let result = format("> only once\n- !\n", &Config::default()).unwrap();
    assert_eq!(result.matches("only once").count(), 1);
    assert!(!result.contains("> only once"));
}

#[test]
fn test_comment_keeps_quote_verbatim() {
    let result = format("> keep > this\n- % why\n", &Config::default()).unwrap();
    assert_eq!(result, "%%% why\n> keep > this\n\n");
}

#[test]
fn test_diagnostics_reported_per_line() {
    let formatted = format_document("- ?\n- !\n> late\n- +\n", &Config::default()).unwrap();

    let summary: Vec<(usize, LineError)> = formatted
        .diagnostics
        .iter()
        .map(|d| (d.line_number, d.error.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (
                1,
                LineError::MissingQuote {
                    direction: Direction::Before
                }
            ),
            (
                2,
                LineError::MissingQuote {
                    direction: Direction::Before
                }
            ),
            (
                4,
                LineError::MissingQuote {
                    direction: Direction::After
                }
            ),
        ]
    );
    assert_eq!(formatted.text, "");
}

#[test]
fn test_formatter_reuse() {
    let formatter = Formatter::new(&Config::default()).unwrap();
    let first = formatter.format("> a\n- !\n");
    let second = formatter.format("> b\n- !\n");
    assert_eq!(first.text, "#a\n\n");
    assert_eq!(second.text, "#b\n\n");
    assert_eq!(formatter.config(), &Config::default());
}

#[test]
fn test_formatter_rejects_invalid_config() {
    let config = Config {
        keyword_marker: "+".to_string(),
        ..Default::default()
    };
    assert!(Formatter::new(&config).is_err());
}

#[test]
fn test_inject_matches_pipeline() {
    let mut keywords = KeywordList::new();
    keywords.push("x");
    let direct = inject_keywords("text\n\n", &keywords, "---", "keywords");
    let piped = format("text\n> x\n- =\n", &Config::default()).unwrap();
    assert_eq!(direct, piped);
}

#[test]
fn test_concurrent_formatting() {
    let config = Config::default();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let config = config.clone();
            std::thread::spawn(move || format(&format!("> topic {i}\n- #\n"), &config).unwrap())
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("# topic {i}\n\n"));
    }
}
