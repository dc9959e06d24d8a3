//! Line prefixes and patterns derived from a marker set
//!
//! Every prefix here comes from [`Config`]; the set is compiled once per
//! formatter.

use regex::Regex;

use crate::config::Config;

/// Compiled prefixes for one marker set
#[derive(Debug, Clone)]
pub struct MarkerPatterns {
    /// Quote line prefix, e.g. `"> "`
    pub quote: String,
    /// Every control prefix (`line_marker` + marker), in cascade order
    pub control: Vec<String>,
    /// Comment prefix; includes the trailing space, e.g. `"- % "`
    pub comment: String,
    pub merge: String,
    pub task: String,
    pub heading: String,
    pub tag: String,
    pub keyword: String,
    /// `^line_marker((heading_marker)+)`
    heading_re: Regex,
    heading_marker: String,
}

impl MarkerPatterns {
    /// Build the prefix set for a marker configuration
    pub fn new(config: &Config) -> Result<Self, regex::Error> {
        let prefixed = |marker: &str| format!("{}{marker}", config.line_marker);

        let heading_re = Regex::new(&format!(
            "^{}((?:{})+)",
            regex::escape(&config.line_marker),
            regex::escape(&config.heading_marker)
        ))?;

        Ok(MarkerPatterns {
            quote: config.quote_marker.clone(),
            control: config
                .control_markers()
                .iter()
                .map(|(_, marker)| prefixed(*marker))
                .collect(),
            comment: format!("{} ", prefixed(config.comment_marker.as_str())),
            merge: prefixed(config.merge_marker.as_str()),
            task: prefixed(config.task_marker.as_str()),
            heading: prefixed(config.heading_marker.as_str()),
            tag: prefixed(config.tag_marker.as_str()),
            keyword: prefixed(config.keyword_marker.as_str()),
            heading_re,
            heading_marker: config.heading_marker.clone(),
        })
    }

    /// Whether the line starts with any control prefix
    #[must_use]
    pub fn is_control(&self, line: &str) -> bool {
        self.control.iter().any(|prefix| line.starts_with(prefix.as_str()))
    }

    #[must_use]
    pub fn is_quote(&self, line: &str) -> bool {
        line.starts_with(self.quote.as_str())
    }

    /// Number of heading markers following the line marker, if any
    ///
    /// Always `Some` for lines starting with the heading prefix of a validated
    /// marker set. An empty heading marker yields `None`.
    #[must_use]
    pub fn heading_depth(&self, line: &str) -> Option<usize> {
        if self.heading_marker.is_empty() {
            return None;
        }
        let run = self.heading_re.captures(line)?.get(1)?.as_str();
        let depth = run.matches(self.heading_marker.as_str()).count();
        (depth > 0).then_some(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> MarkerPatterns {
        MarkerPatterns::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_default_prefixes() {
        let p = defaults();
        assert_eq!(p.control, vec!["- #", "- %", "- ?", "- !", "- +", "- ="]);
        assert_eq!(p.comment, "- % ");
        assert_eq!(p.merge, "- +");
        assert_eq!(p.quote, "> ");
    }

    #[test]
    fn test_is_control() {
        let p = defaults();
        assert!(p.is_control("- ## heading"));
        assert!(p.is_control("- %no space"));
        assert!(p.is_control("- ="));
        assert!(!p.is_control("- plain bullet"));
        assert!(!p.is_control("-#"));
        assert!(!p.is_control("> - #"));
    }

    #[test]
    fn test_heading_depth() {
        let p = defaults();
        assert_eq!(p.heading_depth("- #"), Some(1));
        assert_eq!(p.heading_depth("- ###"), Some(3));
        assert_eq!(p.heading_depth("- ## trailing"), Some(2));
        assert_eq!(p.heading_depth("- # # spaced"), Some(1));
        assert_eq!(p.heading_depth("text - ##"), None);
        assert_eq!(p.heading_depth("- !"), None);
    }

    #[test]
    fn test_heading_depth_empty_marker() {
        let config = Config {
            heading_marker: String::new(),
            ..Default::default()
        };
        let p = MarkerPatterns::new(&config).unwrap();
        assert_eq!(p.heading, "- ");
        assert_eq!(p.heading_depth("- x"), None);
    }

    #[test]
    fn test_custom_markers_are_escaped() {
        let config = Config {
            line_marker: "* ".to_string(),
            heading_marker: "+".to_string(),
            merge_marker: "&".to_string(),
            ..Default::default()
        };
        let p = MarkerPatterns::new(&config).unwrap();
        assert_eq!(p.heading_depth("* ++"), Some(2));
        assert_eq!(p.heading_depth("- ++"), None);
        assert!(p.is_control("* &"));
        assert!(!p.is_control("- +"));
    }
}
