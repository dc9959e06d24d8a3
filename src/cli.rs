//! Command-line interface for annofmt.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

use crate::selection::LineRange;

/// CLI arguments parsed from command line
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Files or directories to format
    pub inputs: Vec<PathBuf>,

    /// Only format this line range of each input
    pub lines: Option<LineRange>,

    /// Write each result to this directory instead of stdout
    pub output_dir: Option<PathBuf>,

    /// Copy the result to the system clipboard
    pub clipboard: bool,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Additional file extensions (in addition to defaults)
    pub extensions: Vec<String>,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Fail when any line could not be rewritten
    pub strict: bool,

    /// Silent mode (no progress output)
    pub silent: bool,

    /// Enable debug output
    pub debug: bool,

    pub line_marker: Option<String>,
    pub quote_marker: Option<String>,
    pub heading_marker: Option<String>,
    pub comment_marker: Option<String>,
    pub task_marker: Option<String>,
    pub tag_marker: Option<String>,
    pub merge_marker: Option<String>,
    pub keyword_marker: Option<String>,
    pub front_matter_delimiter: Option<String>,
    pub keywords_key: Option<String>,
}

/// Marker override flags: (argument id, help text)
const MARKER_ARGS: &[(&str, &str)] = &[
    ("line-marker", "Prefix of every control line [default: \"- \"]"),
    ("quote-marker", "Prefix of quote lines [default: \"> \"]"),
    ("heading-marker", "Heading marker, repeat for depth [default: #]"),
    ("comment-marker", "Comment marker [default: %]"),
    ("task-marker", "Task marker [default: ?]"),
    ("tag-marker", "Tag marker [default: !]"),
    ("merge-marker", "Merge marker [default: +]"),
    ("keyword-marker", "Keyword marker [default: =]"),
    (
        "front-matter-delimiter",
        "Delimiter line of the leading metadata block [default: ---]",
    ),
    ("keywords-key", "Key of the keyword metadata line [default: keywords]"),
];

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    let command = Command::new("annofmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turns quote highlights and control markers into structured notes")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to format (\"-\" reads stdin)")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("lines")
                .long("lines")
                .help("Only format lines START:END (1-based, inclusive, either bound optional)")
                .value_name("START:END")
                .value_parser(clap::value_parser!(LineRange)),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .help("Write each formatted file into DIR instead of stdout")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("clipboard")
                .long("clipboard")
                .help("Copy the formatted result to the system clipboard")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Config file path (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Process directories recursively")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/directories matching glob pattern (repeatable)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("extension")
                .short('x')
                .long("extension")
                .help("Additional file extension to format (repeatable)")
                .value_name("EXT")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs for --output-dir (0=auto, 1=sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Exit with an error if any line could not be rewritten")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output")
                .action(ArgAction::SetTrue),
        );

    MARKER_ARGS.iter().fold(command, |command, (id, help)| {
        command.arg(
            Arg::new(*id)
                .long(*id)
                .help(*help)
                .value_name("TEXT")
                .allow_hyphen_values(true),
        )
    })
}

/// Parse CLI arguments from the process environment
#[must_use]
pub fn parse_args() -> CliArgs {
    let matches = build_cli().get_matches();
    args_from_matches(&matches)
}

/// Parse CLI arguments from an explicit iterator (for tests)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = build_cli().get_matches_from(args);
    args_from_matches(&matches)
}

fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    let strings = |id: &str| -> Vec<String> {
        matches
            .get_many::<String>(id)
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    };
    let string = |id: &str| matches.get_one::<String>(id).cloned();

    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        lines: matches.get_one::<LineRange>("lines").copied(),
        output_dir: matches.get_one::<PathBuf>("output-dir").cloned(),
        clipboard: matches.get_flag("clipboard"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        recursive: matches.get_flag("recursive"),
        exclude: strings("exclude"),
        extensions: strings("extension"),
        jobs: matches.get_one::<usize>("jobs").copied(),
        strict: matches.get_flag("strict"),
        silent: matches.get_flag("silent"),
        debug: matches.get_flag("debug"),
        line_marker: string("line-marker"),
        quote_marker: string("quote-marker"),
        heading_marker: string("heading-marker"),
        comment_marker: string("comment-marker"),
        task_marker: string("task-marker"),
        tag_marker: string("tag-marker"),
        merge_marker: string("merge-marker"),
        keyword_marker: string("keyword-marker"),
        front_matter_delimiter: string("front-matter-delimiter"),
        keywords_key: string("keywords-key"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args() {
        let args = parse_args_from(vec!["annofmt"]);
        assert!(args.inputs.is_empty());
        assert!(args.lines.is_none());
        assert!(!args.clipboard);
        assert!(!args.recursive);
        assert!(!args.strict);
        assert_eq!(args.jobs, None);
    }

    #[test]
    fn test_inputs() {
        let args = parse_args_from(vec!["annofmt", "a.md", "notes/"]);
        assert_eq!(
            args.inputs,
            vec![PathBuf::from("a.md"), PathBuf::from("notes/")]
        );
    }

    #[test]
    fn test_lines_range() {
        let args = parse_args_from(vec!["annofmt", "--lines", "3:9", "a.md"]);
        assert_eq!(
            args.lines,
            Some(LineRange {
                start: Some(3),
                end: Some(9)
            })
        );
    }

    #[test]
    fn test_invalid_lines_range_rejected() {
        let result = build_cli().try_get_matches_from(vec!["annofmt", "--lines", "9:3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_modes() {
        let args = parse_args_from(vec!["annofmt", "--clipboard", "-o", "out", "a.md"]);
        assert!(args.clipboard);
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_exclude_multiple() {
        let args = parse_args_from(vec![
            "annofmt", "-r", "-e", "drafts", "--exclude", "*.tmp.md", "notes/",
        ]);
        assert_eq!(args.exclude, vec!["drafts", "*.tmp.md"]);
        assert!(args.recursive);
    }

    #[test]
    fn test_extensions() {
        let args = parse_args_from(vec!["annofmt", "-x", "org", "--extension", ".rst", "d/"]);
        assert_eq!(args.extensions, vec!["org", ".rst"]);
    }

    #[test]
    fn test_marker_overrides() {
        let args = parse_args_from(vec![
            "annofmt",
            "--line-marker",
            "* ",
            "--quote-marker",
            ">> ",
            "--merge-marker",
            "&",
            "--front-matter-delimiter",
            "+++",
            "a.md",
        ]);
        assert_eq!(args.line_marker.as_deref(), Some("* "));
        assert_eq!(args.quote_marker.as_deref(), Some(">> "));
        assert_eq!(args.merge_marker.as_deref(), Some("&"));
        assert_eq!(args.front_matter_delimiter.as_deref(), Some("+++"));
        assert_eq!(args.task_marker, None);
    }

    #[test]
    fn test_hyphen_marker_value() {
        let args = parse_args_from(vec!["annofmt", "--line-marker", "- ", "a.md"]);
        assert_eq!(args.line_marker.as_deref(), Some("- "));
    }

    #[test]
    fn test_flags() {
        let args = parse_args_from(vec!["annofmt", "--strict", "-S", "-D", "-j", "4", "a.md"]);
        assert!(args.strict);
        assert!(args.silent);
        assert!(args.debug);
        assert_eq!(args.jobs, Some(4));
    }

    #[test]
    fn test_config_path() {
        let args = parse_args_from(vec!["annofmt", "-c", "my.toml", "a.md"]);
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
    }
}
