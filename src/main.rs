//! annofmt - Turns quote highlights and control markers into structured notes

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Cursor, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use annofmt::cli::build_cli;
use annofmt::process::format_file;
use annofmt::{parse_args, CliArgs, Config, Formatted, Result};
use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;

/// Annotated document extensions to process
const DOCUMENT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// A file to format and its path below the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
struct InputFile {
    path: PathBuf,
    /// File name for explicit inputs, path below the input root for directory walks
    relative: PathBuf,
}

/// Totals over one run
#[derive(Debug, Default)]
struct RunSummary {
    formatted: usize,
    failed: usize,
    diagnostics: usize,
}

fn main() -> Result<()> {
    let args = parse_args();
    init_logging(&args);

    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // Nothing piped in and no files given: there is no document to format
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        eprintln!("{}", build_cli().render_help());
        anyhow::bail!("no input: pass a FILE or pipe text on stdin");
    }

    let summary = if use_stdin {
        let config = build_config(&args, None)?;
        process_stdin(&config, &args)?
    } else {
        process_inputs(&args)?
    };

    if summary.failed > 0 {
        anyhow::bail!("{} file(s) could not be formatted", summary.failed);
    }
    if args.strict && summary.diagnostics > 0 {
        anyhow::bail!(
            "{} line(s) could not be rewritten (--strict)",
            summary.diagnostics
        );
    }

    Ok(())
}

/// Install the `env_logger` backend; `RUST_LOG` still overrides the level
fn init_logging(args: &CliArgs) {
    let level = if args.debug {
        log::LevelFilter::Debug
    } else if args.silent {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        log::debug!("Using explicit config file: {}", config_path.display());
        Config::from_toml_file(config_path)?
    } else {
        let start = match for_path {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir().unwrap_or_default(),
        };
        let discovered = Config::discover_config_files(&start);
        if discovered.is_empty() {
            log::debug!("No config files discovered for {}", start.display());
        } else {
            for f in &discovered {
                log::debug!("Discovered config file {}", f.display());
            }
        }
        Config::from_discovered_files(&start)
    };

    // Override with CLI arguments
    let overrides = [
        (&mut config.line_marker, &args.line_marker),
        (&mut config.quote_marker, &args.quote_marker),
        (&mut config.heading_marker, &args.heading_marker),
        (&mut config.comment_marker, &args.comment_marker),
        (&mut config.task_marker, &args.task_marker),
        (&mut config.tag_marker, &args.tag_marker),
        (&mut config.merge_marker, &args.merge_marker),
        (&mut config.keyword_marker, &args.keyword_marker),
        (&mut config.front_matter_delimiter, &args.front_matter_delimiter),
        (&mut config.keywords_key, &args.keywords_key),
    ];
    for (field, value) in overrides {
        if let Some(v) = value {
            field.clone_from(v);
        }
    }

    log::debug!("Configuration: {config:?}");

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Apply `--lines` to the input text
fn select_input<'a>(content: &'a str, args: &CliArgs) -> &'a str {
    match args.lines {
        Some(range) => {
            log::debug!("Formatting selection {range}");
            range.select(content)
        }
        None => content,
    }
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs) -> Vec<InputFile> {
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                log::warn!("ignoring invalid exclude pattern {p:?}: {e}");
                None
            }
        })
        .collect();

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            // Explicit files are taken regardless of extension
            if !is_excluded(input, &exclude_patterns) {
                let relative = input.file_name().map_or_else(|| input.clone(), PathBuf::from);
                files.push(InputFile {
                    path: input.clone(),
                    relative,
                });
            }
        } else if input.is_dir() {
            let max_depth = if args.recursive { 256 } else { 1 };
            for entry in WalkDir::new(input)
                .follow_links(true)
                .max_depth(max_depth)
                .into_iter()
                .filter_map(std::result::Result::ok)
            {
                let path = entry.path();
                if path.is_file()
                    && is_document_file(path, &args.extensions)
                    && !is_excluded(path, &exclude_patterns)
                {
                    let relative = path.strip_prefix(input).unwrap_or(path).to_path_buf();
                    files.push(InputFile {
                        path: path.to_path_buf(),
                        relative,
                    });
                }
            }
        } else {
            log::warn!("{}: no such file or directory", input.display());
        }
    }

    files
}

/// Fail when two inputs would be written to the same file under the output directory
fn check_output_targets(files: &[InputFile], dir: &Path) -> Result<()> {
    let mut targets: HashMap<&Path, &Path> = HashMap::new();
    for file in files {
        if let Some(previous) = targets.insert(file.relative.as_path(), file.path.as_path()) {
            anyhow::bail!(
                "{} and {} would both be written to {}",
                previous.display(),
                file.path.display(),
                dir.join(&file.relative).display()
            );
        }
    }
    Ok(())
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
            || path.components().any(|component| {
                matches!(component, std::path::Component::Normal(c)
                    if pattern.matches(&c.to_string_lossy()))
            })
    })
}

/// Check if a file has a document extension (default or custom)
fn is_document_file(path: &Path, custom_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            DOCUMENT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
                || custom_extensions
                    .iter()
                    .any(|custom| custom.strip_prefix('.').unwrap_or(custom) == ext)
        })
}

/// Format every input file, in parallel when writing to an output directory
fn process_inputs(args: &CliArgs) -> Result<RunSummary> {
    // With an explicit config file one config serves all files;
    // otherwise each file discovers its own
    let base_config = if args.config.is_none() {
        None
    } else {
        Some(build_config(args, None)?)
    };

    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                log::warn!("failed to configure thread pool: {e}");
            }
        }
    }

    let files = collect_files(args);
    if files.is_empty() {
        log::warn!("No annotated documents found to format.");
        return Ok(RunSummary::default());
    }

    if let Some(dir) = &args.output_dir {
        check_output_targets(&files, dir)?;
        std::fs::create_dir_all(dir)?;
    }

    let use_parallel = args.output_dir.is_some() && !args.clipboard && args.jobs != Some(1);
    let summary = if use_parallel {
        process_files_parallel(&files, base_config.as_ref(), args)
    } else {
        process_files_sequential(&files, base_config.as_ref(), args)?
    };

    if summary.failed == 0 {
        log::info!("Formatted {} file(s) successfully.", summary.formatted);
    } else {
        log::info!(
            "Formatted {} file(s), {} error(s).",
            summary.formatted,
            summary.failed
        );
    }

    Ok(summary)
}

/// Format one file with its base or discovered config
fn format_path(
    file: &InputFile,
    base_config: Option<&Config>,
    args: &CliArgs,
) -> Result<Option<Formatted>> {
    if let Some(config) = base_config {
        process_single_file(file, config, args)
    } else {
        let config = build_config(args, Some(&file.path))?;
        process_single_file(file, &config, args)
    }
}

/// Process files sequentially (for stdout and clipboard output)
fn process_files_sequential(
    files: &[InputFile],
    base_config: Option<&Config>,
    args: &CliArgs,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let mut collected = String::new();

    for file in files {
        match format_path(file, base_config, args) {
            Ok(Some(formatted)) => {
                summary.formatted += 1;
                summary.diagnostics += formatted.diagnostics.len();
                if args.clipboard {
                    collected.push_str(&formatted.text);
                } else if args.output_dir.is_none() {
                    io::stdout().write_all(formatted.text.as_bytes())?;
                }
            }
            Ok(None) => {}
            Err(e) => {
                summary.failed += 1;
                log::error!("Error formatting {}: {e}", file.path.display());
            }
        }
    }

    if args.clipboard && summary.formatted > 0 {
        copy_to_clipboard(&collected)?;
    }

    Ok(summary)
}

/// Process files in parallel (output directory only)
fn process_files_parallel(
    files: &[InputFile],
    base_config: Option<&Config>,
    args: &CliArgs,
) -> RunSummary {
    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);
    let diagnostic_count = AtomicUsize::new(0);

    files
        .par_iter()
        .for_each(|file| match format_path(file, base_config, args) {
            Ok(Some(formatted)) => {
                success_count.fetch_add(1, Ordering::Relaxed);
                diagnostic_count.fetch_add(formatted.diagnostics.len(), Ordering::Relaxed);
            }
            Ok(None) => {}
            Err(e) => {
                error_count.fetch_add(1, Ordering::Relaxed);
                log::error!("Error formatting {}: {e}", file.path.display());
            }
        });

    RunSummary {
        formatted: success_count.load(Ordering::Relaxed),
        failed: error_count.load(Ordering::Relaxed),
        diagnostics: diagnostic_count.load(Ordering::Relaxed),
    }
}

/// Process a single file
///
/// Returns `None` when the file is skipped. With `--output-dir` the result is
/// also written to `DIR/<relative path>`.
fn process_single_file(
    file: &InputFile,
    config: &Config,
    args: &CliArgs,
) -> Result<Option<Formatted>> {
    let path = file.path.as_path();
    // Check file size BEFORE reading to prevent memory exhaustion
    let file_size = std::fs::metadata(path)?.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        log::warn!(
            "Skipping {} ({} MB exceeds limit of {} MB)",
            path.display(),
            file_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
        return Ok(None);
    }

    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;

    log::info!("Formatting: {}", path.display());

    let name = path.to_string_lossy();
    let selected = select_input(&contents, args);
    let mut output = Vec::new();
    let formatted = format_file(
        BufReader::new(Cursor::new(selected)),
        &mut output,
        config,
        &name,
    )?;

    if let Some(dir) = &args.output_dir {
        let target = dir.join(&file.relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, &output)?;
        log::debug!("Wrote {}", target.display());
    }

    Ok(Some(formatted))
}

/// Process input from stdin
fn process_stdin(config: &Config, args: &CliArgs) -> Result<RunSummary> {
    if args.output_dir.is_some() {
        anyhow::bail!("--output-dir needs file inputs, not stdin");
    }

    let mut stdin_contents = Vec::new();
    io::stdin().read_to_end(&mut stdin_contents)?;

    #[allow(clippy::cast_possible_truncation)]
    let stdin_size = stdin_contents.len() as u64;
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            stdin_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    let contents = String::from_utf8(stdin_contents)?;
    let selected = select_input(&contents, args);

    let mut output = Vec::new();
    let formatted = format_file(Cursor::new(selected), &mut output, config, "stdin")?;

    if args.clipboard {
        copy_to_clipboard(&formatted.text)?;
        log::info!("Copied formatted stdin to the clipboard.");
    } else {
        io::stdout().write_all(&output)?;
    }

    Ok(RunSummary {
        formatted: 1,
        failed: 0,
        diagnostics: formatted.diagnostics.len(),
    })
}

#[cfg(all(feature = "clipboard", target_os = "linux"))]
fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::SetExtLinux;

    // X11 and Wayland selections die with the owning process
    log::info!("Serving the clipboard until another program takes it over.");
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set().wait().text(text.to_string())?;
    Ok(())
}

#[cfg(all(feature = "clipboard", not(target_os = "linux")))]
fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

#[cfg(not(feature = "clipboard"))]
fn copy_to_clipboard(_text: &str) -> Result<()> {
    anyhow::bail!("annofmt was built without the `clipboard` feature")
}
