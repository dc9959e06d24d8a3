//! annofmt - Formatter for annotated notes
//!
//! Rewrites quote highlights paired with short control markers (comment,
//! heading, task, tag, merge, keyword) into structured note text.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod parser;
pub mod process;
pub mod selection;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use error::{Diagnostic, LineError, Result};
pub use process::{format, format_document, Formatted, Formatter};
pub use selection::LineRange;
