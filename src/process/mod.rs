//! Document processing pipeline.
//!
//! This module orchestrates the two-phase formatting process:
//!
//! **Phase 1 - Rewrite:**
//! - Normalize the input into non-blank lines
//! - Classify each line and emit its output block
//! - Collect keyword lines and per-line diagnostics
//!
//! **Phase 2 - Injection:**
//! - Insert the keyword metadata line after a leading metadata block,
//!   or on top of the output when there is none
//!
//! The main entry points are [`format`] for in-memory text and [`format_file`],
//! which processes a buffered reader and writes to any `Write` implementation.

pub mod pipeline;

pub use pipeline::{format, format_document, format_file, Formatted, Formatter};
