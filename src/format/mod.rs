//! Annotation rewriting.
//!
//! This module contains the core formatting logic organized into submodules:
//! - [`classify`]: Decides which rule applies to each line (ordered cascade)
//! - [`rewrite`]: Produces the output block for a classified line
//! - [`keywords`]: Collects keyword lines and injects the metadata line

pub mod classify;
pub mod keywords;
pub mod rewrite;

pub use classify::{classify, Classification};
pub use keywords::{inject_keywords, KeywordList};
pub use rewrite::{rewrite_line, Rewrite, BLOCK_SEPARATOR};
