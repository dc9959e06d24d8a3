//! Input parsing for the annotation formatter.
//!
//! This module turns raw text into the structures the classifier reads:
//! - [`document`]: Normalizes input into non-blank [`SourceLine`]s
//! - [`quote`]: Finds the quote line a control line refers to
//! - [`patterns`]: Prefixes and heading pattern derived from the marker set

pub mod document;
pub mod patterns;
pub mod quote;

pub use document::{Document, SourceLine};
pub use patterns::MarkerPatterns;
pub use quote::{find_quote_after, find_quote_before, strip_quote};
