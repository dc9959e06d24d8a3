//! Line-range selection of the input
//!
//! `--lines START:END` limits formatting to part of a document, the same way
//! an editor would hand over only the selected text. Bounds are 1-based and
//! inclusive; either side may be left out (`5:`, `:20`).

use std::fmt;
use std::str::FromStr;

/// Inclusive, 1-based line range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl LineRange {
    /// Keep only the selected lines of `content`
    ///
    /// Line terminators of the selected lines are preserved. A range past the
    /// end of the text selects nothing.
    #[must_use]
    pub fn select<'a>(&self, content: &'a str) -> &'a str {
        let first = self.start.unwrap_or(1).saturating_sub(1);
        let last = self.end.unwrap_or(usize::MAX);

        let mut begin = None;
        let mut finish = content.len();
        let mut offset = 0;
        for (i, line) in content.split_inclusive('\n').enumerate() {
            if i == first {
                begin = Some(offset);
            }
            offset += line.len();
            if i + 1 == last {
                finish = offset;
                break;
            }
        }

        match begin {
            Some(begin) if begin <= finish => &content[begin..finish],
            _ => "",
        }
    }
}

impl FromStr for LineRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| format!("expected START:END, got {s:?}"))?;

        let parse_bound = |bound: &str| -> Result<Option<usize>, String> {
            let bound = bound.trim();
            if bound.is_empty() {
                return Ok(None);
            }
            match bound.parse::<usize>() {
                Ok(0) => Err("line numbers start at 1".to_string()),
                Ok(n) => Ok(Some(n)),
                Err(e) => Err(format!("invalid line number {bound:?}: {e}")),
            }
        };

        let range = LineRange {
            start: parse_bound(start)?,
            end: parse_bound(end)?,
        };
        if let (Some(start), Some(end)) = (range.start, range.end) {
            if start > end {
                return Err(format!("start line {start} is after end line {end}"));
            }
        }
        Ok(range)
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{start}")?;
        }
        f.write_str(":")?;
        if let Some(end) = self.end {
            write!(f, "{end}")?;
        }
        Ok(())
    }
}
