// crates/line_selector/src/lib.rs

//! Selects line ranges out of a source file for display.
//!
//! A spec such as `"1-3,7,10-12"` becomes a [`LineSpec`]: the requested
//! 1-based line numbers in spec order, with an elision after every token.
//! [`render_lines`] then slices the source, printing `...` for each gap.

use embed_error::{EmbedError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder line printed where source lines were omitted.
pub const ELISION: &str = "...";

// A token is a range when it has something on both sides of a dash.
static RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)-(\w+)$").expect("static range regex"));

/// One element of a [`LineSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEntry {
    /// A 1-based source line.
    Line(usize),
    /// A gap rendered as [`ELISION`].
    Elision,
}

/// Ordered line selection produced by [`parse_line_spec`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSpec {
    entries: Vec<LineEntry>,
}

impl LineSpec {
    pub fn new(entries: Vec<LineEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LineEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops lines past `line_count`, reads `Line(0)` as an elision,
    /// collapses runs of elisions, and drops a trailing elision that
    /// directly follows the last source line.
    pub fn normalized(&self, line_count: usize) -> LineSpec {
        let mut entries: Vec<LineEntry> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let entry = match *entry {
                LineEntry::Line(0) => LineEntry::Elision,
                e => e,
            };
            match entry {
                LineEntry::Line(n) if n > line_count => continue,
                LineEntry::Elision if entries.last() == Some(&LineEntry::Elision) => continue,
                e => entries.push(e),
            }
        }
        if let [.., LineEntry::Line(last), LineEntry::Elision] = entries.as_slice() {
            if *last == line_count {
                entries.pop();
            }
        }
        LineSpec { entries }
    }
}

/// Parses a compact line spec like `"1-3, 7, 10-12"`.
///
/// Whitespace anywhere is ignored and an empty spec yields an empty
/// [`LineSpec`]. Each token contributes its line(s) followed by one
/// elision. A reversed range (`"5-3"`) contributes only the elision.
/// A `0` token stands for an elision on its own.
pub fn parse_line_spec(spec: &str) -> Result<LineSpec> {
    let compact: String = spec.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Ok(LineSpec::default());
    }

    let mut entries = Vec::new();
    for token in compact.split(',').filter(|t| !t.is_empty()) {
        if let Some(caps) = RANGE_RE.captures(token) {
            let left = parse_line_number(&caps[1], token)?;
            let right = parse_line_number(&caps[2], token)?;
            if left > right {
                tracing::debug!(token, "reversed line range selects nothing");
            }
            entries.extend((left.max(1)..=right).map(LineEntry::Line));
        } else {
            let n = parse_line_number(token, token)?;
            if n > 0 {
                entries.push(LineEntry::Line(n));
            }
        }
        entries.push(LineEntry::Elision);
    }

    Ok(LineSpec { entries })
}

fn parse_line_number(raw: &str, token: &str) -> Result<usize> {
    raw.parse::<usize>().map_err(|_| {
        EmbedError::Format(format!("invalid line number '{}' in LINES token '{}'", raw, token))
    })
}

/// Renders the lines of `full_source` selected by `spec`, in spec order.
///
/// Lines are split on `\n` only, so a trailing newline counts as a final
/// empty line. Output is joined with `\n`, with [`ELISION`] for every gap
/// and before the first line when it is not line 1.
pub fn render_lines(full_source: &str, spec: &LineSpec) -> String {
    let lines: Vec<&str> = full_source.split('\n').collect();
    let spec = spec.normalized(lines.len());

    let mut out: Vec<&str> = Vec::with_capacity(spec.entries.len() + 1);
    let mut last_was_elision = false;
    for (idx, entry) in spec.entries.iter().enumerate() {
        match *entry {
            LineEntry::Elision => {
                if !last_was_elision {
                    out.push(ELISION);
                    last_was_elision = true;
                }
            }
            LineEntry::Line(n) => {
                if idx == 0 && n != 1 {
                    out.push(ELISION);
                }
                out.push(lines[n - 1]);
                last_was_elision = false;
            }
        }
    }
    out.join("\n")
}
