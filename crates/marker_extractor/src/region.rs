// crates/marker_extractor/src/region.rs

use embed_error::{EmbedError, Result};
use lang_support::{CommentStyle, CommentStyles};
use regex::{Regex, RegexBuilder};

use crate::markers::Marker;

/// Builds the case-insensitive pattern that captures the text between
/// `start` and `end` for the given comment style.
///
/// Marker names and comment tokens are matched literally.
pub fn region_pattern(style: &CommentStyle, start: &Marker, end: &Marker) -> String {
    let start = regex::escape(&start.to_string());
    let end = regex::escape(&end.to_string());
    match style {
        CommentStyle::Block { open, close } => {
            let open = regex::escape(open);
            let close = regex::escape(close);
            format!(
                r"{open}\s*{start}\s*{close}(?s:(.*?)){open}\s*{end}\s*{close}",
                open = open,
                close = close,
                start = start,
                end = end
            )
        }
        CommentStyle::Line(token) => {
            let token = regex::escape(token);
            format!(
                r"{token}\s*{start}(?s:(.*?)){token}\s*{end}",
                token = token,
                start = start,
                end = end
            )
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| EmbedError::Format(format!("invalid marker pattern: {}", e)))
}

/// Returns the trimmed text between the first `start`/`end` marker pair
/// in `full_source`, using the comment style configured for `language`.
pub fn extract_region(
    full_source: &str,
    start: &Marker,
    end: &Marker,
    language: &str,
    styles: &CommentStyles,
) -> Result<String> {
    let style = styles.resolve(language);
    let re = compile(&region_pattern(&style, start, end))?;
    tracing::debug!(language, style = %style.token(), start = %start, end = %end, "searching marker region");

    match re.captures(full_source).and_then(|caps| caps.get(1)) {
        Some(body) => Ok(body.as_str().trim().to_string()),
        None => Err(EmbedError::NotFound(format!(
            "Could not find the specified markers: {}, {}",
            start, end
        ))),
    }
}
