// crates/image_namer/src/lib.rs

//! File names for images pulled out of notebook outputs.
//!
//! Templates use the tags `{{notebook}}`, `{{cell}}`, `{{index}}` and
//! `{{date}}`. Every occurrence of a tag is replaced; text outside tags is
//! copied as is.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Longest sanitized component, in characters.
pub const MAX_NAME_LENGTH: usize = 50;

/// Extension appended to every saved image.
pub const IMAGE_EXTENSION: &str = "png";

pub const DEFAULT_TEMPLATE: &str = "jupyter_image_{{notebook}}_{{cell}}_{{index}}";

// Characters that are invalid on common filesystems, plus the ones that
// break a markdown image link.
static INVALID_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[/\\?%*:|"<>!#\[\]()]"#).expect("static regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));
static UNDERSCORES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__+").expect("static regex"));

/// Makes `name` safe to use as a file name component.
///
/// Applied in order:
/// 1. Invalid characters → `_`
/// 2. Whitespace runs → `_`
/// 3. Repeated underscores collapsed
/// 4. Truncated to [`MAX_NAME_LENGTH`] characters
pub fn sanitize(name: &str) -> String {
    let replaced = INVALID_CHARS_RE.replace_all(name, "_");
    let replaced = WHITESPACE_RE.replace_all(&replaced, "_");
    let collapsed = UNDERSCORES_RE.replace_all(&replaced, "_");
    collapsed.chars().take(MAX_NAME_LENGTH).collect()
}

/// Cell token for the template: numeric selectors are used verbatim,
/// anything else is sanitized.
fn cell_token(cell: &str) -> String {
    if !cell.is_empty() && cell.bytes().all(|b| b.is_ascii_digit()) {
        cell.to_string()
    } else {
        sanitize(cell)
    }
}

/// Expands `template` for one image.
pub fn format_name(
    template: &str,
    notebook_name: &str,
    cell: &str,
    image_index: usize,
    date: NaiveDate,
) -> String {
    template
        .replace("{{notebook}}", &sanitize(notebook_name))
        .replace("{{cell}}", &cell_token(cell))
        .replace("{{index}}", &image_index.to_string())
        .replace("{{date}}", &date.format("%Y-%m-%d").to_string())
}

/// Joins the images folder and a file name with `/`; an empty folder
/// means the vault root.
pub fn image_path(folder: &str, file_name: &str) -> String {
    let folder = folder.trim_end_matches('/');
    if folder.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", folder, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn sanitize_replaces_and_collapses() {
        assert_eq!(sanitize("My Notebook!"), "My_Notebook_");
        assert_eq!(sanitize("a/b\\c?d%e*f:g|h\"i<j>k"), "a_b_c_d_e_f_g_h_i_j_k");
        assert_eq!(sanitize("too   many  __ gaps"), "too_many_gaps");
    }

    #[test]
    fn sanitize_truncates_by_characters() {
        let long = "é".repeat(80);
        assert_eq!(sanitize(&long).chars().count(), MAX_NAME_LENGTH);
    }

    #[test]
    fn format_name_substitutes_tokens() {
        let name = format_name("img_{{notebook}}_{{cell}}_{{index}}", "My Notebook!", "3", 0, day());
        assert_eq!(name, "img_My_Notebook__3_0");
    }

    #[test]
    fn selector_cells_are_sanitized() {
        let name = format_name("{{cell}}-{{index}}", "nb", "tag:my plot", 2, day());
        assert_eq!(name, "tag_my_plot-2");
    }

    #[test]
    fn date_and_repeated_tags() {
        let name = format_name("{{date}}/{{index}}/{{index}}", "nb", "0", 4, day());
        assert_eq!(name, "2024-03-09/4/4");
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let a = format_name(DEFAULT_TEMPLATE, "Analysis", "id:fig", 1, day());
        let b = format_name(DEFAULT_TEMPLATE, "Analysis", "id:fig", 1, day());
        assert_eq!(a, b);
        assert_eq!(a, "jupyter_image_Analysis_id_fig_1");
    }

    #[test]
    fn image_path_joins_folder() {
        assert_eq!(image_path("", "a.png"), "a.png");
        assert_eq!(image_path("attachments/", "a.png"), "attachments/a.png");
    }
}
