// crates/lang_support/src/lib.rs

//! `lang_support`: per-language knowledge the extractors need, kept out
//! of the extraction crates themselves.
//!
//!  * **Comment styles** – which comment syntax a language uses, either a
//!    single line token (`//`, `#`) or an `open,close` pair (`<!--,-->`).
//!  * **Language lists** – the comma separated `included_languages`
//!    setting and the table keys share one splitting rule.
//!
//! The table is caller‑owned configuration; nothing here is global.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

mod style;

pub use style::CommentStyle;

/// Token used when no table entry names the language.
pub const DEFAULT_COMMENT_TOKEN: &str = "//";

/// Languages rendered out of the box.
pub const DEFAULT_INCLUDED_LANGUAGES: &str =
    "c,cs,cpp,java,python,go,ruby,javascript,js,typescript,ts,shell,sh,bash";

/// Maps comma separated language keys (`"python,ruby"`) to a style token
/// (`"#"` or `"<!--,-->"`).
///
/// Keys are visited in lexicographic order; when a language appears under
/// two keys the first key wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentStyles {
    entries: BTreeMap<String, String>,
}

impl CommentStyles {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Returns the raw style token configured for `language`, if any.
    pub fn token_for(&self, language: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(langs, _)| split_languages(langs).any(|l| l == language))
            .map(|(_, token)| token.as_str())
    }

    /// Resolves the comment style for `language`, falling back to `//`.
    pub fn resolve(&self, language: &str) -> CommentStyle {
        match self.token_for(language) {
            Some(token) => CommentStyle::parse(token),
            None => {
                tracing::debug!(language, "no comment style configured, using `//`");
                CommentStyle::parse(DEFAULT_COMMENT_TOKEN)
            }
        }
    }
}

impl Default for CommentStyles {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            "c,cpp,cs,java,javascript,js,typescript,ts".to_string(),
            "//".to_string(),
        );
        entries.insert("python,ruby,shell,sh,bash".to_string(), "#".to_string());
        entries.insert("html,xml".to_string(), "<!--,-->".to_string());
        Self { entries }
    }
}

/// Free-function form of [`CommentStyles::resolve`].
pub fn resolve_comment_style(language: &str, styles: &CommentStyles) -> CommentStyle {
    styles.resolve(language)
}

/// Splits a comma separated language list, trimming blanks and skipping
/// empty entries.
pub fn split_languages(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|l| !l.is_empty())
}

/// Returns `true` if `language` is named in the comma separated `list`.
pub fn is_included(list: &str, language: &str) -> bool {
    split_languages(list).any(|l| l == language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_the_common_languages() {
        let styles = CommentStyles::default();
        assert_eq!(styles.token_for("rust"), None);
        assert_eq!(styles.token_for("ts"), Some("//"));
        assert_eq!(styles.token_for("bash"), Some("#"));
        assert_eq!(styles.token_for("xml"), Some("<!--,-->"));
    }

    #[test]
    fn key_lookup_is_exact_not_substring() {
        // "java" must not match the "javascript" entry only by prefix
        let mut entries = BTreeMap::new();
        entries.insert("javascript".to_string(), "//".to_string());
        let styles = CommentStyles::new(entries);
        assert_eq!(styles.token_for("java"), None);
    }

    #[test]
    fn unknown_language_defaults_to_double_slash() {
        let styles = CommentStyles::default();
        assert_eq!(
            resolve_comment_style("haskell", &styles),
            CommentStyle::Line("//".to_string())
        );
    }

    #[test]
    fn included_language_list() {
        assert!(is_included(DEFAULT_INCLUDED_LANGUAGES, "python"));
        assert!(is_included(" go , rust ", "rust"));
        assert!(!is_included(DEFAULT_INCLUDED_LANGUAGES, "rust"));
        assert!(!is_included("", ""));
    }
}
