// crates/lang_support/src/style.rs

/// How a language writes the comments that carry snippet markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentStyle {
    /// Line comment introduced by a single token, e.g. `//` or `#`.
    Line(String),
    /// Paired delimiters, e.g. `<!--` and `-->`.
    Block { open: String, close: String },
}

impl CommentStyle {
    /// Parses a style token. A comma splits it into an open/close pair;
    /// tokens after the second are ignored.
    pub fn parse(token: &str) -> Self {
        let mut parts = token.split(',');
        match (parts.next(), parts.next()) {
            (Some(open), Some(close)) => CommentStyle::Block {
                open: open.to_string(),
                close: close.to_string(),
            },
            _ => CommentStyle::Line(token.to_string()),
        }
    }

    /// Renders the style back into its configuration token.
    pub fn token(&self) -> String {
        match self {
            CommentStyle::Line(t) => t.clone(),
            CommentStyle::Block { open, close } => format!("{},{}", open, close),
        }
    }
}
