// crates/jupyter_notebook/src/text.rs

use serde::{Deserialize, Serialize};

/// nbformat "multiline string": either one string or a list of lines that
/// already carry their own `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MultilineText {
    Single(String),
    Lines(Vec<String>),
}

impl MultilineText {
    /// Concatenates the lines verbatim.
    pub fn joined(&self) -> String {
        match self {
            MultilineText::Single(s) => s.clone(),
            MultilineText::Lines(lines) => lines.concat(),
        }
    }
}

impl Default for MultilineText {
    fn default() -> Self {
        MultilineText::Lines(Vec::new())
    }
}
