// crates/cell_renderer/src/kinds.rs

use embed_error::EmbedError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which facet of a cell to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Code,
    Output,
    Markdown,
    Raw,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Code => "code",
            ContentKind::Output => "output",
            ContentKind::Markdown => "markdown",
            ContentKind::Raw => "raw",
        }
    }
}

impl FromStr for ContentKind {
    type Err = EmbedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(ContentKind::Code),
            "output" => Ok(ContentKind::Output),
            "markdown" => Ok(ContentKind::Markdown),
            "raw" => Ok(ContentKind::Raw),
            other => Err(EmbedError::Format(format!(
                "unknown CONTENT '{}', expected code, output, markdown or raw",
                other
            ))),
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How rich outputs (images, HTML) are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Images become markdown image links, HTML a fenced `html` block.
    #[default]
    Markdown,
    /// Only text payloads are rendered.
    Raw,
}

impl FromStr for OutputFormat {
    type Err = EmbedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            other => Err(EmbedError::Format(format!("unknown output format '{}'", other))),
        }
    }
}
