// crates/jupyter_notebook/src/model.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::text::MultilineText;

// ---------------------------------------------------------------------------
//  Notebook
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub nbformat: u32,
    #[serde(default)]
    pub nbformat_minor: u32,
}

impl Notebook {
    /// Kernel language declared by the notebook: `kernelspec.language`,
    /// else `language_info.name`.
    pub fn language(&self) -> Option<&str> {
        self.metadata
            .path_str(&["kernelspec", "language"])
            .or_else(|| self.metadata.path_str(&["language_info", "name"]))
    }
}

// ---------------------------------------------------------------------------
//  Cells
// ---------------------------------------------------------------------------

/// `cell_type` of a cell. Types outside nbformat are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CellType {
    Code,
    Markdown,
    Raw,
    Other(String),
}

impl CellType {
    pub fn as_str(&self) -> &str {
        match self {
            CellType::Code => "code",
            CellType::Markdown => "markdown",
            CellType::Raw => "raw",
            CellType::Other(s) => s,
        }
    }
}

impl From<String> for CellType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "code" => CellType::Code,
            "markdown" => CellType::Markdown,
            "raw" => CellType::Raw,
            _ => CellType::Other(s),
        }
    }
}

impl From<CellType> for String {
    fn from(t: CellType) -> Self {
        t.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: CellType,
    /// Top-level cell id (nbformat 4.5+).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub source: MultilineText,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<Output>,
}

impl Cell {
    pub fn source_text(&self) -> String {
        self.source.joined()
    }

    /// `metadata.id`, falling back to the top-level cell id.
    pub fn id(&self) -> Option<&str> {
        self.metadata.str("id").or(self.id.as_deref())
    }

    pub fn tags(&self) -> Vec<&str> {
        match self.metadata.get("tags") {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| *t == tag)
    }

    /// `metadata.kernelspec.language` on the cell itself.
    pub fn kernel_language(&self) -> Option<&str> {
        self.metadata.path_str(&["kernelspec", "language"])
    }
}

// ---------------------------------------------------------------------------
//  Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "output_type", rename_all = "snake_case")]
pub enum Output {
    Stream {
        #[serde(default)]
        name: String,
        #[serde(default)]
        text: MultilineText,
    },
    ExecuteResult {
        #[serde(default)]
        data: MimeBundle,
        #[serde(default)]
        execution_count: Option<u64>,
        #[serde(default)]
        metadata: Metadata,
    },
    DisplayData {
        #[serde(default)]
        data: MimeBundle,
        #[serde(default)]
        metadata: Metadata,
    },
    Error {
        #[serde(default)]
        ename: String,
        #[serde(default)]
        evalue: String,
        #[serde(default)]
        traceback: Vec<String>,
    },
    #[serde(other)]
    Unknown,
}

impl Output {
    /// MIME bundle of `execute_result` / `display_data` outputs.
    pub fn data(&self) -> Option<&MimeBundle> {
        match self {
            Output::ExecuteResult { data, .. } | Output::DisplayData { data, .. } => Some(data),
            _ => None,
        }
    }
}

/// Output payloads keyed by MIME type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MimeBundle(BTreeMap<String, Value>);

impl MimeBundle {
    pub fn contains(&self, mime: &str) -> bool {
        self.0.contains_key(mime)
    }

    /// Text payload for `mime`, joining multiline arrays.
    pub fn text(&self, mime: &str) -> Option<String> {
        match self.0.get(mime)? {
            Value::String(s) => Some(s.clone()),
            Value::Array(parts) => Some(parts.iter().filter_map(Value::as_str).collect()),
            _ => None,
        }
    }
}

impl FromIterator<(String, Value)> for MimeBundle {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        MimeBundle(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
//  Metadata
// ---------------------------------------------------------------------------

/// Open key/value metadata with typed accessors for the keys we read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Follows nested objects along `path` and returns the string at the end.
    pub fn path_str(&self, path: &[&str]) -> Option<&str> {
        let (first, rest) = path.split_first()?;
        let mut cur = self.0.get(*first)?;
        for key in rest {
            cur = cur.get(*key)?;
        }
        cur.as_str()
    }
}
