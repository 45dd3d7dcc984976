// crates/embed_code/src/block.rs

use embed_error::EmbedError;
use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Info-string prefix of an embed block.
pub const EMBED_PREFIX: &str = "embed-";

/// Language name reserved for notebook embeds.
pub const JUPYTER: &str = "jupyter";

/// What an embed block renders: a source file in some language, or a
/// notebook cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedTarget {
    Source(String),
    Jupyter,
}

impl EmbedTarget {
    /// Accepts `embed-python`, `python`, `embed-jupyter`, ...
    pub fn parse(info: &str) -> Self {
        let name = info.trim();
        let name = name.strip_prefix(EMBED_PREFIX).unwrap_or(name);
        if name == JUPYTER {
            EmbedTarget::Jupyter
        } else {
            EmbedTarget::Source(name.to_string())
        }
    }
}

/// A YAML scalar read as text, so `CELL: 3` and `CELL: "3"` agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar(pub String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_yaml::Value::deserialize(deserializer)? {
            serde_yaml::Value::String(s) => Ok(Scalar(s)),
            serde_yaml::Value::Number(n) => Ok(Scalar(n.to_string())),
            serde_yaml::Value::Bool(b) => Ok(Scalar(b.to_string())),
            serde_yaml::Value::Null => Ok(Scalar(String::new())),
            _ => Err(de::Error::custom("expected a scalar value")),
        }
    }
}

impl Scalar {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Distinguishes `KEY:` (present, null) from an absent key.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of an embed block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BlockMeta {
    #[serde(rename = "PATH")]
    pub path: Option<Scalar>,
    #[serde(rename = "LINES")]
    pub lines: Option<Scalar>,
    #[serde(rename = "MARKERS", default, deserialize_with = "present")]
    pub markers: Option<Option<Scalar>>,
    #[serde(rename = "TITLE")]
    pub title: Option<Scalar>,
    #[serde(rename = "CELL")]
    pub cell: Option<Scalar>,
    #[serde(rename = "CONTENT")]
    pub content: Option<Scalar>,
}

impl BlockMeta {
    pub fn parse(yaml: &str) -> Result<Self, EmbedError> {
        if yaml.trim().is_empty() {
            return Ok(BlockMeta::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| {
            tracing::debug!(error = %e, "embed block YAML rejected");
            EmbedError::Format("invalid embedding (invalid YAML)".to_string())
        })
    }

    /// Non-empty `PATH`.
    pub fn path(&self) -> Result<&str, EmbedError> {
        match self.path.as_ref().map(Scalar::as_str) {
            Some(p) if !p.trim().is_empty() => Ok(p.trim()),
            _ => Err(EmbedError::Format("invalid source path".to_string())),
        }
    }

    pub fn lines(&self) -> Option<&str> {
        self.lines.as_ref().map(Scalar::as_str).filter(|s| !s.trim().is_empty())
    }

    /// `None` when no `MARKERS` key; `Some("")` when the key is empty and
    /// the configured default pair applies.
    pub fn markers(&self) -> Option<&str> {
        self.markers
            .as_ref()
            .map(|m| m.as_ref().map(Scalar::as_str).unwrap_or(""))
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_ref().map(Scalar::as_str)
    }

    pub fn cell(&self) -> &str {
        self.cell.as_ref().map(Scalar::as_str).unwrap_or("0")
    }

    pub fn content(&self) -> &str {
        self.content.as_ref().map(Scalar::as_str).unwrap_or("code")
    }
}
