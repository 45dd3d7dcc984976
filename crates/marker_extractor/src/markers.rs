// crates/marker_extractor/src/markers.rs

use embed_error::{EmbedError, Result};
use std::fmt;

/// One side of a marker pair, optionally qualified as `NAME:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub name: String,
    pub id: Option<String>,
}

impl Marker {
    /// Splits `raw` at the first `:` into name and id.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((name, id)) => Marker {
                name: name.to_string(),
                id: Some(id.to_string()),
            },
            None => Marker {
                name: raw.to_string(),
                id: None,
            },
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}:{}", self.name, id),
            None => f.write_str(&self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
    pub start: Marker,
    pub end: Marker,
}

impl MarkerPair {
    pub fn new(start: &str, end: &str) -> Self {
        MarkerPair {
            start: Marker::parse(start.trim()),
            end: Marker::parse(end.trim()),
        }
    }
}

/// Parses `"START_MARKER[:id],END_MARKER[:id]"`.
///
/// Exactly one comma is accepted; anything else is a [`EmbedError::Format`].
pub fn parse_marker_spec(spec: &str) -> Result<MarkerPair> {
    let parts: Vec<&str> = spec.split(',').collect();
    if parts.len() != 2 {
        return Err(EmbedError::Format(
            "MARKERS should contain exactly two markers separated by comma".to_string(),
        ));
    }
    Ok(MarkerPair::new(parts[0], parts[1]))
}
