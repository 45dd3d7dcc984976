// crates/jupyter_notebook/src/lib.rs

//! Read-only model of an `.ipynb` (nbformat 4) document.
//!
//! Only the parts the renderer needs are typed; everything else in cell
//! metadata and output bundles is kept as an open JSON map with accessors
//! for the well-known keys.

mod model;
mod selector;
mod text;

pub use model::{Cell, CellType, Metadata, MimeBundle, Notebook, Output};
pub use selector::CellSelector;
pub use text::MultilineText;

use embed_error::{EmbedError, Result};

/// Parses notebook JSON.
pub fn parse_notebook(content: &str) -> Result<Notebook> {
    serde_json::from_str(content).map_err(|e| {
        tracing::debug!(error = %e, "notebook JSON rejected");
        EmbedError::Parse("Failed to parse Jupyter notebook: Invalid JSON".to_string())
    })
}

/// Returns the notebook name used in image file names: the last path
/// segment without its `.ipynb` extension.
pub fn notebook_name_from_path(path: &str) -> &str {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.strip_suffix(".ipynb").unwrap_or(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = parse_notebook("{ not json").unwrap_err();
        assert_eq!(err.kind(), embed_error::ErrorKind::Parse);
        assert!(parse_notebook("[1, 2]").is_err());
    }

    #[test]
    fn notebook_name() {
        assert_eq!(notebook_name_from_path("notes/ml/Train Model.ipynb"), "Train Model");
        assert_eq!(notebook_name_from_path("plain"), "plain");
    }
}
