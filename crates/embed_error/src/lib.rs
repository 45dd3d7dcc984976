// crates/embed_error/src/lib.rs

//! Error taxonomy shared by every extraction crate in the workspace.
//!
//! Engine functions never encode failures inside their output strings;
//! they return an [`EmbedError`] and leave formatting to the caller.

/// Coarse category of an [`EmbedError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Format,
    Parse,
    NotFound,
    Mismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmbedError {
    /// A caller-supplied spec (marker pair, line spec, content kind) is malformed.
    #[error("{0}")]
    Format(String),

    /// Notebook content is not valid structured data.
    #[error("{0}")]
    Parse(String),

    /// A cell, marker pair or source could not be located.
    #[error("{0}")]
    NotFound(String),

    /// The requested content kind does not apply to the cell type.
    #[error("{0}")]
    Mismatch(String),
}

impl EmbedError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EmbedError::Format(_) => ErrorKind::Format,
            EmbedError::Parse(_) => ErrorKind::Parse,
            EmbedError::NotFound(_) => ErrorKind::NotFound,
            EmbedError::Mismatch(_) => ErrorKind::Mismatch,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            EmbedError::Format(m)
            | EmbedError::Parse(m)
            | EmbedError::NotFound(m)
            | EmbedError::Mismatch(m) => m,
        }
    }
}

pub type Result<T> = std::result::Result<T, EmbedError>;
