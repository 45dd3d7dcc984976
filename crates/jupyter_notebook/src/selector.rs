// crates/jupyter_notebook/src/selector.rs

use embed_error::{EmbedError, Result};
use std::fmt;
use std::str::FromStr;

use crate::model::{Cell, Notebook};

/// Identifies one cell: `3`, `id:intro`, `tag:plot` or `type:markdown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellSelector {
    Index(usize),
    Id(String),
    Tag(String),
    Type(String),
    /// Anything else; never matches a cell.
    Unrecognized(String),
}

impl CellSelector {
    pub fn parse(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            return match raw.parse::<usize>() {
                Ok(n) => CellSelector::Index(n),
                Err(_) => CellSelector::Unrecognized(raw.to_string()),
            };
        }
        if let Some(id) = raw.strip_prefix("id:") {
            CellSelector::Id(id.to_string())
        } else if let Some(tag) = raw.strip_prefix("tag:") {
            CellSelector::Tag(tag.to_string())
        } else if let Some(ty) = raw.strip_prefix("type:") {
            CellSelector::Type(ty.to_string())
        } else {
            CellSelector::Unrecognized(raw.to_string())
        }
    }

    fn matches(&self, cell: &Cell) -> bool {
        match self {
            CellSelector::Id(id) => cell.id() == Some(id.as_str()),
            CellSelector::Tag(tag) => cell.has_tag(tag),
            CellSelector::Type(ty) => cell.cell_type.as_str() == ty,
            CellSelector::Index(_) | CellSelector::Unrecognized(_) => false,
        }
    }
}

impl FromStr for CellSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(CellSelector::parse(s))
    }
}

impl fmt::Display for CellSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellSelector::Index(n) => write!(f, "{}", n),
            CellSelector::Id(id) => write!(f, "id:{}", id),
            CellSelector::Tag(tag) => write!(f, "tag:{}", tag),
            CellSelector::Type(ty) => write!(f, "type:{}", ty),
            CellSelector::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

impl Notebook {
    /// Resolves `selector` against the cells in document order. Index
    /// selectors are bounds-checked; the other forms return the first match.
    pub fn find_cell(&self, selector: &CellSelector) -> Option<&Cell> {
        match selector {
            CellSelector::Index(n) => self.cells.get(*n),
            _ => self.cells.iter().find(|cell| selector.matches(cell)),
        }
    }

    /// Like [`Notebook::find_cell`] but reports a miss as [`EmbedError::NotFound`].
    pub fn select_cell(&self, selector: &CellSelector) -> Result<&Cell> {
        self.find_cell(selector).ok_or_else(|| {
            tracing::debug!(%selector, cells = self.cells.len(), "cell selector matched nothing");
            EmbedError::NotFound("cell not found".to_string())
        })
    }
}
