// crates/cell_renderer/src/lib.rs

//! Turns one notebook cell into the text shown in place of an embed block.
//!
//! Code, markdown and raw cells render their source verbatim. Output
//! rendering walks the cell's outputs in order, embeds `image/png`
//! payloads through an optional [`ImageStore`], and truncates the result
//! to the configured size.

mod images;
mod kinds;

pub use images::{inline_image, ImageContext, ImageStore};
pub use kinds::{ContentKind, OutputFormat};

use embed_error::{EmbedError, Result};
use jupyter_notebook::{Cell, CellType, Output};

/// Appended after output cut at `max_output_size` characters.
pub const TRUNCATION_SUFFIX: &str = "... (output truncated)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub output_format: OutputFormat,
    /// Output length limit, in characters.
    pub max_output_size: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Markdown,
            max_output_size: 1000,
        }
    }
}

/// Renders the `kind` facet of `cell`.
///
/// `images` enables saving images through a store; without it images are
/// inlined as base64 data URIs.
pub fn render(
    cell: &Cell,
    kind: ContentKind,
    options: &RenderOptions,
    images: Option<&ImageContext<'_>>,
) -> Result<String> {
    match (&cell.cell_type, kind) {
        (CellType::Code, ContentKind::Code)
        | (CellType::Markdown, ContentKind::Markdown)
        | (CellType::Raw, ContentKind::Raw) => Ok(cell.source_text()),
        (CellType::Code, ContentKind::Output) => Ok(render_outputs(&cell.outputs, options, images)),
        (cell_type, kind) => Err(EmbedError::Mismatch(format!(
            "Could not extract {} from {} cell",
            kind,
            cell_type.as_str()
        ))),
    }
}

fn render_outputs(outputs: &[Output], options: &RenderOptions, images: Option<&ImageContext<'_>>) -> String {
    let markdown = options.output_format == OutputFormat::Markdown;
    let mut result = String::new();
    let mut image_index = 0;

    for output in outputs {
        match output {
            Output::Stream { text, .. } => result.push_str(&text.joined()),
            Output::ExecuteResult { data, .. } | Output::DisplayData { data, .. } => {
                if let Some(plain) = data.text("text/plain") {
                    result.push_str(&plain);
                } else if markdown && data.contains("image/png") {
                    let payload = data.text("image/png").unwrap_or_default();
                    result.push_str(&images::embed_image(&payload, image_index, images));
                    result.push('\n');
                    image_index += 1;
                } else if markdown {
                    if let Some(html) = data.text("text/html") {
                        result.push_str("\n```html\n");
                        result.push_str(&html);
                        result.push_str("\n```\n");
                    }
                }
            }
            Output::Error {
                ename,
                evalue,
                traceback,
            } => {
                result.push_str(&format!("Error: {}: {}\n", ename, evalue));
                result.push_str(&traceback.join("\n"));
            }
            Output::Unknown => {}
        }
    }

    truncate(result, options.max_output_size)
}

/// Cuts `text` to `max_chars` characters and marks the cut.
pub fn truncate(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            tracing::debug!(max_chars, "output truncated");
            let mut cut = text[..byte_idx].to_string();
            cut.push_str(TRUNCATION_SUFFIX);
            cut
        }
        None => text,
    }
}
