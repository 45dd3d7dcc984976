// crates/cell_renderer/src/images.rs

use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::NaiveDate;
use image_namer::{format_name, image_path, IMAGE_EXTENSION};

/// Persists decoded image bytes.
///
/// Implementations return the reference to put in the markdown link
/// (usually the path they were given).
pub trait ImageStore {
    fn save(&self, path: &str, bytes: &[u8]) -> Result<String>;
}

/// Everything needed to name and store the images of one render call.
pub struct ImageContext<'a> {
    pub store: &'a dyn ImageStore,
    pub notebook_name: &'a str,
    /// Cell selector as written by the user (`"3"`, `"tag:plot"`).
    pub cell: &'a str,
    pub folder: &'a str,
    pub name_template: &'a str,
    pub date: NaiveDate,
}

impl ImageContext<'_> {
    /// Vault path the `index`-th image of this cell is saved under.
    pub fn target_path(&self, index: usize) -> String {
        let name = format_name(self.name_template, self.notebook_name, self.cell, index, self.date);
        image_path(self.folder, &format!("{}.{}", name, IMAGE_EXTENSION))
    }
}

fn strip_whitespace(payload: &str) -> String {
    payload.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Markdown image with the PNG inlined as a data URI.
pub fn inline_image(payload: &str) -> String {
    format!("![](data:image/png;base64,{})", strip_whitespace(payload))
}

pub(crate) fn embed_image(payload: &str, index: usize, ctx: Option<&ImageContext<'_>>) -> String {
    let Some(ctx) = ctx else {
        return inline_image(payload);
    };

    let path = ctx.target_path(index);
    let bytes = match STANDARD.decode(strip_whitespace(payload)) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(%path, error = %e, "image payload is not valid base64, embedding inline");
            return inline_image(payload);
        }
    };

    match ctx.store.save(&path, &bytes) {
        Ok(stored) => {
            tracing::debug!(%stored, "image saved");
            format!("![]({})", stored)
        }
        Err(e) => {
            tracing::warn!(%path, error = %e, "failed to save notebook image, embedding inline");
            inline_image(payload)
        }
    }
}
