// crates/embed_code/src/embedder.rs

use cell_renderer::{render, ContentKind, ImageContext, ImageStore};
use chrono::{Local, NaiveDate};
use embed_error::{EmbedError, Result};
use jupyter_notebook::{notebook_name_from_path, parse_notebook, CellSelector, CellType, Notebook, Cell};
use lang_support::is_included;
use line_selector::{parse_line_spec, render_lines};
use marker_extractor::{extract_region, parse_marker_spec, MarkerPair};

use crate::block::{BlockMeta, EmbedTarget};
use crate::config::Settings;
use crate::display::{error_markdown, Rendered};
use crate::services::{SourceFetcher, SourceLocation};

const DEFAULT_NOTEBOOK_LANGUAGE: &str = "python";

/// Renders embed blocks against injected collaborators.
pub struct Embedder<'a> {
    settings: &'a Settings,
    fetcher: &'a dyn SourceFetcher,
    image_store: Option<&'a dyn ImageStore>,
    today: NaiveDate,
}

impl<'a> Embedder<'a> {
    pub fn new(settings: &'a Settings, fetcher: &'a dyn SourceFetcher) -> Self {
        Self {
            settings,
            fetcher,
            image_store: None,
            today: Local::now().date_naive(),
        }
    }

    /// Used only when `save_images_to_attachments` is on.
    pub fn with_image_store(mut self, store: &'a dyn ImageStore) -> Self {
        self.image_store = Some(store);
        self
    }

    /// Pins the `{{date}}` used in image names.
    pub fn with_date(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Renders one block given its info string (`embed-python`) and YAML body.
    pub fn render(&self, info: &str, yaml: &str) -> Result<Rendered> {
        match EmbedTarget::parse(info) {
            EmbedTarget::Jupyter => {
                if !self.settings.jupyter_support {
                    return Err(EmbedError::Format(
                        "Jupyter notebook support is disabled".to_string(),
                    ));
                }
                self.render_notebook(yaml)
            }
            EmbedTarget::Source(lang) => {
                if !is_included(&self.settings.included_languages, &lang) {
                    return Err(EmbedError::Format(format!(
                        "language '{}' is not in the included languages",
                        lang
                    )));
                }
                self.render_source(&lang, yaml)
            }
        }
    }

    /// [`Embedder::render`] with failures formatted for inline display.
    pub fn render_markdown(&self, info: &str, yaml: &str) -> String {
        match self.render(info, yaml) {
            Ok(rendered) => rendered.to_string(),
            Err(err) => {
                tracing::warn!(info, kind = ?err.kind(), error = %err, "embed failed");
                error_markdown(&err)
            }
        }
    }

    fn fetch(&self, location: &SourceLocation) -> Result<String> {
        self.fetcher.fetch(location).map_err(|e| {
            tracing::debug!(error = ?e, "source fetch failed");
            EmbedError::NotFound(e.to_string())
        })
    }

    fn title(&self, explicit: Option<&str>, default: String) -> Option<String> {
        if self.settings.hide_title {
            return None;
        }
        match explicit {
            Some("") => None,
            Some(title) => Some(title.to_string()),
            None => Some(default),
        }
    }

    fn default_markers(&self) -> MarkerPair {
        MarkerPair::new(
            &self.settings.default_start_marker,
            &self.settings.default_end_marker,
        )
    }

    fn render_source(&self, lang: &str, yaml: &str) -> Result<Rendered> {
        let meta = BlockMeta::parse(yaml)?;
        let location = SourceLocation::parse(meta.path()?)?;
        let full_source = self.fetch(&location)?;

        let body = if let Some(markers) = meta.markers() {
            let pair = if markers.trim().is_empty() {
                self.default_markers()
            } else {
                parse_marker_spec(markers)?
            };
            extract_region(
                &full_source,
                &pair.start,
                &pair.end,
                lang,
                &self.settings.comment_styles,
            )?
        } else {
            match meta.lines() {
                Some(spec) => {
                    let spec = parse_line_spec(spec)?;
                    if spec.is_empty() {
                        full_source
                    } else {
                        render_lines(&full_source, &spec)
                    }
                }
                None => full_source,
            }
        };

        Ok(Rendered::Fenced {
            language: lang.to_string(),
            title: self.title(meta.title(), location.display_path().to_string()),
            body,
        })
    }

    fn render_notebook(&self, yaml: &str) -> Result<Rendered> {
        let meta = BlockMeta::parse(yaml)?;
        let location = SourceLocation::parse(meta.path()?)?;
        let content = self.fetch(&location)?;

        let cell_raw = meta.cell();
        let content_raw = meta.content();
        let notebook = parse_notebook(&content)?;
        let cell = notebook.select_cell(&CellSelector::parse(cell_raw))?;
        let kind: ContentKind = content_raw.parse()?;

        let notebook_name = notebook_name_from_path(location.display_path());
        let image_ctx = match self.image_store {
            Some(store) if self.settings.save_images_to_attachments => Some(ImageContext {
                store,
                notebook_name,
                cell: cell_raw,
                folder: &self.settings.images_folder_path,
                name_template: &self.settings.image_name_template,
                date: self.today,
            }),
            _ => None,
        };

        let body = render(cell, kind, &self.settings.render_options(), image_ctx.as_ref())?;

        if kind == ContentKind::Markdown && cell.cell_type == CellType::Markdown {
            return Ok(Rendered::Markdown(body));
        }

        let default_title = format!(
            "{} ({} from cell {})",
            location.display_path(),
            content_raw,
            cell_raw
        );
        Ok(Rendered::Fenced {
            language: fence_language(kind, cell, &notebook).to_string(),
            title: self.title(meta.title(), default_title),
            body,
        })
    }
}

fn fence_language<'n>(kind: ContentKind, cell: &'n Cell, notebook: &'n Notebook) -> &'n str {
    match kind {
        ContentKind::Code => cell
            .kernel_language()
            .or_else(|| notebook.language())
            .unwrap_or(DEFAULT_NOTEBOOK_LANGUAGE),
        ContentKind::Output | ContentKind::Markdown | ContentKind::Raw => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::collections::HashMap;

    struct MapFetcher(HashMap<String, String>);

    impl SourceFetcher for MapFetcher {
        fn fetch(&self, location: &SourceLocation) -> anyhow::Result<String> {
            self.0
                .get(location.display_path())
                .cloned()
                .ok_or_else(|| anyhow!("couldn't read file '{}'", location.display_path()))
        }
    }

    fn fetcher(files: &[(&str, &str)]) -> MapFetcher {
        MapFetcher(files.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }

    #[test]
    fn whole_file_with_default_title() {
        let settings = Settings::default();
        let f = fetcher(&[("a.py", "x = 1\ny = 2")]);
        let out = Embedder::new(&settings, &f).render_markdown("embed-python", "PATH: vault://a.py");
        assert_eq!(out, "```python title=\"a.py\"\nx = 1\ny = 2\n```");
    }

    #[test]
    fn lines_and_custom_title() {
        let settings = Settings::default();
        let f = fetcher(&[("a.py", "1\n2\n3\n4")]);
        let out = Embedder::new(&settings, &f)
            .render_markdown("python", "PATH: vault://a.py\nLINES: 2-3\nTITLE: Snippet");
        assert_eq!(out, "```python title=\"Snippet\"\n...\n2\n3\n...\n```");
    }

    #[test]
    fn empty_markers_use_the_configured_pair() {
        let settings = Settings::default();
        let f = fetcher(&[("a.sh", "echo pre\n# BEGIN_SNIPPET\necho in\n# END_SNIPPET\n")]);
        let out = Embedder::new(&settings, &f)
            .render_markdown("sh", "PATH: vault://a.sh\nMARKERS:\nTITLE: \"\"");
        assert_eq!(out, "```sh\necho in\n```");
    }

    #[test]
    fn markers_take_precedence_over_lines() {
        let settings = Settings::default();
        let f = fetcher(&[("a.js", "// S\nkeep();\n// E\nother();")]);
        let rendered = Embedder::new(&settings, &f)
            .render("js", "PATH: vault://a.js\nMARKERS: S,E\nLINES: 4")
            .unwrap();
        match rendered {
            Rendered::Fenced { body, .. } => assert_eq!(body, "keep();"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn failures_are_inline_errors() {
        let settings = Settings::default();
        let f = fetcher(&[("a.py", "no markers")]);
        let e = Embedder::new(&settings, &f);
        assert_eq!(
            e.render_markdown("python", "PATH: vault://a.py\nMARKERS: A,B,C"),
            "`ERROR: MARKERS should contain exactly two markers separated by comma`"
        );
        assert_eq!(
            e.render_markdown("python", "PATH: vault://gone.py"),
            "`ERROR: couldn't read file 'gone.py'`"
        );
        assert_eq!(
            e.render_markdown("python", "PATH: c:/a.py"),
            "`ERROR: invalid source path, use 'vault://...' or 'http[s]://...'`"
        );
        assert_eq!(
            e.render_markdown("rust", "PATH: vault://a.py"),
            "`ERROR: language 'rust' is not in the included languages`"
        );
    }

    #[test]
    fn hide_title_drops_every_title() {
        let settings = Settings {
            hide_title: true,
            ..Settings::default()
        };
        let f = fetcher(&[("a.c", "int x;")]);
        let out = Embedder::new(&settings, &f).render_markdown("c", "PATH: vault://a.c\nTITLE: T");
        assert_eq!(out, "```c\nint x;\n```");
    }

    #[test]
    fn notebooks_rejected_when_jupyter_support_is_off() {
        let settings = Settings {
            jupyter_support: false,
            ..Settings::default()
        };
        let f = fetcher(&[("n.ipynb", r#"{"cells": []}"#)]);
        let e = Embedder::new(&settings, &f);
        let err = e.render("embed-jupyter", "PATH: vault://n.ipynb").unwrap_err();
        assert_eq!(err.kind(), embed_error::ErrorKind::Format);
        assert_eq!(
            e.render_markdown("jupyter", "PATH: vault://n.ipynb"),
            "`ERROR: Jupyter notebook support is disabled`"
        );
    }

    #[test]
    fn html_markers_use_block_comments() {
        let settings = Settings {
            included_languages: "html".to_string(),
            ..Settings::default()
        };
        let f = fetcher(&[(
            "page.html",
            "<body>\n<!-- BEGIN_SNIPPET:nav -->\n<nav>home</nav>\n<!-- END_SNIPPET:nav -->\n</body>",
        )]);
        let out = Embedder::new(&settings, &f).render_markdown(
            "embed-html",
            "PATH: vault://page.html\nMARKERS: BEGIN_SNIPPET:nav,END_SNIPPET:nav\nTITLE: \"\"",
        );
        assert_eq!(out, "```html\n<nav>home</nav>\n```");
    }
}
